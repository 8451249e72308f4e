//! Node glyphs. Each symbol is sized by area so different shapes read as the
//! same visual weight.

use std::f64::consts::PI;

use super::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
	Circle,
	Cross,
	Diamond,
	Square,
	Star,
	Triangle,
	Wye,
}

/// Glyph outline centred on the origin.
#[derive(Clone, Debug, PartialEq)]
pub enum GlyphPath {
	Circle { radius: f64 },
	Polygon(Vec<Point>),
}

const SQRT3: f64 = 1.732_050_807_568_877_2;
const STAR_KA: f64 = 0.890_813_091_529_285_2;

impl Symbol {
	/// Shape-scale range, in assignment order.
	pub const ALL: [Symbol; 7] = [
		Symbol::Circle,
		Symbol::Cross,
		Symbol::Diamond,
		Symbol::Square,
		Symbol::Star,
		Symbol::Triangle,
		Symbol::Wye,
	];

	pub fn path(self, size: f64) -> GlyphPath {
		let size = size.max(0.0);
		match self {
			Symbol::Circle => GlyphPath::Circle {
				radius: (size / PI).sqrt(),
			},
			Symbol::Cross => {
				let r = (size / 5.0).sqrt() / 2.0;
				polygon(&[
					(-3.0 * r, -r),
					(-r, -r),
					(-r, -3.0 * r),
					(r, -3.0 * r),
					(r, -r),
					(3.0 * r, -r),
					(3.0 * r, r),
					(r, r),
					(r, 3.0 * r),
					(-r, 3.0 * r),
					(-r, r),
					(-3.0 * r, r),
				])
			}
			Symbol::Diamond => {
				let tan30 = (1.0f64 / 3.0).sqrt();
				let y = (size / (2.0 * tan30)).sqrt();
				let x = y * tan30;
				polygon(&[(0.0, -y), (x, 0.0), (0.0, y), (-x, 0.0)])
			}
			Symbol::Square => {
				let h = size.sqrt() / 2.0;
				polygon(&[(-h, -h), (h, -h), (h, h), (-h, h)])
			}
			Symbol::Star => {
				let kr = (PI / 10.0).sin() / (7.0 * PI / 10.0).sin();
				let (kx, ky) = ((2.0 * PI / 10.0).sin() * kr, -(2.0 * PI / 10.0).cos() * kr);
				let r = (size * STAR_KA).sqrt();
				let (x, y) = (kx * r, ky * r);
				let mut points = vec![(0.0, -r), (x, y)];
				for i in 1..5 {
					let a = 2.0 * PI * i as f64 / 5.0;
					let (c, s) = (a.cos(), a.sin());
					points.push((s * r, -c * r));
					points.push((c * x - s * y, s * x + c * y));
				}
				polygon(&points)
			}
			Symbol::Triangle => {
				let y = -(size / (SQRT3 * 3.0)).sqrt();
				polygon(&[(0.0, y * 2.0), (-SQRT3 * y, -y), (SQRT3 * y, -y)])
			}
			Symbol::Wye => {
				let (c, s) = (-0.5, SQRT3 / 2.0);
				let k = 1.0 / 12.0f64.sqrt();
				let a = (k / 2.0 + 1.0) * 3.0;
				let r = (size / a).sqrt();
				let (x0, y0) = (r / 2.0, r * k);
				let (x1, y1) = (x0, r * k + r);
				let (x2, y2) = (-x1, y1);
				polygon(&[
					(x0, y0),
					(x1, y1),
					(x2, y2),
					(c * x0 - s * y0, s * x0 + c * y0),
					(c * x1 - s * y1, s * x1 + c * y1),
					(c * x2 - s * y2, s * x2 + c * y2),
					(c * x0 + s * y0, c * y0 - s * x0),
					(c * x1 + s * y1, c * y1 - s * x1),
					(c * x2 + s * y2, c * y2 - s * x2),
				])
			}
		}
	}
}

fn polygon(points: &[(f64, f64)]) -> GlyphPath {
	GlyphPath::Polygon(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

#[cfg(test)]
impl GlyphPath {
	/// Enclosed area, via the shoelace formula for polygons.
	pub fn area(&self) -> f64 {
		match self {
			GlyphPath::Circle { radius } => PI * radius * radius,
			GlyphPath::Polygon(points) => {
				let n = points.len();
				let twice: f64 = (0..n)
					.map(|i| {
						let (a, b) = (points[i], points[(i + 1) % n]);
						a.x * b.y - b.x * a.y
					})
					.sum();
				twice.abs() / 2.0
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn glyphs_share_the_requested_area() {
		for symbol in Symbol::ALL {
			let area = symbol.path(150.0).area();
			assert!((area - 150.0).abs() < 1e-6, "{symbol:?} has area {area}");
		}
	}

	#[test]
	fn star_has_ten_points_and_is_centred() {
		let GlyphPath::Polygon(points) = Symbol::Star.path(150.0) else {
			panic!("star should be a polygon");
		};
		assert_eq!(points.len(), 10);
		let r = (150.0 * STAR_KA).sqrt();
		assert!((points[0].y + r).abs() < 1e-9);
		let cx: f64 = points.iter().map(|p| p.x).sum::<f64>() / 10.0;
		assert!(cx.abs() < 1e-9);
	}

	#[test]
	fn zero_size_collapses_to_a_point() {
		assert_eq!(Symbol::Square.path(0.0).area(), 0.0);
		assert_eq!(Symbol::Circle.path(-4.0), GlyphPath::Circle { radius: 0.0 });
	}
}
