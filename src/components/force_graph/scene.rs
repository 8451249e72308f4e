use super::symbol::GlyphPath;
use super::types::Point;

/// Drawing surface the renderer paints one frame onto.
pub trait Scene {
	fn clear(&mut self, width: f64, height: f64);
	fn draw_line(&mut self, from: Point, to: Point);
	/// Draws `glyph` translated to `at`.
	fn draw_glyph(&mut self, at: Point, glyph: &GlyphPath, fill: &str);
}

#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Clear { width: f64, height: f64 },
	Line { from: Point, to: Point },
	Glyph { at: Point, glyph: GlyphPath, fill: String },
}

/// Keeps every draw call for inspection.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingScene {
	pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingScene {
	pub fn lines(&self) -> Vec<(Point, Point)> {
		self.ops
			.iter()
			.filter_map(|op| match op {
				DrawOp::Line { from, to } => Some((*from, *to)),
				_ => None,
			})
			.collect()
	}

	pub fn glyphs(&self) -> Vec<(Point, &str)> {
		self.ops
			.iter()
			.filter_map(|op| match op {
				DrawOp::Glyph { at, fill, .. } => Some((*at, fill.as_str())),
				_ => None,
			})
			.collect()
	}
}

#[cfg(test)]
impl Scene for RecordingScene {
	fn clear(&mut self, width: f64, height: f64) {
		self.ops.clear();
		self.ops.push(DrawOp::Clear { width, height });
	}

	fn draw_line(&mut self, from: Point, to: Point) {
		self.ops.push(DrawOp::Line { from, to });
	}

	fn draw_glyph(&mut self, at: Point, glyph: &GlyphPath, fill: &str) {
		self.ops.push(DrawOp::Glyph {
			at,
			glyph: glyph.clone(),
			fill: fill.to_owned(),
		});
	}
}
