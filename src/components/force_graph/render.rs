use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::LayoutEngine;
use super::scene::Scene;
use super::state::GraphRenderer;
use super::symbol::GlyphPath;
use super::types::Point;

const BACKGROUND: &str = "#1a1a2e";
const LINK_STROKE: &str = "rgba(153, 153, 153, 0.6)";
const LINK_WIDTH: f64 = 1.0;
const NODE_STROKE: &str = "#fff";
const NODE_STROKE_WIDTH: f64 = 1.0;

/// [`Scene`] over a 2D canvas context.
pub struct CanvasScene<'a> {
	ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasScene<'a> {
	pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl Scene for CanvasScene<'_> {
	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.set_fill_style_str(BACKGROUND);
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn draw_line(&mut self, from: Point, to: Point) {
		let ctx = self.ctx;
		ctx.set_stroke_style_str(LINK_STROKE);
		ctx.set_line_width(LINK_WIDTH);
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
	}

	fn draw_glyph(&mut self, at: Point, glyph: &GlyphPath, fill: &str) {
		let ctx = self.ctx;
		ctx.save();
		let _ = ctx.translate(at.x, at.y);
		ctx.begin_path();
		match glyph {
			GlyphPath::Circle { radius } => {
				let _ = ctx.arc(0.0, 0.0, *radius, 0.0, 2.0 * PI);
			}
			GlyphPath::Polygon(points) => {
				let mut points = points.iter();
				if let Some(first) = points.next() {
					ctx.move_to(first.x, first.y);
				}
				for p in points {
					ctx.line_to(p.x, p.y);
				}
				ctx.close_path();
			}
		}
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(NODE_STROKE_WIDTH);
		ctx.stroke();
		ctx.restore();
	}
}

pub fn render<L: LayoutEngine>(state: &GraphRenderer<L>, ctx: &CanvasRenderingContext2d) {
	state.draw(&mut CanvasScene::new(ctx));
}
