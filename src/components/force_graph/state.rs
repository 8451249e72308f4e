use std::collections::HashMap;

use log::{debug, warn};

use super::encoding::Encodings;
use super::layout::{Energy, ForceLayout, LayoutEngine, seed_position};
use super::scale::{LinearScale, extent};
use super::scene::Scene;
use super::symbol::GlyphPath;
use super::types::{GraphData, GraphNode, GraphOptions, Point};

pub const HIT_RADIUS: f64 = 12.0;

/// Source of a drag: the mouse, or one touch point by its identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
	Mouse,
	Touch(i32),
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Set while any gesture holds a node. Freezes the pixel scales.
	pub dragging: bool,
	gestures: Vec<(Gesture, usize)>,
}

impl DragState {
	pub fn node(&self, gesture: Gesture) -> Option<usize> {
		self.gestures
			.iter()
			.find(|(g, _)| *g == gesture)
			.map(|&(_, node)| node)
	}

	#[cfg(test)]
	pub fn active(&self) -> usize {
		self.gestures.len()
	}
}

#[derive(Clone, Debug)]
pub struct NodeVisual {
	pub fill: &'static str,
	pub glyph: GlyphPath,
}

pub struct GraphRenderer<L = ForceLayout> {
	layout: L,
	pub energy: Energy,
	nodes: Vec<GraphNode>,
	visuals: Vec<NodeVisual>,
	links: Vec<(usize, usize)>,
	x: LinearScale,
	y: LinearScale,
	pub drag: DragState,
	pub width: f64,
	pub height: f64,
	padding: f64,
}

impl GraphRenderer {
	pub fn new(data: &GraphData, options: &GraphOptions, width: f64, height: f64) -> Self {
		let center = Point::new(width / 2.0, height / 2.0);
		Self::with_layout(ForceLayout::new(center), data, options, width, height)
	}
}

impl<L: LayoutEngine> GraphRenderer<L> {
	pub fn with_layout(
		mut layout: L,
		data: &GraphData,
		options: &GraphOptions,
		width: f64,
		height: f64,
	) -> Self {
		let mut nodes = data.nodes.clone();
		let encodings = Encodings::build(&mut nodes, options);
		let center = Point::new(width / 2.0, height / 2.0);
		layout.set_center(center);

		let mut id_to_idx = HashMap::new();
		let mut visuals = Vec::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			let idx = layout.add_node(seed_position(i, center));
			if let Some(id) = &node.id {
				id_to_idx.insert(id.clone(), idx);
			}
			let symbol = encodings.symbol_of(node);
			visuals.push(NodeVisual {
				fill: encodings.color_of(node),
				glyph: symbol.path(options.symbol_size),
			});
		}

		let resolve = |id: &Option<String>| id.as_ref().and_then(|id| id_to_idx.get(id)).copied();
		let mut links = Vec::new();
		for link in &data.links {
			match (resolve(&link.source), resolve(&link.target)) {
				(Some(src), Some(tgt)) => {
					layout.add_link(src, tgt);
					links.push((src, tgt));
				}
				_ => warn!(
					"dropping link {:?} -> {:?}: endpoint not among the nodes",
					link.source, link.target
				),
			}
		}
		debug!(
			"graph ready: {} nodes, {} links, {} colors, {} shapes",
			nodes.len(),
			links.len(),
			encodings.color.domain().len(),
			encodings.shape.domain().len()
		);

		let padding = options.padding;
		let mut renderer = Self {
			layout,
			energy: Energy::default(),
			nodes,
			visuals,
			links,
			x: LinearScale::new((padding, width - padding)),
			y: LinearScale::new((padding, height - padding)),
			drag: DragState::default(),
			width,
			height,
			padding,
		};
		renderer.fit_scales();
		renderer
	}

	/// One animation step: advance the physics while it has energy, then
	/// refit the pixel scales unless a drag has them frozen.
	pub fn tick(&mut self, dt: f64) {
		if let Some(alpha) = self.energy.cool() {
			self.layout.step(dt * alpha);
		}
		if !self.drag.dragging {
			self.fit_scales();
		}
	}

	fn fit_scales(&mut self) {
		let positions: Vec<Point> = (0..self.nodes.len())
			.map(|i| self.layout.position(i))
			.collect();
		if let Some(domain) = extent(positions.iter().map(|p| p.x)) {
			self.x.set_domain(domain);
		}
		if let Some(domain) = extent(positions.iter().map(|p| p.y)) {
			self.y.set_domain(domain);
		}
	}

	/// Pixel position of a node.
	pub fn project(&self, node: usize) -> Point {
		let p = self.layout.position(node);
		Point::new(self.x.map(p.x), self.y.map(p.y))
	}

	/// Layout position under a pixel.
	pub fn unproject(&self, px: f64, py: f64) -> Point {
		Point::new(self.x.invert(px), self.y.invert(py))
	}

	pub fn draw(&self, scene: &mut impl Scene) {
		scene.clear(self.width, self.height);
		for &(src, tgt) in &self.links {
			scene.draw_line(self.project(src), self.project(tgt));
		}
		for (i, visual) in self.visuals.iter().enumerate() {
			scene.draw_glyph(self.project(i), &visual.glyph, visual.fill);
		}
	}

	/// Topmost node within [`HIT_RADIUS`] of a pixel.
	pub fn node_at_position(&self, px: f64, py: f64) -> Option<usize> {
		(0..self.visuals.len()).rev().find(|&i| {
			let p = self.project(i);
			(p.x - px).hypot(p.y - py) < HIT_RADIUS
		})
	}

	pub fn drag_start(&mut self, gesture: Gesture, node: usize) {
		if node >= self.nodes.len() {
			return;
		}
		// A gesture whose end was never delivered releases its old node first.
		if self.drag.node(gesture).is_some() {
			self.drag_end(gesture);
		}
		if self.drag.gestures.is_empty() {
			self.energy.set_target(Energy::DRAG_TARGET);
			self.energy.restart();
		}

		let at = self.layout.position(node);
		self.layout.set_fixed(node, Some(at));
		self.drag.gestures.push((gesture, node));
		self.drag.dragging = true;
		debug!("drag start {:?} on node {:?}", gesture, self.nodes[node].id);
	}

	pub fn drag_move(&mut self, gesture: Gesture, px: f64, py: f64) {
		let Some(node) = self.drag.node(gesture) else {
			return;
		};
		let at = self.unproject(px, py);
		self.layout.set_fixed(node, Some(at));
	}

	pub fn drag_end(&mut self, gesture: Gesture) {
		let Some(pos) = self.drag.gestures.iter().position(|(g, _)| *g == gesture) else {
			return;
		};
		let (_, node) = self.drag.gestures.remove(pos);
		// Another gesture may still hold the same node.
		if self.drag.gestures.iter().all(|&(_, held)| held != node) {
			self.layout.set_fixed(node, None);
		}
		if self.drag.gestures.is_empty() {
			self.energy.set_target(0.0);
		}
		self.drag.dragging = !self.drag.gestures.is_empty();
		debug!("drag end {:?} on node {:?}", gesture, self.nodes[node].id);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.x.set_range((self.padding, width - self.padding));
		self.y.set_range((self.padding, height - self.padding));
		self.layout.set_center(Point::new(width / 2.0, height / 2.0));
	}
}

#[cfg(test)]
impl<L: LayoutEngine> GraphRenderer<L> {
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn visuals(&self) -> &[NodeVisual] {
		&self.visuals
	}

	pub fn links(&self) -> &[(usize, usize)] {
		&self.links
	}

	pub fn layout(&self) -> &L {
		&self.layout
	}

	pub fn scales(&self) -> (&LinearScale, &LinearScale) {
		(&self.x, &self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::encoding::COLORS;
	use crate::components::force_graph::scene::RecordingScene;
	use crate::components::force_graph::symbol::Symbol;
	use crate::components::force_graph::types::GraphLink;
	use serde_json::json;

	/// Free nodes slide right and down by a fixed amount per step; pinned
	/// nodes sit on their pin.
	#[derive(Default)]
	struct DriftLayout {
		positions: Vec<Point>,
		fixed: Vec<Option<Point>>,
		links: Vec<(usize, usize)>,
		center: Point,
	}

	impl LayoutEngine for DriftLayout {
		fn add_node(&mut self, at: Point) -> usize {
			self.positions.push(at);
			self.fixed.push(None);
			self.positions.len() - 1
		}

		fn add_link(&mut self, source: usize, target: usize) {
			self.links.push((source, target));
		}

		fn step(&mut self, _dt: f64) {
			for (p, fixed) in self.positions.iter_mut().zip(&self.fixed) {
				match fixed {
					Some(pin) => *p = *pin,
					None => {
						p.x += 1.0;
						p.y += 0.5;
					}
				}
			}
		}

		fn position(&self, node: usize) -> Point {
			self.positions[node]
		}

		fn set_fixed(&mut self, node: usize, fixed: Option<Point>) {
			self.fixed[node] = fixed;
			if let Some(p) = fixed {
				self.positions[node] = p;
			}
		}

		fn fixed(&self, node: usize) -> Option<Point> {
			self.fixed[node]
		}

		fn set_center(&mut self, center: Point) {
			self.center = center;
		}
	}

	fn graph(nodes: serde_json::Value, edges: &[(i64, i64)]) -> GraphData {
		let nodes = nodes
			.as_array()
			.unwrap()
			.iter()
			.map(|row| GraphNode::from_row(row.as_object().cloned().unwrap()))
			.collect();
		let links = edges
			.iter()
			.map(|(from, to)| GraphLink {
				source: Some(from.to_string()),
				target: Some(to.to_string()),
			})
			.collect();
		GraphData { nodes, links }
	}

	fn path_graph() -> GraphData {
		graph(json!([{"id": 1}, {"id": 2}, {"id": 3}]), &[(1, 2), (2, 3)])
	}

	fn renderer(data: &GraphData) -> GraphRenderer<DriftLayout> {
		GraphRenderer::with_layout(
			DriftLayout::default(),
			data,
			&GraphOptions::default(),
			800.0,
			600.0,
		)
	}

	#[test]
	fn bare_nodes_share_one_color_and_one_shape() {
		let r = renderer(&path_graph());
		assert!(r.nodes().iter().all(|n| n.category("group") == Some("group".to_string())));
		assert!(r.nodes().iter().all(|n| n.category("type") == Some("type".to_string())));
		assert!(r.visuals().iter().all(|v| v.fill == COLORS[0]));
		let circle = Symbol::Circle.path(GraphOptions::default().symbol_size);
		assert!(r.visuals().iter().all(|v| v.glyph == circle));
		assert_eq!(r.links(), [(0, 1), (1, 2)]);
		assert_eq!(r.layout().links, [(0, 1), (1, 2)]);

		let mut scene = RecordingScene::default();
		r.draw(&mut scene);
		assert_eq!(scene.lines().len(), 2);
		assert_eq!(scene.glyphs().len(), 3);
	}

	#[test]
	fn columns_drive_color_and_shape() {
		let data = graph(
			json!([
				{"id": "a", "group": "g1", "type": "t1"},
				{"id": "b", "group": "g2", "type": "t1"},
				{"id": "c", "group": "g1", "type": "t2"},
			]),
			&[],
		);
		let r = renderer(&data);
		let fills: Vec<_> = r.visuals().iter().map(|v| v.fill).collect();
		assert_eq!(fills, [COLORS[0], COLORS[1], COLORS[0]]);
		let size = GraphOptions::default().symbol_size;
		let glyphs: Vec<_> = r.visuals().iter().map(|v| v.glyph.clone()).collect();
		assert_eq!(
			glyphs,
			[Symbol::Circle.path(size), Symbol::Circle.path(size), Symbol::Cross.path(size)]
		);
	}

	#[test]
	fn line_endpoints_follow_projected_nodes() {
		let mut r = renderer(&path_graph());
		for _ in 0..5 {
			r.tick(0.016);
			let mut scene = RecordingScene::default();
			r.draw(&mut scene);
			let lines = scene.lines();
			for (line, &(src, tgt)) in lines.iter().zip(r.links()) {
				assert_eq!(*line, (r.project(src), r.project(tgt)));
			}
			for (i, (at, _)) in scene.glyphs().iter().enumerate() {
				assert_eq!(*at, r.project(i));
			}
		}
	}

	#[test]
	fn scales_fit_node_extent_into_padded_viewport() {
		let mut r = renderer(&path_graph());
		r.tick(0.016);
		let projected: Vec<Point> = (0..3).map(|i| r.project(i)).collect();
		let min_x = projected.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
		let max_x = projected.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
		let max_y = projected.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
		assert!((min_x - 15.0).abs() < 1e-9);
		assert!((max_x - 785.0).abs() < 1e-9);
		assert!((max_y - 585.0).abs() < 1e-9);
	}

	#[test]
	fn dragged_node_sits_on_the_pointer() {
		let mut r = renderer(&path_graph());
		r.tick(0.016);
		r.drag_start(Gesture::Mouse, 1);
		assert!(r.drag.dragging);

		r.drag_move(Gesture::Mouse, 200.0, 120.0);
		let pointer = r.unproject(200.0, 120.0);
		for _ in 0..10 {
			r.tick(0.016);
			assert_eq!(r.layout().position(1), pointer);
			assert_eq!(r.layout().fixed(1), Some(pointer));
		}
		assert!((r.project(1).x - 200.0).abs() < 1e-9);
		assert!((r.project(1).y - 120.0).abs() < 1e-9);
	}

	#[test]
	fn scales_freeze_while_dragging() {
		let mut r = renderer(&path_graph());
		r.tick(0.016);
		r.drag_start(Gesture::Mouse, 0);
		let frozen = (*r.scales().0, *r.scales().1);
		for _ in 0..5 {
			r.tick(0.016);
		}
		assert_eq!((*r.scales().0, *r.scales().1), frozen);

		r.drag_end(Gesture::Mouse);
		r.tick(0.016);
		assert_ne!(r.scales().0.domain(), frozen.0.domain());
	}

	#[test]
	fn released_node_moves_freely() {
		let mut r = renderer(&path_graph());
		r.drag_start(Gesture::Mouse, 2);
		r.drag_move(Gesture::Mouse, 300.0, 300.0);
		r.drag_end(Gesture::Mouse);
		assert!(!r.drag.dragging);
		assert_eq!(r.layout().fixed(2), None);

		let before = r.layout().position(2);
		r.tick(0.016);
		assert_eq!(r.layout().position(2).x, before.x + 1.0);
	}

	#[test]
	fn drag_reheats_and_release_cools() {
		let mut r = renderer(&path_graph());
		while !r.energy.is_idle() {
			r.tick(0.016);
		}
		r.drag_start(Gesture::Mouse, 0);
		assert!(!r.energy.is_idle());
		assert_eq!(r.energy.alpha_target, Energy::DRAG_TARGET);

		r.drag_end(Gesture::Mouse);
		assert_eq!(r.energy.alpha_target, 0.0);
	}

	#[test]
	fn second_touch_keeps_the_drag_alive() {
		let mut r = renderer(&path_graph());
		r.drag_start(Gesture::Touch(1), 0);
		r.drag_start(Gesture::Touch(2), 2);
		assert_eq!(r.drag.active(), 2);

		r.drag_end(Gesture::Touch(1));
		assert!(r.drag.dragging);
		assert_eq!(r.energy.alpha_target, Energy::DRAG_TARGET);
		assert_eq!(r.layout().fixed(0), None);
		assert!(r.layout().fixed(2).is_some());

		r.drag_end(Gesture::Touch(2));
		assert!(!r.drag.dragging);
		assert_eq!(r.energy.alpha_target, 0.0);
	}

	#[test]
	fn node_held_by_two_touches_stays_pinned_until_both_end() {
		let mut r = renderer(&path_graph());
		r.tick(0.016);
		r.drag_start(Gesture::Touch(1), 0);
		r.drag_start(Gesture::Touch(2), 0);
		r.drag_move(Gesture::Touch(2), 100.0, 100.0);
		let pointer = r.unproject(100.0, 100.0);

		r.drag_end(Gesture::Touch(1));
		assert!(r.drag.dragging);
		assert_eq!(r.layout().fixed(0), Some(pointer));
		r.tick(0.016);
		assert_eq!(r.layout().position(0), pointer);

		r.drag_end(Gesture::Touch(2));
		assert!(!r.drag.dragging);
		assert_eq!(r.layout().fixed(0), None);
	}

	#[test]
	fn moves_without_a_drag_are_ignored() {
		let mut r = renderer(&path_graph());
		r.drag_move(Gesture::Mouse, 10.0, 10.0);
		r.drag_end(Gesture::Mouse);
		assert!((0..3).all(|i| r.layout().fixed(i).is_none()));
		assert!(!r.drag.dragging);
	}

	#[test]
	fn hit_test_finds_topmost_node() {
		let mut r = renderer(&path_graph());
		r.tick(0.016);
		let p = r.project(2);
		assert_eq!(r.node_at_position(p.x + 3.0, p.y - 3.0), Some(2));
		assert_eq!(r.node_at_position(-100.0, -100.0), None);
	}

	#[test]
	fn dangling_links_are_dropped() {
		let data = graph(json!([{"id": 1}, {"id": 2}]), &[(1, 2), (2, 9)]);
		let r = renderer(&data);
		assert_eq!(r.links(), [(0, 1)]);
	}

	#[test]
	fn empty_tables_render_an_empty_scene() {
		let mut r = renderer(&GraphData::default());
		r.tick(0.016);
		let mut scene = RecordingScene::default();
		r.draw(&mut scene);
		assert_eq!(scene.ops.len(), 1);
		assert_eq!(r.scales().0.domain(), (0.0, 1.0));
		assert!(r.nodes().is_empty());
	}

	#[test]
	fn resize_moves_ranges_and_centre() {
		let mut r = renderer(&path_graph());
		r.resize(400.0, 200.0);
		assert_eq!(r.scales().0.range(), (15.0, 385.0));
		assert_eq!(r.scales().1.range(), (15.0, 185.0));
		assert_eq!(r.layout().center, Point::new(200.0, 100.0));
	}

	#[test]
	fn force_layout_keeps_pointer_pin() {
		let mut r = GraphRenderer::new(&path_graph(), &GraphOptions::default(), 800.0, 600.0);
		for _ in 0..5 {
			r.tick(0.016);
		}
		r.drag_start(Gesture::Mouse, 0);
		r.drag_move(Gesture::Mouse, 400.0, 300.0);
		let pointer = r.unproject(400.0, 300.0);
		for _ in 0..20 {
			r.tick(0.016);
			assert_eq!(r.layout().position(0), pointer);
		}
		r.drag_end(Gesture::Mouse);
		assert_eq!(r.layout().fixed(0), None);
	}
}
