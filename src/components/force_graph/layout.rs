//! Physics layout behind the renderer.
//!
//! [`LayoutEngine`] is the seam between the renderer and whatever solver moves
//! the nodes. [`ForceLayout`] drives `force_graph` (springs along links plus
//! many-body repulsion) and adds a centering pass after every step.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::Point;

pub trait LayoutEngine {
	/// Adds a free node at `at` and returns its index. Indices are dense and
	/// assigned in insertion order.
	fn add_node(&mut self, at: Point) -> usize;
	fn add_link(&mut self, source: usize, target: usize);
	/// Applies every force once and advances positions by `dt`.
	fn step(&mut self, dt: f64);
	fn position(&self, node: usize) -> Point;
	/// Pins a node (`Some`) or hands it back to the simulation (`None`).
	fn set_fixed(&mut self, node: usize, fixed: Option<Point>);
	fn fixed(&self, node: usize) -> Option<Point>;
	fn set_center(&mut self, center: Point);
}

/// Starting position of the `i`th node: a sunflower spiral around `center`.
pub fn seed_position(i: usize, center: Point) -> Point {
	let radius = 10.0 * (0.5 + i as f64).sqrt();
	let angle = i as f64 * PI * (3.0 - 5.0f64.sqrt());
	Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Simulation energy. Steps are scaled by `alpha`, which eases towards
/// `alpha_target`; once it drops under `alpha_min` the simulation idles until
/// restarted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Energy {
	pub alpha: f64,
	pub alpha_target: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	running: bool,
}

impl Default for Energy {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			running: true,
		}
	}
}

impl Energy {
	/// Target held while a node is being dragged.
	pub const DRAG_TARGET: f64 = 0.3;

	/// Advances alpha one step. Returns the alpha to scale this step's
	/// movement by, or `None` while idle.
	pub fn cool(&mut self) -> Option<f64> {
		if !self.running {
			return None;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		if self.alpha < self.alpha_min {
			self.running = false;
		}
		Some(self.alpha)
	}

	pub fn set_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn restart(&mut self) {
		self.running = true;
	}

	#[cfg(test)]
	pub fn is_idle(&self) -> bool {
		!self.running
	}
}

pub struct ForceLayout {
	graph: ForceGraph<usize, ()>,
	handles: Vec<DefaultNodeIdx>,
	positions: Vec<Point>,
	fixed: Vec<Option<Point>>,
	center: Point,
}

impl ForceLayout {
	pub fn new(center: Point) -> Self {
		Self {
			graph: ForceGraph::new(SimulationParameters {
				force_charge: 150.0,
				force_spring: 0.05,
				force_max: 100.0,
				node_speed: 3000.0,
				damping_factor: 0.9,
			}),
			handles: Vec::new(),
			positions: Vec::new(),
			fixed: Vec::new(),
			center,
		}
	}

	/// Refreshes the position cache from the solver. Pinned nodes report their
	/// pin exactly rather than the solver's single-precision copy.
	fn sync(&mut self) {
		let (positions, fixed) = (&mut self.positions, &self.fixed);
		self.graph.visit_nodes(|node| {
			let i = node.data.user_data;
			positions[i] =
				fixed[i].unwrap_or_else(|| Point::new(node.x() as f64, node.y() as f64));
		});
	}

	/// Shifts free nodes so the mean position sits on the centre.
	fn center_nodes(&mut self) {
		let n = self.positions.len() as f64;
		let (sx, sy) = self
			.positions
			.iter()
			.fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
		let (dx, dy) = ((self.center.x - sx / n) as f32, (self.center.y - sy / n) as f32);

		let fixed = &self.fixed;
		self.graph.visit_nodes_mut(|node| match fixed[node.data.user_data] {
			Some(p) => {
				node.data.x = p.x as f32;
				node.data.y = p.y as f32;
			}
			None => {
				node.data.x += dx;
				node.data.y += dy;
			}
		});
	}
}

impl LayoutEngine for ForceLayout {
	fn add_node(&mut self, at: Point) -> usize {
		let i = self.handles.len();
		let handle = self.graph.add_node(NodeData {
			x: at.x as f32,
			y: at.y as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: i,
		});
		self.handles.push(handle);
		self.positions.push(at);
		self.fixed.push(None);
		i
	}

	fn add_link(&mut self, source: usize, target: usize) {
		if let (Some(&src), Some(&tgt)) = (self.handles.get(source), self.handles.get(target)) {
			self.graph.add_edge(src, tgt, EdgeData::default());
		}
	}

	fn step(&mut self, dt: f64) {
		if self.positions.is_empty() {
			return;
		}
		self.graph.update(dt as f32);
		self.sync();
		self.center_nodes();
		self.sync();
	}

	fn position(&self, node: usize) -> Point {
		self.positions.get(node).copied().unwrap_or_default()
	}

	fn set_fixed(&mut self, node: usize, fixed: Option<Point>) {
		let Some(slot) = self.fixed.get_mut(node) else {
			return;
		};
		*slot = fixed;
		self.graph.visit_nodes_mut(|n| {
			if n.data.user_data == node {
				if let Some(p) = fixed {
					n.data.x = p.x as f32;
					n.data.y = p.y as f32;
				}
				n.data.is_anchor = fixed.is_some();
			}
		});
		if let Some(p) = fixed {
			self.positions[node] = p;
		}
	}

	fn fixed(&self, node: usize) -> Option<Point> {
		self.fixed.get(node).copied().flatten()
	}

	fn set_center(&mut self, center: Point) {
		self.center = center;
	}
}
