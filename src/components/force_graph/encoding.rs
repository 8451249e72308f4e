use std::collections::HashMap;
use std::hash::Hash;

use super::symbol::Symbol;
use super::types::{Category, GraphNode, GraphOptions};

/// Ten-color categorical palette.
pub const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Discrete domain to discrete range, assigned in first-seen order. Domains
/// longer than the range wrap around it.
#[derive(Clone, Debug)]
pub struct OrdinalScale<K, R> {
	domain: Vec<K>,
	index: HashMap<K, usize>,
	range: Vec<R>,
}

impl<K: Clone + Eq + Hash, R> OrdinalScale<K, R> {
	pub fn new(range: Vec<R>) -> Self {
		Self {
			domain: Vec::new(),
			index: HashMap::new(),
			range,
		}
	}

	pub fn with_domain(values: impl IntoIterator<Item = K>, range: Vec<R>) -> Self {
		let mut scale = Self::new(range);
		for value in values {
			scale.insert(value);
		}
		scale
	}

	fn insert(&mut self, value: K) -> usize {
		if let Some(&i) = self.index.get(&value) {
			return i;
		}
		let i = self.domain.len();
		self.index.insert(value.clone(), i);
		self.domain.push(value);
		i
	}

	pub fn domain(&self) -> &[K] {
		&self.domain
	}

	/// `None` for values outside the domain, or when the range is empty.
	pub fn get(&self, value: &K) -> Option<&R> {
		let i = *self.index.get(value)?;
		self.at(i)
	}

	fn at(&self, i: usize) -> Option<&R> {
		if self.range.is_empty() {
			return None;
		}
		self.range.get(i % self.range.len())
	}
}

/// Give every node `column = column` when no node carries a value for it, so
/// the encodings always have a one-category domain to fall back on.
pub fn ensure_column(nodes: &mut [GraphNode], column: &str) {
	if nodes.iter().any(|n| n.category(column).is_some()) {
		return;
	}
	for node in nodes {
		node.set(column, column);
	}
}

/// Color and glyph encodings for one render.
#[derive(Clone, Debug)]
pub struct Encodings {
	pub color_col: String,
	pub shape_col: String,
	pub color: OrdinalScale<Category, &'static str>,
	pub shape: OrdinalScale<Category, Symbol>,
}

impl Encodings {
	/// Applies the column fallback to `nodes`, then builds both scales from
	/// the values present.
	pub fn build(nodes: &mut [GraphNode], options: &GraphOptions) -> Self {
		ensure_column(nodes, &options.color_col);
		ensure_column(nodes, &options.shape_col);

		let color = OrdinalScale::with_domain(
			nodes.iter().map(|n| n.category(&options.color_col)),
			COLORS.to_vec(),
		);
		let shape = OrdinalScale::with_domain(
			nodes.iter().map(|n| n.category(&options.shape_col)),
			Symbol::ALL.to_vec(),
		);

		Self {
			color_col: options.color_col.clone(),
			shape_col: options.shape_col.clone(),
			color,
			shape,
		}
	}

	pub fn color_of(&self, node: &GraphNode) -> &'static str {
		self.color
			.get(&node.category(&self.color_col))
			.copied()
			.unwrap_or(COLORS[0])
	}

	pub fn symbol_of(&self, node: &GraphNode) -> Symbol {
		self.shape
			.get(&node.category(&self.shape_col))
			.copied()
			.unwrap_or(Symbol::Circle)
	}
}
