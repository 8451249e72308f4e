use serde::Deserialize;
use serde_json::{Map, Value};

/// A categorical cell value. `None` is the absent category (missing or `null`).
pub type Category = Option<String>;

/// String form of a cell, used for identifiers and categories alike.
pub fn cell_key(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// One row of the node table. Every column of the row is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	pub id: Option<String>,
	pub columns: Map<String, Value>,
}

impl GraphNode {
	pub fn from_row(columns: Map<String, Value>) -> Self {
		Self {
			id: cell_key(columns.get("id")),
			columns,
		}
	}

	pub fn category(&self, column: &str) -> Category {
		cell_key(self.columns.get(column))
	}

	pub fn set(&mut self, column: &str, value: impl Into<Value>) {
		self.columns.insert(column.to_owned(), value.into());
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLink {
	pub source: Option<String>,
	pub target: Option<String>,
}

impl GraphLink {
	/// Edge rows name their endpoints `from` and `to`.
	pub fn from_row(row: &Map<String, Value>) -> Self {
		Self {
			source: cell_key(row.get("from")),
			target: cell_key(row.get("to")),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Visual encoding options.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
	/// Column whose value picks the node fill color.
	pub color_col: String,
	/// Column whose value picks the node glyph.
	pub shape_col: String,
	/// Gap in pixels between the viewport edge and the outermost nodes.
	pub padding: f64,
	/// Glyph area in square pixels.
	pub symbol_size: f64,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			color_col: "group".into(),
			shape_col: "type".into(),
			padding: 15.0,
			symbol_size: 150.0,
		}
	}
}
