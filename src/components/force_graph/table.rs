//! Tabular input: node and edge tables as they arrive from the host page.
//!
//! A table is either a list of row objects or a data frame laid out column by
//! column (`{"id": [1, 2], "group": ["a", "b"]}`). Both become rows before the
//! renderer sees them.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::DataError;
use super::types::{GraphData, GraphLink, GraphNode, GraphOptions};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Table {
	Rows(Vec<Map<String, Value>>),
	Columns(Map<String, Value>),
}

impl Default for Table {
	fn default() -> Self {
		Table::Rows(Vec::new())
	}
}

impl Table {
	/// Row view of the table. A column-oriented table yields as many rows as
	/// its longest column; cells past the end of a shorter column are absent.
	/// Scalar columns are repeated on every row.
	pub fn into_rows(self) -> Vec<Map<String, Value>> {
		let columns = match self {
			Table::Rows(rows) => return rows,
			Table::Columns(columns) => columns,
		};

		let len = columns
			.values()
			.map(|col| match col {
				Value::Array(cells) => cells.len(),
				_ => 1,
			})
			.max()
			.unwrap_or(0);

		(0..len)
			.map(|i| {
				columns
					.iter()
					.filter_map(|(name, col)| {
						let cell = match col {
							Value::Array(cells) => cells.get(i)?.clone(),
							scalar => scalar.clone(),
						};
						Some((name.clone(), cell))
					})
					.collect()
			})
			.collect()
	}
}

/// The JSON document embedded in the host page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphPayload {
	#[serde(default)]
	pub nodes: Table,
	#[serde(default)]
	pub edges: Table,
	#[serde(default)]
	pub options: GraphOptions,
}

impl GraphPayload {
	pub fn from_json(text: &str) -> Result<Self, DataError> {
		Ok(serde_json::from_str(text)?)
	}

	pub fn into_parts(self) -> (GraphData, GraphOptions) {
		let nodes = self
			.nodes
			.into_rows()
			.into_iter()
			.map(GraphNode::from_row)
			.collect();
		let links = self
			.edges
			.into_rows()
			.iter()
			.map(GraphLink::from_row)
			.collect();
		(GraphData { nodes, links }, self.options)
	}
}
