use leptos::prelude::*;
use log::info;
use serde_json::{Map, Value, json};

use crate::components::force_graph::{
	DataError, ForceGraphCanvas, GraphData, GraphLink, GraphNode, GraphOptions, GraphPayload,
};

/// Id of the `<script type="application/json">` element a host page fills.
const PAYLOAD_ELEMENT: &str = "graph-data";

/// Graph payload embedded in the page, if the page has one.
fn embedded_payload() -> Option<Result<GraphPayload, DataError>> {
	let element = web_sys::window()?
		.document()?
		.get_element_by_id(PAYLOAD_ELEMENT)?;
	let text = element.text_content().unwrap_or_default();
	if text.trim().is_empty() {
		return Some(Err(DataError::EmptyPayload(PAYLOAD_ELEMENT.into())));
	}
	Some(GraphPayload::from_json(&text))
}

/// Generate a sample block-structured network: dense links inside a block,
/// sparse links between blocks.
fn generate_sample_data(blocks: usize, per_block: usize) -> GraphData {
	let n = blocks * per_block;
	let nodes: Vec<GraphNode> = (0..n)
		.map(|i| {
			let kind = if rand_simple(i * 7) < 0.3 { "hub" } else { "leaf" };
			let row: Map<String, Value> = json!({
				"id": i,
				"group": format!("block {}", i / per_block),
				"type": kind,
			})
			.as_object()
			.cloned()
			.unwrap_or_default();
			GraphNode::from_row(row)
		})
		.collect();

	let mut links = Vec::new();
	for a in 0..n {
		for b in (a + 1)..n {
			let same_block = a / per_block == b / per_block;
			let p = if same_block { 0.2 } else { 0.005 };
			if rand_simple(a * n + b) < p {
				links.push(GraphLink {
					source: Some(a.to_string()),
					target: Some(b.to_string()),
				});
			}
		}
	}

	GraphData { nodes, links }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let loaded = match embedded_payload() {
		Some(payload) => payload.map(GraphPayload::into_parts),
		None => Ok((generate_sample_data(3, 20), GraphOptions::default())),
	};
	if let Ok((data, options)) = &loaded {
		info!(
			"rendering {} nodes and {} edges (color: {}, shape: {})",
			data.nodes.len(),
			data.links.len(),
			options.color_col,
			options.shape_col
		);
	}

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{loaded.map(|(data, options)| {
				let graph_data = Signal::derive(move || data.clone());
				view! {
					<div class="fullscreen-graph">
						<ForceGraphCanvas data=graph_data options=options fullscreen=true />
						<div class="graph-overlay">
							<h1>"Force-Directed Graph"</h1>
							<p class="subtitle">"Drag nodes to reposition them."</p>
						</div>
					</div>
				}
			})}
		</ErrorBoundary>
	}
}
