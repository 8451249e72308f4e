mod component;
mod encoding;
mod error;
mod layout;
mod render;
pub mod scale;
mod scene;
mod state;
mod symbol;
mod table;
mod types;

pub use component::ForceGraphCanvas;
pub use error::DataError;
pub use table::GraphPayload;
pub use types::{GraphData, GraphLink, GraphNode, GraphOptions};
