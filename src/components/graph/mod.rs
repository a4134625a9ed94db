mod builder;
mod component;
mod render;
mod state;
mod types;

pub use builder::build_graph;
pub use component::DocumentGraphCanvas;
pub use types::{GraphData, GraphEdge, GraphNode};
