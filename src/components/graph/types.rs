use crate::model::{DocType, DocumentId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	pub id: DocumentId,
	pub label: String,
	pub category: DocType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge {
	pub source: DocumentId,
	pub target: DocumentId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}
