//! Flat document list → node set plus deduplicated, resolution-checked
//! edge set. Pure: the same list always yields the same graph.

use std::collections::HashSet;

use super::types::{GraphData, GraphEdge, GraphNode};
use crate::model::Document;

/// Labels longer than this are cut with an ellipsis; the renderer also
/// drops the font size for long ones so they stay legible.
pub const MAX_LABEL_CHARS: usize = 40;

fn display_label(doc: &Document) -> String {
	let label = doc.label();
	if label.chars().count() <= MAX_LABEL_CHARS {
		return label;
	}
	let mut cut: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
	cut.push('…');
	cut
}

/// Build graph data from an order-sorted document list. Nodes follow input
/// order; edges follow their owning document's order. Links whose target is
/// not in the list are dropped without complaint — a link to a deleted
/// document must not break the view.
pub fn build_graph(documents: &[Document]) -> GraphData {
	let present: HashSet<_> = documents.iter().map(|d| d.id).collect();

	let nodes = documents
		.iter()
		.map(|doc| GraphNode {
			id: doc.id,
			label: display_label(doc),
			category: doc.doc_type,
		})
		.collect();

	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	for doc in documents {
		for link in &doc.linked_docs {
			if !present.contains(&link.id) {
				continue;
			}
			let edge = GraphEdge {
				source: doc.id,
				target: link.id,
			};
			if seen.insert(edge) {
				edges.push(edge);
			}
		}
	}

	GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::model::{DocLink, DocType, DocumentId};

	fn doc(id: DocumentId, title: &str, links: &[DocumentId]) -> Document {
		Document {
			id,
			project_id: None,
			doc_type: DocType::Requirement,
			doc_id: None,
			title: (!title.is_empty()).then(|| title.to_string()),
			order: 0,
			linked_docs: links.iter().map(|&id| DocLink { id }).collect(),
			extra: BTreeMap::new(),
		}
	}

	#[test]
	fn dangling_targets_produce_no_edges() {
		let graph = build_graph(&[doc(1, "a", &[2, 99]), doc(2, "b", &[])]);
		assert_eq!(graph.edges, vec![GraphEdge { source: 1, target: 2 }]);
		assert!(!graph.edges.iter().any(|e| e.source == 99 || e.target == 99));
	}

	#[test]
	fn duplicate_links_collapse_to_one_edge() {
		let graph = build_graph(&[doc(1, "a", &[2, 2]), doc(2, "b", &[])]);
		assert_eq!(graph.edges.len(), 1);
	}

	#[test]
	fn rebuilding_from_unchanged_input_is_identical() {
		let docs = vec![doc(3, "c", &[1]), doc(1, "a", &[3]), doc(2, "", &[])];
		assert_eq!(build_graph(&docs), build_graph(&docs));
	}

	#[test]
	fn nodes_follow_input_order() {
		let graph = build_graph(&[doc(5, "e", &[]), doc(2, "b", &[]), doc(9, "i", &[])]);
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id).collect();
		assert_eq!(ids, vec![5, 2, 9]);
	}

	#[test]
	fn untitled_nodes_get_synthesized_labels() {
		let graph = build_graph(&[doc(7, "", &[])]);
		assert_eq!(graph.nodes[0].label, "Doc 7");
	}

	#[test]
	fn overlong_labels_are_cut_with_ellipsis() {
		let long = "x".repeat(60);
		let graph = build_graph(&[doc(1, &long, &[])]);
		assert_eq!(graph.nodes[0].label.chars().count(), MAX_LABEL_CHARS);
		assert!(graph.nodes[0].label.ends_with('…'));
	}
}
