use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;
use crate::model::DocumentId;

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct NodeVisual {
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Selected node and its closed neighborhood, with the previous selection
/// kept around while the highlight fades out.
#[derive(Clone, Debug, Default)]
pub struct SelectionVis {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
}

pub struct DocGraphState {
	pub graph: ForceGraph<NodeVisual, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub sel: SelectionVis,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	id_to_idx: HashMap<DocumentId, DefaultNodeIdx>,
}

impl DocGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len().max(1) as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeVisual {
					label: node.label.clone(),
					color: node.category.color().to_string(),
				},
			});
			id_to_idx.insert(node.id, idx);
		}

		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			id_to_idx,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			sel: SelectionVis::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn doc_of(&self, idx: DefaultNodeIdx) -> Option<DocumentId> {
		self.id_to_idx
			.iter()
			.find(|entry| *entry.1 == idx)
			.map(|entry| *entry.0)
	}

	/// Sync the canvas highlight with the shared selection. Ids not in the
	/// current graph clear the highlight, same as no selection.
	pub fn set_selected(&mut self, doc: Option<DocumentId>) {
		let node = doc.and_then(|id| self.id_to_idx.get(&id).copied());
		if self.sel.node == node {
			return;
		}

		// keep the outgoing selection around for the fade-out
		if node.is_none() && self.sel.node.is_some() {
			self.sel.prev_node = self.sel.node.take();
			self.sel.prev_neighbors = std::mem::take(&mut self.sel.neighbors);
		} else {
			self.sel.prev_node = None;
			self.sel.prev_neighbors.clear();
		}

		self.sel.node = node;
		self.sel.neighbors.clear();

		if let Some(idx) = node {
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.sel.neighbors.insert(tgt);
				} else if tgt == idx {
					self.sel.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.sel.node == Some(idx)
			|| self.sel.neighbors.contains(&idx)
			|| self.sel.prev_node == Some(idx)
			|| self.sel.prev_neighbors.contains(&idx)
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.sel.node == Some(idx) || self.sel.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.sel.node.is_some() || self.sel.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, speed) = if self.sel.node.is_some() {
			(1.0, 1.8)
		} else {
			(0.0, 1.26)
		};
		self.sel.highlight_t += (target - self.sel.highlight_t) * speed * dt as f64;

		if self.sel.node.is_none() && self.sel.highlight_t < 0.01 {
			self.sel.highlight_t = 0.0;
			self.sel.prev_node = None;
			self.sel.prev_neighbors.clear();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
