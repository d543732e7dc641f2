//! Maps renderer selection state back to domain entities.

use leptos::prelude::*;

use super::state::ClickTarget;
use super::transform::{edges_by_id, nodes_by_id};
use super::types::{FlowEdge, FlowNode, GraphData, GraphEdge, GraphNode, Selection};

/// Resolve selected ids against the document, dropping ids it does not know.
pub fn selection_from_ids<N, E>(data: &GraphData, node_ids: &[N], edge_ids: &[E]) -> Selection
where
	N: AsRef<str>,
	E: AsRef<str>,
{
	Selection {
		nodes: nodes_by_id(data, node_ids),
		edges: edges_by_id(data, edge_ids),
	}
}

/// Split an explicit id list into node ids and edge ids. Ids that name
/// neither are dropped.
pub fn split_selected_ids<S: AsRef<str>>(data: &GraphData, ids: &[S]) -> (Vec<String>, Vec<String>) {
	let mut nodes = Vec::new();
	let mut edges = Vec::new();
	for id in ids.iter().map(AsRef::as_ref) {
		if data.nodes.contains_key(id) {
			nodes.push(id.to_string());
		} else if data.edges.contains_key(id) {
			edges.push(id.to_string());
		}
	}
	(nodes, edges)
}

/// Domain nodes whose view record is flagged selected.
pub fn selected_nodes(data: &GraphData, nodes: &[FlowNode]) -> Vec<GraphNode> {
	nodes
		.iter()
		.filter(|n| n.selected)
		.filter_map(|n| data.nodes.get(&n.id).cloned())
		.collect()
}

/// Domain edges whose view record is flagged selected.
pub fn selected_edges(data: &GraphData, edges: &[FlowEdge]) -> Vec<GraphEdge> {
	edges
		.iter()
		.filter(|e| e.selected)
		.filter_map(|e| data.edges.get(&e.id).cloned())
		.collect()
}

/// Domain entity behind a click.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickedEntity {
	Node(GraphNode),
	Edge(GraphEdge),
}

/// Resolve a click target against the document. Ids the document does not
/// know and pane clicks yield nothing.
pub fn click_entity(data: &GraphData, target: &ClickTarget) -> Option<ClickedEntity> {
	match target {
		ClickTarget::Node(id) => data.nodes.get(id).cloned().map(ClickedEntity::Node),
		ClickTarget::Edge(id) => data.edges.get(id).cloned().map(ClickedEntity::Edge),
		ClickTarget::Pane => None,
	}
}

/// Forwards renderer selection changes to an optional callback as domain
/// entities.
#[derive(Clone, Copy)]
pub struct SelectionBridge {
	on_change: Option<Callback<Selection>>,
}

impl SelectionBridge {
	pub fn new(on_change: Option<Callback<Selection>>) -> Self {
		Self { on_change }
	}

	/// Map the renderer's selected records and notify the callback, if any.
	pub fn handle_change(&self, data: &GraphData, nodes: &[FlowNode], edges: &[FlowEdge]) {
		let Some(on_change) = self.on_change else {
			return;
		};
		on_change.run(Selection {
			nodes: selected_nodes(data, nodes),
			edges: selected_edges(data, edges),
		});
	}
}
