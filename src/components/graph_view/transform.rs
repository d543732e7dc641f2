//! Graph document to view records.

use super::color::{color_for_type, primary_type, simplify_type_name};
use super::types::{
	FlowEdge, FlowNode, GraphData, GraphEdge, GraphEdgeData, GraphNode, GraphNodeData, Position,
};

pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 60.0;

/// One view node per document node, in document order, all at the origin.
pub fn transform_nodes(data: &GraphData) -> Vec<FlowNode> {
	data.nodes
		.values()
		.map(|node| {
			let primary = primary_type(&node.types);
			let label = match node.names.first() {
				Some(name) if !name.is_empty() => name.clone(),
				_ => node.id.clone(),
			};

			FlowNode {
				id: node.id.clone(),
				position: Position::default(),
				width: NODE_WIDTH,
				height: NODE_HEIGHT,
				selected: false,
				data: GraphNodeData {
					label,
					graph_node: node.clone(),
					primary_type: simplify_type_name(primary).to_string(),
					color: color_for_type(primary),
				},
			}
		})
		.collect()
}

/// One view edge per document edge, endpoints taken verbatim.
pub fn transform_edges(data: &GraphData) -> Vec<FlowEdge> {
	data.edges
		.values()
		.map(|edge| FlowEdge {
			id: edge.id.clone(),
			source: edge.subject.clone(),
			target: edge.object.clone(),
			selected: false,
			data: GraphEdgeData {
				label: format_predicate(&edge.predicate),
				graph_edge: edge.clone(),
			},
			bends: Vec::new(),
		})
		.collect()
}

/// `biolink:treated_by` becomes `treated by`.
pub fn format_predicate(predicate: &str) -> String {
	simplify_type_name(predicate).replace('_', " ")
}

/// Resolve node ids against the document, skipping unknown ids.
pub fn nodes_by_id<S: AsRef<str>>(data: &GraphData, ids: &[S]) -> Vec<GraphNode> {
	ids.iter()
		.filter_map(|id| data.nodes.get(id.as_ref()).cloned())
		.collect()
}

/// Resolve edge ids against the document, skipping unknown ids.
pub fn edges_by_id<S: AsRef<str>>(data: &GraphData, ids: &[S]) -> Vec<GraphEdge> {
	ids.iter()
		.filter_map(|id| data.edges.get(id.as_ref()).cloned())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, names: &[&str], types: &[&str]) -> GraphNode {
		GraphNode {
			id: id.into(),
			names: names.iter().map(|s| s.to_string()).collect(),
			types: types.iter().map(|s| s.to_string()).collect(),
			curies: None,
		}
	}

	fn edge(id: &str, subject: &str, object: &str, predicate: &str) -> GraphEdge {
		GraphEdge {
			id: id.into(),
			subject: subject.into(),
			object: object.into(),
			predicate: predicate.into(),
			..Default::default()
		}
	}

	fn aspirin_pain() -> GraphData {
		let mut data = GraphData::default();
		data.nodes.insert("a".into(), node("a", &["Aspirin"], &["biolink:Drug"]));
		data.nodes.insert("b".into(), node("b", &["Pain"], &["biolink:Disease"]));
		data.edges.insert("e1".into(), edge("e1", "a", "b", "biolink:treats"));
		data
	}

	#[test]
	fn aspirin_treats_pain() {
		let data = aspirin_pain();
		let nodes = transform_nodes(&data);
		let edges = transform_edges(&data);

		assert_eq!(nodes.len(), 2);
		assert_eq!(nodes[0].id, "a");
		assert_eq!(nodes[0].data.label, "Aspirin");
		assert_eq!(nodes[0].data.primary_type, "Drug");
		assert_eq!(nodes[0].data.color, color_for_type("biolink:Drug"));
		assert_eq!(nodes[1].data.label, "Pain");
		assert_eq!(nodes[1].data.primary_type, "Disease");

		assert_eq!(edges.len(), 1);
		assert_eq!(edges[0].id, "e1");
		assert_eq!(edges[0].data.label, "treats");
		assert_eq!((edges[0].source.as_str(), edges[0].target.as_str()), ("a", "b"));
		assert_eq!(edges[0].data.graph_edge, data.edges["e1"]);
	}

	#[test]
	fn every_node_starts_at_origin_with_fixed_size() {
		for n in transform_nodes(&aspirin_pain()) {
			assert_eq!(n.position, Position::default());
			assert_eq!((n.width, n.height), (NODE_WIDTH, NODE_HEIGHT));
			assert!(!n.selected);
		}
	}

	#[test]
	fn nameless_untyped_node_uses_id_and_unknown() {
		let mut data = GraphData::default();
		data.nodes.insert("x".into(), node("x", &[], &[]));
		let nodes = transform_nodes(&data);
		assert_eq!(nodes[0].data.label, "x");
		assert_eq!(nodes[0].data.primary_type, "Unknown");
		assert_eq!(nodes[0].data.color, color_for_type("Unknown"));
	}

	#[test]
	fn dangling_edge_is_still_transformed() {
		let mut data = aspirin_pain();
		data.edges.insert("e2".into(), edge("e2", "a", "ghost", "biolink:causes"));
		let edges = transform_edges(&data);
		assert_eq!(edges[1].target, "ghost");
	}

	#[test]
	fn predicate_formatting() {
		assert_eq!(format_predicate("biolink:treats"), "treats");
		assert_eq!(format_predicate("biolink:has_adverse_event"), "has adverse event");
		assert_eq!(format_predicate("RO:has_part"), "has part");
		assert_eq!(format_predicate("interacts_with"), "interacts with");
		assert_eq!(format_predicate("treats"), "treats");
	}

	#[test]
	fn lookups_skip_unknown_ids_and_keep_order() {
		let data = aspirin_pain();
		let nodes = nodes_by_id(&data, &["b", "zzz", "a"]);
		assert_eq!(nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), ["b", "a"]);
		assert!(edges_by_id(&data, &["a"]).is_empty());
		assert_eq!(edges_by_id(&data, &["e1".to_string()]).len(), 1);
	}
}
