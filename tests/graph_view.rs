use std::collections::HashSet;

use futures::executor::block_on;
use translator_graph_view::components::graph_view::color::color_for_type;
use translator_graph_view::components::graph_view::edge_geometry;
use translator_graph_view::components::graph_view::engine::BuiltinEngine;
use translator_graph_view::components::graph_view::layout::{compute_layout, compute_routed_layout};
use translator_graph_view::components::graph_view::selection::{
	selected_edges, selected_nodes, selection_from_ids, split_selected_ids,
};
use translator_graph_view::components::graph_view::state::{self, ClickTarget, Rect};
use translator_graph_view::components::graph_view::transform::{
	NODE_HEIGHT, NODE_WIDTH, transform_edges, transform_nodes,
};
use translator_graph_view::{GraphData, LayoutType};

const DOCUMENT: &str = r#"{
	"nodes": {
		"CHEBI:15365": {"id": "CHEBI:15365", "names": ["Aspirin"], "types": ["biolink:Drug"]},
		"MONDO:0005010": {"id": "MONDO:0005010", "names": ["Pain"], "types": ["biolink:Disease"]},
		"NCBIGene:5742": {"id": "NCBIGene:5742", "names": ["PTGS1"], "types": ["biolink:Gene"]}
	},
	"edges": {
		"e1": {"id": "e1", "subject": "CHEBI:15365", "object": "MONDO:0005010", "predicate": "biolink:treats"},
		"e2": {"id": "e2", "subject": "CHEBI:15365", "object": "NCBIGene:5742", "predicate": "biolink:affects"}
	},
	"results": [{"id": "r1", "subject": "CHEBI:15365", "object": "MONDO:0005010"}]
}"#;

fn document() -> GraphData {
	GraphData::from_json(DOCUMENT).unwrap()
}

#[test]
fn document_becomes_labeled_colored_records() {
	let data = document();
	let nodes = transform_nodes(&data);
	let edges = transform_edges(&data);

	assert_eq!(nodes.len(), 3);
	assert_eq!(nodes[0].data.label, "Aspirin");
	assert_eq!(nodes[0].data.primary_type, "Drug");
	assert_eq!(nodes[0].data.color, color_for_type("biolink:Drug"));
	assert_eq!((nodes[0].width, nodes[0].height), (NODE_WIDTH, NODE_HEIGHT));

	assert_eq!(edges[0].source, "CHEBI:15365");
	assert_eq!(edges[0].target, "MONDO:0005010");
	assert_eq!(edges[0].data.label, "treats");
	assert_eq!(data.results.as_ref().map(Vec::len), Some(1));
}

#[test]
fn every_layout_places_nodes_without_overlap() {
	let data = document();
	for layout in LayoutType::ALL {
		let nodes = block_on(compute_layout(
			&BuiltinEngine,
			transform_nodes(&data),
			transform_edges(&data),
			layout,
		));
		assert_eq!(nodes.len(), 3, "{layout}");
		for (i, a) in nodes.iter().enumerate() {
			for b in &nodes[i + 1..] {
				let apart = (a.position.x - b.position.x).abs() >= NODE_WIDTH
					|| (a.position.y - b.position.y).abs() >= NODE_HEIGHT;
				assert!(apart, "{layout}: {} overlaps {}", a.id, b.id);
			}
		}
	}
}

#[test]
fn hierarchical_layout_puts_subject_above_objects() {
	let data = document();
	let nodes = block_on(compute_layout(
		&BuiltinEngine,
		transform_nodes(&data),
		transform_edges(&data),
		LayoutType::Hierarchical,
	));
	let y = |id: &str| nodes.iter().find(|n| n.id == id).unwrap().position.y;
	assert!(y("CHEBI:15365") < y("MONDO:0005010"));
	assert_eq!(y("MONDO:0005010"), y("NCBIGene:5742"));
}

#[test]
fn dangling_edge_does_not_block_the_layout() {
	let mut data = document();
	let mut dangling = data.edges["e1"].clone();
	dangling.id = "e3".to_string();
	dangling.object = "MONDO:missing".to_string();
	data.edges.insert(dangling.id.clone(), dangling);

	let nodes = block_on(compute_layout(
		&BuiltinEngine,
		transform_nodes(&data),
		transform_edges(&data),
		LayoutType::Grid,
	));
	assert_eq!(nodes.len(), 3);
	for (i, a) in nodes.iter().enumerate() {
		for b in &nodes[i + 1..] {
			let apart = (a.position.x - b.position.x).abs() >= NODE_WIDTH
				|| (a.position.y - b.position.y).abs() >= NODE_HEIGHT;
			assert!(apart, "{} overlaps {}", a.id, b.id);
		}
	}
}

#[test]
fn skipping_edge_label_stays_clear_of_the_middle_node() {
	let data = GraphData::from_json(
		r#"{
			"nodes": {
				"a": {"id": "a", "names": ["A"], "types": ["biolink:Drug"]},
				"b": {"id": "b", "names": ["B"], "types": ["biolink:Gene"]},
				"c": {"id": "c", "names": ["C"], "types": ["biolink:Disease"]}
			},
			"edges": {
				"ab": {"id": "ab", "subject": "a", "object": "b", "predicate": "biolink:affects"},
				"bc": {"id": "bc", "subject": "b", "object": "c", "predicate": "biolink:causes"},
				"ac": {"id": "ac", "subject": "a", "object": "c", "predicate": "biolink:treats"}
			}
		}"#,
	)
	.unwrap();
	let (nodes, edges) = block_on(compute_routed_layout(
		&BuiltinEngine,
		transform_nodes(&data),
		transform_edges(&data),
		LayoutType::Hierarchical,
	));
	let node = |id: &str| nodes.iter().find(|n| n.id == id).unwrap();
	let skip = edges.iter().find(|e| e.id == "ac").unwrap();
	assert!(!skip.bends.is_empty());

	let geometry = edge_geometry(node("a"), node("c"), &skip.bends);
	let b = node("b");
	assert!(
		!b.contains(geometry.label_x, geometry.label_y),
		"label at ({}, {}) inside b at {:?}",
		geometry.label_x,
		geometry.label_y,
		b.position
	);
}

#[test]
fn user_selection_maps_back_to_domain_entities() {
	let data = document();
	let mut nodes = transform_nodes(&data);
	let mut edges = transform_edges(&data);

	assert!(state::click_select(
		&mut nodes,
		&mut edges,
		&ClickTarget::Node("MONDO:0005010".into()),
		false
	));
	assert!(state::click_select(
		&mut nodes,
		&mut edges,
		&ClickTarget::Edge("e2".into()),
		true
	));

	let picked: Vec<_> = selected_nodes(&data, &nodes).into_iter().map(|n| n.id).collect();
	assert_eq!(picked, ["MONDO:0005010"]);
	let picked: Vec<_> = selected_edges(&data, &edges).into_iter().map(|e| e.id).collect();
	assert_eq!(picked, ["e2"]);

	// clicking the pane clears everything
	assert!(state::click_select(&mut nodes, &mut edges, &ClickTarget::Pane, false));
	assert!(selected_nodes(&data, &nodes).is_empty());
}

#[test]
fn marquee_and_controlled_selection() {
	let data = document();
	let mut nodes = block_on(compute_layout(
		&BuiltinEngine,
		transform_nodes(&data),
		transform_edges(&data),
		LayoutType::Hierarchical,
	));
	let mut edges = transform_edges(&data);

	let root = nodes.iter().find(|n| n.id == "CHEBI:15365").unwrap().clone();
	let rect = Rect::from_corners(
		(root.position.x + 1.0, root.position.y + 1.0),
		(root.position.x + 2.0, root.position.y + 2.0),
	);
	assert!(state::marquee_select(&mut nodes, &mut edges, rect, false));
	assert_eq!(selected_edges(&data, &edges).len(), 2);

	let ids = ["NCBIGene:5742", "e1", "nope"];
	let (node_ids, edge_ids) = split_selected_ids(&data, &ids);
	assert_eq!(node_ids, ["NCBIGene:5742"]);
	assert_eq!(edge_ids, ["e1"]);

	let controlled: HashSet<String> = ids.iter().map(|s| s.to_string()).collect();
	state::apply_controlled(&mut nodes, &mut edges, &controlled);
	let selection = selection_from_ids(&data, &node_ids, &edge_ids);
	assert_eq!(selected_nodes(&data, &nodes), selection.nodes);
	assert_eq!(selected_edges(&data, &edges), selection.edges);
}
