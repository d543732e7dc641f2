//! Knowledge-graph document model and the view records derived from it.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node of the knowledge graph (a concept such as a drug or disease).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(default)]
	pub names: Vec<String>,
	/// Semantic types, most specific first.
	#[serde(default)]
	pub types: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub curies: Option<Vec<String>>,
}

/// A directed, typed assertion between two nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub id: String,
	pub subject: String,
	pub object: String,
	pub predicate: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub predicate_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub knowledge_level: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provenance: Option<Vec<Provenance>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub publications: Option<EdgePublications>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub trials: Option<Vec<Trial>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub support: Option<Vec<serde_json::Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub aras: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgePublications {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub inferred: Option<Vec<Publication>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub drug_name: Option<String>,
	pub subject: String,
	pub object: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub paths: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
	pub id: String,
	#[serde(default)]
	pub edges: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authors: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub year: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub journal: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pmid: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub doi: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trial {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phase: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nctid: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub evidence_type: Option<String>,
}

/// A whole graph document. Node and edge maps keep document order.
///
/// `results`, `paths`, `publications` and `trials` are carried for callers
/// but not drawn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: IndexMap<String, GraphNode>,
	#[serde(default)]
	pub edges: IndexMap<String, GraphEdge>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub results: Option<Vec<ResultRow>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub paths: Option<IndexMap<String, Path>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub publications: Option<IndexMap<String, Publication>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub trials: Option<IndexMap<String, Trial>>,
}

/// Failure to read a graph document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
	#[error("malformed graph document: {0}")]
	Json(#[from] serde_json::Error),
}

impl GraphData {
	/// Parse a JSON graph document.
	pub fn from_json(input: &str) -> Result<Self, DocumentError> {
		Ok(serde_json::from_str(input)?)
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Named positioning strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutType {
	/// Layered tree, top to bottom.
	#[default]
	#[serde(rename = "hierarchical")]
	Hierarchical,
	/// Layered tree, left to right.
	#[serde(rename = "hierarchicalLR")]
	HierarchicalLr,
	#[serde(rename = "force")]
	Force,
	#[serde(rename = "grid")]
	Grid,
}

impl LayoutType {
	pub const ALL: [LayoutType; 4] = [
		LayoutType::Hierarchical,
		LayoutType::HierarchicalLr,
		LayoutType::Force,
		LayoutType::Grid,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			LayoutType::Hierarchical => "hierarchical",
			LayoutType::HierarchicalLr => "hierarchicalLR",
			LayoutType::Force => "force",
			LayoutType::Grid => "grid",
		}
	}
}

impl fmt::Display for LayoutType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout `{0}`")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutType {
	type Err = UnknownLayout;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		LayoutType::ALL
			.into_iter()
			.find(|l| l.as_str() == s)
			.ok_or_else(|| UnknownLayout(s.to_string()))
	}
}

/// Domain entities currently selected in the view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl Selection {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// Display metadata attached to a node view record.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNodeData {
	pub label: String,
	pub graph_node: GraphNode,
	/// Simplified primary type, e.g. `Drug`.
	pub primary_type: String,
	pub color: &'static str,
}

/// Display metadata attached to an edge view record.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdgeData {
	pub label: String,
	pub graph_edge: GraphEdge,
}

/// Renderer-facing node record. Only `position` and `selected` change after
/// creation.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowNode {
	pub id: String,
	pub position: Position,
	pub width: f64,
	pub height: f64,
	pub selected: bool,
	pub data: GraphNodeData,
}

impl FlowNode {
	pub fn center(&self) -> Position {
		Position {
			x: self.position.x + self.width / 2.0,
			y: self.position.y + self.height / 2.0,
		}
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.position.x
			&& x <= self.position.x + self.width
			&& y >= self.position.y
			&& y <= self.position.y + self.height
	}
}

/// Renderer-facing edge record.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub selected: bool,
	pub data: GraphEdgeData,
	/// Waypoints from the last layout; empty for a direct edge.
	pub bends: Vec<Position>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_document_with_optional_collections() {
		let doc = r#"{
			"nodes": {
				"a": {"id": "a", "names": ["Aspirin"], "types": ["biolink:Drug"], "curies": ["CHEBI:15365"]},
				"b": {"id": "b", "names": ["Pain"], "types": ["biolink:Disease"]}
			},
			"edges": {
				"e1": {
					"id": "e1", "subject": "a", "object": "b", "predicate": "biolink:treats",
					"knowledge_level": "knowledge_assertion",
					"provenance": [{"source": "infores:chembl", "evidence_type": "clinical"}],
					"publications": {"inferred": [{"id": "PMID:1", "year": 2001}]},
					"support": [{"anything": true}]
				}
			},
			"results": [{"id": "r1", "subject": "a", "object": "b", "paths": ["p1"]}],
			"paths": {"p1": {"id": "p1", "edges": ["e1"]}}
		}"#;
		let data = GraphData::from_json(doc).unwrap();
		assert_eq!(data.nodes.keys().collect::<Vec<_>>(), ["a", "b"]);
		let edge = &data.edges["e1"];
		assert_eq!(edge.provenance.as_ref().unwrap()[0].source.as_deref(), Some("infores:chembl"));
		let inferred = edge.publications.as_ref().unwrap().inferred.as_ref().unwrap();
		assert_eq!(inferred[0].year, Some(2001));
		assert_eq!(data.paths.as_ref().unwrap()["p1"].edges, ["e1"]);
		assert!(data.trials.is_none());
	}

	#[test]
	fn malformed_document_is_an_error() {
		let err = GraphData::from_json("{\"nodes\": [").unwrap_err();
		assert!(err.to_string().starts_with("malformed graph document"));
	}

	#[test]
	fn layout_names_round_trip_through_from_str() {
		for layout in LayoutType::ALL {
			assert_eq!(layout.to_string().parse::<LayoutType>(), Ok(layout));
		}
		assert_eq!(
			"radial".parse::<LayoutType>(),
			Err(UnknownLayout("radial".into()))
		);
		assert_eq!(
			serde_json::to_string(&LayoutType::HierarchicalLr).unwrap(),
			"\"hierarchicalLR\""
		);
	}
}
