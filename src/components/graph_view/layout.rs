//! Layout adapter: feeds view records to a [`LayoutEngine`] and writes the
//! computed positions back.
//!
//! Requests are numbered. Only the most recent request may publish its result,
//! so a slow computation that finishes after a newer one is dropped instead
//! of overwriting it.

use std::collections::{HashMap, HashSet};

use log::{debug, error, warn};

use super::engine::{LayoutEdge, LayoutEngine, LayoutError, LayoutGraph, LayoutNode, LayoutResult};
use super::layouts::layout_options;
use super::types::{FlowEdge, FlowNode, LayoutType, Position};

const ROOT_ID: &str = "root";

/// Monotonic request number handed out by [`LayoutAdapter::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayoutTicket(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutPhase {
	/// Last computed positions are available.
	#[default]
	Idle,
	/// A request is in flight.
	Computing,
}

/// Build the engine input for a set of view records. Edges with an endpoint
/// outside `nodes` are left out so the rest of the graph still lays out.
pub fn layout_graph(nodes: &[FlowNode], edges: &[FlowEdge], layout: LayoutType) -> LayoutGraph {
	let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let (attached, dangling): (Vec<&FlowEdge>, Vec<&FlowEdge>) = edges
		.iter()
		.partition(|e| known.contains(e.source.as_str()) && known.contains(e.target.as_str()));
	for edge in &dangling {
		warn!(
			"edge {} ({} -> {}) has a missing endpoint; not laid out",
			edge.id, edge.source, edge.target
		);
	}

	LayoutGraph {
		id: ROOT_ID.to_string(),
		options: layout_options(layout),
		children: nodes
			.iter()
			.map(|n| LayoutNode {
				id: n.id.clone(),
				width: n.width,
				height: n.height,
			})
			.collect(),
		edges: attached
			.into_iter()
			.map(|e| LayoutEdge {
				id: e.id.clone(),
				sources: vec![e.source.clone()],
				targets: vec![e.target.clone()],
			})
			.collect(),
	}
}

/// Copy engine coordinates onto the nodes; nodes the engine left out go to
/// the origin.
pub fn apply_positions(mut nodes: Vec<FlowNode>, result: &LayoutResult) -> Vec<FlowNode> {
	let computed: HashMap<&str, Position> = result
		.children
		.iter()
		.map(|c| (c.id.as_str(), Position { x: c.x, y: c.y }))
		.collect();
	for node in &mut nodes {
		node.position = computed.get(node.id.as_str()).copied().unwrap_or_default();
	}
	nodes
}

/// Attach engine bend points to the edges by id; edges without a route get
/// none.
pub fn apply_routes(mut edges: Vec<FlowEdge>, result: &LayoutResult) -> Vec<FlowEdge> {
	let routes: HashMap<&str, &[(f64, f64)]> = result
		.edges
		.iter()
		.map(|r| (r.id.as_str(), r.bends.as_slice()))
		.collect();
	for edge in &mut edges {
		edge.bends = routes
			.get(edge.id.as_str())
			.map(|bends| bends.iter().map(|&(x, y)| Position { x, y }).collect())
			.unwrap_or_default();
	}
	edges
}

/// Give fresh nodes the position their id had in an earlier layout.
fn carry_positions(mut nodes: Vec<FlowNode>, previous: &[FlowNode]) -> Vec<FlowNode> {
	let known: HashMap<&str, Position> =
		previous.iter().map(|n| (n.id.as_str(), n.position)).collect();
	for node in &mut nodes {
		node.position = known.get(node.id.as_str()).copied().unwrap_or_default();
	}
	nodes
}

/// One layout computation, detached from the adapter so it can run as a task.
#[derive(Clone, Debug)]
pub struct LayoutRequest {
	pub ticket: LayoutTicket,
	pub layout: LayoutType,
	pub nodes: Vec<FlowNode>,
	pub edges: Vec<FlowEdge>,
}

/// A finished [`LayoutRequest`]. `edges` carry the computed routes, or no
/// bends at all when the engine failed.
#[derive(Debug)]
pub struct LayoutOutcome {
	pub ticket: LayoutTicket,
	pub nodes: Vec<FlowNode>,
	pub edges: Vec<FlowEdge>,
	pub result: Result<Vec<FlowNode>, LayoutError>,
}

impl LayoutRequest {
	/// Run the engine. An empty node set never reaches the engine.
	pub async fn run<E: LayoutEngine>(self, engine: &E) -> LayoutOutcome {
		if self.nodes.is_empty() {
			return LayoutOutcome {
				ticket: self.ticket,
				nodes: self.nodes,
				edges: self.edges,
				result: Ok(Vec::new()),
			};
		}

		debug!(
			"layout {:?}: {} nodes, {} edges ({})",
			self.ticket,
			self.nodes.len(),
			self.edges.len(),
			self.layout
		);
		let computed = engine
			.layout(layout_graph(&self.nodes, &self.edges, self.layout))
			.await;
		let (result, edges) = match computed {
			Ok(computed) => (
				Ok(apply_positions(self.nodes.clone(), &computed)),
				apply_routes(self.edges, &computed),
			),
			Err(err) => (Err(err), apply_routes(self.edges, &LayoutResult::default())),
		};
		LayoutOutcome {
			ticket: self.ticket,
			nodes: self.nodes,
			edges,
			result,
		}
	}
}

/// Two-state layout machine holding the last published positions.
#[derive(Clone, Debug, Default)]
pub struct LayoutAdapter {
	issued: u64,
	phase: LayoutPhase,
	nodes: Vec<FlowNode>,
	edges: Vec<FlowEdge>,
}

impl LayoutAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn phase(&self) -> LayoutPhase {
		self.phase
	}

	pub fn is_computing(&self) -> bool {
		self.phase == LayoutPhase::Computing
	}

	/// Nodes as of the last published layout.
	pub fn nodes(&self) -> &[FlowNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[FlowEdge] {
		&self.edges
	}

	/// Start a request for new input; supersedes any request in flight.
	pub fn begin(
		&mut self,
		nodes: Vec<FlowNode>,
		edges: Vec<FlowEdge>,
		layout: LayoutType,
	) -> LayoutRequest {
		self.issued += 1;
		self.phase = LayoutPhase::Computing;
		LayoutRequest {
			ticket: LayoutTicket(self.issued),
			layout,
			nodes,
			edges,
		}
	}

	pub fn is_current(&self, ticket: LayoutTicket) -> bool {
		ticket.0 == self.issued
	}

	/// Publish a finished request. Returns `false` when a newer request has
	/// been issued since, in which case nothing changes.
	///
	/// A failed computation is logged and the nodes keep the positions they
	/// had in the previous layout (the origin for new ids).
	pub fn finish(&mut self, outcome: LayoutOutcome) -> bool {
		if !self.is_current(outcome.ticket) {
			debug!("dropping stale layout {:?}", outcome.ticket);
			return false;
		}

		self.nodes = match outcome.result {
			Ok(nodes) => nodes,
			Err(err) => {
				error!("Layout error: {err}");
				carry_positions(outcome.nodes, &self.nodes)
			}
		};
		self.edges = outcome.edges;
		self.phase = LayoutPhase::Idle;
		true
	}

	/// Replace the published nodes, e.g. after the user dragged one.
	pub fn set_nodes(&mut self, nodes: Vec<FlowNode>) {
		self.nodes = nodes;
	}

	/// Replace the published edges, e.g. after a drag invalidated routes.
	pub fn set_edges(&mut self, edges: Vec<FlowEdge>) {
		self.edges = edges;
	}
}

/// Lay out a set of view records in one go, failing soft to the input
/// positions.
pub async fn compute_layout<E: LayoutEngine>(
	engine: &E,
	nodes: Vec<FlowNode>,
	edges: Vec<FlowEdge>,
	layout: LayoutType,
) -> Vec<FlowNode> {
	compute_routed_layout(engine, nodes, edges, layout).await.0
}

/// Like [`compute_layout`], also returning the edges with their routes.
pub async fn compute_routed_layout<E: LayoutEngine>(
	engine: &E,
	nodes: Vec<FlowNode>,
	edges: Vec<FlowEdge>,
	layout: LayoutType,
) -> (Vec<FlowNode>, Vec<FlowEdge>) {
	let mut adapter = LayoutAdapter::new();
	let request = adapter.begin(nodes, edges, layout);
	adapter.finish(request.run(engine).await);
	(adapter.nodes, adapter.edges)
}
