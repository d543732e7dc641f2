//! Layout engine boundary and the built-in engine.
//!
//! Graphs go in as boxes and id pairs plus ELK-style string options; top-left
//! coordinates come back per box, plus bend points for edges that had to be
//! routed around other boxes. [`BuiltinEngine`] understands the `layered`
//! (dagre), `force` and `box` algorithms.

mod boxed;
mod dagre;
mod force;

use std::collections::{HashMap, HashSet};
use std::future::Future;

use petgraph::unionfind::UnionFind;

use super::layouts::{
	ALGORITHM, DIRECTION, FORCE_ITERATIONS, LayoutOptions, PADDING, SPACING_BETWEEN_LAYERS,
	SPACING_COMPONENTS, SPACING_NODE_NODE,
};

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub id: String,
	pub width: f64,
	pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEdge {
	pub id: String,
	pub sources: Vec<String>,
	pub targets: Vec<String>,
}

/// Root graph handed to an engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutGraph {
	pub id: String,
	pub options: LayoutOptions,
	pub children: Vec<LayoutNode>,
	pub edges: Vec<LayoutEdge>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
}

/// Waypoints of an edge that does not run straight between its ends.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRoute {
	pub id: String,
	pub bends: Vec<(f64, f64)>,
}

/// Positioned boxes plus the size of the root including padding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutResult {
	pub children: Vec<PositionedNode>,
	/// Only edges with bend points are listed.
	pub edges: Vec<EdgeRoute>,
	pub width: f64,
	pub height: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
	#[error("unknown layout algorithm `{0}`")]
	UnknownAlgorithm(String),
	#[error("option `{key}` has invalid value `{value}`")]
	InvalidOption { key: String, value: String },
	#[error("invalid padding `{0}`")]
	InvalidPadding(String),
	#[error("edge `{edge}` references unknown node `{node}`")]
	UnknownEndpoint { edge: String, node: String },
}

/// Something that can position the boxes of a [`LayoutGraph`].
pub trait LayoutEngine {
	fn layout(&self, graph: LayoutGraph) -> impl Future<Output = Result<LayoutResult, LayoutError>>;
}

/// In-process engine for the `layered`, `force` and `box` algorithms.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinEngine;

impl LayoutEngine for BuiltinEngine {
	fn layout(&self, graph: LayoutGraph) -> impl Future<Output = Result<LayoutResult, LayoutError>> {
		async move { run(&graph) }
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Padding {
	pub top: f64,
	pub left: f64,
	pub bottom: f64,
	pub right: f64,
}

impl Default for Padding {
	fn default() -> Self {
		Self {
			top: 12.0,
			left: 12.0,
			bottom: 12.0,
			right: 12.0,
		}
	}
}

/// Layer progression of the `layered` algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
	Down,
	Up,
	Right,
	Left,
}

impl Direction {
	fn is_vertical(self) -> bool {
		matches!(self, Direction::Down | Direction::Up)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Spacing {
	pub node_node: f64,
	pub between_layers: f64,
	pub components: f64,
}

/// Boxes and index pairs of one connected piece of the input.
#[derive(Clone, Debug, Default)]
pub(crate) struct Subgraph {
	pub sizes: Vec<(f64, f64)>,
	pub edges: Vec<(usize, usize)>,
}

/// Top-left corners for the boxes of a [`Subgraph`] and bend points for its
/// edges (parallel to `Subgraph::edges`; empty when an edge is not routed).
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Placement {
	pub positions: Vec<(f64, f64)>,
	pub bends: Vec<Vec<(f64, f64)>>,
}

impl Placement {
	fn unrouted(positions: Vec<(f64, f64)>) -> Self {
		Self {
			positions,
			bends: Vec::new(),
		}
	}

	fn shift(&mut self, dx: f64, dy: f64) {
		let points = self
			.positions
			.iter_mut()
			.chain(self.bends.iter_mut().flatten());
		for p in points {
			p.0 += dx;
			p.1 += dy;
		}
	}

	/// Move everything so the boxes' bounding box starts at the origin.
	fn normalize(&mut self) {
		let min_x = self.positions.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
		let min_y = self.positions.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
		if min_x.is_finite() && min_y.is_finite() {
			self.shift(-min_x, -min_y);
		}
	}
}

fn number(options: &LayoutOptions, key: &str, default: f64) -> Result<f64, LayoutError> {
	match options.get(key) {
		None => Ok(default),
		Some(raw) => raw
			.trim()
			.parse::<f64>()
			.ok()
			.filter(|v| v.is_finite() && *v >= 0.0)
			.ok_or_else(|| LayoutError::InvalidOption {
				key: key.to_string(),
				value: raw.clone(),
			}),
	}
}

/// Parse `[top=50,left=50,bottom=50,right=50]`; sides not named keep the default.
pub(crate) fn parse_padding(raw: &str) -> Result<Padding, LayoutError> {
	let invalid = || LayoutError::InvalidPadding(raw.to_string());
	let inner = raw
		.trim()
		.strip_prefix('[')
		.and_then(|s| s.strip_suffix(']'))
		.ok_or_else(invalid)?;

	let mut padding = Padding::default();
	for part in inner.split(',').map(str::trim).filter(|p| !p.is_empty()) {
		let (side, value) = part.split_once('=').ok_or_else(invalid)?;
		let value: f64 = value.trim().parse().map_err(|_| invalid())?;
		match side.trim() {
			"top" => padding.top = value,
			"left" => padding.left = value,
			"bottom" => padding.bottom = value,
			"right" => padding.right = value,
			_ => return Err(invalid()),
		}
	}
	Ok(padding)
}

fn parse_direction(options: &LayoutOptions) -> Result<Direction, LayoutError> {
	match options.get(DIRECTION).map(String::as_str) {
		None | Some("UNDEFINED") | Some("RIGHT") => Ok(Direction::Right),
		Some("DOWN") => Ok(Direction::Down),
		Some("UP") => Ok(Direction::Up),
		Some("LEFT") => Ok(Direction::Left),
		Some(other) => Err(LayoutError::InvalidOption {
			key: DIRECTION.to_string(),
			value: other.to_string(),
		}),
	}
}

/// Index pairs for every source/target combination, with the id of the edge
/// each pair came from.
fn index_edges(graph: &LayoutGraph) -> Result<Vec<(usize, usize, &str)>, LayoutError> {
	let index: HashMap<&str, usize> = graph
		.children
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();
	let lookup = |edge: &LayoutEdge, id: &String| {
		index
			.get(id.as_str())
			.copied()
			.ok_or_else(|| LayoutError::UnknownEndpoint {
				edge: edge.id.clone(),
				node: id.clone(),
			})
	};

	let mut pairs = Vec::new();
	for edge in &graph.edges {
		for source in &edge.sources {
			let s = lookup(edge, source)?;
			for target in &edge.targets {
				pairs.push((s, lookup(edge, target)?, edge.id.as_str()));
			}
		}
	}
	Ok(pairs)
}

/// Connected pieces, each listed in ascending input order, ordered by their
/// first member.
pub(crate) fn components(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
	let mut sets = UnionFind::<usize>::new(n);
	for &(a, b) in edges {
		sets.union(a, b);
	}

	let mut groups: Vec<Vec<usize>> = Vec::new();
	let mut slot: HashMap<usize, usize> = HashMap::new();
	for i in 0..n {
		let g = *slot.entry(sets.find(i)).or_insert_with(|| {
			groups.push(Vec::new());
			groups.len() - 1
		});
		groups[g].push(i);
	}
	groups
}

/// Lay out each component on its own, then line them up along one axis.
fn per_component<F>(
	sizes: &[(f64, f64)],
	edges: &[(usize, usize)],
	gap: f64,
	horizontal: bool,
	mut place: F,
) -> Placement
where
	F: FnMut(&Subgraph) -> Placement,
{
	let mut out = Placement {
		positions: vec![(0.0, 0.0); sizes.len()],
		bends: vec![Vec::new(); edges.len()],
	};
	let mut offset = 0.0;

	for members in components(sizes.len(), edges) {
		let local: HashMap<usize, usize> =
			members.iter().enumerate().map(|(l, &g)| (g, l)).collect();
		let (owned, local_edges): (Vec<usize>, Vec<(usize, usize)>) = edges
			.iter()
			.enumerate()
			.filter_map(|(k, (a, b))| Some((k, (*local.get(a)?, *local.get(b)?))))
			.unzip();
		let sub = Subgraph {
			sizes: members.iter().map(|&g| sizes[g]).collect(),
			edges: local_edges,
		};

		let mut placed = place(&sub);
		placed.normalize();
		let extent = placed
			.positions
			.iter()
			.zip(&sub.sizes)
			.map(|(&(x, y), &(w, h))| if horizontal { x + w } else { y + h })
			.fold(0.0, f64::max);
		if horizontal {
			placed.shift(offset, 0.0);
		} else {
			placed.shift(0.0, offset);
		}

		for (&g, position) in members.iter().zip(placed.positions) {
			out.positions[g] = position;
		}
		for (k, route) in owned.into_iter().zip(placed.bends) {
			out.bends[k] = route;
		}
		offset += extent + gap;
	}
	out
}

fn run(graph: &LayoutGraph) -> Result<LayoutResult, LayoutError> {
	let options = &graph.options;
	let algorithm = options.get(ALGORITHM).map(String::as_str).unwrap_or("layered");
	let padding = match options.get(PADDING) {
		Some(raw) => parse_padding(raw)?,
		None => Padding::default(),
	};
	let spacing = Spacing {
		node_node: number(options, SPACING_NODE_NODE, 20.0)?,
		between_layers: number(options, SPACING_BETWEEN_LAYERS, 20.0)?,
		components: number(options, SPACING_COMPONENTS, 20.0)?,
	};
	let pairs = index_edges(graph)?;
	let edges: Vec<(usize, usize)> = pairs.iter().map(|&(a, b, _)| (a, b)).collect();
	let sizes: Vec<(f64, f64)> = graph.children.iter().map(|n| (n.width, n.height)).collect();

	let mut placement = match algorithm {
		"layered" | "org.eclipse.elk.layered" => {
			let direction = parse_direction(options)?;
			per_component(&sizes, &edges, spacing.components, direction.is_vertical(), |sub| {
				dagre::layout(sub, direction, &spacing)
			})
		}
		"force" | "org.eclipse.elk.force" => {
			let iterations = number(options, FORCE_ITERATIONS, 300.0)? as usize;
			per_component(&sizes, &edges, spacing.components, true, |sub| {
				Placement::unrouted(force::layout(sub, iterations, spacing.node_node))
			})
		}
		"box" | "org.eclipse.elk.box" => {
			Placement::unrouted(boxed::layout(&sizes, spacing.node_node))
		}
		other => return Err(LayoutError::UnknownAlgorithm(other.to_string())),
	};

	let (mut width, mut height) = (0.0_f64, 0.0_f64);
	for (node, &(x, y)) in graph.children.iter().zip(&placement.positions) {
		width = width.max(x + node.width);
		height = height.max(y + node.height);
	}
	placement.shift(padding.left, padding.top);

	// a hyperedge keeps the route of its first routed pair
	let mut routed = HashSet::new();
	let routes = pairs
		.iter()
		.zip(placement.bends)
		.filter(|(pair, bends)| !bends.is_empty() && routed.insert(pair.2))
		.map(|(pair, bends)| EdgeRoute {
			id: pair.2.to_string(),
			bends,
		})
		.collect();

	let children = graph
		.children
		.iter()
		.zip(placement.positions)
		.map(|(node, (x, y))| PositionedNode {
			id: node.id.clone(),
			x,
			y,
		})
		.collect();

	Ok(LayoutResult {
		children,
		edges: routes,
		width: padding.left + width + padding.right,
		height: padding.top + height + padding.bottom,
	})
}
