//! `layered` algorithm, delegated to dugong's dagre pipeline.

use dugong::graphlib::{Graph, GraphOptions};
use dugong::{EdgeLabel, GraphLabel, NodeLabel, Point, RankDir};

use super::{Direction, Placement, Spacing, Subgraph};

fn rank_dir(direction: Direction) -> RankDir {
	match direction {
		Direction::Down => RankDir::TB,
		Direction::Up => RankDir::BT,
		Direction::Right => RankDir::LR,
		Direction::Left => RankDir::RL,
	}
}

/// Dummy-node points of an edge that crosses more than one layer. dagre
/// always leaves one interior point (the label slot) plus the two border
/// intersections, so anything shorter is a plain neighbour-to-neighbour edge.
fn bends(points: &[Point]) -> Vec<(f64, f64)> {
	if points.len() <= 3 {
		return Vec::new();
	}
	points[1..points.len() - 1].iter().map(|p| (p.x, p.y)).collect()
}

/// Lay out one connected subgraph; returns top-left corners and, per edge,
/// the bend points of long edges.
pub(crate) fn layout(sub: &Subgraph, direction: Direction, spacing: &Spacing) -> Placement {
	let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
		multigraph: true,
		compound: true,
		directed: true,
	});
	g.set_graph(GraphLabel {
		rankdir: rank_dir(direction),
		nodesep: spacing.node_node,
		ranksep: spacing.between_layers,
		..Default::default()
	});

	for (i, &(width, height)) in sub.sizes.iter().enumerate() {
		g.set_node(
			i.to_string(),
			NodeLabel {
				width,
				height,
				..Default::default()
			},
		);
	}
	for (k, &(a, b)) in sub.edges.iter().enumerate() {
		g.set_edge_named(
			a.to_string(),
			b.to_string(),
			Some(k.to_string()),
			Some(EdgeLabel {
				minlen: 1,
				weight: 1.0,
				..Default::default()
			}),
		);
	}

	dugong::layout_dagreish(&mut g);

	let positions = sub
		.sizes
		.iter()
		.enumerate()
		.map(|(i, &(w, h))| {
			let center = g
				.node(&i.to_string())
				.map(|n| (n.x.unwrap_or(0.0), n.y.unwrap_or(0.0)))
				.unwrap_or_default();
			(center.0 - w / 2.0, center.1 - h / 2.0)
		})
		.collect();
	let bends = sub
		.edges
		.iter()
		.enumerate()
		.map(|(k, &(a, b))| {
			let key = k.to_string();
			g.edge(&a.to_string(), &b.to_string(), Some(key.as_str()))
				.map(|e| bends(&e.points))
				.unwrap_or_default()
		})
		.collect();

	Placement { positions, bends }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn spacing() -> Spacing {
		Spacing {
			node_node: 80.0,
			between_layers: 100.0,
			components: 100.0,
		}
	}

	#[test]
	fn chain_stacks_downwards() {
		let sub = Subgraph {
			sizes: vec![(180.0, 60.0); 3],
			edges: vec![(0, 1), (1, 2)],
		};
		let p = layout(&sub, Direction::Down, &spacing());
		assert_eq!(p.positions[1].1 - p.positions[0].1, 160.0);
		assert_eq!(p.positions[2].1 - p.positions[1].1, 160.0);
		assert!(p.bends.iter().all(Vec::is_empty));
	}

	#[test]
	fn skipping_edge_bends_around_the_middle_node() {
		let sub = Subgraph {
			sizes: vec![(180.0, 60.0); 3],
			edges: vec![(0, 1), (1, 2), (0, 2)],
		};
		let p = layout(&sub, Direction::Down, &spacing());
		let (bx, by) = p.positions[1];
		let long = &p.bends[2];
		assert!(!long.is_empty());
		// one bend sits on the middle layer, beside the middle box
		let beside = long
			.iter()
			.find(|(_, y)| *y >= by && *y <= by + 60.0)
			.copied()
			.unwrap();
		assert!(beside.0 < bx || beside.0 > bx + 180.0, "{beside:?} inside {:?}", (bx, by));
	}

	#[test]
	fn right_direction_swaps_axes() {
		let sub = Subgraph {
			sizes: vec![(180.0, 60.0); 2],
			edges: vec![(0, 1)],
		};
		let p = layout(&sub, Direction::Right, &spacing());
		assert_eq!(p.positions[1].0 - p.positions[0].0, 280.0);
		assert_eq!(p.positions[0].1, p.positions[1].1);
	}
}
