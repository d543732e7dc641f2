use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::Subgraph;

const STEP: f32 = 0.016;
const EPSILON: f64 = 1e-6;

fn seed(n: usize) -> Vec<(f64, f64)> {
	let radius = 100.0 + 10.0 * n as f64;
	(0..n)
		.map(|i| {
			let angle = (i as f64) * 2.0 * PI / n as f64;
			(radius * angle.cos(), radius * angle.sin())
		})
		.collect()
}

fn simulate(sub: &Subgraph, start: &[(f64, f64)], iterations: usize) -> Vec<(f64, f64)> {
	let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});

	let idx: Vec<_> = start
		.iter()
		.enumerate()
		.map(|(i, &(x, y))| {
			graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			})
		})
		.collect();
	for &(a, b) in &sub.edges {
		if a != b {
			graph.add_edge(idx[a], idx[b], EdgeData::default());
		}
	}

	for _ in 0..iterations {
		graph.update(STEP);
	}

	let mut out = start.to_vec();
	graph.visit_nodes(|node| {
		out[node.data.user_data] = (node.x() as f64, node.y() as f64);
	});
	out
}

/// Scale center positions up until every pair of boxes is `gap` apart along
/// at least one axis.
pub(crate) fn separate(centers: &mut [(f64, f64)], sizes: &[(f64, f64)], gap: f64) {
	for j in 1..centers.len() {
		while centers[..j].iter().any(|c| {
			(c.0 - centers[j].0).abs() < EPSILON && (c.1 - centers[j].1).abs() < EPSILON
		}) {
			centers[j].0 += 1.0;
		}
	}

	let mut scale: f64 = 1.0;
	for i in 0..centers.len() {
		for j in i + 1..centers.len() {
			let (dx, dy) = (
				(centers[i].0 - centers[j].0).abs(),
				(centers[i].1 - centers[j].1).abs(),
			);
			let need_x = (sizes[i].0 + sizes[j].0) / 2.0 + gap;
			let need_y = (sizes[i].1 + sizes[j].1) / 2.0 + gap;
			let sx = if dx > EPSILON { need_x / dx } else { f64::INFINITY };
			let sy = if dy > EPSILON { need_y / dy } else { f64::INFINITY };
			scale = scale.max(sx.min(sy));
		}
	}
	for c in centers.iter_mut() {
		c.0 *= scale;
		c.1 *= scale;
	}
}

/// Force-directed placement; returns top-left corners.
pub(crate) fn layout(sub: &Subgraph, iterations: usize, gap: f64) -> Vec<(f64, f64)> {
	let n = sub.sizes.len();
	if n <= 1 {
		return vec![(0.0, 0.0); n];
	}

	let start = seed(n);
	let mut centers = simulate(sub, &start, iterations);
	if centers.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
		log::warn!("force simulation diverged, keeping seed positions");
		centers = start;
	}
	separate(&mut centers, &sub.sizes, gap);

	centers
		.iter()
		.zip(&sub.sizes)
		.map(|(&(x, y), &(w, h))| (x - w / 2.0, y - h / 2.0))
		.collect()
}
