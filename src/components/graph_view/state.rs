use std::collections::HashSet;

use super::types::{FlowEdge, FlowNode, Position};

/// Pointer travel (screen px) below which a press counts as a click.
pub const CLICK_SLOP: f64 = 3.0;
/// Screen px panned per wheel delta unit.
const SCROLL_PAN_SPEED: f64 = 0.5;

/// Whether a press that travelled (`dx`, `dy`) screen px is still a click.
pub fn is_click(dx: f64, dy: f64) -> bool {
	dx.hypot(dy) < CLICK_SLOP
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zoom by `factor` keeping the graph point under (`sx`, `sy`) fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min_k: f64, max_k: f64) {
		let new_k = (self.k * factor).clamp(min_k, max_k);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	pub fn css(&self) -> String {
		format!("translate({}px, {}px) scale({})", self.x, self.y, self.k)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
		Self {
			x: a.0.min(b.0),
			y: a.1.min(b.1),
			width: (a.0 - b.0).abs(),
			height: (a.1 - b.1).abs(),
		}
	}

	pub fn intersects(&self, node: &FlowNode) -> bool {
		self.x < node.position.x + node.width
			&& node.position.x < self.x + self.width
			&& self.y < node.position.y + node.height
			&& node.position.y < self.y + self.height
	}
}

/// Bounding box of all nodes.
pub fn bounds(nodes: &[FlowNode]) -> Option<Rect> {
	let first = nodes.first()?;
	let (mut x0, mut y0) = (first.position.x, first.position.y);
	let (mut x1, mut y1) = (x0 + first.width, y0 + first.height);
	for n in &nodes[1..] {
		x0 = x0.min(n.position.x);
		y0 = y0.min(n.position.y);
		x1 = x1.max(n.position.x + n.width);
		y1 = y1.max(n.position.y + n.height);
	}
	Some(Rect {
		x: x0,
		y: y0,
		width: x1 - x0,
		height: y1 - y0,
	})
}

/// Transform that centers all nodes in a `width` x `height` viewport with
/// `padding` (fraction of the graph size) around them.
pub fn fit_view(
	nodes: &[FlowNode],
	width: f64,
	height: f64,
	padding: f64,
	min_k: f64,
	max_k: f64,
) -> Option<ViewTransform> {
	let b = bounds(nodes)?;
	let scale = 1.0 + padding;
	let kx = if b.width > 0.0 { width / (b.width * scale) } else { max_k };
	let ky = if b.height > 0.0 { height / (b.height * scale) } else { max_k };
	let k = kx.min(ky).clamp(min_k, max_k);
	Some(ViewTransform {
		x: width / 2.0 - (b.x + b.width / 2.0) * k,
		y: height / 2.0 - (b.y + b.height / 2.0) * k,
		k,
	})
}

/// Topmost node under a graph-space point.
pub fn node_at(nodes: &[FlowNode], gx: f64, gy: f64) -> Option<&FlowNode> {
	nodes.iter().rev().find(|n| n.contains(gx, gy))
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub moved: bool,
}

impl DragState {
	/// Where the dragged node goes for a pointer at (`sx`, `sy`), or `None`
	/// while the press has not left the click slop.
	pub fn node_position(&self, sx: f64, sy: f64, k: f64) -> Option<Position> {
		let (dx, dy) = (sx - self.start_x, sy - self.start_y);
		if !self.moved && is_click(dx, dy) {
			return None;
		}
		Some(Position {
			x: self.node_start.x + dx / k,
			y: self.node_start.y + dy / k,
		})
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Rubber-band selection, in graph coordinates.
#[derive(Clone, Debug, Default)]
pub struct MarqueeState {
	pub active: bool,
	pub additive: bool,
	pub start: (f64, f64),
	pub current: (f64, f64),
}

impl MarqueeState {
	pub fn rect(&self) -> Rect {
		Rect::from_corners(self.start, self.current)
	}
}

/// What a wheel tick does to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelGesture {
	/// Screen px to move the viewport by.
	Pan(f64, f64),
	/// Zoom factor around the pointer.
	Zoom(f64),
}

/// A plain wheel scrolls the viewport; with the zoom modifier (ctrl or meta,
/// which is also what pinch gestures report) it zooms. Shift turns vertical
/// scrolling sideways.
pub fn wheel_gesture(delta_x: f64, delta_y: f64, zoom_modifier: bool, shift: bool) -> WheelGesture {
	if zoom_modifier {
		return WheelGesture::Zoom(if delta_y > 0.0 { 0.9 } else { 1.1 });
	}
	let (dx, dy) = if shift && delta_x == 0.0 {
		(delta_y, 0.0)
	} else {
		(delta_x, delta_y)
	};
	WheelGesture::Pan(-dx * SCROLL_PAN_SPEED, -dy * SCROLL_PAN_SPEED)
}

/// What a pointer press landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
	Node(String),
	Edge(String),
	Pane,
}

/// Ids of selected nodes and edges, in record order.
pub fn selected_ids(nodes: &[FlowNode], edges: &[FlowEdge]) -> (Vec<String>, Vec<String>) {
	(
		nodes.iter().filter(|n| n.selected).map(|n| n.id.clone()).collect(),
		edges.iter().filter(|e| e.selected).map(|e| e.id.clone()).collect(),
	)
}

/// Apply a click. Without `additive` the target becomes the only selected
/// element (the pane clears the selection); with it the target is toggled.
/// Returns whether any flag changed.
pub fn click_select(
	nodes: &mut [FlowNode],
	edges: &mut [FlowEdge],
	target: &ClickTarget,
	additive: bool,
) -> bool {
	let before = selected_ids(nodes, edges);
	let hit_node = |id: &str| matches!(target, ClickTarget::Node(t) if t == id);
	let hit_edge = |id: &str| matches!(target, ClickTarget::Edge(t) if t == id);

	for n in nodes.iter_mut() {
		if hit_node(&n.id) {
			n.selected = !(additive && n.selected);
		} else if !additive {
			n.selected = false;
		}
	}
	for e in edges.iter_mut() {
		if hit_edge(&e.id) {
			e.selected = !(additive && e.selected);
		} else if !additive {
			e.selected = false;
		}
	}
	selected_ids(nodes, edges) != before
}

/// Select every node the rectangle touches plus the edges attached to them.
pub fn marquee_select(
	nodes: &mut [FlowNode],
	edges: &mut [FlowEdge],
	rect: Rect,
	additive: bool,
) -> bool {
	let before = selected_ids(nodes, edges);
	let mut inside = HashSet::new();
	for n in nodes.iter_mut() {
		if rect.intersects(n) {
			n.selected = true;
			inside.insert(n.id.clone());
		} else if !additive {
			n.selected = false;
		}
	}
	for e in edges.iter_mut() {
		if inside.contains(&e.source) || inside.contains(&e.target) {
			e.selected = true;
		} else if !additive {
			e.selected = false;
		}
	}
	selected_ids(nodes, edges) != before
}

/// Force selection flags to membership in an externally owned id set.
pub fn apply_controlled(nodes: &mut [FlowNode], edges: &mut [FlowEdge], ids: &HashSet<String>) {
	for n in nodes.iter_mut() {
		n.selected = ids.contains(&n.id);
	}
	for e in edges.iter_mut() {
		e.selected = ids.contains(&e.id);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_view::transform::{transform_edges, transform_nodes};
	use crate::components::graph_view::types::GraphData;

	fn records() -> (Vec<FlowNode>, Vec<FlowEdge>) {
		let data = GraphData::from_json(
			r#"{
				"nodes": {
					"a": {"id": "a", "names": ["A"], "types": []},
					"b": {"id": "b", "names": ["B"], "types": []},
					"c": {"id": "c", "names": ["C"], "types": []}
				},
				"edges": {
					"ab": {"id": "ab", "subject": "a", "object": "b", "predicate": "x"},
					"bc": {"id": "bc", "subject": "b", "object": "c", "predicate": "x"}
				}
			}"#,
		)
		.unwrap();
		let mut nodes = transform_nodes(&data);
		for (i, n) in nodes.iter_mut().enumerate() {
			n.position = Position {
				x: 300.0 * i as f64,
				y: 0.0,
			};
		}
		(nodes, transform_edges(&data))
	}

	#[test]
	fn zoom_keeps_pointer_anchored() {
		let mut t = ViewTransform {
			x: 10.0,
			y: 20.0,
			k: 1.0,
		};
		let before = t.screen_to_graph(100.0, 100.0);
		t.zoom_at(100.0, 100.0, 1.5, 0.5, 2.0);
		assert_eq!(t.k, 1.5);
		let after = t.screen_to_graph(100.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
		t.zoom_at(0.0, 0.0, 10.0, 0.5, 2.0);
		assert_eq!(t.k, 2.0);
	}

	#[test]
	fn plain_wheel_pans_and_modified_wheel_zooms() {
		assert_eq!(wheel_gesture(0.0, 100.0, false, false), WheelGesture::Pan(0.0, -50.0));
		assert_eq!(wheel_gesture(0.0, 100.0, false, true), WheelGesture::Pan(-50.0, 0.0));
		assert_eq!(wheel_gesture(40.0, 0.0, false, false), WheelGesture::Pan(-20.0, 0.0));
		assert_eq!(wheel_gesture(0.0, 100.0, true, false), WheelGesture::Zoom(0.9));
		assert_eq!(wheel_gesture(0.0, -3.0, true, false), WheelGesture::Zoom(1.1));

		let mut t = ViewTransform::default();
		t.pan_by(-20.0, 5.0);
		assert_eq!((t.x, t.y, t.k), (-20.0, 5.0, 1.0));
	}

	#[test]
	fn short_press_stays_a_click() {
		assert!(is_click(2.0, 2.0));
		assert!(!is_click(3.0, 0.0));

		let mut drag = DragState {
			active: true,
			node_id: Some("a".into()),
			start_x: 100.0,
			start_y: 100.0,
			node_start: Position { x: 10.0, y: 20.0 },
			moved: false,
		};
		assert_eq!(drag.node_position(101.0, 102.0, 2.0), None);
		assert_eq!(
			drag.node_position(110.0, 100.0, 2.0),
			Some(Position { x: 15.0, y: 20.0 })
		);
		// once moving, even tiny offsets follow the pointer
		drag.moved = true;
		assert_eq!(
			drag.node_position(101.0, 100.0, 1.0),
			Some(Position { x: 11.0, y: 20.0 })
		);
	}

	#[test]
	fn fit_centers_graph_and_clamps_zoom() {
		let (nodes, _) = records();
		// graph spans 780 x 60
		let t = fit_view(&nodes, 858.0, 600.0, 0.1, 0.5, 2.0).unwrap();
		assert!((t.k - 1.0).abs() < 1e-9);
		assert!((t.x - (429.0 - 390.0)).abs() < 1e-9);
		assert!((t.y - 270.0).abs() < 1e-9);

		let tiny = fit_view(&nodes, 100.0, 100.0, 0.1, 0.5, 2.0).unwrap();
		assert_eq!(tiny.k, 0.5);
		assert!(fit_view(&[], 100.0, 100.0, 0.1, 0.5, 2.0).is_none());
	}

	#[test]
	fn hit_test_returns_topmost_node() {
		let (mut nodes, _) = records();
		nodes[2].position = nodes[1].position;
		assert_eq!(node_at(&nodes, 310.0, 10.0).map(|n| n.id.as_str()), Some("c"));
		assert!(node_at(&nodes, 250.0, 10.0).is_none());
	}

	#[test]
	fn plain_click_replaces_and_shift_click_toggles() {
		let (mut nodes, mut edges) = records();
		assert!(click_select(&mut nodes, &mut edges, &ClickTarget::Node("a".into()), false));
		assert!(click_select(&mut nodes, &mut edges, &ClickTarget::Edge("bc".into()), true));
		assert_eq!(selected_ids(&nodes, &edges), (vec!["a".into()], vec!["bc".into()]));

		assert!(click_select(&mut nodes, &mut edges, &ClickTarget::Node("a".into()), true));
		assert_eq!(selected_ids(&nodes, &edges).0, Vec::<String>::new());

		assert!(click_select(&mut nodes, &mut edges, &ClickTarget::Node("b".into()), false));
		assert_eq!(selected_ids(&nodes, &edges), (vec!["b".into()], vec![]));
		assert!(!click_select(&mut nodes, &mut edges, &ClickTarget::Node("b".into()), false));
		assert!(click_select(&mut nodes, &mut edges, &ClickTarget::Pane, false));
		assert_eq!(selected_ids(&nodes, &edges), (vec![], vec![]));
	}

	#[test]
	fn marquee_selects_partially_covered_nodes() {
		let (mut nodes, mut edges) = records();
		let rect = Rect::from_corners((400.0, 50.0), (170.0, -10.0));
		assert!(marquee_select(&mut nodes, &mut edges, rect, false));
		let (n, e) = selected_ids(&nodes, &edges);
		assert_eq!(n, ["a", "b"]);
		assert_eq!(e, ["ab", "bc"]);
	}

	#[test]
	fn controlled_ids_override_flags() {
		let (mut nodes, mut edges) = records();
		nodes[0].selected = true;
		let ids: HashSet<String> = ["b", "bc"].into_iter().map(String::from).collect();
		apply_controlled(&mut nodes, &mut edges, &ids);
		assert_eq!(
			selected_ids(&nodes, &edges),
			(vec!["b".to_string()], vec!["bc".to_string()])
		);
	}
}
