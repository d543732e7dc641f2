use leptos::prelude::*;

use std::fmt::Write;

use super::types::{FlowEdge, FlowNode, Position};

const CURVATURE: f64 = 0.25;
pub const ARROW_MARKER_ID: &str = "graph-view-arrow";
const SELECTED_COLOR: &str = "#4285F4";
const LABEL_COLOR: &str = "#666";

/// Cubic bezier between two handles plus the point halfway along it.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
	pub path: String,
	pub label_x: f64,
	pub label_y: f64,
}

fn control_offset(distance: f64) -> f64 {
	if distance >= 0.0 {
		0.5 * distance
	} else {
		CURVATURE * 25.0 * (-distance).sqrt()
	}
}

/// Curve from the source's bottom handle to the target's top handle. With
/// bend points the curve passes through each of them and the label sits on
/// the middle one.
pub fn edge_geometry(source: &FlowNode, target: &FlowNode, bends: &[Position]) -> EdgeGeometry {
	let (sx, sy) = (source.position.x + source.width / 2.0, source.position.y + source.height);
	let (tx, ty) = (target.position.x + target.width / 2.0, target.position.y);
	if !bends.is_empty() {
		return routed_geometry((sx, sy), bends, (tx, ty));
	}
	let (scx, scy) = (sx, sy + control_offset(ty - sy));
	let (tcx, tcy) = (tx, ty - control_offset(ty - sy));

	EdgeGeometry {
		path: format!("M{sx},{sy} C{scx},{scy} {tcx},{tcy} {tx},{ty}"),
		label_x: sx * 0.125 + scx * 0.375 + tcx * 0.375 + tx * 0.125,
		label_y: sy * 0.125 + scy * 0.375 + tcy * 0.375 + ty * 0.125,
	}
}

fn routed_geometry(start: (f64, f64), bends: &[Position], end: (f64, f64)) -> EdgeGeometry {
	let points: Vec<(f64, f64)> = std::iter::once(start)
		.chain(bends.iter().map(|b| (b.x, b.y)))
		.chain(std::iter::once(end))
		.collect();

	let mut path = format!("M{},{}", start.0, start.1);
	for pair in points.windows(2) {
		let ((px, py), (qx, qy)) = (pair[0], pair[1]);
		let mid = (py + qy) / 2.0;
		let _ = write!(path, " C{px},{mid} {qx},{mid} {qx},{qy}");
	}

	let label = bends[bends.len() / 2];
	EdgeGeometry {
		path,
		label_x: label.x,
		label_y: label.y,
	}
}

/// Arrowhead shared by every edge path.
#[component]
pub fn ArrowMarker() -> impl IntoView {
	view! {
		<defs>
			<marker
				id=ARROW_MARKER_ID
				markerWidth="20"
				markerHeight="20"
				viewBox="-10 -10 20 20"
				refX="0"
				refY="0"
				orient="auto-start-reverse"
				markerUnits="userSpaceOnUse"
			>
				<polyline
					points="-5,-4 0,0 -5,4 -5,-4"
					stroke="#888"
					fill="#888"
					stroke-width="1"
					stroke-linecap="round"
					stroke-linejoin="round"
				/>
			</marker>
		</defs>
	}
}

/// Curve part of an edge. Press and click report the edge id; press also
/// carries whether Shift was held.
#[component]
pub fn GraphEdgeView(
	edge: FlowEdge,
	geometry: EdgeGeometry,
	on_press: Callback<(String, bool)>,
	on_click: Callback<String>,
) -> impl IntoView {
	let (press_id, click_id) = (edge.id.clone(), edge.id.clone());
	let stroke = if edge.selected { SELECTED_COLOR } else { "#b1b1b7" };

	view! {
		<g
			class=if edge.selected { "graph-edge selected" } else { "graph-edge" }
			on:mousedown=move |ev| {
				if ev.button() == 0 {
					ev.stop_propagation();
					on_press.run((press_id.clone(), ev.shift_key()));
				}
			}
			on:click=move |_| on_click.run(click_id.clone())
		>
			<path
				d=geometry.path.clone()
				fill="none"
				stroke="transparent"
				stroke-width="20"
				style="pointer-events: stroke; cursor: pointer;"
			/>
			<path
				d=geometry.path
				fill="none"
				stroke=stroke
				stroke-width=if edge.selected { "2" } else { "1.5" }
				marker-end=format!("url(#{ARROW_MARKER_ID})")
				style="pointer-events: none;"
			/>
		</g>
	}
}

/// Label pill at the middle of an edge; the raw predicate is the tooltip.
#[component]
pub fn GraphEdgeLabel(
	edge: FlowEdge,
	geometry: EdgeGeometry,
	on_press: Callback<(String, bool)>,
) -> impl IntoView {
	if edge.data.label.is_empty() {
		return ().into_any();
	}
	let id = edge.id.clone();
	let color = if edge.selected { SELECTED_COLOR } else { LABEL_COLOR };

	view! {
		<div
			class="graph-edge-label"
			style=format!(
				"position: absolute; transform: translate(-50%, -50%) translate({}px, {}px); pointer-events: all;",
				geometry.label_x,
				geometry.label_y,
			)
			on:mousedown=move |ev| {
				if ev.button() == 0 {
					ev.stop_propagation();
					on_press.run((id.clone(), ev.shift_key()));
				}
			}
		>
			<div
				style=format!(
					"background: white; padding: 2px 6px; border-radius: 4px; font-size: 10px; font-weight: 500; color: {color}; box-shadow: 0 1px 3px rgba(0,0,0,0.1); white-space: nowrap;",
				)
				title=edge.data.graph_edge.predicate.clone()
			>
				{edge.data.label.clone()}
			</div>
		</div>
	}
	.into_any()
}
