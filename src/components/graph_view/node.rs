use leptos::prelude::*;

use super::types::FlowNode;

/// Box for one node: label, type badge, and the two connection handles.
/// Pointer handling lives on the surrounding pane, which hit-tests nodes.
#[component]
pub fn GraphNodeView(node: FlowNode) -> impl IntoView {
	let FlowNode {
		position,
		width,
		height,
		selected,
		data,
		..
	} = node;

	let style = format!(
		"--node-color: {color}; position: absolute; left: {x}px; top: {y}px; width: {width}px; height: {height}px; \
		 box-sizing: border-box; border: 2px solid {color}; border-left-width: 6px; border-radius: 8px; \
		 background: white; padding: 6px 10px; cursor: grab; user-select: none; {shadow}",
		color = data.color,
		x = position.x,
		y = position.y,
		shadow = if selected {
			"box-shadow: 0 0 0 3px rgba(66, 133, 244, 0.45);"
		} else {
			"box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12);"
		},
	);

	view! {
		<div class=if selected { "graph-node selected" } else { "graph-node" } style=style>
			<div class="graph-node__handle graph-node__handle--target" style=handle_style("top")></div>

			<div
				class="graph-node__label"
				title=data.label.clone()
				style="font-size: 13px; font-weight: 600; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;"
			>
				{data.label.clone()}
			</div>

			<div
				class="graph-node__type"
				style="display: flex; align-items: center; gap: 4px; margin-top: 4px; font-size: 11px; color: #555;"
			>
				<svg viewBox="0 0 16 16" width="10" height="10" fill=data.color>
					<circle cx="8" cy="8" r="6" />
				</svg>
				{data.primary_type}
			</div>

			<div class="graph-node__handle graph-node__handle--source" style=handle_style("bottom")></div>
		</div>
	}
}

fn handle_style(side: &str) -> String {
	format!(
		"position: absolute; left: 50%; {side}: -4px; width: 6px; height: 6px; margin-left: -4px; \
		 border-radius: 50%; background: #1a192b; border: 1px solid white;"
	)
}
