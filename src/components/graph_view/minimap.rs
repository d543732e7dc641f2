use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use super::state::{Rect, ViewTransform, bounds};
use super::types::FlowNode;

pub const MINIMAP_WIDTH: f64 = 200.0;
pub const MINIMAP_HEIGHT: f64 = 150.0;
const FALLBACK_COLOR: &str = "#888";
const MASK_COLOR: &str = "rgba(240, 240, 240, 0.6)";
const MARGIN: f64 = 1.05;

/// Graph-space window shown by the minimap, stretched to the minimap's
/// aspect ratio so pixels map linearly onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapFrame {
	pub view: Rect,
	/// Part of the graph visible in the main viewport.
	pub visible: Rect,
}

impl MinimapFrame {
	pub fn new(nodes: &[FlowNode], transform: &ViewTransform, width: f64, height: f64) -> Self {
		let (vx, vy) = transform.screen_to_graph(0.0, 0.0);
		let visible = Rect {
			x: vx,
			y: vy,
			width: width / transform.k,
			height: height / transform.k,
		};
		let content = match bounds(nodes) {
			Some(b) => union(b, visible),
			None => visible,
		};

		// expand the short side so the frame has the minimap's aspect ratio
		let scale = (content.width / MINIMAP_WIDTH).max(content.height / MINIMAP_HEIGHT) * MARGIN;
		let (w, h) = (MINIMAP_WIDTH * scale, MINIMAP_HEIGHT * scale);
		let view = Rect {
			x: content.x + content.width / 2.0 - w / 2.0,
			y: content.y + content.height / 2.0 - h / 2.0,
			width: w,
			height: h,
		};
		Self { view, visible }
	}

	/// Graph point under a minimap pixel.
	pub fn to_graph(&self, px: f64, py: f64) -> (f64, f64) {
		(
			self.view.x + px / MINIMAP_WIDTH * self.view.width,
			self.view.y + py / MINIMAP_HEIGHT * self.view.height,
		)
	}

	/// Graph distance covered by a pointer move of (`dx`, `dy`) minimap px.
	pub fn graph_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
		(
			dx / MINIMAP_WIDTH * self.view.width,
			dy / MINIMAP_HEIGHT * self.view.height,
		)
	}

	pub fn view_box(&self) -> String {
		format!(
			"{} {} {} {}",
			self.view.x, self.view.y, self.view.width, self.view.height
		)
	}

	/// Even-odd path dimming everything outside the visible window.
	pub fn mask_path(&self) -> String {
		let (o, v) = (self.view, self.visible);
		format!(
			"M{},{}h{}v{}h{}z M{},{}h{}v{}h{}z",
			o.x - o.width,
			o.y - o.height,
			o.width * 3.0,
			o.height * 3.0,
			-o.width * 3.0,
			v.x,
			v.y,
			v.width,
			v.height,
			-v.width
		)
	}
}

fn union(a: Rect, b: Rect) -> Rect {
	let (x0, y0) = (a.x.min(b.x), a.y.min(b.y));
	let (x1, y1) = ((a.x + a.width).max(b.x + b.width), (a.y + a.height).max(b.y + b.height));
	Rect {
		x: x0,
		y: y0,
		width: x1 - x0,
		height: y1 - y0,
	}
}

/// Overview in the corner. Clicking recenters the viewport, dragging moves
/// it along with the pointer, the wheel zooms. `on_pan` gets graph-space
/// offsets for the visible window.
#[component]
pub fn Minimap(
	#[prop(into)] nodes: Signal<Vec<FlowNode>>,
	#[prop(into)] transform: Signal<ViewTransform>,
	#[prop(into)] viewport: Signal<(f64, f64)>,
	on_center: Callback<(f64, f64)>,
	on_pan: Callback<(f64, f64)>,
	on_zoom: Callback<f64>,
) -> impl IntoView {
	// last pointer position while a drag is in progress
	let dragging = StoredValue::new(None::<(f64, f64)>);

	let frame = Memo::new(move |_| {
		let (w, h) = viewport.get();
		nodes.with(|n| MinimapFrame::new(n, &transform.get(), w, h))
	});

	let locate = move |ev: &MouseEvent| {
		let Some(el) = ev
			.current_target()
			.and_then(|t| t.dyn_into::<Element>().ok())
		else {
			return None;
		};
		let rect = el.get_bounding_client_rect();
		Some(frame.get_untracked().to_graph(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	view! {
		<svg
			class="graph-view__minimap"
			width=MINIMAP_WIDTH.to_string()
			height=MINIMAP_HEIGHT.to_string()
			viewBox=move || frame.get().view_box()
			style="position: absolute; right: 15px; bottom: 15px; z-index: 5; background: white; box-shadow: 0 0 2px 1px rgba(0,0,0,0.08);"
			on:mousedown=move |ev| {
				ev.stop_propagation();
				if ev.button() != 0 {
					return;
				}
				if let Some(point) = locate(&ev) {
					on_center.run(point);
				}
				dragging.set_value(Some((ev.client_x() as f64, ev.client_y() as f64)));
			}
			on:mousemove=move |ev| {
				let Some((lx, ly)) = dragging.get_value() else {
					return;
				};
				ev.stop_propagation();
				let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
				dragging.set_value(Some((cx, cy)));
				on_pan.run(frame.get_untracked().graph_delta(cx - lx, cy - ly));
			}
			on:mouseup=move |_| dragging.set_value(None)
			on:mouseleave=move |_| dragging.set_value(None)
			on:wheel=move |ev| {
				ev.prevent_default();
				ev.stop_propagation();
				on_zoom.run(if ev.delta_y() > 0.0 { 0.9 } else { 1.1 });
			}
		>
			{move || {
				nodes
					.get()
					.into_iter()
					.map(|n| {
						let color = if n.data.color.is_empty() { FALLBACK_COLOR } else { n.data.color };
						view! {
							<rect
								x=n.position.x.to_string()
								y=n.position.y.to_string()
								width=n.width.to_string()
								height=n.height.to_string()
								rx="5"
								fill=color
								stroke=color
								stroke-width="3"
							/>
						}
					})
					.collect_view()
			}}
			<path
				d=move || frame.get().mask_path()
				fill=MASK_COLOR
				fill-rule="evenodd"
				style="pointer-events: none;"
			/>
		</svg>
	}
}
