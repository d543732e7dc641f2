use std::collections::{HashMap, HashSet};
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use web_sys::{MouseEvent, WheelEvent};

use super::controls::Controls;
use super::edge::{ArrowMarker, EdgeGeometry, GraphEdgeLabel, GraphEdgeView, edge_geometry};
use super::engine::BuiltinEngine;
use super::layout::LayoutAdapter;
use super::minimap::Minimap;
use super::node::GraphNodeView;
use super::options::ViewOptions;
use super::selection::{ClickedEntity, SelectionBridge, click_entity};
use super::state::{
	self, ClickTarget, DragState, MarqueeState, PanState, ViewTransform, WheelGesture,
};
use super::transform::{transform_edges, transform_nodes};
use super::types::{FlowEdge, FlowNode, GraphData, GraphEdge, GraphNode, LayoutType, Selection};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);
const ZOOM_STEP: f64 = 1.2;

/// Edges whose endpoints both exist, with their curves.
fn route(nodes: &[FlowNode], edges: &[FlowEdge]) -> Vec<(FlowEdge, EdgeGeometry)> {
	let by_id: HashMap<&str, &FlowNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	edges
		.iter()
		.filter_map(|e| {
			let source = by_id.get(e.source.as_str())?;
			let target = by_id.get(e.target.as_str())?;
			Some((e.clone(), edge_geometry(source, target, &e.bends)))
		})
		.collect()
}

/// Interactive node-link view of a knowledge graph.
///
/// The document is re-laid out whenever `data` or `layout` changes and the
/// viewport is fitted once the layout lands. When `selected_ids` is given it
/// decides which nodes and edges are highlighted.
#[component]
pub fn GraphView(
	/// Graph document to draw.
	#[prop(into)]
	data: Signal<GraphData>,
	/// Positioning strategy; hierarchical when unset.
	#[prop(into, optional)]
	layout: MaybeProp<LayoutType>,
	/// Called with the selected domain entities after every user selection.
	#[prop(into, optional)]
	on_selection_change: Option<Callback<Selection>>,
	#[prop(into, optional)] on_node_click: Option<Callback<GraphNode>>,
	#[prop(into, optional)] on_edge_click: Option<Callback<GraphEdge>>,
	/// Externally owned selection (node and edge ids).
	#[prop(into, optional)]
	selected_ids: MaybeProp<Vec<String>>,
	#[prop(into, optional)] class: MaybeProp<String>,
	#[prop(optional)] options: ViewOptions,
) -> impl IntoView {
	let container = NodeRef::<leptos::html::Div>::new();
	let nodes = RwSignal::new(Vec::<FlowNode>::new());
	let edges = RwSignal::new(Vec::<FlowEdge>::new());
	let transform = RwSignal::new(ViewTransform::default());
	let viewport = RwSignal::new(FALLBACK_SIZE);
	let is_layouting = RwSignal::new(false);
	let animating = RwSignal::new(false);
	let marquee = RwSignal::new(MarqueeState::default());
	let adapter = StoredValue::new(LayoutAdapter::new());
	let drag = StoredValue::new(DragState::default());
	let pan = StoredValue::new(PanState::default());
	let bridge = SelectionBridge::new(on_selection_change);

	let initial_nodes = Memo::new(move |_| data.with(transform_nodes));
	let initial_edges = Memo::new(move |_| data.with(transform_edges));
	let routed = Memo::new(move |_| nodes.with(|n| edges.with(|e| route(n, e))));

	let measure = move || {
		let size = container
			.get_untracked()
			.map(|el| (el.client_width() as f64, el.client_height() as f64))
			.filter(|(w, h)| *w > 0.0 && *h > 0.0)
			.unwrap_or(FALLBACK_SIZE);
		viewport.set(size);
		size
	};

	let fit = move |animate: bool| {
		let (w, h) = measure();
		let fitted = nodes.with_untracked(|n| {
			state::fit_view(n, w, h, options.fit_padding, options.min_zoom, options.max_zoom)
		});
		if let Some(t) = fitted {
			if animate {
				animating.set(true);
				set_timeout(
					move || animating.set(false),
					Duration::from_millis(options.fit_duration_ms),
				);
			}
			transform.set(t);
		}
	};

	let zoom_by = move |factor: f64| {
		let (w, h) = viewport.get_untracked();
		transform.update(|t| t.zoom_at(w / 2.0, h / 2.0, factor, options.min_zoom, options.max_zoom));
	};

	Effect::new(move |_| {
		if container.get().is_some() {
			measure();
		}
	});

	// Re-run the layout whenever the document or the mode changes.
	Effect::new(move |_| {
		let layout = layout.get().unwrap_or_default();
		let (fresh_nodes, fresh_edges) = (initial_nodes.get(), initial_edges.get());
		let Some(request) =
			adapter.try_update_value(|a| a.begin(fresh_nodes, fresh_edges, layout))
		else {
			return;
		};
		is_layouting.set(true);

		spawn_local(async move {
			let started = js_sys::Date::now();
			let outcome = request.run(&BuiltinEngine).await;
			let published = adapter
				.try_update_value(|a| {
					a.finish(outcome)
						.then(|| (a.nodes().to_vec(), a.edges().to_vec()))
				})
				.flatten();
			let Some((mut laid_out, mut laid_edges)) = published else {
				return;
			};
			debug!(
				"{layout} layout published in {:.1} ms",
				js_sys::Date::now() - started
			);

			if let Some(ids) = selected_ids.get_untracked() {
				let ids: HashSet<String> = ids.into_iter().collect();
				state::apply_controlled(&mut laid_out, &mut laid_edges, &ids);
			}
			let has_nodes = !laid_out.is_empty();
			nodes.set(laid_out);
			edges.set(laid_edges);
			is_layouting.set(false);
			if has_nodes {
				set_timeout(move || fit(true), Duration::from_millis(options.fit_delay_ms));
			}
		});
	});

	// Controlled selection wins over whatever the user clicked.
	Effect::new(move |_| {
		if let Some(ids) = selected_ids.get() {
			let ids: HashSet<String> = ids.into_iter().collect();
			nodes.update(|n| edges.update(|e| state::apply_controlled(n, e, &ids)));
		}
	});

	let emit_selection = move || {
		data.with_untracked(|d| {
			nodes.with_untracked(|n| edges.with_untracked(|e| bridge.handle_change(d, n, e)))
		});
	};

	let select = move |target: ClickTarget, additive: bool| {
		let mut changed = false;
		nodes.update(|n| edges.update(|e| changed = state::click_select(n, e, &target, additive)));
		if changed {
			emit_selection();
		}
	};

	let local_point = move |ev: &MouseEvent| -> (f64, f64) {
		match container.get_untracked() {
			Some(el) => {
				let rect = el.get_bounding_client_rect();
				(
					ev.client_x() as f64 - rect.left(),
					ev.client_y() as f64 - rect.top(),
				)
			}
			None => (ev.offset_x() as f64, ev.offset_y() as f64),
		}
	};

	let on_mousedown = move |ev: MouseEvent| {
		let (sx, sy) = local_point(&ev);
		let t = transform.get_untracked();
		match ev.button() {
			0 => {
				let (gx, gy) = t.screen_to_graph(sx, sy);
				let hit = nodes.with_untracked(|n| {
					state::node_at(n, gx, gy).map(|n| (n.id.clone(), n.position, n.selected))
				});
				if let Some((id, position, selected)) = hit {
					if ev.shift_key() || !selected {
						select(ClickTarget::Node(id.clone()), ev.shift_key());
					}
					drag.set_value(DragState {
						active: true,
						node_id: Some(id),
						start_x: sx,
						start_y: sy,
						node_start: position,
						moved: false,
					});
				} else {
					marquee.set(MarqueeState {
						active: true,
						additive: ev.shift_key(),
						start: (gx, gy),
						current: (gx, gy),
					});
				}
			}
			1 | 2 => {
				ev.prevent_default();
				pan.set_value(PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: t.x,
					transform_start_y: t.y,
				});
			}
			_ => {}
		}
	};

	// Resolve a click against the document and hand it to the matching callback.
	let report_click = move |target: ClickTarget| {
		match data.with_untracked(|g| click_entity(g, &target)) {
			Some(ClickedEntity::Node(node)) => {
				if let Some(cb) = on_node_click {
					cb.run(node);
				}
			}
			Some(ClickedEntity::Edge(edge)) => {
				if let Some(cb) = on_edge_click {
					cb.run(edge);
				}
			}
			None => {}
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		let (sx, sy) = local_point(&ev);

		let d = drag.get_value();
		if d.active {
			let Some(position) = d.node_position(sx, sy, transform.get_untracked().k) else {
				return;
			};
			if let Some(id) = d.node_id {
				if !d.moved {
					// routes from the last layout no longer fit the moved node
					edges.update(|e| {
						for edge in e.iter_mut().filter(|e| e.source == id || e.target == id) {
							edge.bends.clear();
						}
					});
				}
				nodes.update(|n| {
					if let Some(node) = n.iter_mut().find(|n| n.id == id) {
						node.position = position;
					}
				});
			}
			drag.update_value(|d| d.moved = true);
			return;
		}

		let p = pan.get_value();
		if p.active {
			transform.update(|t| {
				t.x = p.transform_start_x + (sx - p.start_x);
				t.y = p.transform_start_y + (sy - p.start_y);
			});
		} else if marquee.with_untracked(|m| m.active) {
			let point = transform.get_untracked().screen_to_graph(sx, sy);
			marquee.update(|m| m.current = point);
		}
	};

	let on_mouseup = move |_: MouseEvent| {
		let d = drag.get_value();
		if d.active {
			drag.set_value(DragState::default());
			if d.moved {
				adapter.update_value(|a| {
					a.set_nodes(nodes.get_untracked());
					a.set_edges(edges.get_untracked());
				});
			} else if let Some(id) = d.node_id {
				report_click(ClickTarget::Node(id));
			}
		}
		pan.update_value(|p| p.active = false);

		let m = marquee.get_untracked();
		if !m.active {
			return;
		}
		marquee.set(MarqueeState::default());
		let rect = m.rect();
		let k = transform.get_untracked().k;
		if state::is_click(rect.width * k, rect.height * k) {
			if !m.additive {
				select(ClickTarget::Pane, false);
			}
		} else {
			let mut changed = false;
			nodes.update(|n| {
				edges.update(|e| changed = state::marquee_select(n, e, rect, m.additive))
			});
			if changed {
				emit_selection();
			}
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		if drag.with_value(|d| d.moved) {
			adapter.update_value(|a| {
				a.set_nodes(nodes.get_untracked());
				a.set_edges(edges.get_untracked());
			});
		}
		drag.set_value(DragState::default());
		pan.set_value(PanState::default());
		marquee.set(MarqueeState::default());
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let zoom_modifier = mouse.ctrl_key() || mouse.meta_key();
		match state::wheel_gesture(ev.delta_x(), ev.delta_y(), zoom_modifier, mouse.shift_key()) {
			WheelGesture::Pan(dx, dy) => transform.update(|t| t.pan_by(dx, dy)),
			WheelGesture::Zoom(factor) => {
				let (sx, sy) = local_point(mouse);
				transform.update(|t| t.zoom_at(sx, sy, factor, options.min_zoom, options.max_zoom));
			}
		}
	};

	let on_edge_press = Callback::new(move |(id, additive): (String, bool)| {
		select(ClickTarget::Edge(id), additive);
	});
	let on_edge_activate = Callback::new(move |id: String| report_click(ClickTarget::Edge(id)));
	let on_zoom_in = Callback::new(move |_: ()| zoom_by(ZOOM_STEP));
	let on_zoom_out = Callback::new(move |_: ()| zoom_by(1.0 / ZOOM_STEP));
	let on_fit = Callback::new(move |_: ()| fit(true));
	let on_minimap_zoom = Callback::new(move |factor: f64| zoom_by(factor));
	let on_minimap_pan = Callback::new(move |(dx, dy): (f64, f64)| {
		transform.update(|t| t.pan_by(-dx * t.k, -dy * t.k));
	});
	let on_minimap_center = Callback::new(move |(gx, gy): (f64, f64)| {
		let (w, h) = viewport.get_untracked();
		transform.update(|t| {
			t.x = w / 2.0 - gx * t.k;
			t.y = h / 2.0 - gy * t.k;
		});
	});

	let background_style = move || {
		let t = transform.get();
		let gap = options.background_gap * t.k;
		format!(
			"position: absolute; inset: 0; pointer-events: none; \
			 background-image: radial-gradient(#ddd 1px, transparent 1px); \
			 background-size: {gap}px {gap}px; background-position: {}px {}px;",
			t.x, t.y
		)
	};
	let viewport_style = move || {
		let transition = if animating.get() {
			format!("transition: transform {}ms ease;", options.fit_duration_ms)
		} else {
			String::new()
		};
		format!(
			"position: absolute; left: 0; top: 0; transform-origin: 0 0; transform: {}; {transition}",
			transform.get().css()
		)
	};
	let marquee_style = move || {
		let r = marquee.get().rect();
		format!(
			"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
			 background: rgba(0, 89, 220, 0.08); border: 1px dotted rgba(0, 89, 220, 0.8); pointer-events: none;",
			r.x, r.y, r.width, r.height
		)
	};

	view! {
		<div
			node_ref=container
			class=move || format!("graph-view {}", class.get().unwrap_or_default())
			style="position: relative; width: 100%; height: 100%; overflow: hidden; background: #fafafa; font-family: sans-serif;"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:contextmenu=|ev| ev.prevent_default()
		>
			<Show when=move || options.show_background>
				<div class="graph-view__background" style=background_style></div>
			</Show>

			<Show
				when=move || !is_layouting.get()
				fallback=|| {
					view! {
						<div
							class="graph-view__loading"
							style="display: flex; align-items: center; justify-content: center; height: 100%; color: #666;"
						>
							"Computing layout..."
						</div>
					}
				}
			>
				<div class="graph-view__viewport" style=viewport_style>
					<svg
						class="graph-view__edges"
						style="position: absolute; left: 0; top: 0; width: 1px; height: 1px; overflow: visible;"
					>
						<ArrowMarker />
						{move || {
							routed
								.get()
								.into_iter()
								.map(|(edge, geometry)| {
									view! {
										<GraphEdgeView
											edge=edge
											geometry=geometry
											on_press=on_edge_press
											on_click=on_edge_activate
										/>
									}
								})
								.collect_view()
						}}
					</svg>

					{move || {
						routed
							.get()
							.into_iter()
							.map(|(edge, geometry)| {
								view! { <GraphEdgeLabel edge=edge geometry=geometry on_press=on_edge_press /> }
							})
							.collect_view()
					}}

					{move || {
						nodes
							.get()
							.into_iter()
							.map(|node| view! { <GraphNodeView node=node /> })
							.collect_view()
					}}

					<Show when=move || marquee.with(|m| m.active)>
						<div class="graph-view__selection" style=marquee_style></div>
					</Show>
				</div>
			</Show>

			<Show when=move || options.show_controls>
				<Controls on_zoom_in=on_zoom_in on_zoom_out=on_zoom_out on_fit=on_fit />
			</Show>

			<Show when=move || options.show_minimap>
				<Minimap
					nodes=nodes
					transform=transform
					viewport=viewport
					on_center=on_minimap_center
					on_pan=on_minimap_pan
					on_zoom=on_minimap_zoom
				/>
			</Show>
		</div>
	}
}
