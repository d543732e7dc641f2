//! Interactive knowledge-graph view for Leptos client-side apps.
//!
//! The reusable part lives in [`components::graph_view`]; [`App`] is a small
//! demo shell around it.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use components::graph_view::color::{color_for_type, primary_type, simplify_type_name};
pub use components::graph_view::engine::{
	BuiltinEngine, EdgeRoute, LayoutEdge, LayoutEngine, LayoutError, LayoutGraph, LayoutNode,
	LayoutResult, PositionedNode,
};
pub use components::graph_view::layout::{
	LayoutAdapter, LayoutPhase, LayoutTicket, compute_layout, compute_routed_layout,
};
pub use components::graph_view::layouts::{LayoutOptions, layout_options};
pub use components::graph_view::selection::{
	ClickedEntity, SelectionBridge, click_entity, selection_from_ids,
};
pub use components::graph_view::transform::{format_predicate, transform_edges, transform_nodes};
pub use components::graph_view::{
	DocumentError, FlowEdge, FlowNode, GraphData, GraphEdge, GraphNode, GraphView, LayoutType,
	Selection, ViewOptions,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the graph explorer and handles 404's
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="Knowledge Graph Explorer" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
