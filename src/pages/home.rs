use leptos::prelude::*;
use log::{info, warn};

use crate::components::graph_view::{GraphData, GraphNode, GraphView, LayoutType, Selection};

const SAMPLE_GRAPH: &str = r#"{
	"nodes": {
		"CHEBI:15365": {"id": "CHEBI:15365", "names": ["Aspirin"], "types": ["biolink:Drug", "biolink:ChemicalEntity"]},
		"CHEBI:5855": {"id": "CHEBI:5855", "names": ["Ibuprofen"], "types": ["biolink:Drug"]},
		"MONDO:0005010": {"id": "MONDO:0005010", "names": ["Pain"], "types": ["biolink:Disease"]},
		"MONDO:0005277": {"id": "MONDO:0005277", "names": ["Migraine"], "types": ["biolink:Disease"]},
		"NCBIGene:5742": {"id": "NCBIGene:5742", "names": ["PTGS1"], "types": ["biolink:Gene"]},
		"NCBIGene:5743": {"id": "NCBIGene:5743", "names": ["PTGS2"], "types": ["biolink:Gene"]},
		"GO:0001516": {"id": "GO:0001516", "names": ["prostaglandin biosynthetic process"], "types": ["biolink:BiologicalProcess"]}
	},
	"edges": {
		"e1": {"id": "e1", "subject": "CHEBI:15365", "object": "MONDO:0005010", "predicate": "biolink:treats"},
		"e2": {"id": "e2", "subject": "CHEBI:5855", "object": "MONDO:0005010", "predicate": "biolink:treats"},
		"e3": {"id": "e3", "subject": "CHEBI:15365", "object": "MONDO:0005277", "predicate": "biolink:treats_or_applied_or_studied_to_treat"},
		"e4": {"id": "e4", "subject": "CHEBI:15365", "object": "NCBIGene:5742", "predicate": "biolink:directly_physically_interacts_with"},
		"e5": {"id": "e5", "subject": "CHEBI:5855", "object": "NCBIGene:5743", "predicate": "biolink:affects"},
		"e6": {"id": "e6", "subject": "NCBIGene:5742", "object": "GO:0001516", "predicate": "biolink:participates_in"},
		"e7": {"id": "e7", "subject": "NCBIGene:5743", "object": "GO:0001516", "predicate": "biolink:participates_in"}
	}
}"#;

fn sample_data() -> GraphData {
	GraphData::from_json(SAMPLE_GRAPH).unwrap_or_else(|err| {
		warn!("Sample graph failed to load: {err}");
		GraphData::default()
	})
}

fn describe(selection: &Selection) -> String {
	if selection.is_empty() {
		return "Nothing selected".to_string();
	}
	let nodes: Vec<&str> = selection
		.nodes
		.iter()
		.map(|n| n.names.first().map_or(n.id.as_str(), String::as_str))
		.collect();
	let edges: Vec<&str> = selection.edges.iter().map(|e| e.predicate.as_str()).collect();
	format!("Nodes: {} | Edges: {}", nodes.join(", "), edges.join(", "))
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::stored(sample_data());
	let layout = RwSignal::new(LayoutType::default());
	let selection = RwSignal::new(Selection::default());

	let on_selection_change = Callback::new(move |s: Selection| selection.set(s));
	let on_node_click = Callback::new(move |n: GraphNode| info!("Clicked node {}", n.id));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph" style="position: fixed; inset: 0;">
				<GraphView
					data=graph_data
					layout=layout
					on_selection_change=on_selection_change
					on_node_click=on_node_click
				/>
				<div
					class="graph-overlay"
					style="position: absolute; top: 12px; left: 12px; padding: 8px 12px; background: rgba(255,255,255,0.9); border-radius: 6px;"
				>
					<h1 style="margin: 0 0 6px; font-size: 18px;">"Knowledge Graph Explorer"</h1>
					<label>
						"Layout "
						<select on:change=move |ev| {
							match event_target_value(&ev).parse::<LayoutType>() {
								Ok(l) => layout.set(l),
								Err(err) => warn!("{err}"),
							}
						}>
							{LayoutType::ALL
								.into_iter()
								.map(|l| {
									view! {
										<option value=l.as_str() selected=move || layout.get() == l>
											{l.to_string()}
										</option>
									}
								})
								.collect_view()}
						</select>
					</label>
					<p class="subtitle" style="margin: 6px 0 0; font-size: 12px;">
						{move || selection.with(describe)}
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
