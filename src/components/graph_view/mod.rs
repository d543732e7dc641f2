//! Knowledge-graph view: turns a graph document into positioned, colored,
//! selectable nodes and edges and renders them with pan, zoom, a minimap and
//! zoom controls.

pub mod color;
mod component;
mod controls;
mod edge;
pub mod engine;
pub mod layout;
pub mod layouts;
mod minimap;
mod node;
mod options;
pub mod selection;
pub mod state;
pub mod transform;
mod types;

pub use component::GraphView;
pub use edge::{EdgeGeometry, edge_geometry};
pub use minimap::MinimapFrame;
pub use options::ViewOptions;
pub use types::{
	DocumentError, EdgePublications, FlowEdge, FlowNode, GraphData, GraphEdge, GraphEdgeData,
	GraphNode, GraphNodeData, LayoutType, Path, Position, Provenance, Publication, ResultRow,
	Selection, Trial, UnknownLayout,
};
