//! Named layout modes expressed as ELK-style engine options.

use std::collections::BTreeMap;

use super::types::LayoutType;

pub const ALGORITHM: &str = "elk.algorithm";
pub const DIRECTION: &str = "elk.direction";
pub const SPACING_NODE_NODE: &str = "elk.spacing.nodeNode";
pub const SPACING_BETWEEN_LAYERS: &str = "elk.layered.spacing.nodeNodeBetweenLayers";
pub const SPACING_COMPONENTS: &str = "elk.spacing.componentComponent";
pub const FORCE_ITERATIONS: &str = "elk.force.iterations";
pub const PADDING: &str = "elk.padding";

const DEFAULT_PADDING: &str = "[top=50,left=50,bottom=50,right=50]";

/// Engine options keyed by option id; values are the engine's string form.
pub type LayoutOptions = BTreeMap<String, String>;

fn options(entries: &[(&str, &str)]) -> LayoutOptions {
	entries
		.iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
}

/// Options for a named layout mode.
pub fn layout_options(layout: LayoutType) -> LayoutOptions {
	match layout {
		LayoutType::Hierarchical => options(&[
			(ALGORITHM, "layered"),
			(DIRECTION, "DOWN"),
			(SPACING_NODE_NODE, "80"),
			(SPACING_BETWEEN_LAYERS, "100"),
			(SPACING_COMPONENTS, "100"),
			(PADDING, DEFAULT_PADDING),
		]),
		LayoutType::HierarchicalLr => options(&[
			(ALGORITHM, "layered"),
			(DIRECTION, "RIGHT"),
			(SPACING_NODE_NODE, "80"),
			(SPACING_BETWEEN_LAYERS, "100"),
			(SPACING_COMPONENTS, "100"),
			(PADDING, DEFAULT_PADDING),
		]),
		LayoutType::Force => options(&[
			(ALGORITHM, "force"),
			(FORCE_ITERATIONS, "300"),
			(SPACING_NODE_NODE, "100"),
			(SPACING_COMPONENTS, "100"),
			(PADDING, DEFAULT_PADDING),
		]),
		LayoutType::Grid => options(&[
			(ALGORITHM, "box"),
			(SPACING_NODE_NODE, "50"),
			(SPACING_COMPONENTS, "100"),
			(PADDING, DEFAULT_PADDING),
		]),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tree_modes_differ_only_in_direction() {
		let mut down = layout_options(LayoutType::Hierarchical);
		let mut right = layout_options(LayoutType::HierarchicalLr);
		assert_eq!(down.remove(DIRECTION).as_deref(), Some("DOWN"));
		assert_eq!(right.remove(DIRECTION).as_deref(), Some("RIGHT"));
		assert_eq!(down, right);
	}

	#[test]
	fn every_mode_names_an_algorithm_and_padding() {
		let algorithms: Vec<_> = LayoutType::ALL
			.into_iter()
			.map(|l| {
				let opts = layout_options(l);
				assert_eq!(opts[PADDING], DEFAULT_PADDING);
				opts[ALGORITHM].clone()
			})
			.collect();
		assert_eq!(algorithms, ["layered", "layered", "force", "box"]);
	}

	#[test]
	fn force_and_grid_spacing() {
		let force = layout_options(LayoutType::Force);
		assert_eq!(force[FORCE_ITERATIONS], "300");
		assert_eq!(force[SPACING_NODE_NODE], "100");
		assert!(!force.contains_key(DIRECTION));
		assert_eq!(layout_options(LayoutType::Grid)[SPACING_NODE_NODE], "50");
	}
}
