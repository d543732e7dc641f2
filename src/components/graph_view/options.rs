use serde::{Deserialize, Serialize};

/// Viewport and chrome settings for [`GraphView`](super::GraphView).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
	/// Margin around the graph when fitting, as a fraction of its size.
	pub fit_padding: f64,
	/// Delay between a finished layout and the fit.
	pub fit_delay_ms: u64,
	pub fit_duration_ms: u64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub show_minimap: bool,
	pub show_controls: bool,
	pub show_background: bool,
	/// Distance between background dots at zoom 1.
	pub background_gap: f64,
}

impl Default for ViewOptions {
	fn default() -> Self {
		Self {
			fit_padding: 0.1,
			fit_delay_ms: 50,
			fit_duration_ms: 200,
			min_zoom: 0.5,
			max_zoom: 2.0,
			show_minimap: true,
			show_controls: true,
			show_background: true,
			background_gap: 20.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let opts: ViewOptions =
			serde_json::from_str(r#"{"show_minimap": false, "max_zoom": 4.0}"#).unwrap();
		assert!(!opts.show_minimap);
		assert_eq!(opts.max_zoom, 4.0);
		assert_eq!(opts.fit_padding, 0.1);
		assert_eq!(opts.fit_delay_ms, 50);
	}
}
