/// Row-major grid with `ceil(sqrt(n))` columns; edges are ignored.
pub(crate) fn layout(sizes: &[(f64, f64)], gap: f64) -> Vec<(f64, f64)> {
	if sizes.is_empty() {
		return Vec::new();
	}
	let columns = (sizes.len() as f64).sqrt().ceil() as usize;
	let cell_w = sizes.iter().map(|s| s.0).fold(0.0, f64::max);
	let cell_h = sizes.iter().map(|s| s.1).fold(0.0, f64::max);

	(0..sizes.len())
		.map(|i| {
			let (row, col) = (i / columns, i % columns);
			(col as f64 * (cell_w + gap), row as f64 * (cell_h + gap))
		})
		.collect()
}
