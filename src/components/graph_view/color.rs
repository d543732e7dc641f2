use std::cell::RefCell;
use std::collections::HashMap;

const PALETTE: [&str; 18] = [
	"#4285F4", "#EA4335", "#FBBC04", "#34A853", "#FF6D01", "#46BDC6", "#7BAAF7", "#F07B72",
	"#FCD04F", "#57BB8A", "#FF994D", "#78D9E0", "#9C27B0", "#E91E63", "#00BCD4", "#8BC34A",
	"#FF5722", "#607D8B",
];

/// Type used when a node carries no types at all.
pub const UNKNOWN_TYPE: &str = "Unknown";

thread_local! {
	static COLOR_CACHE: RefCell<HashMap<String, &'static str>> = RefCell::new(HashMap::new());
}

/// The fixed type palette.
pub fn palette() -> &'static [&'static str] {
	&PALETTE
}

/// `h = h * 31 + c` over UTF-16 code units in wrapping 32-bit arithmetic.
fn hash_label(label: &str) -> u32 {
	label
		.encode_utf16()
		.fold(0i32, |h, c| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as i32))
		.unsigned_abs()
}

/// Deterministic palette color for a type label, memoized per thread.
pub fn color_for_type(label: &str) -> &'static str {
	COLOR_CACHE.with(|cache| {
		if let Some(color) = cache.borrow().get(label) {
			return *color;
		}
		let color = PALETTE[hash_label(label) as usize % PALETTE.len()];
		cache.borrow_mut().insert(label.to_string(), color);
		color
	})
}

/// Strip a namespace prefix: `biolink:Drug` becomes `Drug`.
pub fn simplify_type_name(type_name: &str) -> &str {
	match type_name.split_once(':') {
		Some((_, rest)) => rest,
		None => type_name,
	}
}

/// First entry of a type list, or [`UNKNOWN_TYPE`].
pub fn primary_type(types: &[String]) -> &str {
	match types.first() {
		Some(t) if !t.is_empty() => t,
		_ => UNKNOWN_TYPE,
	}
}

#[cfg(test)]
fn cached_labels() -> usize {
	COLOR_CACHE.with(|cache| cache.borrow().len())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_label_same_color() {
		for label in ["biolink:Drug", "biolink:Gene", "", "ChemicalEntity", "é型"] {
			let first = color_for_type(label);
			assert_eq!(first, color_for_type(label));
			assert_eq!(first, color_for_type(&label.to_string()));
			assert!(palette().contains(&first));
		}
	}

	#[test]
	fn known_labels_hit_expected_slots() {
		assert_eq!(hash_label("biolink:Drug"), 1_934_172_360);
		assert_eq!(color_for_type("biolink:Drug"), "#4285F4");
		assert_eq!(color_for_type("biolink:Disease"), "#9C27B0");
		assert_eq!(color_for_type("biolink:Gene"), "#EA4335");
		assert_eq!(color_for_type(UNKNOWN_TYPE), "#FBBC04");
		assert_eq!(color_for_type(""), PALETTE[0]);
	}

	#[test]
	fn cache_grows_once_per_label() {
		color_for_type("biolink:Protein");
		let before = cached_labels();
		color_for_type("biolink:Protein");
		assert_eq!(cached_labels(), before);
		color_for_type("biolink:Cell");
		assert_eq!(cached_labels(), before + 1);
	}

	#[test]
	fn overflowing_hash_stays_in_palette() {
		let long = "biolink:".repeat(64);
		assert!(palette().contains(&color_for_type(&long)));
	}

	#[test]
	fn simplify_strips_first_prefix_only() {
		assert_eq!(simplify_type_name("biolink:Drug"), "Drug");
		assert_eq!(simplify_type_name("SEMMEDDB:a:b"), "a:b");
		assert_eq!(simplify_type_name("Drug"), "Drug");
		assert_eq!(simplify_type_name(""), "");
	}

	#[test]
	fn primary_type_falls_back_to_unknown() {
		assert_eq!(primary_type(&[]), "Unknown");
		assert_eq!(primary_type(&["".into(), "biolink:Gene".into()]), "Unknown");
		assert_eq!(
			primary_type(&["biolink:SmallMolecule".into(), "biolink:Drug".into()]),
			"biolink:SmallMolecule"
		);
	}
}
