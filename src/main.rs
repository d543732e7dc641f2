use leptos::prelude::*;
use translator_graph_view::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
