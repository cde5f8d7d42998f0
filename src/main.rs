use leptos::prelude::*;
use traversal_canvas::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
