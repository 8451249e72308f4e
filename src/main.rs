// Dependencies are consumed by the library crate; the binary only mounts it.
#![allow(unused_crate_dependencies)]

use network_viz::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
