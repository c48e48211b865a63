//! essence-map: force-directed canvas map of an Essence peer network.
//!
//! This crate provides a WASM page that loads `graphData.json`, lays the
//! peers out with a force simulation, lets the user drag them around, and
//! shows a read-only status panel next to the map.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;

pub use components::network_graph::{
	Graph, GraphData, GraphError, GraphLink, GraphNode, NetworkGraphCanvas, Theme, ThemeName,
};
pub use components::text_panel::{TextPanel, TextPanelHandle};
pub use config::ViewerConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("essence-map: logging initialized");
}

/// Main application component.
///
/// The map and the status panel do not know about each other: the map
/// reports drag selections through `on_select`, and this component writes
/// them to the `#port` element.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = ViewerConfig::load();
	let theme = Theme::named(config.theme);

	let panel = TextPanelHandle::new();
	panel.initialize(&config.banner);

	let selected_port = RwSignal::new(String::new());
	let on_select = Callback::new(move |port: String| selected_port.set(port));

	let data_theme = match config.theme {
		ThemeName::Light => "light",
		ThemeName::Dark => "dark",
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=data_theme />
		<Title text="Essence Network Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="essence-map">
			<NetworkGraphCanvas
				data_url=config.data_url.clone()
				width=config.width
				height=config.height
				node_radius=config.node_radius
				charge_strength=config.charge_strength
				theme=config.theme
				on_select=on_select
			/>
			<div class="map-sidebar">
				<p class="selected">"Port: " <span id="port">{move || selected_port.get()}</span></p>
				<TextPanel handle=panel editor_theme=theme.editor_theme />
			</div>
		</div>
	}
}
