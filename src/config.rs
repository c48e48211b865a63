//! Viewer configuration.
//!
//! Read once at startup from an optional
//! `<script id="viewer-config" type="application/json">` element. Every field
//! has a default, so the element may be missing or list only some keys.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::network_graph::ThemeName;

/// Id of the optional config element.
pub const CONFIG_ELEMENT_ID: &str = "viewer-config";

/// Page-level settings for the map and the status panel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	/// Graph document location, relative to the page.
	pub data_url: String,
	/// Node circle radius in canvas pixels.
	pub node_radius: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Color scheme for the map and the panel.
	pub theme: ThemeName,
	/// First line written to the status panel.
	pub banner: String,
	/// Canvas `width` attribute.
	pub width: u32,
	/// Canvas `height` attribute.
	pub height: u32,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			data_url: "./static/graphData.json".into(),
			node_radius: 16.0,
			charge_strength: -300.0,
			theme: ThemeName::Light,
			banner: "Essence Network Map".into(),
			width: 960,
			height: 600,
		}
	}
}

impl ViewerConfig {
	/// Parses a config document, falling back to defaults when it is invalid.
	pub fn from_json(json_text: &str) -> Self {
		match serde_json::from_str::<ViewerConfig>(json_text) {
			Ok(config) => config,
			Err(e) => {
				warn!("essence-map: ignoring invalid viewer config: {}", e);
				Self::default()
			}
		}
	}

	/// Loads the config from the DOM, or defaults if there is none.
	pub fn load() -> Self {
		let Some(json_text) = config_element_text() else {
			return Self::default();
		};
		let config = Self::from_json(&json_text);
		info!("essence-map: config loaded, data at {}", config.data_url);
		config
	}
}

fn config_element_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
