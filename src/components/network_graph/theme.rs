//! Colors for the network map.
//!
//! Two themes mirror the viewer settings page: `light` (the default) and
//! `dark`. Each theme also names the status panel theme that goes with it.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Theme selector as written in the viewer config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Transparent canvas, black links.
	#[default]
	Light,
	/// Dark canvas background, light links.
	Dark,
}

/// Complete visual theme for the map and the status panel.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background. `None` leaves the canvas transparent after a clear.
	pub background: Option<Color>,
	/// Stroke for every link.
	pub link: Color,
	/// Fill for nodes whose `entrypoint` is `"true"`.
	pub entrypoint: Color,
	/// Fill for every other node.
	pub peer: Color,
	/// Status panel theme class.
	pub editor_theme: &'static str,
}

impl Theme {
	/// Default theme of the viewer page.
	pub fn light() -> Self {
		Self {
			background: None,
			link: Color::rgb(0, 0, 0),
			entrypoint: Color::rgb(13, 52, 120),
			peer: Color::rgb(173, 216, 230),
			editor_theme: "katzenmilch",
		}
	}

	pub fn dark() -> Self {
		Self {
			background: Some(Color::rgb(39, 43, 48)),
			link: Color::rgba(200, 200, 200, 0.8),
			entrypoint: Color::rgb(13, 52, 120),
			peer: Color::rgb(173, 216, 230),
			editor_theme: "terminal",
		}
	}

	/// Theme for a config selector.
	pub fn named(name: ThemeName) -> Self {
		match name {
			ThemeName::Light => Self::light(),
			ThemeName::Dark => Self::dark(),
		}
	}

	/// Fill color for a node given its entrypoint class.
	pub fn node_color(&self, is_entrypoint: bool) -> Color {
		if is_entrypoint {
			self.entrypoint
		} else {
			self.peer
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn light_theme_matches_map_colors() {
		let theme = Theme::light();
		assert_eq!(theme.node_color(true).to_css(), "#0d3478");
		assert_eq!(theme.node_color(false).to_css(), "#add8e6");
		assert_eq!(theme.link.to_css(), "#000000");
	}

	#[test]
	fn translucent_colors_use_rgba() {
		assert_eq!(
			Color::rgba(200, 200, 200, 0.8).to_css(),
			"rgba(200, 200, 200, 0.8)"
		);
	}

	#[test]
	fn theme_names_deserialize_lowercase() {
		let name: ThemeName = serde_json::from_str(r#""dark""#).unwrap();
		assert_eq!(Theme::named(name).editor_theme, "terminal");
	}
}
