//! Display options for the status panel.

/// Highlighting applied to the panel's lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightMode {
	/// Headings, list items, and quotes get their own line classes.
	Markdown,
}

impl HighlightMode {
	/// Class added to the panel host.
	pub fn css_class(self) -> &'static str {
		match self {
			HighlightMode::Markdown => "mode-markdown",
		}
	}
}

/// Editor settings applied by [`TextPanelHandle::initialize`](super::TextPanelHandle::initialize).
#[derive(Clone, Debug, PartialEq)]
pub struct PanelOptions {
	pub mode: HighlightMode,
	/// Users can select text but never edit it.
	pub read_only: bool,
	/// Always off for the status display; the panel draws no margin guide.
	pub show_print_margin: bool,
	/// Soft-wrap long lines instead of scrolling sideways.
	pub wrap: bool,
	/// Font size in CSS pixels.
	pub font_size_px: u32,
}

impl PanelOptions {
	/// The configuration the status panel always runs with.
	pub fn status_display() -> Self {
		Self {
			mode: HighlightMode::Markdown,
			read_only: true,
			show_print_margin: false,
			wrap: true,
			font_size_px: 14,
		}
	}

	/// Inline CSS for the panel host element.
	pub fn style(&self) -> String {
		let mut style = format!(
			"font-size: {}px; white-space: {};",
			self.font_size_px,
			if self.wrap { "pre-wrap" } else { "pre" }
		);
		if self.read_only {
			style.push_str(" user-select: text; cursor: default;");
		}
		style
	}
}
