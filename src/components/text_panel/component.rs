//! Read-only status panel component.

use leptos::prelude::*;
use log::debug;

use super::buffer::TextBuffer;
use super::options::PanelOptions;

/// Handle used to configure and write to a mounted [`TextPanel`].
///
/// Cheap to copy. Once the owning view is disposed every call is a no-op.
#[derive(Clone, Copy)]
pub struct TextPanelHandle {
	buffer: RwSignal<TextBuffer>,
	options: RwSignal<Option<PanelOptions>>,
}

impl TextPanelHandle {
	/// Creates an empty, unconfigured panel owned by the current reactive owner.
	pub fn new() -> Self {
		Self {
			buffer: RwSignal::new(TextBuffer::default()),
			options: RwSignal::new(None),
		}
	}

	/// Applies the status-display options and writes the banner line.
	pub fn initialize(&self, banner: &str) {
		if self.options.try_set(Some(PanelOptions::status_display())).is_some() {
			debug!("essence-map: text panel unavailable, skipping initialize");
			return;
		}
		self.append_text(banner);
	}

	/// Inserts `message` at the panel's cursor.
	pub fn append_text(&self, message: &str) {
		if self.buffer.try_update(|buf| buf.insert(message)).is_none() {
			debug!("essence-map: text panel unavailable, dropping {message:?}");
		}
	}
}

impl Default for TextPanelHandle {
	fn default() -> Self {
		Self::new()
	}
}

/// Renders the panel into a `#editor` element.
#[component]
pub fn TextPanel(
	handle: TextPanelHandle,
	/// Editor theme class, e.g. `katzenmilch` or `terminal`.
	#[prop(default = "katzenmilch")]
	editor_theme: &'static str,
) -> impl IntoView {
	let options = handle.options;
	let buffer = handle.buffer;

	let class = move || match options.get() {
		Some(opts) => format!("text-panel theme-{editor_theme} {}", opts.mode.css_class()),
		None => format!("text-panel theme-{editor_theme}"),
	};
	let style = move || options.get().map(|opts| opts.style()).unwrap_or_default();
	let read_only = move || options.get().is_some_and(|opts| opts.read_only).to_string();

	view! {
		<pre id="editor" class=class style=style aria-readonly=read_only>
			{move || {
				buffer.with(|buf| {
					buf.highlighted_lines()
						.into_iter()
						.map(|(kind, line)| {
							view! { <span class=kind.css_class()>{line.to_string()}"\n"</span> }
						})
						.collect_view()
				})
			}}
		</pre>
	}
}
