//! Read-only status panel.
//!
//! A small markdown-highlighted text display. The host creates a
//! [`TextPanelHandle`], mounts [`TextPanel`] with it, calls
//! [`TextPanelHandle::initialize`] once, and appends lines as things happen.

mod buffer;
mod component;
mod options;

pub use buffer::{LineKind, TextBuffer};
pub use component::{TextPanel, TextPanelHandle};
pub use options::{HighlightMode, PanelOptions};
