//! UI components for the network map page.

pub mod network_graph;
pub mod text_panel;
