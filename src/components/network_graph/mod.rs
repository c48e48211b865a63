//! Network map component.
//!
//! Renders the peer network described by `graphData.json` on an HTML canvas:
//! - Port-keyed link resolution with fail-fast errors for dangling links
//! - Force-directed layout on top of the `force_graph` simulation
//! - Node dragging that pins the picked node under the pointer
//! - Two-color node palette keyed on the `entrypoint` flag
//!
//! # Example
//!
//! ```ignore
//! use essence_map::NetworkGraphCanvas;
//!
//! view! {
//!     <NetworkGraphCanvas
//!         data_url="./static/graphData.json"
//!         on_select=Callback::new(|port: String| log::info!("picked {port}"))
//!     />
//! }
//! ```

mod component;
mod error;
mod events;
mod loader;
mod render;
mod simulation;
mod state;
mod surface;
pub mod theme;
mod types;

pub use component::NetworkGraphCanvas;
pub use error::GraphError;
pub use events::{EventQueue, Notification, Phase, Viewer, ViewerEvent};
pub use loader::{load_graph, parse_graph};
pub use state::{GraphSession, SessionSettings};
pub use surface::{CanvasSurface, Surface};
pub use theme::{Theme, ThemeName};
pub use types::{Graph, GraphData, GraphLink, GraphNode, ResolvedLink};
