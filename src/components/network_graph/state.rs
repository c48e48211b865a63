//! Per-session state: the simulation plus drag tracking.
//!
//! A [`GraphSession`] is created once the graph document has loaded and is
//! then driven by ticks and pointer events. It never talks to other
//! components; selections are reported back as return values so the host can
//! route them.

use log::debug;

use super::render::{self, Viewport};
use super::simulation::{ForceConfig, Simulation};
use super::surface::Surface;
use super::theme::Theme;
use super::types::Graph;

/// Energy the simulation is driven toward while a drag is active.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Set between a successful drag start and the matching end.
	pub active: bool,
	/// Document index of the dragged node.
	pub node: Option<usize>,
}

/// Drawing settings fixed for the lifetime of a session.
#[derive(Clone, Debug)]
pub struct SessionSettings {
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Node circle radius.
	pub node_radius: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Colors used by [`GraphSession::redraw`].
	pub theme: Theme,
}

/// Core graph state combining the physics simulation with drag interaction.
pub struct GraphSession {
	/// The layout.
	pub sim: Simulation,
	/// Current drag, if any.
	pub drag: DragState,
	/// Colors used by [`GraphSession::redraw`].
	pub theme: Theme,
	viewport: Viewport,
}

impl GraphSession {
	/// Starts the layout for `graph`, centered on the canvas.
	pub fn start(graph: &Graph, settings: SessionSettings) -> Self {
		let forces = ForceConfig {
			charge_strength: settings.charge_strength,
			..ForceConfig::for_radius(settings.node_radius)
		};
		let center = (settings.width / 2.0, settings.height / 2.0);
		Self {
			sim: Simulation::new(graph, center, forces),
			drag: DragState::default(),
			theme: settings.theme,
			viewport: Viewport {
				width: settings.width,
				height: settings.height,
				node_radius: settings.node_radius,
			},
		}
	}

	/// Advances the layout one step. Returns whether anything moved.
	pub fn tick(&mut self, dt: f32) -> bool {
		self.sim.tick(dt)
	}

	/// Repaints the whole canvas from current positions.
	pub fn redraw(&self, surface: &mut impl Surface) {
		render::render(&self.sim, surface, &self.theme, &self.viewport);
	}

	/// Picks the node nearest the pointer and pins it where it is.
	///
	/// Returns the picked node's port, or `None` on an empty graph.
	pub fn on_drag_start(&mut self, x: f64, y: f64) -> Option<String> {
		let node = self.sim.find(x, y, None)?;
		let (nx, ny) = self.sim.position(node)?;

		if !self.drag.active {
			self.sim.set_alpha_target(DRAG_ALPHA_TARGET);
			self.sim.restart();
		} else if let Some(prev) = self.drag.node.filter(|&prev| prev != node) {
			self.sim.unpin(prev);
		}
		self.sim.pin(node, nx, ny);
		self.drag = DragState {
			active: true,
			node: Some(node),
		};

		let port = self.sim.port(node)?;
		debug!("essence-map: drag start on port {port}");
		Some(port)
	}

	/// Moves the dragged node's pin to follow the pointer.
	///
	/// Returns false when no drag is in progress.
	pub fn on_drag(&mut self, x: f64, y: f64) -> bool {
		match (self.drag.active, self.drag.node) {
			(true, Some(node)) => {
				self.sim.pin(node, x, y);
				true
			}
			_ => false,
		}
	}

	/// Releases the dragged node back to the simulation.
	pub fn on_drag_end(&mut self) {
		if !self.drag.active {
			return;
		}
		if let Some(node) = self.drag.node.take() {
			self.sim.unpin(node);
		}
		self.drag.active = false;
		self.sim.set_alpha_target(0.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::loader::parse_graph;
	use crate::components::network_graph::surface::{DrawOp, RecordingSurface};

	fn session(json: &str) -> GraphSession {
		let graph = parse_graph(json).unwrap();
		GraphSession::start(
			&graph,
			SessionSettings {
				width: 960.0,
				height: 600.0,
				node_radius: 16.0,
				charge_strength: -300.0,
				theme: Theme::light(),
			},
		)
	}

	const PAIR: &str = r#"{"nodes":[{"port":"A","entrypoint":"true"},{"port":"B","entrypoint":"false"}],"links":[{"source":"A","target":"B"}]}"#;

	#[test]
	fn end_to_end_pair() {
		let mut s = session(PAIR);
		assert_eq!(s.sim.node_count(), 2);
		assert_eq!(s.sim.links().len(), 1);

		let mut surface = RecordingSurface::default();
		s.redraw(&mut surface);
		let colors: Vec<_> = surface
			.ops
			.iter()
			.filter_map(|op| match op {
				DrawOp::FillCircle(_, _, _, c) => Some(c.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(colors, vec!["#0d3478", "#add8e6"]);

		let (ax, ay) = s.sim.position(0).unwrap();
		assert_eq!(s.on_drag_start(ax, ay).as_deref(), Some("A"));
		assert_eq!(s.sim.pin_of(0), Some((ax as f32, ay as f32)));
	}

	#[test]
	fn drag_start_then_end_clears_pin() {
		let mut s = session(PAIR);
		let (bx, by) = s.sim.position(1).unwrap();
		assert_eq!(s.on_drag_start(bx, by).as_deref(), Some("B"));
		assert!(s.sim.pin_of(1).is_some());

		s.on_drag_end();
		assert_eq!(s.sim.pin_of(1), None);
		assert_eq!(s.sim.pin_of(0), None);
		assert!(!s.drag.active);
		assert_eq!(s.sim.alpha_target(), 0.0);
	}

	#[test]
	fn drag_end_leaves_other_pins_alone() {
		let mut s = session(PAIR);
		s.sim.pin(0, 10.0, 20.0);

		let (bx, by) = s.sim.position(1).unwrap();
		s.on_drag_start(bx, by);
		s.on_drag_end();

		assert_eq!(s.sim.pin_of(0), Some((10.0, 20.0)));
		assert_eq!(s.sim.pin_of(1), None);
	}

	#[test]
	fn second_drag_start_releases_first_node() {
		let mut s = session(PAIR);
		let (ax, ay) = s.sim.position(0).unwrap();
		let (bx, by) = s.sim.position(1).unwrap();
		assert_eq!(s.on_drag_start(ax, ay).as_deref(), Some("A"));
		assert_eq!(s.on_drag_start(bx, by).as_deref(), Some("B"));
		assert_eq!(s.sim.pin_of(0), None);

		s.on_drag_end();
		assert_eq!(s.sim.pin_of(0), None);
		assert_eq!(s.sim.pin_of(1), None);
	}

	#[test]
	fn drag_moves_pin_with_pointer() {
		let mut s = session(PAIR);
		let (ax, ay) = s.sim.position(0).unwrap();
		s.on_drag_start(ax, ay);
		s.on_drag(200.0, 150.0);
		s.tick(0.016);
		assert_eq!(s.sim.position(0), Some((200.0, 150.0)));
	}

	#[test]
	fn drag_without_start_is_ignored() {
		let mut s = session(PAIR);
		let before = s.sim.position(0);
		assert!(!s.on_drag(5.0, 5.0));
		assert_eq!(s.sim.pin_of(0), None);
		assert_eq!(s.sim.position(0), before);
	}

	#[test]
	fn drag_reheats_settled_simulation() {
		let mut s = session(PAIR);
		while s.tick(0.016) {}
		assert!(!s.sim.is_running());

		let (ax, ay) = s.sim.position(0).unwrap();
		s.on_drag_start(ax, ay);
		assert!(s.sim.is_running());
		assert_eq!(s.sim.alpha_target(), 0.3);
		assert!(s.tick(0.016));
	}

	#[test]
	fn drag_start_on_empty_graph_selects_nothing() {
		let mut s = session(r#"{"nodes":[],"links":[]}"#);
		assert_eq!(s.on_drag_start(1.0, 1.0), None);
		assert!(!s.drag.active);
	}
}
