//! Event queue driving the graph renderer.
//!
//! DOM callbacks, the fetch task, and the animation frame loop never touch
//! the session directly. They push [`ViewerEvent`]s onto an [`EventQueue`],
//! and the frame loop drains the queue through [`Viewer::dispatch`] in FIFO
//! order. Everything runs on the browser's single thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, error, info};

use super::error::GraphError;
use super::state::{GraphSession, SessionSettings};
use super::types::Graph;

/// Input to the renderer.
#[derive(Debug)]
pub enum ViewerEvent {
	/// The document was fetched and resolved.
	Loaded(Graph),
	/// Fetch, parse, or resolution failed.
	LoadFailed(GraphError),
	/// Animation frame; `dt` is the step in seconds.
	Tick { dt: f32 },
	/// Primary button pressed at canvas coordinates.
	DragStart { x: f64, y: f64 },
	/// Pointer moved with the button held.
	Drag { x: f64, y: f64 },
	/// Button released or pointer left the canvas.
	DragEnd,
}

/// Output of the renderer, for the host to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
	/// A drag picked up the node with this port.
	NodeSelected(String),
	/// Positions changed and the canvas should be repainted.
	Redraw,
}

/// Where a session is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Idle,
	/// Document requested, no answer yet.
	Loading,
	/// A session exists and accepts ticks and pointer input.
	Simulating,
	/// Terminal: the document could not be loaded. Holds the error message.
	Failed(String),
}

/// Shared FIFO of pending events. Cloning shares the queue.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
	inner: Rc<RefCell<VecDeque<ViewerEvent>>>,
}

impl EventQueue {
	/// Empty queue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `event` behind anything already pending.
	pub fn push(&self, event: ViewerEvent) {
		self.inner.borrow_mut().push_back(event);
	}

	/// Takes the oldest pending event.
	pub fn pop(&self) -> Option<ViewerEvent> {
		self.inner.borrow_mut().pop_front()
	}
}

/// Owns the lifecycle phase and, once loaded, the graph session.
pub struct Viewer {
	phase: Phase,
	settings: SessionSettings,
	session: Option<GraphSession>,
}

impl Viewer {
	/// Idle viewer; the session is built from `settings` once a graph loads.
	pub fn new(settings: SessionSettings) -> Self {
		Self {
			phase: Phase::Idle,
			settings,
			session: None,
		}
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> &Phase {
		&self.phase
	}

	/// The running session, if a graph has loaded.
	pub fn session(&self) -> Option<&GraphSession> {
		self.session.as_ref()
	}

	/// Marks the document request as issued.
	pub fn begin_loading(&mut self) {
		if self.phase == Phase::Idle {
			info!("essence-map: loading graph document");
			self.phase = Phase::Loading;
		}
	}

	/// Drains `queue`, collecting notifications in the order they were raised.
	pub fn drain(&mut self, queue: &EventQueue) -> Vec<Notification> {
		let mut out = Vec::new();
		while let Some(event) = queue.pop() {
			out.extend(self.dispatch(event));
		}
		out
	}

	/// Applies one event. Events that do not fit the current phase are dropped.
	pub fn dispatch(&mut self, event: ViewerEvent) -> Vec<Notification> {
		match (self.phase.clone(), event) {
			(Phase::Loading, ViewerEvent::Loaded(graph)) => {
				self.session = Some(GraphSession::start(&graph, self.settings.clone()));
				self.phase = Phase::Simulating;
				info!("essence-map: simulating {} nodes", graph.nodes.len());
				vec![Notification::Redraw]
			}
			(Phase::Loading, ViewerEvent::LoadFailed(err)) => {
				if err.is_load_failure() {
					error!("essence-map: could not load graph: {err}");
				} else {
					error!("essence-map: graph document is inconsistent: {err}");
				}
				self.phase = Phase::Failed(err.to_string());
				Vec::new()
			}
			(Phase::Simulating, event) => self.dispatch_session(event),
			(phase, event) => {
				debug!("essence-map: ignoring {event:?} while {phase:?}");
				Vec::new()
			}
		}
	}

	fn dispatch_session(&mut self, event: ViewerEvent) -> Vec<Notification> {
		let Some(session) = self.session.as_mut() else {
			return Vec::new();
		};
		match event {
			ViewerEvent::Tick { dt } => {
				if session.tick(dt) {
					vec![Notification::Redraw]
				} else {
					Vec::new()
				}
			}
			ViewerEvent::DragStart { x, y } => match session.on_drag_start(x, y) {
				Some(port) => vec![Notification::NodeSelected(port), Notification::Redraw],
				None => Vec::new(),
			},
			ViewerEvent::Drag { x, y } => {
				if session.on_drag(x, y) {
					vec![Notification::Redraw]
				} else {
					Vec::new()
				}
			}
			ViewerEvent::DragEnd => {
				session.on_drag_end();
				Vec::new()
			}
			ViewerEvent::Loaded(_) | ViewerEvent::LoadFailed(_) => {
				debug!("essence-map: graph already loaded, ignoring load result");
				Vec::new()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::loader::parse_graph;
	use crate::components::network_graph::theme::Theme;

	fn viewer() -> Viewer {
		Viewer::new(SessionSettings {
			width: 960.0,
			height: 600.0,
			node_radius: 16.0,
			charge_strength: -300.0,
			theme: Theme::light(),
		})
	}

	fn pair() -> Graph {
		parse_graph(
			r#"{"nodes":[{"port":"A","entrypoint":"true"},{"port":"B","entrypoint":"false"}],
			"links":[{"source":"A","target":"B"}]}"#,
		)
		.unwrap()
	}

	#[test]
	fn loads_into_simulating() {
		let mut v = viewer();
		assert_eq!(v.phase(), &Phase::Idle);
		v.begin_loading();
		assert_eq!(v.phase(), &Phase::Loading);

		let out = v.dispatch(ViewerEvent::Loaded(pair()));
		assert_eq!(out, vec![Notification::Redraw]);
		assert_eq!(v.phase(), &Phase::Simulating);
		assert_eq!(v.session().unwrap().sim.node_count(), 2);
	}

	#[test]
	fn failed_load_is_terminal() {
		let mut v = viewer();
		v.begin_loading();
		v.dispatch(ViewerEvent::LoadFailed(GraphError::Fetch("HTTP 404".into())));
		assert!(matches!(v.phase(), Phase::Failed(msg) if msg.contains("404")));

		assert!(v.dispatch(ViewerEvent::Loaded(pair())).is_empty());
		assert!(v.session().is_none());
		assert!(matches!(v.phase(), Phase::Failed(_)));
	}

	#[test]
	fn inconsistent_document_fails_like_a_bad_fetch() {
		let mut v = viewer();
		v.begin_loading();
		v.dispatch(ViewerEvent::LoadFailed(GraphError::DanglingReference {
			link: 0,
			port: "Z".into(),
		}));
		assert!(matches!(v.phase(), Phase::Failed(msg) if msg.contains("\"Z\"")));
		assert!(v.session().is_none());
	}

	#[test]
	fn pointer_events_before_load_are_ignored() {
		let mut v = viewer();
		v.begin_loading();
		assert!(v.dispatch(ViewerEvent::DragStart { x: 0.0, y: 0.0 }).is_empty());
		assert!(v.dispatch(ViewerEvent::Tick { dt: 0.016 }).is_empty());
		assert_eq!(v.phase(), &Phase::Loading);
	}

	#[test]
	fn load_result_before_loading_is_ignored() {
		let mut v = viewer();
		assert!(v.dispatch(ViewerEvent::Loaded(pair())).is_empty());
		assert_eq!(v.phase(), &Phase::Idle);
	}

	#[test]
	fn queue_drains_in_order_and_reports_selection() {
		let mut v = viewer();
		v.begin_loading();
		let queue = EventQueue::new();
		queue.push(ViewerEvent::Loaded(pair()));
		let out = v.drain(&queue);
		assert_eq!(out, vec![Notification::Redraw]);

		let (ax, ay) = v.session().unwrap().sim.position(0).unwrap();
		let producer = queue.clone();
		producer.push(ViewerEvent::DragStart { x: ax, y: ay });
		producer.push(ViewerEvent::Drag { x: 10.0, y: 10.0 });
		producer.push(ViewerEvent::DragEnd);

		let out = v.drain(&queue);
		assert!(queue.pop().is_none());
		assert_eq!(
			out,
			vec![
				Notification::NodeSelected("A".into()),
				Notification::Redraw,
				Notification::Redraw,
			]
		);
		assert_eq!(v.session().unwrap().sim.pin_of(0), None);
	}
}
