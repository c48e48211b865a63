//! Leptos component wrapping the network map canvas.
//!
//! The component creates the `#network` canvas, starts the document fetch,
//! and runs an animation loop via `requestAnimationFrame`. Mouse handlers and
//! the fetch task only enqueue [`ViewerEvent`]s; each frame drains the queue,
//! repaints if anything moved, and forwards node selections to `on_select`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::events::{EventQueue, Notification, Viewer, ViewerEvent};
use super::loader::load_graph;
use super::state::SessionSettings;
use super::surface::CanvasSurface;
use super::theme::{Theme, ThemeName};

/// Fixed simulation step per animation frame, in seconds.
const FRAME_DT: f32 = 0.016;

/// Bundles the viewer with the canvas it paints on.
struct GraphContext {
	viewer: Viewer,
	surface: CanvasSurface,
}

impl GraphContext {
	/// Applies queued events and repaints when needed.
	fn run_frame(&mut self, queue: &EventQueue, on_select: Option<Callback<String>>) {
		queue.push(ViewerEvent::Tick { dt: FRAME_DT });
		let mut redraw = false;
		for note in self.viewer.drain(queue) {
			match note {
				Notification::NodeSelected(port) => {
					if let Some(cb) = on_select {
						cb.run(port);
					}
				}
				Notification::Redraw => redraw = true,
			}
		}
		if redraw {
			if let Some(session) = self.viewer.session() {
				session.redraw(&mut self.surface);
			}
		}
	}
}

/// Converts a mouse event to canvas pixel coordinates.
///
/// The canvas may be styled to a different size than its `width`/`height`
/// attributes, so client offsets are scaled by the ratio between the two.
fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	let sx = if rect.width() > 0.0 {
		canvas.width() as f64 / rect.width()
	} else {
		1.0
	};
	let sy = if rect.height() > 0.0 {
		canvas.height() as f64 / rect.height()
	} else {
		1.0
	};
	(
		(ev.client_x() as f64 - rect.left()) * sx,
		(ev.client_y() as f64 - rect.top()) * sy,
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Renders the peer network loaded from `data_url` on a `#network` canvas.
///
/// `width` and `height` set the canvas attributes and the layout center.
/// Dragging a node pins it under the pointer; the picked node's port is
/// passed to `on_select`.
#[component]
pub fn NetworkGraphCanvas(
	#[prop(into)] data_url: String,
	#[prop(default = 960)] width: u32,
	#[prop(default = 600)] height: u32,
	#[prop(default = 16.0)] node_radius: f64,
	#[prop(default = -300.0)] charge_strength: f64,
	#[prop(default = ThemeName::Light)] theme: ThemeName,
	#[prop(into, optional)] on_select: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let queue = EventQueue::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, queue_init) = (context.clone(), animate.clone(), queue.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("essence-map: no window, not starting");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("essence-map: canvas has no 2d context");
			return;
		};

		let mut viewer = Viewer::new(SessionSettings {
			width: width as f64,
			height: height as f64,
			node_radius,
			charge_strength,
			theme: Theme::named(theme),
		});
		viewer.begin_loading();
		*context_init.borrow_mut() = Some(GraphContext {
			viewer,
			surface: CanvasSurface::new(ctx),
		});

		let (queue_load, url) = (queue_init.clone(), data_url.clone());
		spawn_local(async move {
			match load_graph(&url).await {
				Ok(graph) => queue_load.push(ViewerEvent::Loaded(graph)),
				Err(e) => queue_load.push(ViewerEvent::LoadFailed(e)),
			}
		});

		let (context_anim, animate_inner, queue_anim) =
			(context_init.clone(), animate_init.clone(), queue_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.run_frame(&queue_anim, on_select);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let queue_md = queue.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 || ev.ctrl_key() {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		queue_md.push(ViewerEvent::DragStart { x, y });
	};

	let queue_mm = queue.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if ev.buttons() & 1 == 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		queue_mm.push(ViewerEvent::Drag { x, y });
	};

	let queue_mu = queue.clone();
	let on_mouseup = move |_: MouseEvent| {
		queue_mu.push(ViewerEvent::DragEnd);
	};

	let queue_ml = queue.clone();
	let on_mouseleave = move |_: MouseEvent| {
		queue_ml.push(ViewerEvent::DragEnd);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			id="network"
			class="network-canvas"
			width=width.to_string()
			height=height.to_string()
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
