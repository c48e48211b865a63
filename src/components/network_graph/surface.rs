//! Drawing targets for the renderer.
//!
//! [`render`](super::render::render) only issues the handful of primitives
//! below, so the same drawing code runs against the browser canvas and
//! against a recorder in tests.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

/// The drawing primitives the network map needs.
pub trait Surface {
	/// Resets the whole surface to transparent.
	fn clear(&mut self, width: f64, height: f64);
	/// Fills an axis-aligned rectangle.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
	/// Strokes straight segments as a single path.
	fn stroke_lines(&mut self, segments: &[((f64, f64), (f64, f64))], color: &str, width: f64);
	/// Fills a circle centered on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
}

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Draws through `ctx`.
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl Surface for CanvasSurface {
	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
		self.ctx.set_fill_style_str(color);
		self.ctx.fill_rect(x, y, width, height);
	}

	fn stroke_lines(&mut self, segments: &[((f64, f64), (f64, f64))], color: &str, width: f64) {
		let _ = self.ctx.set_line_dash(&js_sys::Array::new());
		self.ctx.set_global_alpha(1.0);
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		for &((x1, y1), (x2, y2)) in segments {
			self.ctx.move_to(x1, y1);
			self.ctx.line_to(x2, y2);
		}
		self.ctx.stroke();
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
		self.ctx.begin_path();
		self.ctx.set_fill_style_str(color);
		self.ctx.move_to(x, y);
		let _ = self.ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		self.ctx.fill();
	}
}

/// A recorded drawing call. Float fields keep the exact values passed in.
#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Clear(f64, f64),
	FillRect(f64, f64, f64, f64, String),
	StrokeLines(Vec<((f64, f64), (f64, f64))>, String, f64),
	FillCircle(f64, f64, f64, String),
}

/// [`Surface`] that records every call, for asserting on rendered output.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
	fn clear(&mut self, width: f64, height: f64) {
		self.ops.clear();
		self.ops.push(DrawOp::Clear(width, height));
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
		self.ops
			.push(DrawOp::FillRect(x, y, width, height, color.to_string()));
	}

	fn stroke_lines(&mut self, segments: &[((f64, f64), (f64, f64))], color: &str, width: f64) {
		self.ops
			.push(DrawOp::StrokeLines(segments.to_vec(), color.to_string(), width));
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
		self.ops
			.push(DrawOp::FillCircle(x, y, radius, color.to_string()));
	}
}
