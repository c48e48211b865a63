//! Drawing the network map.
//!
//! One pass per frame: clear, optional background, every link as one
//! stroked path, then every node as a filled circle on top.

use super::simulation::Simulation;
use super::surface::Surface;
use super::theme::Theme;

/// Line width for links, in canvas pixels.
const LINK_WIDTH: f64 = 1.0;

/// Canvas size and node radius for a frame.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Node circle radius.
	pub node_radius: f64,
}

/// Renders the complete graph to `surface`.
///
/// Output depends only on current positions, so repeated calls with no
/// simulation step in between draw the same frame.
pub fn render(sim: &Simulation, surface: &mut impl Surface, theme: &Theme, view: &Viewport) {
	surface.clear(view.width, view.height);

	if let Some(bg) = theme.background {
		surface.fill_rect(0.0, 0.0, view.width, view.height, &bg.to_css());
	}

	let positions = sim.positions();

	let segments: Vec<_> = sim
		.links()
		.iter()
		.map(|link| (positions[link.source], positions[link.target]))
		.collect();
	if !segments.is_empty() {
		surface.stroke_lines(&segments, &theme.link.to_css(), LINK_WIDTH);
	}

	for (info, (x, y)) in sim.node_infos().iter().zip(positions) {
		let color = theme.node_color(info.is_entrypoint).to_css();
		surface.fill_circle(x, y, view.node_radius, &color);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::loader::parse_graph;
	use crate::components::network_graph::simulation::ForceConfig;
	use crate::components::network_graph::surface::{DrawOp, RecordingSurface};

	const VIEW: Viewport = Viewport {
		width: 960.0,
		height: 600.0,
		node_radius: 16.0,
	};

	fn sim(json: &str) -> Simulation {
		let graph = parse_graph(json).unwrap();
		Simulation::new(&graph, (480.0, 300.0), ForceConfig::for_radius(16.0))
	}

	fn circle_colors(ops: &[DrawOp]) -> Vec<String> {
		ops.iter()
			.filter_map(|op| match op {
				DrawOp::FillCircle(_, _, _, color) => Some(color.clone()),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn redraw_is_idempotent() {
		let mut sim = sim(
			r#"{"nodes":[{"port":"A"},{"port":"B"},{"port":"C"}],
			"links":[{"source":"A","target":"B"},{"source":"B","target":"C"}]}"#,
		);
		for _ in 0..10 {
			sim.tick(0.016);
		}
		let theme = Theme::default();
		let mut surface = RecordingSurface::default();

		render(&sim, &mut surface, &theme, &VIEW);
		let first = surface.ops.clone();
		render(&sim, &mut surface, &theme, &VIEW);
		assert_eq!(first, surface.ops);
	}

	#[test]
	fn links_are_drawn_before_nodes() {
		let sim = sim(
			r#"{"nodes":[{"port":"A"},{"port":"B"}],
			"links":[{"source":"A","target":"B"}]}"#,
		);
		let mut surface = RecordingSurface::default();
		render(&sim, &mut surface, &Theme::light(), &VIEW);

		assert_eq!(surface.ops[0], DrawOp::Clear(960.0, 600.0));
		match &surface.ops[1] {
			DrawOp::StrokeLines(segments, color, _) => {
				assert_eq!(segments.len(), 1);
				assert_eq!(segments[0].0, sim.position(0).unwrap());
				assert_eq!(segments[0].1, sim.position(1).unwrap());
				assert_eq!(color, "#000000");
			}
			other => panic!("expected links first, got {other:?}"),
		}
		assert_eq!(circle_colors(&surface.ops).len(), 2);
		assert!(matches!(surface.ops[2], DrawOp::FillCircle(_, _, r, _) if r == 16.0));
	}

	#[test]
	fn entrypoint_color_uses_string_comparison() {
		let sim = sim(
			r#"{"nodes":[
				{"port":"1","entrypoint":"true"},
				{"port":"2","entrypoint":true},
				{"port":"3","entrypoint":"false"},
				{"port":"4","entrypoint":"yes"},
				{"port":"5"}
			],"links":[]}"#,
		);
		let mut surface = RecordingSurface::default();
		render(&sim, &mut surface, &Theme::light(), &VIEW);

		assert_eq!(
			circle_colors(&surface.ops),
			vec!["#0d3478", "#add8e6", "#add8e6", "#add8e6", "#add8e6"]
		);
	}

	#[test]
	fn dark_theme_paints_background() {
		let sim = sim(r#"{"nodes":[{"port":"A"}],"links":[]}"#);
		let mut surface = RecordingSurface::default();
		render(&sim, &mut surface, &Theme::dark(), &VIEW);
		assert_eq!(
			surface.ops[1],
			DrawOp::FillRect(0.0, 0.0, 960.0, 600.0, "#272b30".to_string())
		);
	}
}
