//! Force-directed layout for the network map.
//!
//! Charge repulsion and velocity integration come from `force_graph`. Each
//! tick then applies position constraints on top of it: centering on both
//! axes, link distance, and collision. An energy value (`alpha`) decays every
//! tick and scales the motion; when it drops below `alpha_min` the simulation
//! stops ticking until [`Simulation::restart`] is called.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, ForceGraph, NodeData, SimulationParameters};

use super::types::{Graph, ResolvedLink};

/// Mass given to every node. `force_graph` multiplies the two masses into the
/// repulsion, so charge strengths are scaled by this squared.
const NODE_MASS: f32 = 10.0;

/// Integration speed at `alpha == 1`.
const BASE_NODE_SPEED: f32 = 3000.0;

/// Radius of the circle nodes are seeded on.
const SEED_RADIUS: f64 = 100.0;

/// Per-node metadata carried through the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Port of the peer this node stands for.
	pub port: String,
	/// Drawn in the entrypoint color.
	pub is_entrypoint: bool,
	/// Pinned position. While set, physics does not move the node.
	pub fx: Option<f32>,
	/// Pinned vertical position, set together with `fx`.
	pub fy: Option<f32>,
}

impl NodeInfo {
	/// Whether a drag currently holds the node.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// Strengths of the composed forces and the cooling schedule.
#[derive(Clone, Debug)]
pub struct ForceConfig {
	/// Pull toward the horizontal and vertical canvas midlines.
	pub center_strength: f64,
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
	/// Collision radius of each node. Centers stay `2 * collide_radius` apart.
	pub collide_radius: f64,
	/// Rest length of every link.
	pub link_distance: f64,
	/// Ticks stop once alpha falls below this and the target is lower.
	pub alpha_min: f64,
	/// Fraction of the gap to the target closed per tick.
	pub alpha_decay: f64,
}

impl ForceConfig {
	/// Defaults for nodes drawn with radius `node_radius`.
	pub fn for_radius(node_radius: f64) -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			center_strength: 0.1,
			charge_strength: -300.0,
			collide_radius: node_radius + 1.0,
			link_distance: 30.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
		}
	}
}

/// A running layout over a resolved [`Graph`].
pub struct Simulation {
	/// Underlying many-body graph; node order matches the document.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Forces composed on top of the many-body pass.
	pub forces: ForceConfig,
	indices: Vec<DefaultNodeIdx>,
	links: Vec<ResolvedLink>,
	link_strength: Vec<f64>,
	link_bias: Vec<f64>,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	running: bool,
}

impl Simulation {
	/// Seeds every node on a circle around `center` in document order.
	pub fn new(graph: &Graph, center: (f64, f64), forces: ForceConfig) -> Self {
		let mut sim = ForceGraph::new(SimulationParameters {
			force_charge: (-forces.charge_strength * 0.5) as f32,
			force_spring: 0.0,
			force_max: 100.0,
			node_speed: BASE_NODE_SPEED,
			damping_factor: 0.6,
		});

		let count = graph.nodes.len().max(1) as f64;
		let indices = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = (i as f64) * 2.0 * PI / count;
				sim.add_node(NodeData {
					x: (center.0 + SEED_RADIUS * angle.cos()) as f32,
					y: (center.1 + SEED_RADIUS * angle.sin()) as f32,
					mass: NODE_MASS,
					is_anchor: false,
					user_data: NodeInfo {
						port: node.port.clone(),
						is_entrypoint: node.is_entrypoint(),
						fx: None,
						fy: None,
					},
				})
			})
			.collect();

		// Links between busy nodes are weaker, and the lighter endpoint moves more.
		let degrees = graph.degrees();
		let link_strength = graph
			.links
			.iter()
			.map(|l| 1.0 / degrees[l.source].min(degrees[l.target]) as f64)
			.collect();
		let link_bias = graph
			.links
			.iter()
			.map(|l| {
				let (s, t) = (degrees[l.source] as f64, degrees[l.target] as f64);
				s / (s + t)
			})
			.collect();

		Self {
			graph: sim,
			forces,
			indices,
			links: graph.links.clone(),
			link_strength,
			link_bias,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
		}
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.indices.len()
	}

	/// Resolved links, in document order.
	pub fn links(&self) -> &[ResolvedLink] {
		&self.links
	}

	/// Current energy.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Energy the schedule moves toward; a drag raises it.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Whether the next call to [`Simulation::tick`] will move anything.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Resumes ticking after the simulation settled.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Advances one step. Returns false without doing anything once settled.
	pub fn tick(&mut self, dt: f32) -> bool {
		if !self.running {
			return false;
		}

		self.alpha += (self.alpha_target - self.alpha) * self.forces.alpha_decay;

		self.graph.parameters.node_speed = BASE_NODE_SPEED * self.alpha as f32;
		self.graph.update(dt);

		let mut positions = self.positions();
		let pinned: Vec<bool> = self.node_infos().iter().map(NodeInfo::is_pinned).collect();
		self.apply_center(&mut positions, &pinned);
		self.apply_links(&mut positions, &pinned);
		self.apply_collide(&mut positions, &pinned);
		self.write_positions(&positions);

		if self.alpha < self.forces.alpha_min {
			self.running = false;
		}
		true
	}

	/// Current positions, indexed in document order.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut positions = vec![(0.0, 0.0); self.indices.len()];
		self.graph.visit_nodes(|node| {
			positions[node.index().index()] = (node.x() as f64, node.y() as f64);
		});
		positions
	}

	/// Node metadata, indexed in document order.
	pub fn node_infos(&self) -> Vec<NodeInfo> {
		let mut infos = vec![NodeInfo::default(); self.indices.len()];
		self.graph.visit_nodes(|node| {
			infos[node.index().index()] = node.data.user_data.clone();
		});
		infos
	}

	/// Position of one node, or `None` out of range.
	pub fn position(&self, node: usize) -> Option<(f64, f64)> {
		let idx = *self.indices.get(node)?;
		let mut found = None;
		self.graph.visit_nodes(|n| {
			if n.index() == idx {
				found = Some((n.x() as f64, n.y() as f64));
			}
		});
		found
	}

	/// Port of one node, or `None` out of range.
	pub fn port(&self, node: usize) -> Option<String> {
		let idx = *self.indices.get(node)?;
		let mut found = None;
		self.graph.visit_nodes(|n| {
			if n.index() == idx {
				found = Some(n.data.user_data.port.clone());
			}
		});
		found
	}

	/// The pinned position of `node`, if it has one.
	pub fn pin_of(&self, node: usize) -> Option<(f32, f32)> {
		let idx = *self.indices.get(node)?;
		let mut found = None;
		self.graph.visit_nodes(|n| {
			if n.index() == idx {
				let info = &n.data.user_data;
				if let (Some(fx), Some(fy)) = (info.fx, info.fy) {
					found = Some((fx, fy));
				}
			}
		});
		found
	}

	/// The node closest to `(x, y)`, optionally within `radius`.
	///
	/// Ties go to the earlier node in document order.
	pub fn find(&self, x: f64, y: f64, radius: Option<f64>) -> Option<usize> {
		let mut best = radius.map_or(f64::INFINITY, |r| r * r);
		let mut found = None;
		for (i, (nx, ny)) in self.positions().into_iter().enumerate() {
			let d2 = (nx - x).powi(2) + (ny - y).powi(2);
			if d2 < best || (found.is_none() && d2 <= best) {
				best = d2;
				found = Some(i);
			}
		}
		found
	}

	/// Fixes `node` at `(x, y)` until [`Simulation::unpin`].
	pub fn pin(&mut self, node: usize, x: f64, y: f64) {
		let Some(&idx) = self.indices.get(node) else {
			return;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.user_data.fx = Some(x as f32);
				n.data.user_data.fy = Some(y as f32);
				n.data.x = x as f32;
				n.data.y = y as f32;
				n.data.is_anchor = true;
			}
		});
	}

	/// Releases a pin so physics moves the node again.
	pub fn unpin(&mut self, node: usize) {
		let Some(&idx) = self.indices.get(node) else {
			return;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.user_data.fx = None;
				n.data.user_data.fy = None;
				n.data.is_anchor = false;
			}
		});
	}

	fn apply_center(&self, positions: &mut [(f64, f64)], pinned: &[bool]) {
		let k = self.forces.center_strength * self.alpha;
		for (pos, &fixed) in positions.iter_mut().zip(pinned) {
			if fixed {
				continue;
			}
			pos.0 += (self.center.0 - pos.0) * k;
			pos.1 += (self.center.1 - pos.1) * k;
		}
	}

	fn apply_links(&self, positions: &mut [(f64, f64)], pinned: &[bool]) {
		for (i, link) in self.links.iter().enumerate() {
			if link.source == link.target {
				continue;
			}
			let (s, t) = (positions[link.source], positions[link.target]);
			let (dx, dy) = (t.0 - s.0, t.1 - s.1);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < 1e-6 {
				continue;
			}
			let l = (dist - self.forces.link_distance) / dist * self.alpha * self.link_strength[i];
			let (mx, my) = (dx * l, dy * l);
			let bias = self.link_bias[i];
			if !pinned[link.target] {
				positions[link.target].0 -= mx * bias;
				positions[link.target].1 -= my * bias;
			}
			if !pinned[link.source] {
				positions[link.source].0 += mx * (1.0 - bias);
				positions[link.source].1 += my * (1.0 - bias);
			}
		}
	}

	fn apply_collide(&self, positions: &mut [(f64, f64)], pinned: &[bool]) {
		let min_dist = self.forces.collide_radius * 2.0;
		for i in 0..positions.len() {
			for j in (i + 1)..positions.len() {
				let (dx, dy) = (
					positions[j].0 - positions[i].0,
					positions[j].1 - positions[i].1,
				);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist >= min_dist || dist < 1e-6 {
					continue;
				}
				let overlap = (min_dist - dist) / dist;
				let share = match (pinned[i], pinned[j]) {
					(true, true) => continue,
					(true, false) | (false, true) => 1.0,
					(false, false) => 0.5,
				};
				if !pinned[i] {
					positions[i].0 -= dx * overlap * share;
					positions[i].1 -= dy * overlap * share;
				}
				if !pinned[j] {
					positions[j].0 += dx * overlap * share;
					positions[j].1 += dy * overlap * share;
				}
			}
		}
	}

	fn write_positions(&mut self, positions: &[(f64, f64)]) {
		self.graph.visit_nodes_mut(|node| {
			let info = &node.data.user_data;
			let (x, y) = positions[node.index().index()];
			node.data.x = info.fx.unwrap_or(x as f32);
			node.data.y = info.fy.unwrap_or(y as f32);
		});
	}
}
