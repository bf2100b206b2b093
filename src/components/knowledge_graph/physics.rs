//! Force-directed layout step.
//!
//! Each tick sums three forces per node:
//! - inverse-square repulsion from every other node,
//! - a linear pull towards every neighbor,
//! - a linear pull towards the canvas center.
//!
//! Velocities are damped, positions integrated and then clamped to the canvas
//! minus padding. The simulation never settles on its own; the scheduler stops it.

use super::config::{PhysicsConfig, UpdatePolicy};
use super::types::{Node, NodeIdx};

/// Canvas size in pixels. World space shares the canvas' extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Clamps one axis to `[padding, extent - padding]`. Canvases narrower
	/// than twice the padding pin nodes at `padding`.
	fn clamp_axis(value: f64, extent: f64, padding: f64) -> f64 {
		value.min(extent - padding).max(padding)
	}
}

/// Advances every node by one tick.
///
/// `adjacency[i]` lists the neighbors of node `i`; an edge appears in both
/// endpoint lists.
pub fn step(nodes: &mut [Node], adjacency: &[Vec<NodeIdx>], bounds: Bounds, cfg: &PhysicsConfig) {
	match cfg.update_policy {
		UpdatePolicy::Simultaneous => {
			let current: &[Node] = nodes;
			let forces: Vec<(f64, f64)> = (0..current.len())
				.map(|i| net_force(current, adjacency, i, bounds, cfg))
				.collect();
			for (node, force) in nodes.iter_mut().zip(forces) {
				integrate(node, force, bounds, cfg);
			}
		}
		UpdatePolicy::Sequential => {
			for i in 0..nodes.len() {
				let force = net_force(nodes, adjacency, i, bounds, cfg);
				integrate(&mut nodes[i], force, bounds, cfg);
			}
		}
	}
}

fn net_force(
	nodes: &[Node],
	adjacency: &[Vec<NodeIdx>],
	i: NodeIdx,
	bounds: Bounds,
	cfg: &PhysicsConfig,
) -> (f64, f64) {
	let node = &nodes[i];
	let (mut fx, mut fy) = (0.0, 0.0);

	for (j, other) in nodes.iter().enumerate() {
		if j == i {
			continue;
		}
		let (dx, dy) = (node.x - other.x, node.y - other.y);
		let mut dist = (dx * dx + dy * dy).sqrt();
		if dist == 0.0 {
			dist = 1.0;
		}
		let force = cfg.repulsion / (dist * dist);
		fx += dx / dist * force;
		fy += dy / dist * force;
	}

	for &j in adjacency.get(i).map(Vec::as_slice).unwrap_or_default() {
		let Some(other) = nodes.get(j) else {
			continue;
		};
		fx += (other.x - node.x) * cfg.attraction;
		fy += (other.y - node.y) * cfg.attraction;
	}

	let (cx, cy) = bounds.center();
	fx += (cx - node.x) * cfg.center_gravity;
	fy += (cy - node.y) * cfg.center_gravity;

	(fx, fy)
}

fn integrate(node: &mut Node, (fx, fy): (f64, f64), bounds: Bounds, cfg: &PhysicsConfig) {
	node.vx = (node.vx + fx) * cfg.damping;
	node.vy = (node.vy + fy) * cfg.damping;
	node.x = Bounds::clamp_axis(node.x + node.vx, bounds.width, cfg.padding);
	node.y = Bounds::clamp_axis(node.y + node.vy, bounds.height, cfg.padding);
}

#[cfg(test)]
mod tests {
	use rand::rngs::StdRng;
	use rand::{Rng, SeedableRng};

	use super::*;
	use crate::components::knowledge_graph::types::doc;

	const BOUNDS: Bounds = Bounds {
		width: 800.0,
		height: 600.0,
	};

	fn node_at(id: &str, x: f64, y: f64) -> Node {
		Node::new(doc(id, "Material", &[]), x, y)
	}

	fn no_gravity() -> PhysicsConfig {
		PhysicsConfig {
			center_gravity: 0.0,
			..PhysicsConfig::default()
		}
	}

	#[test]
	fn lone_node_drifts_to_center_with_damping() {
		let mut nodes = vec![node_at("a", 450.0, 300.0)];
		step(&mut nodes, &[vec![]], BOUNDS, &PhysicsConfig::default());
		// f = (400 - 450) * 0.005 = -0.25, v = -0.25 * 0.9
		assert!((nodes[0].vx + 0.225).abs() < 1e-12);
		assert!((nodes[0].x - 449.775).abs() < 1e-12);
		assert_eq!(nodes[0].y, 300.0);
	}

	#[test]
	fn unlinked_nodes_push_apart() {
		let mut nodes = vec![node_at("a", 390.0, 300.0), node_at("b", 410.0, 300.0)];
		for _ in 0..20 {
			step(&mut nodes, &[vec![], vec![]], BOUNDS, &no_gravity());
		}
		assert!(nodes[1].x - nodes[0].x > 20.0);
	}

	#[test]
	fn linked_nodes_pull_together() {
		let cfg = PhysicsConfig {
			repulsion: 0.0,
			..no_gravity()
		};
		let mut nodes = vec![node_at("a", 100.0, 300.0), node_at("b", 700.0, 300.0)];
		let adjacency = vec![vec![1], vec![0]];
		step(&mut nodes, &adjacency, BOUNDS, &cfg);
		// 600 * 0.004 * 0.9
		assert!((nodes[0].x - 102.16).abs() < 1e-9);
		assert!((nodes[1].x - 697.84).abs() < 1e-9);
	}

	#[test]
	fn dangling_neighbor_is_ignored() {
		let mut nodes = vec![node_at("a", 400.0, 300.0)];
		step(&mut nodes, &[vec![5]], BOUNDS, &PhysicsConfig::default());
		assert_eq!((nodes[0].x, nodes[0].y), (400.0, 300.0));
	}

	#[test]
	fn coincident_nodes_stay_finite() {
		let mut nodes = vec![node_at("a", 400.0, 300.0), node_at("b", 400.0, 300.0)];
		for _ in 0..10 {
			step(&mut nodes, &[vec![1], vec![0]], BOUNDS, &PhysicsConfig::default());
		}
		assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
	}

	#[test]
	fn positions_stay_inside_padded_bounds() {
		let mut rng = StdRng::seed_from_u64(42);
		let cfg = PhysicsConfig::default();
		for policy in [UpdatePolicy::Simultaneous, UpdatePolicy::Sequential] {
			let cfg = PhysicsConfig {
				update_policy: policy,
				..cfg.clone()
			};
			let bounds = Bounds {
				width: 320.0,
				height: 240.0,
			};
			let mut nodes: Vec<Node> = (0..30)
				.map(|i| {
					node_at(
						&i.to_string(),
						rng.gen_range(-200.0..600.0),
						rng.gen_range(-200.0..600.0),
					)
				})
				.collect();
			let adjacency: Vec<Vec<NodeIdx>> =
				(0..30).map(|i| vec![(i + 1) % 30, (i + 29) % 30]).collect();
			for _ in 0..200 {
				step(&mut nodes, &adjacency, bounds, &cfg);
				for n in &nodes {
					assert!((50.0..=270.0).contains(&n.x), "x = {}", n.x);
					assert!((50.0..=190.0).contains(&n.y), "y = {}", n.y);
				}
			}
		}
	}

	#[test]
	fn tiny_canvas_pins_nodes_at_padding() {
		let mut nodes = vec![node_at("a", 10.0, 10.0)];
		let bounds = Bounds {
			width: 60.0,
			height: 60.0,
		};
		step(&mut nodes, &[vec![]], bounds, &PhysicsConfig::default());
		assert_eq!((nodes[0].x, nodes[0].y), (50.0, 50.0));
	}

	#[test]
	fn simultaneous_update_is_order_independent() {
		let cfg = PhysicsConfig::default();
		let mut forward = vec![
			node_at("a", 380.0, 300.0),
			node_at("b", 400.0, 290.0),
			node_at("c", 430.0, 320.0),
		];
		let mut backward: Vec<Node> = forward.iter().rev().cloned().collect();
		step(&mut forward, &[vec![1], vec![0], vec![]], BOUNDS, &cfg);
		step(&mut backward, &[vec![], vec![2], vec![1]], BOUNDS, &cfg);
		for (f, b) in forward.iter().zip(backward.iter().rev()) {
			assert_eq!(f.id(), b.id());
			assert!((f.x - b.x).abs() < 1e-9 && (f.y - b.y).abs() < 1e-9);
		}
	}

	#[test]
	fn sequential_update_sees_earlier_moves() {
		let start = vec![node_at("a", 390.0, 300.0), node_at("b", 410.0, 300.0)];
		let mut simultaneous = start.clone();
		let mut sequential = start;
		let adjacency = [vec![], vec![]];
		step(&mut simultaneous, &adjacency, BOUNDS, &PhysicsConfig::default());
		step(
			&mut sequential,
			&adjacency,
			BOUNDS,
			&PhysicsConfig {
				update_policy: UpdatePolicy::Sequential,
				..PhysicsConfig::default()
			},
		);
		assert_eq!(simultaneous[0].x, sequential[0].x);
		assert_ne!(simultaneous[1].x, sequential[1].x);
	}
}
