use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::config::GraphConfig;
use super::interaction::{Cursor, Interaction};
use super::model::{GraphModel, build_graph};
use super::physics::{self, Bounds};
use super::types::{Document, Edge, Node, NodeIdx, Point};
use super::viewport::{Command, Viewport};

/// What the host sees of a session: the documents under the pointer and in
/// the selection, the current zoom and pan, and the cursor hint.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot {
	pub hovered: Option<Document>,
	pub selected: Option<Document>,
	pub scale: f64,
	pub offset: Point,
	pub cursor: Cursor,
}

impl Default for ViewSnapshot {
	fn default() -> Self {
		Self {
			hovered: None,
			selected: None,
			scale: 1.0,
			offset: Point::default(),
			cursor: Cursor::Grab,
		}
	}
}

/// Everything one interactive session owns: the node arena, the edge
/// relation, the id lookup, and the view/pointer state. Built on entering
/// interactive mode, dropped on leaving it.
pub struct GraphState {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	pub viewport: Viewport,
	pub interaction: Interaction,
	pub bounds: Bounds,
	pub config: GraphConfig,
	index: HashMap<String, NodeIdx>,
	adjacency: Vec<Vec<NodeIdx>>,
}

impl GraphState {
	pub fn new<R: Rng>(docs: &[Document], bounds: Bounds, config: GraphConfig, rng: &mut R) -> Self {
		let center = if bounds.width > 0.0 && bounds.height > 0.0 {
			let (cx, cy) = bounds.center();
			Point::new(cx, cy)
		} else {
			config.layout.fallback_center
		};
		let model = build_graph(docs, center, &config.layout, rng);
		Self::from_model(model, bounds, config)
	}

	pub fn from_model(model: GraphModel, bounds: Bounds, config: GraphConfig) -> Self {
		let GraphModel { nodes, edges } = model;
		let index: HashMap<String, NodeIdx> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id().to_string(), i))
			.collect();

		let mut adjacency = vec![Vec::new(); nodes.len()];
		for edge in &edges {
			match (index.get(&edge.source), index.get(&edge.target)) {
				(Some(&a), Some(&b)) => {
					debug!("edge {} -- {} ({})", edge.source, edge.target, edge.strength);
					adjacency[a].push(b);
					adjacency[b].push(a);
				}
				_ => debug!("skipping dangling edge {} -> {}", edge.source, edge.target),
			}
		}

		Self {
			nodes,
			edges,
			viewport: Viewport::new(config.viewport.clone()),
			interaction: Interaction::new(config.interaction.hit_radius),
			bounds,
			config,
			index,
			adjacency,
		}
	}

	/// One simulation step.
	pub fn tick(&mut self) {
		physics::step(&mut self.nodes, &self.adjacency, self.bounds, &self.config.physics);
	}

	/// Tracks the canvas size. Positions and velocities are kept.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = Bounds { width, height };
	}

	pub fn node_index(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.node_index(id).map(|i| &self.nodes[i])
	}

	/// Both endpoints of `edge`, or `None` if either id is unknown.
	pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
		Some((self.node(&edge.source)?, self.node(&edge.target)?))
	}

	#[cfg(test)]
	pub fn neighbors(&self, idx: NodeIdx) -> &[NodeIdx] {
		self.adjacency.get(idx).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn hovered_node(&self) -> Option<&Node> {
		self.interaction.hovered().and_then(|i| self.nodes.get(i))
	}

	pub fn selected_node(&self) -> Option<&Node> {
		self.interaction.selected().and_then(|i| self.nodes.get(i))
	}

	pub fn pointer_move(&mut self, screen: Point) {
		self.interaction
			.pointer_move(&self.nodes, &mut self.viewport, self.bounds, screen);
	}

	pub fn pointer_down(&mut self, screen: Point) {
		self.interaction
			.pointer_down(&self.nodes, &self.viewport, self.bounds, screen);
	}

	pub fn pointer_up(&mut self, screen: Point) {
		self.interaction
			.pointer_up(&self.nodes, &self.viewport, self.bounds, screen);
	}

	pub fn pointer_leave(&mut self) {
		self.interaction.pointer_leave();
	}

	/// Zoom and reset only touch the viewport; nodes and selection stay.
	pub fn command(&mut self, command: Command) {
		self.viewport.apply(command);
	}

	pub fn snapshot(&self) -> ViewSnapshot {
		ViewSnapshot {
			hovered: self.hovered_node().map(|n| n.doc.clone()),
			selected: self.selected_node().map(|n| n.doc.clone()),
			scale: self.viewport.scale,
			offset: Point::new(self.viewport.offset_x, self.viewport.offset_y),
			cursor: self.interaction.cursor(),
		}
	}
}
