//! Pointer state machine: hover, select and pan.
//!
//! Selection is tracked beside the pointer state and survives every
//! transition until another node is selected. A press on a node selects it;
//! a press on empty canvas starts a pan. Never both.

use super::physics::Bounds;
use super::types::{Node, NodeIdx, Point};
use super::viewport::Viewport;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
	#[default]
	Idle,
	Hovering(NodeIdx),
	/// Panning; `origin` is the press position minus the offset at press time.
	Dragging { origin: Point },
}

/// Cursor hint for the host surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	Pointer,
	Grab,
	Grabbing,
}

impl Cursor {
	pub fn as_css(self) -> &'static str {
		match self {
			Cursor::Pointer => "pointer",
			Cursor::Grab => "grab",
			Cursor::Grabbing => "grabbing",
		}
	}
}

/// Nearest node within `hit_radius` screen pixels of `screen`. Ties go to the
/// node inserted first.
pub fn hit_test(
	nodes: &[Node],
	viewport: &Viewport,
	bounds: Bounds,
	screen: Point,
	hit_radius: f64,
) -> Option<NodeIdx> {
	let world = viewport.to_world(screen, bounds);
	let radius = hit_radius / viewport.scale;
	let mut best: Option<(NodeIdx, f64)> = None;
	for (idx, node) in nodes.iter().enumerate() {
		let dist = Point::new(node.x, node.y).distance(world);
		if dist >= radius {
			continue;
		}
		if best.is_none_or(|(_, d)| dist < d) {
			best = Some((idx, dist));
		}
	}
	best.map(|(idx, _)| idx)
}

#[derive(Clone, Debug)]
pub struct Interaction {
	pointer: PointerState,
	selected: Option<NodeIdx>,
	hit_radius: f64,
}

impl Interaction {
	pub fn new(hit_radius: f64) -> Self {
		Self {
			pointer: PointerState::Idle,
			selected: None,
			hit_radius,
		}
	}

	#[cfg(test)]
	pub fn pointer(&self) -> PointerState {
		self.pointer
	}

	pub fn hovered(&self) -> Option<NodeIdx> {
		match self.pointer {
			PointerState::Hovering(idx) => Some(idx),
			_ => None,
		}
	}

	pub fn selected(&self) -> Option<NodeIdx> {
		self.selected
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.pointer, PointerState::Dragging { .. })
	}

	pub fn is_active(&self, idx: NodeIdx) -> bool {
		self.hovered() == Some(idx) || self.selected == Some(idx)
	}

	pub fn cursor(&self) -> Cursor {
		match self.pointer {
			PointerState::Idle => Cursor::Grab,
			PointerState::Hovering(_) => Cursor::Pointer,
			PointerState::Dragging { .. } => Cursor::Grabbing,
		}
	}

	fn hover_at(&mut self, nodes: &[Node], viewport: &Viewport, bounds: Bounds, screen: Point) {
		self.pointer = match hit_test(nodes, viewport, bounds, screen, self.hit_radius) {
			Some(idx) => PointerState::Hovering(idx),
			None => PointerState::Idle,
		};
	}

	pub fn pointer_move(
		&mut self,
		nodes: &[Node],
		viewport: &mut Viewport,
		bounds: Bounds,
		screen: Point,
	) {
		if let PointerState::Dragging { origin } = self.pointer {
			viewport.pan_to(screen.x - origin.x, screen.y - origin.y);
			return;
		}
		self.hover_at(nodes, viewport, bounds, screen);
	}

	pub fn pointer_down(&mut self, nodes: &[Node], viewport: &Viewport, bounds: Bounds, screen: Point) {
		match hit_test(nodes, viewport, bounds, screen, self.hit_radius) {
			Some(idx) => {
				self.selected = Some(idx);
				self.pointer = PointerState::Hovering(idx);
			}
			None => {
				self.pointer = PointerState::Dragging {
					origin: Point::new(screen.x - viewport.offset_x, screen.y - viewport.offset_y),
				};
			}
		}
	}

	pub fn pointer_up(&mut self, nodes: &[Node], viewport: &Viewport, bounds: Bounds, screen: Point) {
		if self.is_dragging() {
			self.hover_at(nodes, viewport, bounds, screen);
		}
	}

	/// The pointer left the surface: any pan ends and nothing is hovered.
	pub fn pointer_leave(&mut self) {
		self.pointer = PointerState::Idle;
	}
}
