//! Tunable constants for the layout, physics, viewport and rendering.

use super::types::Point;

/// How forces are applied within one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdatePolicy {
	/// Every force is computed from the positions at the start of the tick,
	/// then all nodes move at once.
	#[default]
	Simultaneous,
	/// Nodes are visited in insertion order and moved immediately, so later
	/// nodes see the already-updated positions of earlier ones.
	Sequential,
}

impl UpdatePolicy {
	/// Parses `simultaneous` or `sequential`, ignoring case.
	pub fn from_name(name: &str) -> Option<Self> {
		match name.to_ascii_lowercase().as_str() {
			"simultaneous" => Some(Self::Simultaneous),
			"sequential" => Some(Self::Sequential),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
	/// Inverse-square repulsion numerator.
	pub repulsion: f64,
	/// Spring factor applied to the displacement towards each neighbor.
	pub attraction: f64,
	/// Pull towards the canvas center.
	pub center_gravity: f64,
	/// Velocity multiplier applied every tick.
	pub damping: f64,
	/// Distance kept between nodes and the canvas border.
	pub padding: f64,
	pub update_policy: UpdatePolicy,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			repulsion: 1000.0,
			attraction: 0.004,
			center_gravity: 0.005,
			damping: 0.9,
			padding: 50.0,
			update_policy: UpdatePolicy::default(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Seed center used when the canvas size is not known yet.
	pub fallback_center: Point,
	/// Radius of the disk initial positions are drawn from.
	pub spread: f64,
	/// Strength of an edge between documents of the same category.
	pub category_strength: f64,
	/// Strength of an edge between documents that only share tags.
	pub tag_strength: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			fallback_center: Point::new(400.0, 300.0),
			spread: 100.0,
			category_strength: 0.05,
			tag_strength: 0.1,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	pub zoom_step: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 3.0,
			zoom_step: 0.1,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
	/// Hit radius in screen pixels; divided by the scale for world-space tests.
	pub hit_radius: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self { hit_radius: 20.0 }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
	pub node_radius: f64,
	pub active_node_radius: f64,
	pub glow_blur: f64,
	pub edge_color: &'static str,
	pub edge_width: f64,
	pub label_max_chars: usize,
	pub label_font: &'static str,
	pub label_background: &'static str,
	pub label_color: &'static str,
	pub label_height: f64,
	pub label_corner_radius: f64,
	pub label_gap: f64,
	pub label_padding: f64,
	pub fallback_color: &'static str,
}

impl Default for RenderStyle {
	fn default() -> Self {
		Self {
			node_radius: 10.0,
			active_node_radius: 16.0,
			glow_blur: 20.0,
			edge_color: "rgba(255, 255, 255, 0.1)",
			edge_width: 1.0,
			label_max_chars: 15,
			label_font: "12px \"Exo 2\", sans-serif",
			label_background: "rgba(18, 18, 19, 0.8)",
			label_color: "#ffffff",
			label_height: 20.0,
			label_corner_radius: 4.0,
			label_gap: 5.0,
			label_padding: 5.0,
			fallback_color: "#ffffff",
		}
	}
}

/// Everything the knowledge graph can be tuned with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphConfig {
	pub physics: PhysicsConfig,
	pub layout: LayoutConfig,
	pub viewport: ViewportConfig,
	pub interaction: InteractionConfig,
	pub style: RenderStyle,
}

/// Known categories and their colors, in legend order.
pub const CATEGORY_COLORS: &[(&str, &str)] = &[
	("Material", "#00d6cb"),
	("Printer", "#3b82f6"),
	("Slicer", "#f59e0b"),
	("Troubleshooting", "#ef4444"),
	("Upgrade", "#10b981"),
];

pub fn category_color(category: &str) -> Option<&'static str> {
	CATEGORY_COLORS
		.iter()
		.find(|(name, _)| *name == category)
		.map(|(_, color)| *color)
}
