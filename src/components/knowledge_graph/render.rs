use std::borrow::Cow;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::{RenderStyle, category_color};
use super::state::GraphState;
use super::types::Point;

/// Title shortened to `max_chars` characters plus `...` when longer.
pub fn truncate_label(title: &str, max_chars: usize) -> Cow<'_, str> {
	match title.char_indices().nth(max_chars) {
		Some((cut, _)) => Cow::Owned(format!("{}...", &title[..cut])),
		None => Cow::Borrowed(title),
	}
}

pub fn node_color<'a>(category: &str, style: &'a RenderStyle) -> &'a str {
	category_color(category).unwrap_or(style.fallback_color)
}

/// Axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

/// Background pill for a label of `text_width`, right of a node at (`x`, `y`).
pub fn label_pill(x: f64, y: f64, radius: f64, text_width: f64, style: &RenderStyle) -> Rect {
	Rect {
		x: x + radius + style.label_gap,
		y: y - style.label_height / 2.0,
		w: text_width + 2.0 * style.label_padding,
		h: style.label_height,
	}
}

pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let bounds = state.bounds;
	let vp = &state.viewport;

	ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
	ctx.save();
	// The viewport map is affine: screen = world * scale + to_screen(0, 0).
	let origin = vp.to_screen(Point::new(0.0, 0.0), bounds);
	let _ = ctx.set_transform(vp.scale, 0.0, 0.0, vp.scale, origin.x, origin.y);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let style = &state.config.style;
	ctx.set_stroke_style_str(style.edge_color);
	ctx.set_line_width(style.edge_width);
	for edge in &state.edges {
		let Some((a, b)) = state.endpoints(edge) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let style = &state.config.style;
	for (idx, node) in state.nodes.iter().enumerate() {
		let (x, y) = (node.x, node.y);
		let active = state.interaction.is_active(idx);
		let radius = if active {
			style.active_node_radius
		} else {
			style.node_radius
		};
		let color = node_color(&node.doc.category, style);

		if active {
			draw_glow(ctx, x, y, radius, color, style);
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();

		draw_label(ctx, &node.doc.title, x, y, radius, style);
	}
}

fn draw_glow(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	radius: f64,
	color: &str,
	style: &RenderStyle,
) {
	let glow_radius = radius + style.glow_blur;
	if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, glow_radius) {
		let _ = gradient.add_color_stop(0.0, color);
		let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
		ctx.set_global_alpha(0.45);
		ctx.begin_path();
		let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
		ctx.set_global_alpha(1.0);
	}

	ctx.set_shadow_color(color);
	ctx.set_shadow_blur(style.glow_blur);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(color);
	ctx.stroke();
	ctx.set_shadow_blur(0.0);
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	title: &str,
	x: f64,
	y: f64,
	radius: f64,
	style: &RenderStyle,
) {
	let label = truncate_label(title, style.label_max_chars);
	ctx.set_font(style.label_font);
	let text_width = ctx.measure_text(&label).map(|m| m.width()).unwrap_or(0.0);

	let pill = label_pill(x, y, radius, text_width, style);
	ctx.set_fill_style_str(style.label_background);
	rounded_rect(ctx, pill, style.label_corner_radius);
	ctx.fill();

	ctx.set_fill_style_str(style.label_color);
	let _ = ctx.fill_text(&label, pill.x + style.label_padding, y + 4.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: Rect, corner: f64) {
	let corner = corner.min(r.w / 2.0).min(r.h / 2.0);
	let (right, bottom) = (r.x + r.w, r.y + r.h);
	ctx.begin_path();
	ctx.move_to(r.x + corner, r.y);
	let _ = ctx.arc_to(right, r.y, right, bottom, corner);
	let _ = ctx.arc_to(right, bottom, r.x, bottom, corner);
	let _ = ctx.arc_to(r.x, bottom, r.x, r.y, corner);
	let _ = ctx.arc_to(r.x, r.y, right, r.y, corner);
	ctx.close_path();
}
