//! World <-> screen mapping and the zoom/reset commands.
//!
//! Zoom scales around the canvas center, then the pan offset is added:
//! `screen = (world - center) * scale + center + offset`.

use super::config::ViewportConfig;
use super::physics::Bounds;
use super::types::Point;

/// View commands issued by the host's buttons and the wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
	ZoomIn,
	ZoomOut,
	ResetView,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	pub scale: f64,
	pub offset_x: f64,
	pub offset_y: f64,
	limits: ViewportConfig,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(ViewportConfig::default())
	}
}

impl Viewport {
	pub fn new(limits: ViewportConfig) -> Self {
		Self {
			scale: 1.0,
			offset_x: 0.0,
			offset_y: 0.0,
			limits,
		}
	}

	pub fn to_screen(&self, world: Point, bounds: Bounds) -> Point {
		let (cx, cy) = bounds.center();
		Point::new(
			(world.x - cx) * self.scale + cx + self.offset_x,
			(world.y - cy) * self.scale + cy + self.offset_y,
		)
	}

	pub fn to_world(&self, screen: Point, bounds: Bounds) -> Point {
		let (cx, cy) = bounds.center();
		Point::new(
			(screen.x - cx - self.offset_x) / self.scale + cx,
			(screen.y - cy - self.offset_y) / self.scale + cy,
		)
	}

	pub fn set_scale(&mut self, scale: f64) {
		self.scale = scale.clamp(self.limits.min_scale, self.limits.max_scale);
	}

	pub fn zoom_in(&mut self) {
		self.set_scale(self.scale + self.limits.zoom_step);
	}

	pub fn zoom_out(&mut self) {
		self.set_scale(self.scale - self.limits.zoom_step);
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		self.offset_x = x;
		self.offset_y = y;
	}

	pub fn reset(&mut self) {
		self.scale = 1.0;
		self.offset_x = 0.0;
		self.offset_y = 0.0;
	}

	pub fn apply(&mut self, command: Command) {
		match command {
			Command::ZoomIn => self.zoom_in(),
			Command::ZoomOut => self.zoom_out(),
			Command::ResetView => self.reset(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const BOUNDS: Bounds = Bounds {
		width: 800.0,
		height: 600.0,
	};

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
	}

	#[test]
	fn identity_at_default() {
		let vp = Viewport::default();
		let p = Point::new(123.0, 456.0);
		assert_eq!(vp.to_screen(p, BOUNDS), p);
		assert_eq!(vp.to_world(p, BOUNDS), p);
	}

	#[test]
	fn zoom_scales_around_center() {
		let mut vp = Viewport::default();
		vp.set_scale(2.0);
		vp.pan_to(10.0, -5.0);
		assert_eq!(vp.to_screen(Point::new(400.0, 300.0), BOUNDS), Point::new(410.0, 295.0));
		assert_eq!(vp.to_screen(Point::new(500.0, 300.0), BOUNDS), Point::new(610.0, 295.0));
	}

	#[test]
	fn inverse_undoes_forward() {
		let mut vp = Viewport::default();
		for scale in [0.5, 0.8, 1.0, 1.7, 3.0] {
			for (ox, oy) in [(0.0, 0.0), (-250.5, 80.0), (1000.0, -3.25)] {
				vp.set_scale(scale);
				vp.pan_to(ox, oy);
				for p in [Point::new(0.0, 0.0), Point::new(55.5, 720.0), Point::new(-30.0, 12.0)] {
					assert!(close(vp.to_world(vp.to_screen(p, BOUNDS), BOUNDS), p));
				}
			}
		}
	}

	#[test]
	fn zoom_is_clamped() {
		let mut vp = Viewport::default();
		for _ in 0..30 {
			vp.zoom_in();
		}
		assert_eq!(vp.scale, 3.0);
		for _ in 0..30 {
			vp.zoom_out();
		}
		assert_eq!(vp.scale, 0.5);
	}

	#[test]
	fn zoom_leaves_offset_alone() {
		let mut vp = Viewport::default();
		vp.pan_to(12.0, 34.0);
		vp.zoom_in();
		vp.zoom_out();
		vp.zoom_out();
		assert_eq!((vp.offset_x, vp.offset_y), (12.0, 34.0));
	}

	#[test]
	fn reset_restores_identity() {
		let mut vp = Viewport::default();
		vp.pan_to(-80.0, 40.0);
		vp.zoom_in();
		vp.zoom_in();
		vp.reset();
		assert_eq!((vp.scale, vp.offset_x, vp.offset_y), (1.0, 0.0, 0.0));
	}

	#[test]
	fn commands_move_scale_and_reset_clears_pan() {
		let mut vp = Viewport::default();
		vp.pan_to(30.0, -20.0);
		vp.apply(Command::ZoomIn);
		assert!((vp.scale - 1.1).abs() < 1e-12);
		vp.apply(Command::ZoomOut);
		vp.apply(Command::ZoomOut);
		assert!((vp.scale - 0.9).abs() < 1e-12);
		assert_eq!((vp.offset_x, vp.offset_y), (30.0, -20.0));
		vp.apply(Command::ResetView);
		assert_eq!(vp, Viewport::default());
	}

	#[test]
	fn forward_map_is_scale_plus_origin() {
		let mut vp = Viewport::default();
		vp.set_scale(1.7);
		vp.pan_to(-35.0, 12.5);
		let origin = vp.to_screen(Point::new(0.0, 0.0), BOUNDS);
		for p in [Point::new(10.0, 20.0), Point::new(400.0, 300.0), Point::new(-90.0, 700.0)] {
			let expected = Point::new(p.x * vp.scale + origin.x, p.y * vp.scale + origin.y);
			assert!(close(vp.to_screen(p, BOUNDS), expected));
		}
	}
}
