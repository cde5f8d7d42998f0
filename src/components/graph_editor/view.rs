//! Camera mapping between canvas pixels and world coordinates.
//!
//! `screen = world * k + (x, y)`. The scale `k` never leaves
//! [`MIN_SCALE`, `MAX_SCALE`], so the mapping is always invertible.

use super::types::Node;

pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 5.0;
/// Scale delta applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;
/// Scale delta applied per zoom button press.
pub const BUTTON_ZOOM_STEP: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Additive zoom anchored at a screen point: the world point under
	/// `(sx, sy)` stays under it after the scale change.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta: f64) {
		if !delta.is_finite() {
			return;
		}
		let (wx, wy) = self.screen_to_world(sx, sy);
		let new_k = (self.k + delta).clamp(MIN_SCALE, MAX_SCALE);
		self.x = sx - wx * new_k;
		self.y = sy - wy * new_k;
		self.k = new_k;
	}

	/// Scale 1, with the mean node position at the viewport centre.
	/// An empty graph puts the world origin at the centre.
	pub fn reset_to_centroid(&mut self, nodes: &[Node], width: f64, height: f64) {
		let (cx, cy) = (width / 2.0, height / 2.0);
		let (mx, my) = if nodes.is_empty() {
			(0.0, 0.0)
		} else {
			let n = nodes.len() as f64;
			let (sx, sy) = nodes
				.iter()
				.fold((0.0, 0.0), |(ax, ay), node| (ax + node.x, ay + node.y));
			(sx / n, sy / n)
		};
		*self = Self {
			x: cx - mx,
			y: cy - my,
			k: 1.0,
		};
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
	}

	#[test]
	fn screen_and_world_are_inverse() {
		let view = ViewTransform {
			x: 37.5,
			y: -12.0,
			k: 2.5,
		};
		let (wx, wy) = view.screen_to_world(400.0, 220.0);
		assert!(close(view.world_to_screen(wx, wy), (400.0, 220.0)));
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut view = ViewTransform {
			x: 15.0,
			y: 40.0,
			k: 1.3,
		};
		for (sx, sy, delta) in [(100.0, 80.0, 0.4), (640.0, 10.0, -0.7), (-20.0, 300.0, 1.1)] {
			let before = view.screen_to_world(sx, sy);
			view.zoom_at(sx, sy, delta);
			assert!(view.k > MIN_SCALE && view.k < MAX_SCALE);
			assert!(close(view.screen_to_world(sx, sy), before));
		}
	}

	#[test]
	fn zoom_clamps_under_repeated_deltas() {
		let mut view = ViewTransform::default();
		for _ in 0..100 {
			view.zoom_at(10.0, 10.0, 0.3);
		}
		assert_eq!(view.k, MAX_SCALE);
		for _ in 0..100 {
			view.zoom_at(10.0, 10.0, -WHEEL_ZOOM_STEP);
		}
		assert_eq!(view.k, MIN_SCALE);
	}

	#[test]
	fn non_finite_zoom_is_ignored() {
		let mut view = ViewTransform::default();
		view.zoom_at(5.0, 5.0, f64::NAN);
		assert_eq!(view, ViewTransform::default());
	}

	#[test]
	fn pan_adds_screen_delta() {
		let mut view = ViewTransform::default();
		view.pan_by(12.0, -4.0);
		view.pan_by(3.0, 1.0);
		assert_eq!((view.x, view.y), (15.0, -3.0));
	}

	#[test]
	fn centroid_lands_at_viewport_centre() {
		let nodes = vec![
			Node::new(0.0, 0.0, "a"),
			Node::new(100.0, 0.0, "b"),
			Node::new(50.0, 300.0, "c"),
		];
		let mut view = ViewTransform {
			x: 9.0,
			y: 9.0,
			k: 3.0,
		};
		view.reset_to_centroid(&nodes, 800.0, 600.0);
		assert_eq!(view.k, 1.0);
		assert!(close(view.world_to_screen(50.0, 100.0), (400.0, 300.0)));
	}

	#[test]
	fn centroid_of_nothing_centres_origin() {
		let mut view = ViewTransform::default();
		view.reset_to_centroid(&[], 800.0, 600.0);
		assert!(close(view.world_to_screen(0.0, 0.0), (400.0, 300.0)));
	}
}
