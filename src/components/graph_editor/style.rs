//! Pure drawing parameters. `render` only pushes these into the canvas.

use super::types::VisualState;
use super::view::ViewTransform;

pub const NODE_RADIUS: f64 = 24.0;
/// Grid spacing in world units.
pub const GRID_STEP: f64 = 50.0;
pub const LABEL_MAX_CHARS: usize = 10;
/// Angular speed of the `visiting` glow pulse, in radians per second.
pub const PULSE_RATE: f64 = 15.0;

pub const BACKGROUND: &str = "#0f172a";
pub const GRID_COLOR: &str = "rgba(99, 102, 241, 0.15)";
pub const EDGE_COLOR: &str = "rgba(148, 163, 184, 0.4)";
pub const LABEL_COLOR: &str = "#f1f5f9";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	pub fill: &'static str,
	pub stroke: &'static str,
	pub glow_color: &'static str,
	pub glow_blur: f64,
	pub line_width: f64,
}

/// Divides a screen-space width by the zoom, never going below one unit.
pub fn scaled_width(screen_width: f64, k: f64) -> f64 {
	(screen_width / k).max(1.0)
}

pub fn edge_width(k: f64) -> f64 {
	scaled_width(2.0, k)
}

pub fn node_style(state: VisualState, pending: bool, time: f64, k: f64) -> NodeStyle {
	let (fill, stroke, glow_color, glow_blur) = match state {
		VisualState::Visited => ("#064e3b", "#34d399", "#34d399", 15.0),
		VisualState::Visiting => (
			"#78350f",
			"#fbbf24",
			"#fbbf24",
			20.0 + (time * PULSE_RATE).sin() * 5.0,
		),
		VisualState::Default if pending => ("#1e293b", "#6366f1", "#6366f1", 20.0),
		VisualState::Default => ("#1e293b", "#cbd5e1", "transparent", 0.0),
	};
	let emphasized = pending || state != VisualState::Default;
	NodeStyle {
		fill,
		stroke,
		glow_color,
		glow_blur,
		line_width: scaled_width(if emphasized { 3.0 } else { 2.0 }, k),
	}
}

pub fn label_font(k: f64) -> String {
	format!("600 {}px Inter", 12.0 / k + 4.0)
}

pub fn truncate_label(label: &str) -> &str {
	match label.char_indices().nth(LABEL_MAX_CHARS) {
		Some((end, _)) => &label[..end],
		None => label,
	}
}

/// Screen-space layout of the background dot grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
	pub offset_x: f64,
	pub offset_y: f64,
	pub step: f64,
	pub dot_radius: f64,
}

impl Grid {
	pub fn for_view(view: &ViewTransform) -> Self {
		let step = GRID_STEP * view.k;
		Self {
			offset_x: view.x.rem_euclid(step),
			offset_y: view.y.rem_euclid(step),
			step,
			dot_radius: view.k,
		}
	}

	/// Dot centres covering a `width` x `height` canvas.
	pub fn dots(&self, width: f64, height: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
		let cols = ((width - self.offset_x) / self.step).ceil().max(0.0) as usize;
		let rows = ((height - self.offset_y) / self.step).ceil().max(0.0) as usize;
		(0..cols).flat_map(move |i| {
			(0..rows).map(move |j| {
				(
					self.offset_x + i as f64 * self.step,
					self.offset_y + j as f64 * self.step,
				)
			})
		})
	}
}
