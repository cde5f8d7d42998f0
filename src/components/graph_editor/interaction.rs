use super::error::{EditorError, Result};
use super::graph::{GraphStore, HIT_RADIUS};
use super::types::{Mode, Node};
use super::view::{ViewTransform, WHEEL_ZOOM_STEP};

/// What a primary pointer-down resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerOutcome {
	/// Nothing happened (empty click in delete mode, edit while locked, ...).
	Ignored,
	/// Empty spot in place-node mode; a label is needed before the node exists.
	PlaceRequested { x: f64, y: f64 },
	/// First endpoint of a pending edge.
	Selected(usize),
	SelectionCleared,
	Linked(usize, usize),
	DuplicateEdge(usize, usize),
	Deleted { index: usize, node: Node },
	DragStarted,
}

#[derive(Clone, Copy, Debug, Default)]
struct PanDrag {
	last_x: f64,
	last_y: f64,
}

/// Turns pointer and wheel input into graph and camera mutations according
/// to the current [`Mode`].
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	mode: Mode,
	pending: Option<usize>,
	drag: Option<PanDrag>,
}

impl InteractionController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Pending first endpoint in connect-edge mode.
	pub fn pending(&self) -> Option<usize> {
		self.pending
	}

	pub fn set_mode(&mut self, mode: Mode, traversal_running: bool) -> Result<()> {
		if traversal_running {
			return Err(EditorError::TraversalRunning);
		}
		self.mode = mode;
		self.pending = None;
		self.drag = None;
		Ok(())
	}

	pub fn clear_pending(&mut self) {
		self.pending = None;
	}

	/// Primary button down at canvas pixel `(sx, sy)`. With `locked` set
	/// (traversal running) only panning is honoured.
	pub fn pointer_down(
		&mut self,
		sx: f64,
		sy: f64,
		graph: &mut GraphStore,
		view: &ViewTransform,
		locked: bool,
	) -> PointerOutcome {
		if self.mode == Mode::Pan {
			self.drag = Some(PanDrag {
				last_x: sx,
				last_y: sy,
			});
			return PointerOutcome::DragStarted;
		}
		if locked {
			return PointerOutcome::Ignored;
		}

		let (wx, wy) = view.screen_to_world(sx, sy);
		let hit = graph.hit_test(wx, wy, HIT_RADIUS);
		match (self.mode, hit) {
			(Mode::PlaceNode, None) => PointerOutcome::PlaceRequested { x: wx, y: wy },
			(Mode::ConnectEdge, Some(idx)) => match self.pending.take() {
				None => {
					self.pending = Some(idx);
					PointerOutcome::Selected(idx)
				}
				Some(first) if first == idx => PointerOutcome::SelectionCleared,
				Some(first) => {
					if graph.add_edge(first, idx) {
						PointerOutcome::Linked(first, idx)
					} else {
						PointerOutcome::DuplicateEdge(first, idx)
					}
				}
			},
			(Mode::ConnectEdge, None) => match self.pending.take() {
				Some(_) => PointerOutcome::SelectionCleared,
				None => PointerOutcome::Ignored,
			},
			(Mode::Delete, Some(index)) => match graph.delete_node(index) {
				Some(node) => PointerOutcome::Deleted { index, node },
				None => PointerOutcome::Ignored,
			},
			_ => PointerOutcome::Ignored,
		}
	}

	/// Pans by the screen delta since the previous move while a drag is held.
	pub fn pointer_move(&mut self, sx: f64, sy: f64, view: &mut ViewTransform) {
		if let Some(drag) = self.drag.as_mut() {
			view.pan_by(sx - drag.last_x, sy - drag.last_y);
			drag.last_x = sx;
			drag.last_y = sy;
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag = None;
	}

	/// Wheel zoom anchored at the pointer, in every mode.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, view: &mut ViewTransform) {
		let dir = if delta_y < 0.0 { 1.0 } else { -1.0 };
		view.zoom_at(sx, sy, dir * WHEEL_ZOOM_STEP);
	}
}
