use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{info, warn};

use super::error::{EditorError, Result};
use super::graph::GraphStore;
use super::interaction::{InteractionController, PointerOutcome};
use super::traversal::{Progress, TraversalEngine};
use super::types::{Algorithm, Mode, Node};
use super::view::{BUTTON_ZOOM_STEP, ViewTransform};

/// Time accumulator advance per animation frame, in seconds.
pub const FRAME_STEP: f64 = 0.016;

/// The page's session, created once the canvas has a size.
pub type SharedSession = Rc<RefCell<Option<Session>>>;

/// Everything the editor owns for the lifetime of the page: graph, camera,
/// input state, traversal, and the text surfaces shown next to the canvas.
pub struct Session {
	graph: GraphStore,
	view: ViewTransform,
	controller: InteractionController,
	traversal: TraversalEngine,
	width: f64,
	height: f64,
	time: f64,
	start: Option<usize>,
	placement: Option<(f64, f64)>,
	node_counter: usize,
	log: Vec<String>,
	notices: Vec<String>,
}

impl Session {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: GraphStore::new(),
			view: ViewTransform::default(),
			controller: InteractionController::new(),
			traversal: TraversalEngine::new(),
			width,
			height,
			time: 0.0,
			start: None,
			placement: None,
			node_counter: 1,
			log: Vec::new(),
			notices: Vec::new(),
		}
	}

	/// A session seeded with the five-node demo map.
	pub fn with_demo(width: f64, height: f64) -> Self {
		let mut session = Self::new(width, height);
		session.load_demo();
		session
	}

	fn load_demo(&mut self) {
		self.view.reset();
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		for (x, y, label) in [
			(cx, cy - 150.0, "Library"),
			(cx - 150.0, cy, "Hostel"),
			(cx + 150.0, cy, "Cafeteria"),
			(cx, cy + 150.0, "Gym"),
			(cx, cy, "Admin"),
		] {
			self.add_node(x, y, label);
		}
		for (u, v) in [(0, 4), (1, 4), (2, 4), (3, 4), (0, 2)] {
			if let Err(err) = self.link(u, v) {
				warn!("demo edge {u}-{v} rejected: {err}");
			}
		}
		self.record("Demo map loaded.".to_string());
	}

	pub fn graph(&self) -> &GraphStore {
		&self.graph
	}

	pub fn view(&self) -> &ViewTransform {
		&self.view
	}

	pub fn controller(&self) -> &InteractionController {
		&self.controller
	}

	pub fn traversal(&self) -> &TraversalEngine {
		&self.traversal
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn time(&self) -> f64 {
		self.time
	}

	pub fn mode(&self) -> Mode {
		self.controller.mode()
	}

	pub fn is_running(&self) -> bool {
		self.traversal.is_running()
	}

	/// Append-only event log, oldest first.
	pub fn log(&self) -> &[String] {
		&self.log
	}

	pub fn start_node(&self) -> Option<usize> {
		self.start
	}

	/// World point waiting for a label, if the naming dialog is open.
	pub fn placement(&self) -> Option<(f64, f64)> {
		self.placement
	}

	pub fn suggested_label(&self) -> String {
		format!("Node {}", self.node_counter)
	}

	/// Transient messages queued since the last call.
	pub fn take_notices(&mut self) -> Vec<String> {
		std::mem::take(&mut self.notices)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn tick(&mut self, dt: f64) {
		self.time += dt;
	}

	fn record(&mut self, entry: String) {
		info!("{entry}");
		self.log.push(entry);
	}

	fn reject(&mut self, err: EditorError) -> EditorError {
		warn!("{err}");
		self.notices.push(err.to_string());
		err
	}

	fn refresh_selection(&mut self) {
		if self.start.is_some_and(|idx| idx >= self.graph.len()) {
			self.start = None;
		}
	}

	fn ensure_idle(&mut self) -> Result<()> {
		if self.is_running() {
			return Err(self.reject(EditorError::TraversalRunning));
		}
		Ok(())
	}

	fn label_of(&self, idx: usize) -> &str {
		self.graph.node(idx).map_or("?", |n| n.label.as_str())
	}

	pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
		let running = self.is_running();
		self.controller
			.set_mode(mode, running)
			.map_err(|err| self.reject(err))
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) -> PointerOutcome {
		let locked = self.is_running();
		let outcome = self
			.controller
			.pointer_down(sx, sy, &mut self.graph, &self.view, locked);
		match &outcome {
			PointerOutcome::PlaceRequested { x, y } => self.placement = Some((*x, *y)),
			PointerOutcome::Linked(u, v) => self.record_link(*u, *v),
			PointerOutcome::DuplicateEdge(..) => {
				self.reject(EditorError::DuplicateEdge);
			}
			PointerOutcome::Deleted { node, .. } => {
				self.record(format!("Deleted: {}", node.label));
				self.refresh_selection();
			}
			_ => {}
		}
		outcome
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		self.controller.pointer_move(sx, sy, &mut self.view);
	}

	pub fn pointer_up(&mut self) {
		self.controller.pointer_up();
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.controller.wheel(sx, sy, delta_y, &mut self.view);
	}

	/// Completes a pending placement with the label from the naming dialog.
	/// An empty label keeps the dialog open.
	pub fn confirm_node(&mut self, label: &str) -> Result<usize> {
		self.ensure_idle()?;
		let label = label.trim();
		if label.is_empty() {
			return Err(self.reject(EditorError::EmptyLabel));
		}
		let (x, y) = self.placement.take().unwrap_or_else(|| {
			self.view
				.screen_to_world(self.width / 2.0, self.height / 2.0)
		});
		let idx = self.add_node(x, y, label);
		self.node_counter += 1;
		Ok(idx)
	}

	pub fn cancel_node(&mut self) {
		self.placement = None;
	}

	fn add_node(&mut self, x: f64, y: f64, label: &str) -> usize {
		let idx = self.graph.add_node(x, y, label);
		self.record(format!("Created: {label}"));
		self.refresh_selection();
		idx
	}

	fn link(&mut self, u: usize, v: usize) -> Result<()> {
		if !self.graph.add_edge(u, v) {
			return Err(self.reject(EditorError::DuplicateEdge));
		}
		self.record_link(u, v);
		Ok(())
	}

	fn record_link(&mut self, u: usize, v: usize) {
		let entry = format!("Linked: {} ↔ {}", self.label_of(u), self.label_of(v));
		self.record(entry);
	}

	pub fn select_start(&mut self, idx: Option<usize>) {
		self.start = idx.filter(|&i| i < self.graph.len());
	}

	pub fn start_traversal(&mut self, algorithm: Algorithm) -> Result<()> {
		self.traversal
			.start(&mut self.graph, self.start, algorithm)
			.map_err(|err| self.reject(err))?;
		self.record(format!("Running {algorithm}..."));
		Ok(())
	}

	/// One step of the running traversal; the pause before the next one,
	/// or `None` when nothing is left to do.
	pub fn advance_traversal(&mut self) -> Option<Duration> {
		match self.traversal.advance(&mut self.graph) {
			Progress::Paused(pause) => Some(pause),
			Progress::Finished(_) => {
				self.record("Done.".to_string());
				None
			}
			Progress::Idle => None,
		}
	}

	/// Runs the current traversal to completion without pauses.
	pub fn finish_traversal(&mut self) {
		while self.advance_traversal().is_some() {}
	}

	pub fn reset_colors(&mut self) -> Result<()> {
		self.traversal
			.reset(&mut self.graph)
			.map_err(|err| self.reject(err))?;
		self.record("Colors reset.".to_string());
		Ok(())
	}

	pub fn clear_map(&mut self) -> Result<()> {
		self.traversal
			.reset(&mut self.graph)
			.map_err(|err| self.reject(err))?;
		self.graph.clear();
		self.controller.clear_pending();
		self.placement = None;
		self.start = None;
		self.node_counter = 1;
		self.view.reset();
		self.record("Map cleared.".to_string());
		Ok(())
	}

	pub fn reset_view(&mut self) {
		self.view
			.reset_to_centroid(self.graph.nodes(), self.width, self.height);
	}

	/// Button zoom around the viewport centre; `direction` is +1 or -1.
	pub fn zoom_step(&mut self, direction: f64) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		self.view.zoom_at(cx, cy, direction * BUTTON_ZOOM_STEP);
	}

	/// Labels for the start-node selector, in index order.
	pub fn labels(&self) -> Vec<String> {
		self.graph.labels()
	}

	/// Deletes by index, outside of pointer input. Drops any pending edge
	/// endpoint, since indices above `idx` shift down.
	pub fn delete_node(&mut self, idx: usize) -> Result<Option<Node>> {
		self.ensure_idle()?;
		let removed = self.graph.delete_node(idx);
		if let Some(node) = &removed {
			self.controller.clear_pending();
			self.record(format!("Deleted: {}", node.label));
			self.refresh_selection();
		}
		Ok(removed)
	}
}
