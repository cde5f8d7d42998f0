//! BFS/DFS highlight playback as an explicit stepper.
//!
//! A [`Stepper`] does the synchronous work between two pauses on each call to
//! [`Stepper::step`] and returns how long the caller should wait before the
//! next call. Driven by a timer it animates; driven in a loop it computes the
//! whole traversal instantly. [`TraversalEngine`] wraps it with the
//! single-flight `Idle -> Running -> Idle` lifecycle.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use log::debug;

use super::error::{EditorError, Result};
use super::graph::GraphStore;
use super::types::{Algorithm, VisualState};

/// Pause after dequeuing a BFS node, before it is marked visited.
pub const BFS_PROCESS_DELAY: Duration = Duration::from_millis(500);
/// Pause after each newly discovered BFS neighbour.
pub const BFS_FANOUT_DELAY: Duration = Duration::from_millis(300);
/// Pause between entering a DFS node and marking it visited.
pub const DFS_VISIT_DELAY: Duration = Duration::from_millis(600);

/// A single visual-state write, recorded in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
	pub node: usize,
	pub state: VisualState,
}

/// A node whose neighbour list is being scanned.
#[derive(Debug)]
struct Frame {
	neighbors: Vec<usize>,
	next: usize,
}

impl Frame {
	fn new(graph: &GraphStore, node: usize) -> Self {
		Self {
			neighbors: graph.neighbors_of(node).collect(),
			next: 0,
		}
	}

	fn next_undiscovered(&mut self, discovered: &HashSet<usize>) -> Option<usize> {
		while let Some(&v) = self.neighbors.get(self.next) {
			self.next += 1;
			if !discovered.contains(&v) {
				return Some(v);
			}
		}
		None
	}
}

#[derive(Debug)]
enum Walk {
	Bfs {
		queue: VecDeque<usize>,
		/// Dequeued and waiting to be marked visited.
		processing: Option<usize>,
		fanout: Option<Frame>,
	},
	Dfs {
		stack: Vec<Frame>,
		entering: Option<usize>,
		processing: Option<usize>,
	},
}

#[derive(Debug)]
pub struct Stepper {
	algorithm: Algorithm,
	walk: Walk,
	discovered: HashSet<usize>,
	transitions: Vec<Transition>,
}

fn mark(
	graph: &mut GraphStore,
	transitions: &mut Vec<Transition>,
	node: usize,
	state: VisualState,
) {
	debug!("node {node} -> {state:?}");
	graph.set_state(node, state);
	transitions.push(Transition { node, state });
}

impl Stepper {
	pub fn new(algorithm: Algorithm, start: usize, graph: &mut GraphStore) -> Self {
		let mut transitions = Vec::new();
		let mut discovered = HashSet::new();
		let walk = match algorithm {
			Algorithm::Bfs => {
				discovered.insert(start);
				mark(graph, &mut transitions, start, VisualState::Visiting);
				Walk::Bfs {
					queue: VecDeque::from([start]),
					processing: None,
					fanout: None,
				}
			}
			Algorithm::Dfs => Walk::Dfs {
				stack: Vec::new(),
				entering: Some(start),
				processing: None,
			},
		};
		Self {
			algorithm,
			walk,
			discovered,
			transitions,
		}
	}

	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	pub fn transitions(&self) -> &[Transition] {
		&self.transitions
	}

	/// Runs up to the next pause. `None` once the walk is exhausted.
	pub fn step(&mut self, graph: &mut GraphStore) -> Option<Duration> {
		let Self {
			walk,
			discovered,
			transitions,
			..
		} = self;
		match walk {
			Walk::Bfs {
				queue,
				processing,
				fanout,
			} => {
				if let Some(u) = processing.take() {
					mark(graph, transitions, u, VisualState::Visited);
					*fanout = Some(Frame::new(graph, u));
				}
				if let Some(frame) = fanout.as_mut() {
					if let Some(v) = frame.next_undiscovered(discovered) {
						discovered.insert(v);
						mark(graph, transitions, v, VisualState::Visiting);
						queue.push_back(v);
						return Some(BFS_FANOUT_DELAY);
					}
					*fanout = None;
				}
				*processing = Some(queue.pop_front()?);
				Some(BFS_PROCESS_DELAY)
			}
			Walk::Dfs {
				stack,
				entering,
				processing,
			} => loop {
				if let Some(u) = entering.take() {
					discovered.insert(u);
					mark(graph, transitions, u, VisualState::Visiting);
					*processing = Some(u);
					return Some(DFS_VISIT_DELAY);
				}
				if let Some(u) = processing.take() {
					mark(graph, transitions, u, VisualState::Visited);
					stack.push(Frame::new(graph, u));
					continue;
				}
				let frame = stack.last_mut()?;
				match frame.next_undiscovered(discovered) {
					Some(v) => *entering = Some(v),
					None => {
						stack.pop();
					}
				}
			},
		}
	}
}

/// Outcome of advancing the engine by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
	/// Wait this long, then advance again.
	Paused(Duration),
	/// The run just completed; the engine is idle again.
	Finished(Algorithm),
	/// Nothing is running.
	Idle,
}

/// Single-flight traversal driver. Only ever writes node visual state.
#[derive(Debug, Default)]
pub struct TraversalEngine {
	run: Option<Stepper>,
	active: Option<Algorithm>,
	last_trace: Vec<Transition>,
}

impl TraversalEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_running(&self) -> bool {
		self.run.is_some()
	}

	/// Algorithm of the running run, or of the last one whose colours are
	/// still displayed.
	pub fn active(&self) -> Option<Algorithm> {
		self.active
	}

	/// Transitions of the current run, or of the last completed one.
	pub fn transitions(&self) -> &[Transition] {
		match &self.run {
			Some(run) => run.transitions(),
			None => &self.last_trace,
		}
	}

	pub fn start(
		&mut self,
		graph: &mut GraphStore,
		start: Option<usize>,
		algorithm: Algorithm,
	) -> Result<()> {
		if self.is_running() {
			return Err(EditorError::TraversalRunning);
		}
		let start = start.ok_or(EditorError::NoStartNode)?;
		if start >= graph.len() {
			return Err(EditorError::InvalidStartNode(start));
		}
		graph.reset_states();
		self.active = Some(algorithm);
		self.last_trace.clear();
		self.run = Some(Stepper::new(algorithm, start, graph));
		Ok(())
	}

	pub fn advance(&mut self, graph: &mut GraphStore) -> Progress {
		let Some(run) = self.run.as_mut() else {
			return Progress::Idle;
		};
		if let Some(pause) = run.step(graph) {
			return Progress::Paused(pause);
		}
		let algorithm = run.algorithm();
		if let Some(run) = self.run.take() {
			self.last_trace = run.transitions;
		}
		Progress::Finished(algorithm)
	}

	/// Steps without pausing until the current run completes.
	pub fn run_to_end(&mut self, graph: &mut GraphStore) -> Option<Algorithm> {
		loop {
			match self.advance(graph) {
				Progress::Paused(_) => continue,
				Progress::Finished(algorithm) => return Some(algorithm),
				Progress::Idle => return None,
			}
		}
	}

	/// Back to all-default colours. Refused while running.
	pub fn reset(&mut self, graph: &mut GraphStore) -> Result<()> {
		if self.is_running() {
			return Err(EditorError::TraversalRunning);
		}
		graph.reset_states();
		self.active = None;
		self.last_trace.clear();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::super::types::VisualState::{Visited, Visiting};

	fn graph(n: usize, edges: &[(usize, usize)]) -> GraphStore {
		let mut g = GraphStore::new();
		for i in 0..n {
			g.add_node(i as f64 * 60.0, 0.0, format!("n{i}"));
		}
		for &(u, v) in edges {
			assert!(g.add_edge(u, v));
		}
		g
	}

	fn run(g: &mut GraphStore, algorithm: Algorithm, start: usize) -> Vec<Transition> {
		let mut engine = TraversalEngine::new();
		engine.start(g, Some(start), algorithm).unwrap();
		assert_eq!(engine.run_to_end(g), Some(algorithm));
		engine.transitions().to_vec()
	}

	fn visited_order(trace: &[Transition]) -> Vec<usize> {
		trace
			.iter()
			.filter(|t| t.state == Visited)
			.map(|t| t.node)
			.collect()
	}

	fn t(node: usize, state: VisualState) -> Transition {
		Transition { node, state }
	}

	#[test]
	fn bfs_on_a_path_marks_in_order() {
		let mut g = graph(3, &[(0, 1), (1, 2)]);
		let trace = run(&mut g, Algorithm::Bfs, 0);
		assert_eq!(
			trace,
			vec![
				t(0, Visiting),
				t(0, Visited),
				t(1, Visiting),
				t(1, Visited),
				t(2, Visiting),
				t(2, Visited),
			]
		);
	}

	#[test]
	fn bfs_stays_inside_component() {
		// 0-1-2 and 1-3 form a component; 4-5 is separate.
		let mut g = graph(6, &[(0, 1), (1, 2), (1, 3), (4, 5)]);
		let trace = run(&mut g, Algorithm::Bfs, 2);
		assert_eq!(visited_order(&trace), vec![2, 1, 0, 3]);
		for node in 0..4 {
			let states: Vec<_> = trace.iter().filter(|t| t.node == node).map(|t| t.state).collect();
			assert_eq!(states, vec![Visiting, Visited]);
		}
		assert!(trace.iter().all(|t| t.node < 4));
		assert_eq!(g.node(4).map(|n| n.state), Some(VisualState::Default));
		assert_eq!(g.node(5).map(|n| n.state), Some(VisualState::Default));
	}

	#[test]
	fn bfs_pause_pattern() {
		let mut g = graph(3, &[(0, 1), (0, 2)]);
		let mut stepper = Stepper::new(Algorithm::Bfs, 0, &mut g);
		let mut pauses = Vec::new();
		while let Some(p) = stepper.step(&mut g) {
			pauses.push(p);
		}
		assert_eq!(
			pauses,
			vec![
				BFS_PROCESS_DELAY,
				BFS_FANOUT_DELAY,
				BFS_FANOUT_DELAY,
				BFS_PROCESS_DELAY,
				BFS_PROCESS_DELAY,
			]
		);
		assert!(stepper.step(&mut g).is_none());
	}

	#[test]
	fn dfs_finishes_subtree_before_sibling() {
		// 0 -> {1, 2}; 1 -> 3; 3 -> 4; 2 -> 5
		let mut g = graph(6, &[(0, 1), (0, 2), (1, 3), (3, 4), (2, 5)]);
		let trace = run(&mut g, Algorithm::Dfs, 0);
		assert_eq!(visited_order(&trace), vec![0, 1, 3, 4, 2, 5]);
		// Each node is entered and finished before the next one is entered.
		for pair in trace.chunks(2) {
			assert_eq!(pair[0].node, pair[1].node);
			assert_eq!((pair[0].state, pair[1].state), (Visiting, Visited));
		}
	}

	#[test]
	fn dfs_skips_nodes_discovered_deeper() {
		// Triangle: 0-1, 0-2, 1-2. From 0, 2 is reached through 1.
		let mut g = graph(3, &[(0, 1), (0, 2), (1, 2)]);
		let trace = run(&mut g, Algorithm::Dfs, 0);
		assert_eq!(visited_order(&trace), vec![0, 1, 2]);
		assert_eq!(trace.len(), 6);
	}

	#[test]
	fn dfs_handles_long_chains_without_recursion() {
		let n = 5_000;
		let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
		let mut g = graph(n, &edges);
		let trace = run(&mut g, Algorithm::Dfs, 0);
		assert_eq!(trace.len(), 2 * n);
	}

	#[test]
	fn isolated_start_visits_once() {
		for algorithm in [Algorithm::Bfs, Algorithm::Dfs] {
			let mut g = graph(3, &[(1, 2)]);
			let mut stepper = Stepper::new(algorithm, 0, &mut g);
			let mut steps = 0;
			while stepper.step(&mut g).is_some() {
				steps += 1;
			}
			assert_eq!(steps, 1);
			assert_eq!(stepper.transitions(), &[t(0, Visiting), t(0, Visited)]);
		}
	}

	#[test]
	fn second_start_while_running_is_rejected() {
		let mut g = graph(3, &[(0, 1), (1, 2)]);
		let mut engine = TraversalEngine::new();
		engine.start(&mut g, Some(0), Algorithm::Bfs).unwrap();
		assert!(matches!(engine.advance(&mut g), Progress::Paused(_)));
		let before: Vec<_> = g.nodes().iter().map(|n| n.state).collect();
		let trace_before = engine.transitions().to_vec();

		assert_eq!(
			engine.start(&mut g, Some(2), Algorithm::Dfs),
			Err(EditorError::TraversalRunning)
		);
		assert_eq!(engine.active(), Some(Algorithm::Bfs));
		assert_eq!(g.nodes().iter().map(|n| n.state).collect::<Vec<_>>(), before);
		assert_eq!(engine.transitions(), trace_before.as_slice());
	}

	#[test]
	fn start_validates_selection() {
		let mut g = graph(2, &[]);
		let mut engine = TraversalEngine::new();
		assert_eq!(
			engine.start(&mut g, None, Algorithm::Bfs),
			Err(EditorError::NoStartNode)
		);
		assert_eq!(
			engine.start(&mut g, Some(2), Algorithm::Bfs),
			Err(EditorError::InvalidStartNode(2))
		);
		assert!(!engine.is_running());
	}

	#[test]
	fn new_run_resets_previous_colours() {
		let mut g = graph(4, &[(0, 1), (2, 3)]);
		run(&mut g, Algorithm::Bfs, 0);
		let trace = run(&mut g, Algorithm::Dfs, 2);
		assert_eq!(visited_order(&trace), vec![2, 3]);
		assert_eq!(g.node(0).map(|n| n.state), Some(VisualState::Default));
		assert_eq!(g.node(3).map(|n| n.state), Some(Visited));
	}

	#[test]
	fn finish_is_reported_once_then_idle() {
		let mut g = graph(1, &[]);
		let mut engine = TraversalEngine::new();
		engine.start(&mut g, Some(0), Algorithm::Dfs).unwrap();
		assert_eq!(engine.advance(&mut g), Progress::Paused(DFS_VISIT_DELAY));
		assert_eq!(engine.advance(&mut g), Progress::Finished(Algorithm::Dfs));
		assert_eq!(engine.advance(&mut g), Progress::Idle);
		assert!(!engine.is_running());
		assert_eq!(g.node(0).map(|n| n.state), Some(Visited));
	}

	#[test]
	fn reset_refused_while_running() {
		let mut g = graph(2, &[(0, 1)]);
		let mut engine = TraversalEngine::new();
		engine.start(&mut g, Some(0), Algorithm::Bfs).unwrap();
		assert_eq!(engine.reset(&mut g), Err(EditorError::TraversalRunning));
		engine.run_to_end(&mut g);
		assert_eq!(engine.reset(&mut g), Ok(()));
		assert!(g.nodes().iter().all(|n| n.state == VisualState::Default));
		assert_eq!(engine.active(), None);
	}
}
