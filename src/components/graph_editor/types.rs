use std::fmt;

/// Per-node traversal highlight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualState {
	#[default]
	Default,
	Visiting,
	Visited,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	pub label: String,
	pub state: VisualState,
}

impl Node {
	pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
		Self {
			x,
			y,
			label: label.into(),
			state: VisualState::Default,
		}
	}
}

/// Undirected edge between two node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub u: usize,
	pub v: usize,
}

impl Edge {
	pub fn connects(&self, a: usize, b: usize) -> bool {
		(self.u == a && self.v == b) || (self.u == b && self.v == a)
	}

	pub fn touches(&self, idx: usize) -> bool {
		self.u == idx || self.v == idx
	}

	/// The endpoint opposite `idx`, if `idx` is one of the endpoints.
	pub fn other(&self, idx: usize) -> Option<usize> {
		if self.u == idx {
			Some(self.v)
		} else if self.v == idx {
			Some(self.u)
		} else {
			None
		}
	}
}

/// What a primary click on the canvas does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	#[default]
	PlaceNode,
	ConnectEdge,
	Pan,
	Delete,
}

impl Mode {
	pub const ALL: [Mode; 4] = [Mode::PlaceNode, Mode::ConnectEdge, Mode::Pan, Mode::Delete];

	pub fn title(self) -> &'static str {
		match self {
			Mode::PlaceNode => "Node",
			Mode::ConnectEdge => "Edge",
			Mode::Pan => "Pan",
			Mode::Delete => "Delete",
		}
	}

	pub fn instructions(self) -> &'static str {
		match self {
			Mode::PlaceNode => "Click anywhere to add a Node",
			Mode::ConnectEdge => "Select two nodes to connect",
			Mode::Pan => "Drag to move • Scroll to zoom",
			Mode::Delete => "Click a node to delete it",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
	Bfs,
	Dfs,
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Algorithm::Bfs => write!(f, "BFS"),
			Algorithm::Dfs => write!(f, "DFS"),
		}
	}
}
