use super::types::{Edge, Node, VisualState};

/// Radius of the clickable circle around a node, in world units.
pub const HIT_RADIUS: f64 = 35.0;

/// Owns the node sequence and the undirected edge list.
///
/// Node identity is its position in the sequence. Deleting a node compacts the
/// sequence and rewrites edge endpoints so every edge still names the same
/// pair of nodes.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, idx: usize) -> Option<&Node> {
		self.nodes.get(idx)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn add_node(&mut self, x: f64, y: f64, label: impl Into<String>) -> usize {
		self.nodes.push(Node::new(x, y, label));
		self.nodes.len() - 1
	}

	/// Appends `{u, v}` unless an edge between the two already exists in
	/// either order. Self-loops and unknown endpoints are rejected as well.
	pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
		if u == v || u >= self.nodes.len() || v >= self.nodes.len() {
			return false;
		}
		if self.edges.iter().any(|e| e.connects(u, v)) {
			return false;
		}
		self.edges.push(Edge { u, v });
		true
	}

	/// Removes the node and its incident edges, then shifts every endpoint
	/// above `idx` down by one.
	pub fn delete_node(&mut self, idx: usize) -> Option<Node> {
		if idx >= self.nodes.len() {
			return None;
		}
		let removed = self.nodes.remove(idx);
		self.edges.retain(|e| !e.touches(idx));
		for e in &mut self.edges {
			if e.u > idx {
				e.u -= 1;
			}
			if e.v > idx {
				e.v -= 1;
			}
		}
		Some(removed)
	}

	/// First node in index order strictly within `radius` of the point.
	/// Overlapping nodes resolve to the lowest index, not the nearest.
	pub fn hit_test(&self, wx: f64, wy: f64, radius: f64) -> Option<usize> {
		self.nodes.iter().position(|n| {
			let (dx, dy) = (wx - n.x, wy - n.y);
			dx * dx + dy * dy < radius * radius
		})
	}

	/// Neighbours of `u` in edge-insertion order.
	pub fn neighbors_of(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
		self.edges.iter().filter_map(move |e| e.other(u))
	}

	pub fn set_state(&mut self, idx: usize, state: VisualState) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.state = state;
		}
	}

	pub fn reset_states(&mut self) {
		for node in &mut self.nodes {
			node.state = VisualState::Default;
		}
	}

	pub fn labels(&self) -> Vec<String> {
		self.nodes.iter().map(|n| n.label.clone()).collect()
	}

	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store_with(labels: &[&str]) -> GraphStore {
		let mut g = GraphStore::new();
		for (i, label) in labels.iter().enumerate() {
			g.add_node(i as f64 * 100.0, 0.0, *label);
		}
		g
	}

	#[test]
	fn add_node_returns_sequential_indices() {
		let mut g = GraphStore::new();
		let ids: Vec<usize> = (0..6).map(|i| g.add_node(i as f64, 0.0, "n")).collect();
		assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
		assert!(g.nodes().iter().all(|n| n.state == VisualState::Default));
	}

	#[test]
	fn reversed_duplicate_edge_is_rejected() {
		let mut g = store_with(&["a", "b"]);
		assert!(g.add_edge(0, 1));
		assert!(!g.add_edge(1, 0));
		assert!(!g.add_edge(0, 1));
		assert_eq!(g.edges().len(), 1);
	}

	#[test]
	fn self_loop_is_rejected() {
		let mut g = store_with(&["a"]);
		assert!(!g.add_edge(0, 0));
		assert!(g.edges().is_empty());
	}

	#[test]
	fn unknown_endpoint_is_rejected() {
		let mut g = store_with(&["a", "b"]);
		assert!(!g.add_edge(0, 9));
		assert!(!g.add_edge(9, 1));
		assert!(g.edges().is_empty());
	}

	#[test]
	fn delete_compacts_nodes_and_edges() {
		let mut g = store_with(&["a", "b", "c", "d"]);
		g.add_edge(0, 1);
		g.add_edge(1, 2);
		g.add_edge(2, 3);
		g.add_edge(3, 0);

		let removed = g.delete_node(1);
		assert_eq!(removed.map(|n| n.label), Some("b".to_string()));
		assert_eq!(g.labels(), vec!["a", "c", "d"]);
		// c-d and d-a survive, renumbered.
		assert_eq!(g.edges(), &[Edge { u: 1, v: 2 }, Edge { u: 2, v: 0 }]);
		for e in g.edges() {
			assert!(e.u < g.len() && e.v < g.len());
		}
	}

	#[test]
	fn delete_out_of_range_is_noop() {
		let mut g = store_with(&["a"]);
		assert!(g.delete_node(3).is_none());
		assert_eq!(g.len(), 1);
	}

	#[test]
	fn hit_test_prefers_lowest_index() {
		let mut g = GraphStore::new();
		g.add_node(0.0, 0.0, "far");
		g.add_node(20.0, 0.0, "near");
		assert_eq!(g.hit_test(19.0, 0.0, HIT_RADIUS), Some(0));
		assert_eq!(g.hit_test(50.0, 0.0, HIT_RADIUS), Some(1));
		assert_eq!(g.hit_test(500.0, 0.0, HIT_RADIUS), None);
	}

	#[test]
	fn hit_test_boundary_is_exclusive() {
		let mut g = GraphStore::new();
		g.add_node(0.0, 0.0, "a");
		assert_eq!(g.hit_test(HIT_RADIUS, 0.0, HIT_RADIUS), None);
	}

	#[test]
	fn neighbors_follow_edge_order() {
		let mut g = store_with(&["a", "b", "c", "d"]);
		g.add_edge(2, 0);
		g.add_edge(0, 3);
		g.add_edge(1, 0);
		g.add_edge(1, 2);
		assert_eq!(g.neighbors_of(0).collect::<Vec<_>>(), vec![2, 3, 1]);
		assert_eq!(g.neighbors_of(2).collect::<Vec<_>>(), vec![0, 1]);
	}
}
