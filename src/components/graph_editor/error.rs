//! User-facing rejections. None of these are faults: the operation is
//! simply not performed and the message goes to the notification surface.

/// Why an editor operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
	#[error("Path already exists!")]
	DuplicateEdge,

	#[error("Select a start node!")]
	NoStartNode,

	#[error("Start node {0} does not exist")]
	InvalidStartNode(usize),

	#[error("A traversal is already running")]
	TraversalRunning,

	#[error("Node name cannot be empty")]
	EmptyLabel,
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_are_user_facing() {
		assert_eq!(EditorError::DuplicateEdge.to_string(), "Path already exists!");
		assert_eq!(EditorError::NoStartNode.to_string(), "Select a start node!");
		assert_eq!(
			EditorError::InvalidStartNode(7).to_string(),
			"Start node 7 does not exist"
		);
	}
}
