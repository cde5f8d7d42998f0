//! Canvas components.

pub mod graph_editor;
