//! Graph editor: model, camera, traversal playback and the canvas component.

mod component;
pub mod error;
pub mod graph;
pub mod interaction;
mod playback;
mod render;
pub mod state;
pub mod style;
pub mod traversal;
pub mod types;
pub mod view;


pub use component::GraphEditor;
