//! Graph model.
//!
//! # Overview
//!
//! ```text
//! graph document (JSON, several layouts)
//!        ↓  description::GraphDescription::load()
//! GraphDescription (presence map, adjacency map, directedness)
//!        ↓  build::Graph::from_description()
//! Graph (immutable, NodeId-labelled petgraph DiGraph)
//! ```
//!
//! The graph never changes after construction; every metric borrows it.

pub mod build;
pub mod description;

pub use build::Graph;
pub use description::{GraphDescription, is_truthy};
