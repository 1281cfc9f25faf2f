//! Blueprint graph core
//!
//! The shared data structures behind the configuration console's graph
//! designer: a typed directed graph model, a deterministic layered
//! layout, and subgraph filtering for the dependency inspector.
//!
//! # Architecture
//!
//! - `DesignGraph`: invariant-checked node/edge collections. Removing
//!   a node cascades to its edges, and an edge can never reference a
//!   missing endpoint.
//! - `layout`: a pure function from graph + node extents to positions;
//!   identical input always yields identical coordinates.
//! - `filter`: induced-subgraph and neighbor-expansion reductions that
//!   never mutate the source graph.
//!
//! Mutation of a live designer graph belongs to the editing session in
//! `blueprint-designer`; this crate stays synchronous and I/O-free.

pub mod error;
pub mod filter;
pub mod graph;
pub mod layout;
pub mod types;

// Re-export key types
pub use error::GraphError;
pub use graph::DesignGraph;
pub use layout::{layout, LayoutConfig, LayoutPosition, NodeExtent};
pub use types::{EdgeId, GraphEdge, GraphNode, NodeId, NodeKind};
