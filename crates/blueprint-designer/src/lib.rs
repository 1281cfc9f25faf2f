//! Blueprint designer core
//!
//! The editing session, persistence gateway contract, canvas adapter
//! contract, and dependency inspector behind the configuration
//! console's graph designer.
//!
//! # Architecture
//!
//! - `DesignerSession`: the editing state machine. One discipline
//!   everywhere: the gateway confirms first, the local graph changes
//!   second, so the canvas never diverges from backend state.
//! - `PersistenceGateway`: async contract for the backend CRUD and
//!   validation services, with an in-memory double for tests.
//! - `canvas`: positioned frames out, gestures in; no rendering
//!   technology assumed.
//! - `DependencyInspector`: the cross-entity dependency view, reduced
//!   by category through the graph crate's filter.

pub mod canvas;
pub mod error;
pub mod events;
pub mod gateway;
pub mod inspector;
pub mod session;
pub mod workflow;

// Re-export key types
pub use canvas::{CanvasFrame, GestureEvent, PlacedNode};
pub use error::{DesignerError, Result};
pub use events::{DesignerEvent, EventSink, NullEventSink, VecEventSink};
pub use gateway::{
    DependencyRecord, GatewayError, InMemoryGateway, PersistenceGateway, StateDraft,
    TransitionDraft, WorkflowCheck, WorkflowSummary,
};
pub use inspector::DependencyInspector;
pub use session::{DesignerSession, EditState};
pub use workflow::{Workflow, WorkflowState, WorkflowTransition};

// Re-export the graph core that consumers will need alongside the session
pub use blueprint_graph::{
    layout, DesignGraph, GraphEdge, GraphError, GraphNode, LayoutConfig, LayoutPosition,
    NodeExtent, NodeKind,
};
