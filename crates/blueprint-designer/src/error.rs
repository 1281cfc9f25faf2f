//! Error types for the designer crate

use blueprint_graph::GraphError;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Result type alias using DesignerError
pub type Result<T> = std::result::Result<T, DesignerError>;

/// Errors surfaced by a designer session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesignerError {
    /// Structural graph failure (programmer or data error)
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Backend call failed (recoverable at the UI boundary)
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A connect gesture arrived while another edit was open
    #[error("an edit is already in progress")]
    EditInProgress,

    /// Commit or cancel was called with nothing pending
    #[error("no pending connection")]
    NoPendingConnection,

    /// Transition endpoints must be workflow states
    #[error("node '{0}' is not a workflow state")]
    NotAState(String),
}
