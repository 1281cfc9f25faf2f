//! Error types for the graph crate

use thiserror::Error;

use crate::types::{EdgeId, NodeId};

/// Errors raised by graph model mutation
///
/// These are programmer or data errors. Disciplined callers route all
/// mutation through the designer session, which makes most of them
/// unreachable in practice; when one does surface it should fail loudly
/// rather than be patched over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge references a node absent from the graph instance
    #[error("edge '{edge_id}' references missing node '{node_id}'")]
    DanglingEndpoint { edge_id: EdgeId, node_id: NodeId },

    /// A node with this ID is already present
    #[error("node id '{0}' already present")]
    DuplicateNode(NodeId),

    /// An edge with this ID is already present
    #[error("edge id '{0}' already present")]
    DuplicateEdge(EdgeId),

    /// No node with this ID exists
    #[error("unknown node id '{0}'")]
    UnknownNode(NodeId),

    /// No edge with this ID exists
    #[error("unknown edge id '{0}'")]
    UnknownEdge(EdgeId),
}
