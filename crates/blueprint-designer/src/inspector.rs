//! Cross-entity dependency inspector
//!
//! Builds the attributes → SKUs → rules → workflows → search indices
//! graph from gateway dependency records and reduces it by category for
//! display. The full graph is built once per screen and never mutated;
//! each category pick derives a fresh reduced copy.

use blueprint_graph::{filter, DesignGraph, GraphEdge, GraphError, GraphNode};
use log::debug;

use crate::error::{DesignerError, Result};
use crate::gateway::{DependencyRecord, PersistenceGateway};

/// Read-only view over the console's entity dependencies
#[derive(Debug)]
pub struct DependencyInspector {
    graph: DesignGraph,
}

impl DependencyInspector {
    /// Build the full dependency graph from gateway records
    ///
    /// Each `depends_on` entry becomes an edge from the dependency to
    /// the dependent, with the derived `<source>-<target>` ID. A record
    /// depending on an ID absent from the report is a data error; this
    /// is a full-graph load, not a filter pass.
    pub fn from_records(records: &[DependencyRecord]) -> std::result::Result<Self, GraphError> {
        let mut graph = DesignGraph::new();
        for record in records {
            graph.add_node(GraphNode::new(&record.id, record.kind, &record.label))?;
        }
        for record in records {
            for dependency in &record.depends_on {
                graph.add_edge(GraphEdge::dependency(dependency, &record.id))?;
            }
        }
        debug!(
            "dependency graph loaded: {} node(s), {} edge(s)",
            graph.nodes().len(),
            graph.edges().len()
        );
        Ok(Self { graph })
    }

    /// Fetch the dependency report and build the graph
    pub async fn load(gateway: &dyn PersistenceGateway) -> Result<Self> {
        let records = gateway.list_dependencies().await?;
        Self::from_records(&records).map_err(DesignerError::from)
    }

    /// The full dependency graph
    pub fn graph(&self) -> &DesignGraph {
        &self.graph
    }

    /// Reduce to one category plus its dependency neighbors
    ///
    /// `category` is a kind prefix ("sku", "attr", ...); matching is
    /// case-insensitive. The reduced copy is ready for layout.
    pub fn focus(&self, category: &str) -> DesignGraph {
        let category = category.trim().to_ascii_lowercase();
        filter::focus(&self.graph, |node| node.kind.matches_prefix(&category))
    }
}
