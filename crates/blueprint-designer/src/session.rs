//! Designer editing session
//!
//! One session owns one workflow's canvas graph and the editing state
//! machine around it. Every mutation follows the same discipline: the
//! persistence gateway confirms first, the local graph changes second,
//! so the canvas never shows anything the backend has not accepted and
//! a failed commit leaves nothing to roll back.

use std::collections::HashMap;
use std::sync::Arc;

use blueprint_graph::{
    layout, DesignGraph, GraphError, LayoutConfig, NodeExtent, NodeId, NodeKind,
};
use log::{debug, warn};

use crate::canvas::{CanvasFrame, GestureEvent, PlacedNode};
use crate::error::{DesignerError, Result};
use crate::events::{DesignerEvent, EventSink, NullEventSink};
use crate::gateway::{GatewayError, PersistenceGateway, StateDraft, TransitionDraft, WorkflowCheck};
use crate::workflow::{WorkflowState, WorkflowTransition};

/// Editing state machine for the workflow canvas
///
/// The variants make "at most one pending connection" a type-level
/// fact instead of a pair of dialog flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    /// No pending edits; the canvas shows the committed graph
    Idle,
    /// A drag-to-connect gesture completed; the endpoints are held but
    /// nothing has been added to the graph
    ConnectingPending { source: NodeId, target: NodeId },
    /// The transition dialog is open for the held endpoints
    ConfiguringTransition { source: NodeId, target: NodeId },
}

/// One open designer screen: a workflow, its graph, and the edit state
pub struct DesignerSession {
    workflow_id: String,
    gateway: Arc<dyn PersistenceGateway>,
    graph: DesignGraph,
    edit: EditState,
    selected: Option<NodeId>,
    extents: HashMap<NodeId, NodeExtent>,
    layout_config: LayoutConfig,
    sink: Arc<dyn EventSink>,
}

impl DesignerSession {
    /// Create a session for one workflow
    pub fn new(workflow_id: impl Into<String>, gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            gateway,
            graph: DesignGraph::new(),
            edit: EditState::Idle,
            selected: None,
            extents: HashMap::new(),
            layout_config: LayoutConfig::default(),
            sink: Arc::new(NullEventSink),
        }
    }

    /// Attach an event sink
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Override the layout configuration
    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    /// The committed graph
    pub fn graph(&self) -> &DesignGraph {
        &self.graph
    }

    /// Current edit state
    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Currently selected node, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the graph wholesale from the backend
    ///
    /// Any pending edit is discarded; the session never merges a fresh
    /// document into a stale graph.
    pub async fn hydrate(&mut self) -> Result<()> {
        let workflow = self.gateway.get_workflow(&self.workflow_id).await?;
        self.graph = workflow.to_graph()?;
        self.edit = EditState::Idle;
        self.selected = None;
        debug!(
            "hydrated workflow '{}': {} state(s), {} transition(s)",
            self.workflow_id,
            workflow.states.len(),
            workflow.transitions.len()
        );
        self.emit(DesignerEvent::WorkflowHydrated {
            workflow_id: self.workflow_id.clone(),
            states: workflow.states.len(),
            transitions: workflow.transitions.len(),
        });
        Ok(())
    }

    /// Record the renderer-measured extent for a node
    pub fn set_extent(&mut self, node: impl Into<NodeId>, extent: NodeExtent) {
        self.extents.insert(node.into(), extent);
    }

    /// Current frame for the canvas adapter
    ///
    /// Layout is recomputed in full on every call; determinism matters
    /// more than incremental speed at this graph size.
    pub fn frame(&self) -> CanvasFrame {
        let positions = layout(&self.graph, &self.extents, &self.layout_config);
        let nodes = self
            .graph
            .nodes()
            .iter()
            .cloned()
            .zip(positions)
            .map(|(node, position)| PlacedNode { node, position })
            .collect();
        CanvasFrame {
            nodes,
            edges: self.graph.edges().to_vec(),
        }
    }

    /// Dispatch a gesture reported by the canvas adapter
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Result<()> {
        match event {
            GestureEvent::ConnectAttempt { source, target } => self.begin_connect(source, target),
            GestureEvent::NodeSelected { node } => {
                if !self.graph.contains_node(&node) {
                    return Err(GraphError::UnknownNode(node).into());
                }
                self.selected = Some(node);
                Ok(())
            }
            GestureEvent::NodeMoved { node, x, y } => {
                // Positions are layout-owned; the gesture is acknowledged only
                debug!(
                    "node '{}' dragged to ({:.1}, {:.1}); position stays layout-owned",
                    node, x, y
                );
                Ok(())
            }
        }
    }

    /// Hold a completed drag-to-connect gesture
    ///
    /// Only one pending connection may exist at a time; gestures
    /// arriving while an edit is open are dropped, not queued.
    pub fn begin_connect(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<()> {
        let source = source.into();
        let target = target.into();
        if self.edit != EditState::Idle {
            warn!(
                "dropping connect attempt {} -> {}: an edit is already pending",
                source, target
            );
            return Err(DesignerError::EditInProgress);
        }
        self.require_state_node(&source)?;
        self.require_state_node(&target)?;
        debug!("holding connect attempt {} -> {}", source, target);
        self.edit = EditState::ConnectingPending { source, target };
        Ok(())
    }

    /// Open the transition dialog for the held endpoints
    pub fn open_configuration(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.edit, EditState::Idle) {
            EditState::ConnectingPending { source, target } => {
                self.edit = EditState::ConfiguringTransition { source, target };
                Ok(())
            }
            other => {
                self.edit = other;
                Err(DesignerError::NoPendingConnection)
            }
        }
    }

    /// Commit the configured transition
    ///
    /// The gateway is called first; the edge joins the graph only on
    /// success. On rejection the dialog stays open with the entered
    /// data intact and the graph untouched, so the operator can retry
    /// without re-entering anything.
    pub async fn commit_transition(&mut self, draft: TransitionDraft) -> Result<WorkflowTransition> {
        let (source, target) = match &self.edit {
            EditState::ConfiguringTransition { source, target } => {
                (source.clone(), target.clone())
            }
            _ => return Err(DesignerError::NoPendingConnection),
        };

        match self
            .gateway
            .add_transition(&self.workflow_id, &source, &target, draft)
            .await
        {
            Ok(transition) => {
                self.graph.add_edge(transition.to_edge())?;
                self.edit = EditState::Idle;
                debug!(
                    "committed transition '{}' ({} -> {})",
                    transition.id, source, target
                );
                self.emit(DesignerEvent::TransitionCommitted {
                    workflow_id: self.workflow_id.clone(),
                    transition_id: transition.id.clone(),
                });
                Ok(transition)
            }
            Err(err) => {
                warn!("transition {} -> {} rejected: {}", source, target, err);
                self.report_gateway_failure(&err);
                Err(err.into())
            }
        }
    }

    /// Abandon the pending connection without touching the graph
    pub fn cancel_connect(&mut self) -> Result<()> {
        if self.edit == EditState::Idle {
            return Err(DesignerError::NoPendingConnection);
        }
        self.edit = EditState::Idle;
        self.emit(DesignerEvent::ConnectionCancelled {
            workflow_id: self.workflow_id.clone(),
        });
        Ok(())
    }

    /// Create a state through the gateway, then place it on the canvas
    pub async fn add_state(&mut self, draft: StateDraft) -> Result<WorkflowState> {
        if self.edit != EditState::Idle {
            return Err(DesignerError::EditInProgress);
        }
        match self.gateway.add_state(&self.workflow_id, draft).await {
            Ok(state) => {
                self.graph.add_node(state.to_node())?;
                self.emit(DesignerEvent::StateAdded {
                    workflow_id: self.workflow_id.clone(),
                    state_id: state.id.clone(),
                });
                Ok(state)
            }
            Err(err) => {
                self.report_gateway_failure(&err);
                Err(err.into())
            }
        }
    }

    /// Delete a state server-side, then cascade it out of the graph
    pub async fn remove_state(&mut self, state_id: &str) -> Result<()> {
        if self.edit != EditState::Idle {
            return Err(DesignerError::EditInProgress);
        }
        if !self.graph.contains_node(state_id) {
            return Err(GraphError::UnknownNode(state_id.to_string()).into());
        }

        if let Err(err) = self.gateway.delete_state(&self.workflow_id, state_id).await {
            self.report_gateway_failure(&err);
            return Err(err.into());
        }

        let dropped = self.graph.remove_node(state_id)?;
        if self.selected.as_deref() == Some(state_id) {
            self.selected = None;
        }
        self.emit(DesignerEvent::StateRemoved {
            workflow_id: self.workflow_id.clone(),
            state_id: state_id.to_string(),
            dropped_transitions: dropped.into_iter().map(|e| e.id).collect(),
        });
        Ok(())
    }

    /// Run backend validation for the current workflow
    pub async fn validate(&self) -> Result<WorkflowCheck> {
        Ok(self.gateway.validate_workflow(&self.workflow_id).await?)
    }

    fn require_state_node(&self, id: &str) -> Result<()> {
        match self.graph.node(id) {
            None => Err(GraphError::UnknownNode(id.to_string()).into()),
            Some(node) if node.kind != NodeKind::State => {
                Err(DesignerError::NotAState(id.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    fn report_gateway_failure(&self, err: &GatewayError) {
        match err {
            GatewayError::Validation { errors } => self.emit(DesignerEvent::CommitRejected {
                workflow_id: self.workflow_id.clone(),
                errors: errors.clone(),
            }),
            GatewayError::Unavailable(detail) => self.emit(DesignerEvent::GatewayOffline {
                workflow_id: self.workflow_id.clone(),
                detail: detail.clone(),
            }),
            GatewayError::NotFound(_) => {}
        }
    }

    fn emit(&self, event: DesignerEvent) {
        if let Err(err) = self.sink.send(event) {
            warn!("event sink dropped an event: {}", err);
        }
    }
}
