//! Persistence gateway contract
//!
//! The designer consumes backend CRUD and validation through this
//! trait; it never talks to a transport directly. Gateway failures are
//! always recoverable at the UI boundary: they surface in the dialog or
//! as a transient notification and never touch the in-memory graph.
//!
//! An in-memory implementation is included for tests and local
//! development, the same way the event module ships collectable sinks.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use blueprint_graph::NodeKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::workflow::{Workflow, WorkflowState, WorkflowTransition};

/// Result type alias for gateway calls
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Errors surfaced by the persistence gateway
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Backend rejected the submitted attributes
    #[error("validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    /// Backend could not be reached
    #[error("persistence gateway unavailable: {0}")]
    Unavailable(String),

    /// Referenced entity does not exist
    #[error("not found: {0}")]
    NotFound(String),
}

impl GatewayError {
    /// Single-message validation failure
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![message.into()],
        }
    }
}

/// Row shown in the workflow list screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    pub state_count: usize,
    pub updated_at: DateTime<Utc>,
}

/// Attributes for a new state, before the backend assigns an ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDraft {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub is_initial: bool,
    #[serde(default)]
    pub is_final: bool,
}

/// Attributes captured by the transition dialog
///
/// The endpoints are not part of the draft; they come from the pending
/// connection held by the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionDraft {
    pub name: String,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub approver_role: String,
    #[serde(default)]
    pub condition_expression: serde_json::Value,
    #[serde(default)]
    pub display_order: i32,
}

/// Result of a backend workflow validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowCheck {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Cross-entity dependency row for the inspector
///
/// `depends_on` lists the upstream entity IDs this entity is derived
/// from; the inspector turns each entry into a dependency edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Backend CRUD and validation services consumed by the designer
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// List workflows for the picker screen
    async fn list_workflows(&self) -> GatewayResult<Vec<WorkflowSummary>>;

    /// Fetch one workflow with its states and transitions
    async fn get_workflow(&self, id: &str) -> GatewayResult<Workflow>;

    /// Create a state; rejects missing code or name
    async fn add_state(&self, workflow_id: &str, draft: StateDraft)
        -> GatewayResult<WorkflowState>;

    /// Create a transition between two existing states
    async fn add_transition(
        &self,
        workflow_id: &str,
        from_state: &str,
        to_state: &str,
        draft: TransitionDraft,
    ) -> GatewayResult<WorkflowTransition>;

    /// Run backend structural validation for a workflow
    async fn validate_workflow(&self, id: &str) -> GatewayResult<WorkflowCheck>;

    /// Delete a workflow outright
    async fn delete_workflow(&self, id: &str) -> GatewayResult<()>;

    /// Delete a state and its transitions server-side
    async fn delete_state(&self, workflow_id: &str, state_id: &str) -> GatewayResult<()>;

    /// Cross-entity dependency report for the inspector
    async fn list_dependencies(&self) -> GatewayResult<Vec<DependencyRecord>>;
}

#[derive(Default)]
struct GatewayStore {
    workflows: HashMap<String, Workflow>,
    updated_at: HashMap<String, DateTime<Utc>>,
    dependencies: Vec<DependencyRecord>,
}

/// In-memory gateway for tests and local development
///
/// Applies the same attribute validation a real backend would, so the
/// dialog error paths can be exercised without a server.
pub struct InMemoryGateway {
    store: Mutex<GatewayStore>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(GatewayStore::default()),
        }
    }

    /// Insert or replace a workflow document
    pub fn seed_workflow(&self, workflow: Workflow) {
        let mut store = self.store.lock().unwrap();
        store.updated_at.insert(workflow.id.clone(), Utc::now());
        store.workflows.insert(workflow.id.clone(), workflow);
    }

    /// Replace the dependency report
    pub fn seed_dependencies(&self, records: Vec<DependencyRecord>) {
        self.store.lock().unwrap().dependencies = records;
    }

    fn touch(store: &mut GatewayStore, workflow_id: &str) {
        store.updated_at.insert(workflow_id.to_string(), Utc::now());
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn list_workflows(&self) -> GatewayResult<Vec<WorkflowSummary>> {
        let store = self.store.lock().unwrap();
        let mut summaries: Vec<WorkflowSummary> = store
            .workflows
            .values()
            .map(|w| WorkflowSummary {
                id: w.id.clone(),
                name: w.name.clone(),
                state_count: w.states.len(),
                updated_at: store
                    .updated_at
                    .get(&w.id)
                    .copied()
                    .unwrap_or_else(Utc::now),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }

    async fn get_workflow(&self, id: &str) -> GatewayResult<Workflow> {
        self.store
            .lock()
            .unwrap()
            .workflows
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn add_state(
        &self,
        workflow_id: &str,
        draft: StateDraft,
    ) -> GatewayResult<WorkflowState> {
        let mut errors = Vec::new();
        if draft.code.trim().is_empty() {
            errors.push("state code is required".to_string());
        }
        if draft.name.trim().is_empty() {
            errors.push("state name is required".to_string());
        }
        if !errors.is_empty() {
            return Err(GatewayError::Validation { errors });
        }

        let mut store = self.store.lock().unwrap();
        let workflow = store
            .workflows
            .get_mut(workflow_id)
            .ok_or_else(|| GatewayError::NotFound(workflow_id.to_string()))?;
        if workflow.states.iter().any(|s| s.code == draft.code) {
            return Err(GatewayError::invalid(format!(
                "state code '{}' already in use",
                draft.code
            )));
        }

        let state = WorkflowState {
            id: Uuid::new_v4().to_string(),
            code: draft.code,
            name: draft.name,
            is_initial: draft.is_initial,
            is_final: draft.is_final,
            allow_edit: true,
            allow_delete: true,
        };
        workflow.states.push(state.clone());
        Self::touch(&mut store, workflow_id);
        Ok(state)
    }

    async fn add_transition(
        &self,
        workflow_id: &str,
        from_state: &str,
        to_state: &str,
        draft: TransitionDraft,
    ) -> GatewayResult<WorkflowTransition> {
        if draft.name.trim().is_empty() {
            return Err(GatewayError::invalid("transition name is required"));
        }

        let mut store = self.store.lock().unwrap();
        let workflow = store
            .workflows
            .get_mut(workflow_id)
            .ok_or_else(|| GatewayError::NotFound(workflow_id.to_string()))?;
        for endpoint in [from_state, to_state] {
            if !workflow.states.iter().any(|s| s.id == endpoint) {
                return Err(GatewayError::invalid(format!(
                    "unknown state '{}'",
                    endpoint
                )));
            }
        }

        let transition = WorkflowTransition {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            from_state: from_state.to_string(),
            to_state: to_state.to_string(),
            requires_approval: draft.requires_approval,
            approver_role: draft.approver_role,
            condition_expression: draft.condition_expression,
            display_order: draft.display_order,
        };
        workflow.transitions.push(transition.clone());
        Self::touch(&mut store, workflow_id);
        Ok(transition)
    }

    async fn validate_workflow(&self, id: &str) -> GatewayResult<WorkflowCheck> {
        let store = self.store.lock().unwrap();
        let workflow = store
            .workflows
            .get(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;

        let mut errors = Vec::new();
        let initial_count = workflow.states.iter().filter(|s| s.is_initial).count();
        if initial_count == 0 {
            errors.push("workflow has no initial state".to_string());
        } else if initial_count > 1 {
            errors.push("workflow has more than one initial state".to_string());
        }
        if !workflow.states.iter().any(|s| s.is_final) {
            errors.push("workflow has no final state".to_string());
        }

        Ok(WorkflowCheck {
            valid: errors.is_empty(),
            errors,
        })
    }

    async fn delete_workflow(&self, id: &str) -> GatewayResult<()> {
        let mut store = self.store.lock().unwrap();
        store
            .workflows
            .remove(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        store.updated_at.remove(id);
        Ok(())
    }

    async fn delete_state(&self, workflow_id: &str, state_id: &str) -> GatewayResult<()> {
        let mut store = self.store.lock().unwrap();
        let workflow = store
            .workflows
            .get_mut(workflow_id)
            .ok_or_else(|| GatewayError::NotFound(workflow_id.to_string()))?;
        let before = workflow.states.len();
        workflow.states.retain(|s| s.id != state_id);
        if workflow.states.len() == before {
            return Err(GatewayError::NotFound(state_id.to_string()));
        }
        workflow
            .transitions
            .retain(|t| t.from_state != state_id && t.to_state != state_id);
        Self::touch(&mut store, workflow_id);
        Ok(())
    }

    async fn list_dependencies(&self) -> GatewayResult<Vec<DependencyRecord>> {
        Ok(self.store.lock().unwrap().dependencies.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryGateway {
        let gateway = InMemoryGateway::new();
        gateway.seed_workflow(Workflow {
            id: "wf-1".to_string(),
            name: "Publishing".to_string(),
            states: vec![
                WorkflowState {
                    id: "draft".to_string(),
                    code: "DRAFT".to_string(),
                    name: "Draft".to_string(),
                    is_initial: true,
                    is_final: false,
                    allow_edit: true,
                    allow_delete: true,
                },
                WorkflowState {
                    id: "live".to_string(),
                    code: "LIVE".to_string(),
                    name: "Live".to_string(),
                    is_initial: false,
                    is_final: true,
                    allow_edit: true,
                    allow_delete: true,
                },
            ],
            transitions: vec![WorkflowTransition {
                id: "t-1".to_string(),
                name: "Publish".to_string(),
                from_state: "draft".to_string(),
                to_state: "live".to_string(),
                requires_approval: false,
                approver_role: String::new(),
                condition_expression: serde_json::Value::Null,
                display_order: 0,
            }],
        });
        gateway
    }

    fn draft(code: &str, name: &str) -> StateDraft {
        StateDraft {
            code: code.to_string(),
            name: name.to_string(),
            is_initial: false,
            is_final: false,
        }
    }

    #[tokio::test]
    async fn test_add_state_rejects_missing_code_and_name() {
        let gateway = seeded();
        let err = gateway.add_state("wf-1", draft("", " ")).await.unwrap_err();
        match err {
            GatewayError::Validation { errors } => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_state_rejects_duplicate_code() {
        let gateway = seeded();
        let err = gateway
            .add_state("wf-1", draft("DRAFT", "Another Draft"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_add_state_assigns_id() {
        let gateway = seeded();
        let state = gateway
            .add_state("wf-1", draft("REVIEW", "Review"))
            .await
            .unwrap();
        assert!(!state.id.is_empty());

        let workflow = gateway.get_workflow("wf-1").await.unwrap();
        assert_eq!(workflow.states.len(), 3);
    }

    #[tokio::test]
    async fn test_add_transition_rejects_unknown_state() {
        let gateway = seeded();
        let err = gateway
            .add_transition(
                "wf-1",
                "draft",
                "ghost",
                TransitionDraft {
                    name: "Nowhere".to_string(),
                    requires_approval: false,
                    approver_role: String::new(),
                    condition_expression: serde_json::Value::Null,
                    display_order: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_validate_workflow_flags_missing_initial() {
        let gateway = InMemoryGateway::new();
        gateway.seed_workflow(Workflow {
            id: "wf-2".to_string(),
            name: "No entry".to_string(),
            states: vec![],
            transitions: vec![],
        });

        let check = gateway.validate_workflow("wf-2").await.unwrap();
        assert!(!check.valid);
        assert!(check
            .errors
            .iter()
            .any(|e| e.contains("no initial state")));
    }

    #[tokio::test]
    async fn test_delete_state_cascades_transitions_in_store() {
        let gateway = seeded();
        gateway.delete_state("wf-1", "draft").await.unwrap();

        let workflow = gateway.get_workflow("wf-1").await.unwrap();
        assert_eq!(workflow.states.len(), 1);
        assert!(workflow.transitions.is_empty());
    }

    #[tokio::test]
    async fn test_list_workflows_summarizes() {
        let gateway = seeded();
        let summaries = gateway.list_workflows().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Publishing");
        assert_eq!(summaries[0].state_count, 2);
    }

    #[tokio::test]
    async fn test_get_unknown_workflow_is_not_found() {
        let gateway = InMemoryGateway::new();
        assert!(matches!(
            gateway.get_workflow("ghost").await,
            Err(GatewayError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_workflow_removes_it_from_listing() {
        let gateway = seeded();
        gateway.delete_workflow("wf-1").await.unwrap();

        assert!(gateway.list_workflows().await.unwrap().is_empty());
        assert!(matches!(
            gateway.get_workflow("wf-1").await,
            Err(GatewayError::NotFound(_))
        ));
        assert!(matches!(
            gateway.delete_workflow("wf-1").await,
            Err(GatewayError::NotFound(_))
        ));
    }
}
