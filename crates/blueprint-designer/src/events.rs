//! Designer event stream
//!
//! Events let the hosting shell surface notifications (toasts, a status
//! bar) without coupling the session to a UI framework. A sink failure
//! never aborts an edit.

use serde::{Deserialize, Serialize};

/// Trait for delivering designer events
///
/// This abstracts over the transport mechanism (UI channel, mpsc,
/// etc.) so the session can run in different hosts.
pub trait EventSink: Send + Sync {
    /// Deliver an event
    ///
    /// Returns an error if the event could not be delivered (e.g.,
    /// channel closed).
    fn send(&self, event: DesignerEvent) -> Result<(), EventError>;
}

/// Error when delivering events fails
#[derive(Debug, Clone)]
pub struct EventError {
    pub message: String,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event error: {}", self.message)
    }
}

impl std::error::Error for EventError {}

impl EventError {
    pub fn channel_closed() -> Self {
        Self {
            message: "Channel closed".to_string(),
        }
    }
}

/// Events emitted by a designer session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DesignerEvent {
    /// Graph replaced from the backend
    #[serde(rename_all = "camelCase")]
    WorkflowHydrated {
        workflow_id: String,
        states: usize,
        transitions: usize,
    },

    /// A state was accepted by the backend and placed on the canvas
    #[serde(rename_all = "camelCase")]
    StateAdded {
        workflow_id: String,
        state_id: String,
    },

    /// A state was deleted along with its transitions
    #[serde(rename_all = "camelCase")]
    StateRemoved {
        workflow_id: String,
        state_id: String,
        dropped_transitions: Vec<String>,
    },

    /// A pending transition was accepted and committed
    #[serde(rename_all = "camelCase")]
    TransitionCommitted {
        workflow_id: String,
        transition_id: String,
    },

    /// The pending connection was abandoned
    #[serde(rename_all = "camelCase")]
    ConnectionCancelled { workflow_id: String },

    /// The backend rejected a commit; the dialog stays open
    #[serde(rename_all = "camelCase")]
    CommitRejected {
        workflow_id: String,
        errors: Vec<String>,
    },

    /// The backend could not be reached; the edit can be retried
    #[serde(rename_all = "camelCase")]
    GatewayOffline {
        workflow_id: String,
        detail: String,
    },
}

/// A no-op sink that discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: DesignerEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: std::sync::Mutex<Vec<DesignerEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<DesignerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: DesignerEvent) -> Result<(), EventError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
