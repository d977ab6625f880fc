//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`DashboardEvent`]s,
//! shared via `Arc<EventBus>`. The timeline and submission layers publish
//! here so sibling views (project list, timeline, notification badge)
//! can refresh without being wired to each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A project was created through the wizard.
pub const EVENT_PROJECT_CREATED: &str = "project.created";

/// A project was removed through the wizard.
pub const EVENT_PROJECT_REMOVED: &str = "project.removed";

/// A project's status changed (wizard or timeline action).
pub const EVENT_STATUS_CHANGED: &str = "project.status_changed";

/// A timeline entry was posted.
pub const EVENT_TIMELINE_UPDATED: &str = "project.timeline_updated";

// ---------------------------------------------------------------------------
// DashboardEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEvent {
    /// Dot-separated event name, e.g. `"project.status_changed"`.
    pub event_type: String,

    /// Project id the event refers to, when there is one.
    pub project_id: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DashboardEvent {
    /// Create an event with only its type; the payload defaults to an
    /// empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            project_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the subject project.
    pub fn for_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the JSON payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity. When the buffer is
    /// full the oldest un-consumed events are dropped and slow receivers
    /// observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. With zero
    /// subscribers the event is silently dropped.
    pub fn publish(&self, event: DashboardEvent) {
        // SendError only means there are no receivers right now.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
