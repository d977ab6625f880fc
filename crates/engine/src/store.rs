//! Abstract interfaces to the external store collaborators.
//!
//! The engine never talks to a concrete backend: persistence, file
//! conversion, and webhook transport are all consumed through these
//! traits. `agencydesk-db` provides the Postgres implementations; the
//! integration tests provide in-memory fakes with failure injection.

use async_trait::async_trait;

use agencydesk_core::attachment::{Attachment, FileData};
use agencydesk_core::error::CoreError;
use agencydesk_core::notification::{CreateNotification, Notification};
use agencydesk_core::project::{CreateProject, Project, ProjectPatch};
use agencydesk_core::timeline::{CreateTimelineEntry, TimelineEntry};
use agencydesk_core::types::Timestamp;
use agencydesk_events::{DashboardEvent, WebhookDelivery};

/// Error type for store collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),

    #[error("No row found for {0}")]
    NotFound(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Store(err.to_string())
    }
}

/// Project rows: insert, fetch, patch, delete, list.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert_project(&self, create: CreateProject) -> Result<Project, StoreError>;

    async fn fetch_project(&self, project_id: &str) -> Result<Option<Project>, StoreError>;

    /// All projects, newest-first.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Apply a partial update; returns the updated row.
    async fn update_project(
        &self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError>;

    /// Returns the number of deleted rows.
    async fn delete_project(&self, project_id: &str) -> Result<u64, StoreError>;
}

/// Timeline entries: client-keyed insert and cursor-paged reads.
#[async_trait]
pub trait TimelineStore: Send + Sync {
    /// Insert an entry under its client-chosen id and return the
    /// confirmed row.
    async fn insert_entry(&self, create: CreateTimelineEntry) -> Result<TimelineEntry, StoreError>;

    /// Fetch up to `limit` entries for a project, newest-first.
    /// `before` is an exclusive upper bound on `created_at`.
    async fn fetch_page(
        &self,
        project_id: &str,
        before: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<TimelineEntry>, StoreError>;
}

/// Notifications: creation and cascading deletion by referenced project.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create_notification(
        &self,
        create: CreateNotification,
    ) -> Result<Notification, StoreError>;

    /// Delete every notification referencing a project id; returns the
    /// number of deleted rows.
    async fn delete_for_reference(&self, reference_id: &str) -> Result<u64, StoreError>;
}

/// Outbound webhook transport. Delivery/retry policy is owned by the
/// implementation; the engine fires and forgets.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn dispatch(&self, event: DashboardEvent) -> Result<(), StoreError>;
}

/// Converts a user-chosen file into an embeddable [`Attachment`]
/// (hosted URL or data URI). Owned by the file-storage collaborator.
#[async_trait]
pub trait AttachmentEncoder: Send + Sync {
    async fn encode(&self, file: &FileData) -> Result<Attachment, StoreError>;
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

#[async_trait]
impl WebhookSink for WebhookDelivery {
    async fn dispatch(&self, event: DashboardEvent) -> Result<(), StoreError> {
        self.deliver(&event)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
