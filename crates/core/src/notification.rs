//! Notification model shared by the engine and the store.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Notification kind for a newly created project.
pub const KIND_PROJECT_CREATED: &str = "project_created";

/// Notification kind for a new timeline comment.
pub const KIND_TIMELINE_UPDATE: &str = "timeline_update";

/// Notification kind for a project status change.
pub const KIND_STATUS_UPDATE: &str = "status_update";

/// A notification row from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub kind: String,
    /// Project id the notification refers to.
    pub reference_id: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a notification. New notifications start unread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNotification {
    pub kind: String,
    pub reference_id: String,
    pub message: String,
}

impl CreateNotification {
    pub fn new(
        kind: impl Into<String>,
        reference_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            reference_id: reference_id.into(),
            message: message.into(),
        }
    }
}
