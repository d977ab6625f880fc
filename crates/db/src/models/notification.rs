//! Notification row model.

use serde::Serialize;
use sqlx::FromRow;

use agencydesk_core::notification::Notification;
use agencydesk_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationRow {
    pub id: DbId,
    pub kind: String,
    pub reference_id: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            kind: row.kind,
            reference_id: row.reference_id,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}
