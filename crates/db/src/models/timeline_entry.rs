//! Timeline entry row model.

use serde::Serialize;
use sqlx::FromRow;

use agencydesk_core::attachment::Attachment;
use agencydesk_core::error::CoreError;
use agencydesk_core::timeline::TimelineEntry;
use agencydesk_core::types::{EntryId, Timestamp};

/// A row from the `timeline_entries` table. The primary key is the
/// client-generated entry id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineEntryRow {
    pub id: EntryId,
    pub project_id: String,
    pub author_name: String,
    pub author_role: String,
    pub content: String,
    pub attachments: serde_json::Value,
    pub created_at: Timestamp,
}

impl TryFrom<TimelineEntryRow> for TimelineEntry {
    type Error = CoreError;

    fn try_from(row: TimelineEntryRow) -> Result<Self, Self::Error> {
        let attachments: Vec<Attachment> = serde_json::from_value(row.attachments)
            .map_err(|e| CoreError::Internal(format!("Invalid attachments column: {e}")))?;
        Ok(TimelineEntry {
            id: row.id,
            project_id: row.project_id,
            author_name: row.author_name,
            author_role: row.author_role,
            content: row.content,
            attachments,
            created_at: row.created_at,
            // A row read back from the store is confirmed by definition.
            is_optimistic: false,
        })
    }
}
