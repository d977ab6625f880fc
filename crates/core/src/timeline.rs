//! Timeline entry model and the status-change content encoding.
//!
//! A timeline entry is either a free-text comment or a status-change
//! marker. Markers reuse the comment `content` field: a reserved prefix
//! followed by the old and new status strings separated by `|`. The
//! statuses themselves never contain `|`, so the encoding is lossless.

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::status::ProjectStatus;
use crate::types::{EntryId, Timestamp};

/// Reserved prefix marking an entry as a status change.
pub const STATUS_CHANGE_PREFIX: &str = "__STATUS_CHANGE__:";

/// Delimiter between the old and new status inside a marker.
pub const STATUS_CHANGE_DELIMITER: char = '|';

/// Maximum length (in characters) of a comment snippet used in
/// timeline-update notifications.
pub const SNIPPET_MAX_CHARS: usize = 30;

/// Notification message used when a post carries only attachments.
pub const FILES_ADDED_MESSAGE: &str = "New files were added";

// ---------------------------------------------------------------------------
// Entry model
// ---------------------------------------------------------------------------

/// One entry in a project's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Client-generated stable id, also the row's primary key.
    pub id: EntryId,
    pub project_id: String,
    pub author_name: String,
    pub author_role: String,
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub created_at: Timestamp,
    /// True while the backing write is unconfirmed. In-memory only,
    /// never persisted.
    #[serde(skip)]
    pub is_optimistic: bool,
}

/// DTO for inserting a timeline entry. The id is chosen by the client
/// before the insert so the confirmed row can be matched by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTimelineEntry {
    pub id: EntryId,
    pub project_id: String,
    pub author_name: String,
    pub author_role: String,
    pub content: String,
    pub attachments: Vec<Attachment>,
}

/// How an entry renders: plain comment card or status-change card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Comment,
    StatusChange {
        old: ProjectStatus,
        new: ProjectStatus,
    },
}

impl TimelineEntry {
    /// Rendering dispatch over the entry content.
    pub fn kind(&self) -> EntryKind {
        match decode_status_change(&self.content) {
            Some((old, new)) => EntryKind::StatusChange { old, new },
            None => EntryKind::Comment,
        }
    }
}

// ---------------------------------------------------------------------------
// Status-change encoding
// ---------------------------------------------------------------------------

/// Encode an old→new status transition into entry content.
pub fn encode_status_change(old: ProjectStatus, new: ProjectStatus) -> String {
    format!(
        "{STATUS_CHANGE_PREFIX}{}{STATUS_CHANGE_DELIMITER}{}",
        old.as_str(),
        new.as_str()
    )
}

/// Decode a status-change marker. Returns `None` for plain comments or
/// markers that do not parse back to two valid statuses.
pub fn decode_status_change(content: &str) -> Option<(ProjectStatus, ProjectStatus)> {
    let rest = content.strip_prefix(STATUS_CHANGE_PREFIX)?;
    let (old, new) = rest.split_once(STATUS_CHANGE_DELIMITER)?;
    let old = ProjectStatus::from_str_db(old).ok()?;
    let new = ProjectStatus::from_str_db(new).ok()?;
    Some((old, new))
}

// ---------------------------------------------------------------------------
// Notification snippets
// ---------------------------------------------------------------------------

/// Build the timeline-update notification message for a post: a snippet
/// of the comment text capped at [`SNIPPET_MAX_CHARS`] characters, or the
/// fixed files-added phrase when only attachments were posted.
pub fn notification_snippet(content: &str, has_attachments: bool) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() && has_attachments {
        return FILES_ADDED_MESSAGE.to_string();
    }
    trimmed.chars().take(SNIPPET_MAX_CHARS).collect()
}
