//! The fixed project status vocabulary, including compound variants.
//!
//! Statuses are stored as their canonical display strings. Compound
//! variants join their parts with `", "`, which never collides with the
//! `|` delimiter used by the timeline status-change encoding.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of a project, as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    InProgress,
    Revision,
    RevisionUrgent,
    RevisionDone,
    RevisionUrgentDone,
    Urgent,
    UrgentDone,
    Done,
    Approved,
    Cancelled,
    Removed,
}

/// Every valid status, in display order.
pub const ALL_STATUSES: [ProjectStatus; 11] = [
    ProjectStatus::InProgress,
    ProjectStatus::Revision,
    ProjectStatus::RevisionUrgent,
    ProjectStatus::RevisionDone,
    ProjectStatus::RevisionUrgentDone,
    ProjectStatus::Urgent,
    ProjectStatus::UrgentDone,
    ProjectStatus::Done,
    ProjectStatus::Approved,
    ProjectStatus::Cancelled,
    ProjectStatus::Removed,
];

impl ProjectStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "In Progress" => Ok(Self::InProgress),
            "Revision" => Ok(Self::Revision),
            "Revision, Urgent" => Ok(Self::RevisionUrgent),
            "Revision, Done" => Ok(Self::RevisionDone),
            "Revision, Urgent, Done" => Ok(Self::RevisionUrgentDone),
            "Urgent" => Ok(Self::Urgent),
            "Urgent, Done" => Ok(Self::UrgentDone),
            "Done" => Ok(Self::Done),
            "Approved" => Ok(Self::Approved),
            "Cancelled" => Ok(Self::Cancelled),
            "Removed" => Ok(Self::Removed),
            _ => Err(CoreError::Validation(format!("Invalid project status '{s}'"))),
        }
    }

    /// Canonical display/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Revision => "Revision",
            Self::RevisionUrgent => "Revision, Urgent",
            Self::RevisionDone => "Revision, Done",
            Self::RevisionUrgentDone => "Revision, Urgent, Done",
            Self::Urgent => "Urgent",
            Self::UrgentDone => "Urgent, Done",
            Self::Done => "Done",
            Self::Approved => "Approved",
            Self::Cancelled => "Cancelled",
            Self::Removed => "Removed",
        }
    }

    /// Terminal statuses can no longer be changed from the timeline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Cancelled | Self::Removed)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
