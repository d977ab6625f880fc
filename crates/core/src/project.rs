//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::status::ProjectStatus;
use crate::types::Timestamp;

/// A project as stored by the external data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Human-meaningful id, format `PREFIX NNNNNN`.
    pub project_id: String,
    pub title: String,
    pub brief: String,
    pub status: ProjectStatus,
    pub account_id: String,
    pub client_type: Option<String>,
    pub client_name: Option<String>,
    pub previous_logo_no: Option<String>,
    pub medium: Option<String>,
    pub price: f64,
    pub designer_fee: f64,
    pub attachments: Vec<Attachment>,
    pub collaborators: Vec<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub assignee_name: Option<String>,
    pub tips_given: bool,
    pub tip_amount: f64,
    pub cancellation_reason: Option<String>,
    pub in_dispute: bool,
    pub art_help_requested: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new project. The id is already resolved and the
/// attachments already converted when this is handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProject {
    pub project_id: String,
    pub title: String,
    pub brief: String,
    pub status: ProjectStatus,
    pub account_id: String,
    pub client_type: Option<String>,
    pub client_name: Option<String>,
    pub previous_logo_no: Option<String>,
    pub medium: Option<String>,
    pub price: f64,
    pub attachments: Vec<Attachment>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub assignee_name: Option<String>,
}

/// Partial status update applied by the Cancel/Approve moves and the
/// timeline status-change action. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub status: Option<ProjectStatus>,
    pub cancellation_reason: Option<String>,
    pub tips_given: Option<bool>,
    pub tip_amount: Option<f64>,
}

impl ProjectPatch {
    /// Patch for the Cancel move.
    pub fn cancelled(reason: String) -> Self {
        Self {
            status: Some(ProjectStatus::Cancelled),
            cancellation_reason: Some(reason),
            ..Default::default()
        }
    }

    /// Patch for the Approve move. `tip_amount` is zero when no tip.
    pub fn approved(tips_given: bool, tip_amount: f64) -> Self {
        Self {
            status: Some(ProjectStatus::Approved),
            tips_given: Some(tips_given),
            tip_amount: Some(tip_amount),
            ..Default::default()
        }
    }

    /// Patch for a bare timeline status change.
    pub fn status_only(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// A billing account a project is created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// 2-4 uppercase letters; the project id prefix.
    pub billing_prefix: String,
}
