//! Project row model.

use serde::Serialize;
use sqlx::FromRow;

use agencydesk_core::attachment::Attachment;
use agencydesk_core::error::CoreError;
use agencydesk_core::project::Project;
use agencydesk_core::status::ProjectStatus;
use agencydesk_core::types::Timestamp;

/// A row from the `projects` table. Status and attachments are held in
/// their stored encodings and parsed on conversion to the domain model.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRow {
    pub project_id: String,
    pub title: String,
    pub brief: String,
    pub status: String,
    pub account_id: String,
    pub client_type: Option<String>,
    pub client_name: Option<String>,
    pub previous_logo_no: Option<String>,
    pub medium: Option<String>,
    pub price: f64,
    pub designer_fee: f64,
    pub attachments: serde_json::Value,
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

impl TryFrom<ProjectRow> for Project {
    type Error = CoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = ProjectStatus::from_str_db(&row.status)?;
        let attachments: Vec<Attachment> = serde_json::from_value(row.attachments)
            .map_err(|e| CoreError::Internal(format!("Invalid attachments column: {e}")))?;
        Ok(Project {
            project_id: row.project_id,
            title: row.title,
            brief: row.brief,
            status,
            account_id: row.account_id,
            client_type: row.client_type,
            client_name: row.client_name,
            previous_logo_no: row.previous_logo_no,
            medium: row.medium,
            price: row.price,
            designer_fee: row.designer_fee,
            attachments,
            collaborators: row.collaborators,
            due_date: row.due_date,
            due_time: row.due_time,
            assignee_name: row.assignee_name,
            tips_given: row.tips_given,
            tip_amount: row.tip_amount,
            cancellation_reason: row.cancellation_reason,
            in_dispute: row.in_dispute,
            art_help_requested: row.art_help_requested,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
