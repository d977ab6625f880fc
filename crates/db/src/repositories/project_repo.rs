//! Repository for the `projects` table.

use sqlx::types::Json;
use sqlx::PgPool;

use agencydesk_core::project::{CreateProject, ProjectPatch};

use crate::models::project::ProjectRow;

/// Column list for `projects` queries.
const COLUMNS: &str = "project_id, title, brief, status, account_id, client_type, client_name, \
     previous_logo_no, medium, price, designer_fee, attachments, collaborators, due_date, \
     due_time, assignee_name, tips_given, tip_amount, cancellation_reason, in_dispute, \
     art_help_requested, created_at, updated_at";

/// Provides CRUD operations for projects, keyed by the human-meaningful
/// project id.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project, returning the stored row.
    pub async fn insert(pool: &PgPool, create: &CreateProject) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (project_id, title, brief, status, account_id, client_type, \
             client_name, previous_logo_no, medium, price, attachments, due_date, due_time, \
             assignee_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&create.project_id)
            .bind(&create.title)
            .bind(&create.brief)
            .bind(create.status.as_str())
            .bind(&create.account_id)
            .bind(&create.client_type)
            .bind(&create.client_name)
            .bind(&create.previous_logo_no)
            .bind(&create.medium)
            .bind(create.price)
            .bind(Json(&create.attachments))
            .bind(&create.due_date)
            .bind(&create.due_time)
            .bind(&create.assignee_name)
            .fetch_one(pool)
            .await
    }

    /// Fetch a project by id.
    pub async fn get(pool: &PgPool, project_id: &str) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE project_id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Absent patch fields leave the stored
    /// values untouched. Returns the updated row, or `None` when the
    /// project does not exist.
    pub async fn update(
        pool: &PgPool,
        project_id: &str,
        patch: &ProjectPatch,
    ) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
             status = COALESCE($2, status), \
             cancellation_reason = COALESCE($3, cancellation_reason), \
             tips_given = COALESCE($4, tips_given), \
             tip_amount = COALESCE($5, tip_amount), \
             updated_at = NOW() \
             WHERE project_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(project_id)
            .bind(patch.status.map(|s| s.as_str()))
            .bind(&patch.cancellation_reason)
            .bind(patch.tips_given)
            .bind(patch.tip_amount)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Returns the number of deleted rows.
    pub async fn delete(pool: &PgPool, project_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
