//! Repository for the `timeline_entries` table.

use sqlx::types::Json;
use sqlx::PgPool;

use agencydesk_core::timeline::CreateTimelineEntry;
use agencydesk_core::types::Timestamp;

use crate::models::timeline_entry::TimelineEntryRow;

/// Column list for `timeline_entries` queries.
const COLUMNS: &str = "id, project_id, author_name, author_role, content, attachments, created_at";

/// Provides insert and cursor-paged reads for timeline entries.
pub struct TimelineRepo;

impl TimelineRepo {
    /// Insert an entry under its client-chosen id, returning the stored
    /// row.
    pub async fn insert(
        pool: &PgPool,
        create: &CreateTimelineEntry,
    ) -> Result<TimelineEntryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO timeline_entries (id, project_id, author_name, author_role, content, \
             attachments) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimelineEntryRow>(&query)
            .bind(create.id)
            .bind(&create.project_id)
            .bind(&create.author_name)
            .bind(&create.author_role)
            .bind(&create.content)
            .bind(Json(&create.attachments))
            .fetch_one(pool)
            .await
    }

    /// Fetch up to `limit` entries for a project, newest first.
    ///
    /// When `before` is given it is an exclusive upper bound on
    /// `created_at`, which is how backward pagination walks into older
    /// history.
    pub async fn page(
        pool: &PgPool,
        project_id: &str,
        before: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<TimelineEntryRow>, sqlx::Error> {
        match before {
            Some(cursor) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM timeline_entries \
                     WHERE project_id = $1 AND created_at < $2 \
                     ORDER BY created_at DESC \
                     LIMIT $3"
                );
                sqlx::query_as::<_, TimelineEntryRow>(&query)
                    .bind(project_id)
                    .bind(cursor)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM timeline_entries \
                     WHERE project_id = $1 \
                     ORDER BY created_at DESC \
                     LIMIT $2"
                );
                sqlx::query_as::<_, TimelineEntryRow>(&query)
                    .bind(project_id)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
