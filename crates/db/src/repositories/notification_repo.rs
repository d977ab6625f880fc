//! Repository for the `notifications` table.

use sqlx::PgPool;

use agencydesk_core::notification::CreateNotification;
use agencydesk_core::types::DbId;

use crate::models::notification::NotificationRow;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, kind, reference_id, message, is_read, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification, returning the stored row. New
    /// notifications start unread.
    pub async fn create(
        pool: &PgPool,
        create: &CreateNotification,
    ) -> Result<NotificationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (kind, reference_id, message) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(&create.kind)
            .bind(&create.reference_id)
            .bind(&create.message)
            .fetch_one(pool)
            .await
    }

    /// List notifications, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with
    /// `is_read = false` are returned.
    pub async fn list(
        pool: &PgPool,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NotificationRow>, sqlx::Error> {
        let filter = if unread_only {
            "WHERE is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications {filter} \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found and updated, `false`
    /// otherwise.
    pub async fn mark_read(pool: &PgPool, notification_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true \
             WHERE id = $1 AND is_read = false",
        )
        .bind(notification_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true \
             WHERE is_read = false",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of unread notifications.
    pub async fn unread_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE is_read = false")
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }

    /// Delete every notification referencing a project id.
    ///
    /// Returns the number of deleted rows.
    pub async fn delete_for_reference(
        pool: &PgPool,
        reference_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE reference_id = $1")
            .bind(reference_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
