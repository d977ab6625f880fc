//! Repository for the `accounts` table.

use sqlx::PgPool;

use crate::models::account::AccountRow;

/// Column list for `accounts` queries.
const COLUMNS: &str = "id, name, billing_prefix";

/// Read access to the billing account directory the wizard selects
/// from.
pub struct AccountRepo;

impl AccountRepo {
    /// List all accounts, alphabetically by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<AccountRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts ORDER BY name");
        sqlx::query_as::<_, AccountRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch a single account by id.
    pub async fn get(pool: &PgPool, id: &str) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
