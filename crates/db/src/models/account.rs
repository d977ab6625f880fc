//! Billing account row model.

use serde::Serialize;
use sqlx::FromRow;

use agencydesk_core::project::Account;

/// A row from the `accounts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub billing_prefix: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            name: row.name,
            billing_prefix: row.billing_prefix,
        }
    }
}
