//! Postgres persistence layer: row models, repositories, and the
//! [`store::PgStore`] adapter that plugs them into the engine's store
//! interfaces.

use sqlx::postgres::PgPoolOptions;

pub mod connect;
pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}
