//! Postgres-backed implementations of the engine's store interfaces.

use async_trait::async_trait;

use agencydesk_core::error::CoreError;
use agencydesk_core::notification::{CreateNotification, Notification};
use agencydesk_core::project::{Account, CreateProject, Project, ProjectPatch};
use agencydesk_core::timeline::{CreateTimelineEntry, TimelineEntry};
use agencydesk_core::types::Timestamp;
use agencydesk_engine::store::{NotificationStore, ProjectStore, StoreError, TimelineStore};

use crate::repositories::{AccountRepo, NotificationRepo, ProjectRepo, TimelineRepo};
use crate::DbPool;

/// The engine's store collaborators, backed by one connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// The billing account directory the wizard selects from.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rows = AccountRepo::list(&self.pool).await.map_err(db_err)?;
        Ok(rows.into_iter().map(Account::from).collect())
    }
}

fn db_err(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn row_err(err: CoreError) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn insert_project(&self, create: CreateProject) -> Result<Project, StoreError> {
        let row = ProjectRepo::insert(&self.pool, &create)
            .await
            .map_err(db_err)?;
        Project::try_from(row).map_err(row_err)
    }

    async fn fetch_project(&self, project_id: &str) -> Result<Option<Project>, StoreError> {
        let row = ProjectRepo::get(&self.pool, project_id)
            .await
            .map_err(db_err)?;
        row.map(Project::try_from).transpose().map_err(row_err)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let rows = ProjectRepo::list(&self.pool).await.map_err(db_err)?;
        rows.into_iter()
            .map(|row| Project::try_from(row).map_err(row_err))
            .collect()
    }

    async fn update_project(
        &self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        let row = ProjectRepo::update(&self.pool, project_id, &patch)
            .await
            .map_err(db_err)?
            .ok_or_else(|| StoreError::NotFound(project_id.to_string()))?;
        Project::try_from(row).map_err(row_err)
    }

    async fn delete_project(&self, project_id: &str) -> Result<u64, StoreError> {
        ProjectRepo::delete(&self.pool, project_id)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl TimelineStore for PgStore {
    async fn insert_entry(&self, create: CreateTimelineEntry) -> Result<TimelineEntry, StoreError> {
        let row = TimelineRepo::insert(&self.pool, &create)
            .await
            .map_err(db_err)?;
        TimelineEntry::try_from(row).map_err(row_err)
    }

    async fn fetch_page(
        &self,
        project_id: &str,
        before: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<TimelineEntry>, StoreError> {
        let rows = TimelineRepo::page(&self.pool, project_id, before, limit)
            .await
            .map_err(db_err)?;
        rows.into_iter()
            .map(|row| TimelineEntry::try_from(row).map_err(row_err))
            .collect()
    }
}

#[async_trait]
impl NotificationStore for PgStore {
    async fn create_notification(
        &self,
        create: CreateNotification,
    ) -> Result<Notification, StoreError> {
        let row = NotificationRepo::create(&self.pool, &create)
            .await
            .map_err(db_err)?;
        Ok(Notification::from(row))
    }

    async fn delete_for_reference(&self, reference_id: &str) -> Result<u64, StoreError> {
        NotificationRepo::delete_for_reference(&self.pool, reference_id)
            .await
            .map_err(db_err)
    }
}
