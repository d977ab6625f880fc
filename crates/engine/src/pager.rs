//! Backward pagination over a reverse-chronological feed.
//!
//! The feed is displayed oldest-at-top, so pages are fetched newest-first
//! and reversed before they are merged. Each fetch asks for one row more
//! than is displayed: that sentinel row only signals that older history
//! exists and is never shown.

use std::sync::Arc;

use agencydesk_core::error::CoreError;
use agencydesk_core::timeline::TimelineEntry;
use agencydesk_core::types::Timestamp;

use crate::store::TimelineStore;

/// Entries displayed per page.
pub const PAGE_SIZE: usize = 5;

/// Rows requested per fetch (one sentinel beyond the page).
pub const FETCH_SIZE: i64 = PAGE_SIZE as i64 + 1;

/// One fetched page, reversed to ascending `created_at` order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePage {
    pub entries: Vec<TimelineEntry>,
    pub has_more: bool,
}

/// Apply the sentinel rule to a newest-first batch: a full batch means
/// more history exists and the oldest row is dropped; anything shorter is
/// kept whole. The result is reversed to ascending order.
pub fn page_from_batch(mut batch: Vec<TimelineEntry>) -> TimelinePage {
    let has_more = batch.len() as i64 == FETCH_SIZE;
    if has_more {
        batch.truncate(PAGE_SIZE);
    }
    batch.reverse();
    TimelinePage {
        entries: batch,
        has_more,
    }
}

/// Fetches pages for one project's feed.
pub struct TimelinePager {
    store: Arc<dyn TimelineStore>,
    loading: bool,
}

impl TimelinePager {
    pub fn new(store: Arc<dyn TimelineStore>) -> Self {
        Self {
            store,
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the most recent page.
    pub async fn fetch_initial(&mut self, project_id: &str) -> Result<TimelinePage, CoreError> {
        let batch = self.store.fetch_page(project_id, None, FETCH_SIZE).await?;
        Ok(page_from_batch(batch))
    }

    /// Fetch the page strictly older than `before`. Returns `None` when a
    /// fetch is already in flight (the call is dropped, not queued).
    pub async fn fetch_older(
        &mut self,
        project_id: &str,
        before: Timestamp,
    ) -> Result<Option<TimelinePage>, CoreError> {
        if self.loading {
            return Ok(None);
        }
        self.loading = true;
        let result = self
            .store
            .fetch_page(project_id, Some(before), FETCH_SIZE)
            .await;
        self.loading = false;
        Ok(Some(page_from_batch(result?)))
    }
}
