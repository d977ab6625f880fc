//! Local-first activity feed for one open project view.
//!
//! Writes follow an append-then-reconcile-by-id protocol: the entry is
//! appended (flagged optimistic) before the insert is issued, under an id
//! generated up front and used as the row's primary key. Confirmation
//! flips the flag in place, matched by that id; there is no re-fetch and
//! no re-sort, so confirmed and optimistic entries never reorder or
//! duplicate. Failures remove the entry and restore the composer.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use agencydesk_core::attachment::Attachment;
use agencydesk_core::error::CoreError;
use agencydesk_core::notification::{CreateNotification, KIND_STATUS_UPDATE, KIND_TIMELINE_UPDATE};
use agencydesk_core::project::ProjectPatch;
use agencydesk_core::status::ProjectStatus;
use agencydesk_core::timeline::{
    encode_status_change, notification_snippet, CreateTimelineEntry, TimelineEntry,
};
use agencydesk_events::bus::{EVENT_STATUS_CHANGED, EVENT_TIMELINE_UPDATED};
use agencydesk_events::{DashboardEvent, EventBus};

use crate::pager::{TimelinePage, TimelinePager};
use crate::store::{NotificationStore, ProjectStore, TimelineStore};

/// Compose-box state: what the user has typed and attached but not yet
/// posted. Restored verbatim when a post fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composer {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl Composer {
    fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.attachments.is_empty()
    }
}

/// The ordered feed for one project, with optimistic writes.
///
/// Entries are kept in ascending `created_at` order (oldest first), even
/// though pagination queries newest-first.
pub struct OptimisticTimelineStore {
    project_id: String,
    author_name: String,
    author_role: String,
    status: ProjectStatus,
    entries: Vec<TimelineEntry>,
    has_more: bool,
    composer: Composer,
    posting: bool,
    pager: TimelinePager,
    store: Arc<dyn TimelineStore>,
    projects: Arc<dyn ProjectStore>,
    notifications: Arc<dyn NotificationStore>,
    bus: Arc<EventBus>,
}

impl OptimisticTimelineStore {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project_id: impl Into<String>,
        current_status: ProjectStatus,
        author_name: impl Into<String>,
        author_role: impl Into<String>,
        store: Arc<dyn TimelineStore>,
        projects: Arc<dyn ProjectStore>,
        notifications: Arc<dyn NotificationStore>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            author_name: author_name.into(),
            author_role: author_role.into(),
            status: current_status,
            entries: Vec::new(),
            has_more: false,
            composer: Composer::default(),
            posting: false,
            pager: TimelinePager::new(Arc::clone(&store)),
            store,
            projects,
            notifications,
            bus,
        }
    }

    /// The feed, oldest first.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn is_posting(&self) -> bool {
        self.posting
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.composer.text = text.into();
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.composer.attachments.push(attachment);
    }

    // -----------------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------------

    /// Load the most recent page, replacing the feed.
    pub async fn load_initial(&mut self) -> Result<(), CoreError> {
        let TimelinePage { entries, has_more } =
            self.pager.fetch_initial(&self.project_id).await?;
        self.entries = entries;
        self.has_more = has_more;
        Ok(())
    }

    /// Fetch the next older page and prepend it.
    ///
    /// No-op (returns `false`) while a fetch is in flight or when the
    /// feed is empty. Prepending — never appending, never re-sorting —
    /// is what keeps already-rendered entries stable and duplicate-free.
    pub async fn load_older(&mut self) -> Result<bool, CoreError> {
        let Some(oldest) = self.entries.first().map(|e| e.created_at) else {
            return Ok(false);
        };
        let Some(TimelinePage { entries, has_more }) =
            self.pager.fetch_older(&self.project_id, oldest).await?
        else {
            return Ok(false);
        };
        let mut merged = entries;
        merged.append(&mut self.entries);
        self.entries = merged;
        self.has_more = has_more;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Posting
    // -----------------------------------------------------------------------

    /// Post the composer contents as a comment.
    ///
    /// Returns `false` without side effects when there is nothing to post
    /// or a post is already in flight. The entry appears (flagged
    /// optimistic) and the composer clears before the insert is issued;
    /// on failure both are restored and the error surfaces.
    pub async fn post_comment(&mut self) -> Result<bool, CoreError> {
        if self.posting || self.composer.is_empty() {
            return Ok(false);
        }

        let draft = std::mem::take(&mut self.composer);
        let id = Uuid::new_v4();
        self.entries.push(TimelineEntry {
            id,
            project_id: self.project_id.clone(),
            author_name: self.author_name.clone(),
            author_role: self.author_role.clone(),
            content: draft.text.clone(),
            attachments: draft.attachments.clone(),
            created_at: Utc::now(),
            is_optimistic: true,
        });

        self.posting = true;
        let result = self
            .store
            .insert_entry(CreateTimelineEntry {
                id,
                project_id: self.project_id.clone(),
                author_name: self.author_name.clone(),
                author_role: self.author_role.clone(),
                content: draft.text.clone(),
                attachments: draft.attachments.clone(),
            })
            .await;
        self.posting = false;

        match result {
            Ok(_confirmed) => {
                self.confirm_entry(id);
                let snippet = notification_snippet(&draft.text, !draft.attachments.is_empty());
                self.spawn_notification(KIND_TIMELINE_UPDATE, snippet);
                self.bus.publish(
                    DashboardEvent::new(EVENT_TIMELINE_UPDATED).for_project(&self.project_id),
                );
                Ok(true)
            }
            Err(err) => {
                // Roll back and hand the user their input back.
                self.entries.retain(|e| e.id != id);
                self.composer = draft;
                Err(err.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Status changes
    // -----------------------------------------------------------------------

    /// Change the project's status, optimistically.
    ///
    /// The visible status flips immediately and reverts if the write
    /// fails. On success a status-change entry is synthesized into the
    /// feed (same optimistic protocol as comments), a notification is
    /// fired, and the change is published so sibling views refresh.
    pub async fn change_status(&mut self, new_status: ProjectStatus) -> Result<(), CoreError> {
        let old = self.status;
        self.status = new_status;

        if let Err(err) = self
            .projects
            .update_project(&self.project_id, ProjectPatch::status_only(new_status))
            .await
        {
            self.status = old;
            return Err(err.into());
        }
        tracing::info!(
            project_id = %self.project_id,
            old = %old,
            new = %new_status,
            "Project status changed"
        );

        // The marker entry encodes old and new losslessly so the feed can
        // render the transition later.
        let id = Uuid::new_v4();
        let content = encode_status_change(old, new_status);
        self.entries.push(TimelineEntry {
            id,
            project_id: self.project_id.clone(),
            author_name: self.author_name.clone(),
            author_role: self.author_role.clone(),
            content: content.clone(),
            attachments: Vec::new(),
            created_at: Utc::now(),
            is_optimistic: true,
        });
        match self
            .store
            .insert_entry(CreateTimelineEntry {
                id,
                project_id: self.project_id.clone(),
                author_name: self.author_name.clone(),
                author_role: self.author_role.clone(),
                content,
                attachments: Vec::new(),
            })
            .await
        {
            Ok(_) => self.confirm_entry(id),
            Err(err) => {
                // The status write already succeeded; losing the marker
                // entry must not fail the action.
                self.entries.retain(|e| e.id != id);
                tracing::warn!(error = %err, "Failed to record status-change entry");
            }
        }

        self.spawn_notification(
            KIND_STATUS_UPDATE,
            format!("Status changed from {old} to {new_status}"),
        );
        self.bus.publish(
            DashboardEvent::new(EVENT_STATUS_CHANGED)
                .for_project(&self.project_id)
                .with_payload(serde_json::json!({
                    "old": old.as_str(),
                    "new": new_status.as_str(),
                })),
        );
        Ok(())
    }

    /// Flip the optimistic flag off in place, matched by id. Never
    /// re-sorts: a confirmation arriving after later appends must not
    /// reorder the feed.
    fn confirm_entry(&mut self, id: Uuid) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.is_optimistic = false;
        }
    }

    fn spawn_notification(&self, kind: &str, message: String) {
        let store = Arc::clone(&self.notifications);
        let create = CreateNotification::new(kind, &self.project_id, message);
        tokio::spawn(async move {
            if let Err(err) = store.create_notification(create).await {
                tracing::warn!(error = %err, "Notification creation failed");
            }
        });
    }
}
