//! In-memory store collaborators with failure injection, shared by the
//! integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use agencydesk_core::attachment::{Attachment, FileData};
use agencydesk_core::notification::{CreateNotification, Notification};
use agencydesk_core::project::{Account, CreateProject, Project, ProjectPatch};
use agencydesk_core::status::ProjectStatus;
use agencydesk_core::timeline::{CreateTimelineEntry, TimelineEntry};
use agencydesk_core::types::Timestamp;
use agencydesk_engine::coordinator::SubmissionCoordinator;
use agencydesk_engine::session::WizardSession;
use agencydesk_engine::store::{
    AttachmentEncoder, NotificationStore, ProjectStore, StoreError, TimelineStore, WebhookSink,
};
use agencydesk_engine::timeline::OptimisticTimelineStore;
use agencydesk_events::{DashboardEvent, EventBus};
use uuid::Uuid;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// Poll a condition, yielding to background tasks between checks.
pub async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// One in-memory backend implementing every store trait, with per-call
/// failure switches.
#[derive(Default)]
pub struct MemoryStore {
    pub projects: Mutex<Vec<Project>>,
    pub entries: Mutex<Vec<TimelineEntry>>,
    pub notifications: Mutex<Vec<Notification>>,
    next_notification_id: AtomicI64,
    pub fail_project_insert: AtomicBool,
    pub fail_project_update: AtomicBool,
    pub fail_entry_insert: AtomicBool,
}

impl MemoryStore {
    pub fn seed_project(&self, project_id: &str, status: ProjectStatus) -> Project {
        let now = Utc::now();
        let project = Project {
            project_id: project_id.to_string(),
            title: format!("Seeded {project_id}"),
            brief: String::new(),
            status,
            account_id: "acct-1".into(),
            client_type: None,
            client_name: None,
            previous_logo_no: None,
            medium: None,
            price: 0.0,
            designer_fee: 0.0,
            attachments: Vec::new(),
            collaborators: Vec::new(),
            due_date: None,
            due_time: None,
            assignee_name: None,
            tips_given: false,
            tip_amount: 0.0,
            cancellation_reason: None,
            in_dispute: false,
            art_help_requested: false,
            created_at: now,
            updated_at: now,
        };
        self.projects.lock().unwrap().push(project.clone());
        project
    }

    pub fn seed_entry(
        &self,
        project_id: &str,
        content: &str,
        created_at: Timestamp,
    ) -> TimelineEntry {
        let entry = TimelineEntry {
            id: Uuid::new_v4(),
            project_id: project_id.to_string(),
            author_name: "Dana".into(),
            author_role: "manager".into(),
            content: content.to_string(),
            attachments: Vec::new(),
            created_at,
            is_optimistic: false,
        };
        self.entries.lock().unwrap().push(entry.clone());
        entry
    }

    pub fn seed_notification(&self, kind: &str, reference_id: &str, message: &str) -> Notification {
        let notification = Notification {
            id: self.next_notification_id.fetch_add(1, Ordering::SeqCst) + 1,
            kind: kind.to_string(),
            reference_id: reference_id.to_string(),
            message: message.to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        notification
    }

    pub fn project(&self, project_id: &str) -> Option<Project> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.project_id == project_id)
            .cloned()
    }

    pub fn notifications_for(&self, reference_id: &str) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.reference_id == reference_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert_project(&self, create: CreateProject) -> Result<Project, StoreError> {
        if self.fail_project_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("project insert failed".into()));
        }
        let mut projects = self.projects.lock().unwrap();
        if projects.iter().any(|p| p.project_id == create.project_id) {
            return Err(StoreError::Backend("duplicate project id".into()));
        }
        let now = Utc::now();
        let project = Project {
            project_id: create.project_id,
            title: create.title,
            brief: create.brief,
            status: create.status,
            account_id: create.account_id,
            client_type: create.client_type,
            client_name: create.client_name,
            previous_logo_no: create.previous_logo_no,
            medium: create.medium,
            price: create.price,
            designer_fee: 0.0,
            attachments: create.attachments,
            collaborators: Vec::new(),
            due_date: create.due_date,
            due_time: create.due_time,
            assignee_name: create.assignee_name,
            tips_given: false,
            tip_amount: 0.0,
            cancellation_reason: None,
            in_dispute: false,
            art_help_requested: false,
            created_at: now,
            updated_at: now,
        };
        projects.push(project.clone());
        Ok(project)
    }

    async fn fetch_project(&self, project_id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self.project(project_id))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects = self.projects.lock().unwrap().clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn update_project(
        &self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        if self.fail_project_update.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("project update failed".into()));
        }
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .iter_mut()
            .find(|p| p.project_id == project_id)
            .ok_or_else(|| StoreError::NotFound(project_id.to_string()))?;
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(reason) = patch.cancellation_reason {
            project.cancellation_reason = Some(reason);
        }
        if let Some(tips_given) = patch.tips_given {
            project.tips_given = tips_given;
        }
        if let Some(tip_amount) = patch.tip_amount {
            project.tip_amount = tip_amount;
        }
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn delete_project(&self, project_id: &str) -> Result<u64, StoreError> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.project_id != project_id);
        Ok((before - projects.len()) as u64)
    }
}

#[async_trait]
impl TimelineStore for MemoryStore {
    async fn insert_entry(&self, create: CreateTimelineEntry) -> Result<TimelineEntry, StoreError> {
        if self.fail_entry_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("entry insert failed".into()));
        }
        let entry = TimelineEntry {
            id: create.id,
            project_id: create.project_id,
            author_name: create.author_name,
            author_role: create.author_role,
            content: create.content,
            attachments: create.attachments,
            created_at: Utc::now(),
            is_optimistic: false,
        };
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn fetch_page(
        &self,
        project_id: &str,
        before: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<TimelineEntry>, StoreError> {
        let mut page: Vec<TimelineEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.project_id == project_id)
            .filter(|e| before.map_or(true, |cursor| e.created_at < cursor))
            .cloned()
            .collect();
        page.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page.truncate(limit as usize);
        Ok(page)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create_notification(
        &self,
        create: CreateNotification,
    ) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: self.next_notification_id.fetch_add(1, Ordering::SeqCst) + 1,
            kind: create.kind,
            reference_id: create.reference_id,
            message: create.message,
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn delete_for_reference(&self, reference_id: &str) -> Result<u64, StoreError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| n.reference_id != reference_id);
        Ok((before - notifications.len()) as u64)
    }
}

// ---------------------------------------------------------------------------
// Other collaborators
// ---------------------------------------------------------------------------

/// Converts files to fake data URIs without doing any I/O.
#[derive(Default)]
pub struct FakeEncoder {
    pub fail: AtomicBool,
}

#[async_trait]
impl AttachmentEncoder for FakeEncoder {
    async fn encode(&self, file: &FileData) -> Result<Attachment, StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("encode failed".into()));
        }
        Ok(Attachment {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.bytes.len() as u64,
            content: format!("data:{};base64,{}", file.mime_type, file.bytes.len()),
        })
    }
}

/// Records dispatched webhook events instead of delivering them.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<DashboardEvent>>,
}

impl RecordingSink {
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookSink for RecordingSink {
    async fn dispatch(&self, event: DashboardEvent) -> Result<(), StoreError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub fn account() -> Account {
    Account {
        id: "acct-1".into(),
        name: "Arson Creative".into(),
        billing_prefix: "ARS".into(),
    }
}

/// Wires one [`MemoryStore`] into every collaborator seam.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub sink: Arc<RecordingSink>,
    pub encoder: Arc<FakeEncoder>,
    pub bus: Arc<EventBus>,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        Self {
            store: Arc::new(MemoryStore::default()),
            sink: Arc::new(RecordingSink::default()),
            encoder: Arc::new(FakeEncoder::default()),
            bus: Arc::new(EventBus::default()),
        }
    }

    pub fn coordinator(&self) -> SubmissionCoordinator {
        SubmissionCoordinator::new(
            self.store.clone(),
            self.store.clone(),
            self.sink.clone(),
            self.encoder.clone(),
            self.bus.clone(),
        )
    }

    pub fn session(&self) -> WizardSession {
        WizardSession::new(vec![account()], self.coordinator(), self.encoder.clone())
    }

    pub fn timeline(&self, project_id: &str, status: ProjectStatus) -> OptimisticTimelineStore {
        OptimisticTimelineStore::new(
            project_id,
            status,
            "Dana",
            "manager",
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.bus.clone(),
        )
    }
}
