//! Executes wizard submissions against the external store.
//!
//! Exactly one primary mutation runs per successful submission, matched
//! to the selected move. Secondary effects (notification creation,
//! webhook dispatch) are fired in the background after the primary
//! mutation confirms; their failures are logged and never roll back or
//! fail the already-successful primary result.

use std::sync::Arc;

use agencydesk_core::error::CoreError;
use agencydesk_core::notification::{CreateNotification, KIND_PROJECT_CREATED};
use agencydesk_core::project::{CreateProject, Project, ProjectPatch};
use agencydesk_core::project_id::{generate_project_id, validate_project_id};
use agencydesk_core::status::ProjectStatus;
use agencydesk_core::wizard::catalog::{OperationRequest, ProjectDraft};
use agencydesk_events::bus::{EVENT_PROJECT_CREATED, EVENT_PROJECT_REMOVED};
use agencydesk_events::{DashboardEvent, EventBus};

use crate::store::{AttachmentEncoder, NotificationStore, ProjectStore, WebhookSink};

/// Maps collected wizard state onto store mutations and maintains the
/// in-memory dashboard project list.
pub struct SubmissionCoordinator {
    projects: Arc<dyn ProjectStore>,
    notifications: Arc<dyn NotificationStore>,
    webhooks: Arc<dyn WebhookSink>,
    encoder: Arc<dyn AttachmentEncoder>,
    bus: Arc<EventBus>,
    project_list: Vec<Project>,
    in_flight: bool,
}

impl SubmissionCoordinator {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        notifications: Arc<dyn NotificationStore>,
        webhooks: Arc<dyn WebhookSink>,
        encoder: Arc<dyn AttachmentEncoder>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            projects,
            notifications,
            webhooks,
            encoder,
            bus,
            project_list: Vec::new(),
            in_flight: false,
        }
    }

    /// The in-memory project list, newest-first.
    pub fn project_list(&self) -> &[Project] {
        &self.project_list
    }

    /// Load the dashboard project list from the store.
    pub async fn load_projects(&mut self) -> Result<(), CoreError> {
        self.project_list = self.projects.list_projects().await?;
        Ok(())
    }

    /// Execute one submission. Returns the success toast message.
    ///
    /// A second call while one is in flight is rejected rather than
    /// queued or cancelled.
    pub async fn submit(&mut self, request: OperationRequest) -> Result<String, CoreError> {
        if self.in_flight {
            return Err(CoreError::Conflict(
                "A submission is already in flight".to_string(),
            ));
        }
        self.in_flight = true;
        let result = self.execute(request).await;
        self.in_flight = false;
        result
    }

    async fn execute(&mut self, request: OperationRequest) -> Result<String, CoreError> {
        match request {
            OperationRequest::CreateProject(draft) => self.create_project(*draft).await,
            OperationRequest::RemoveProject { project_id } => {
                self.remove_project(&project_id).await
            }
            OperationRequest::CancelProject { project_id, reason } => {
                self.cancel_project(&project_id, reason).await
            }
            OperationRequest::ApproveProject {
                project_id,
                tips_given,
                tip_amount,
            } => self.approve_project(&project_id, tips_given, tip_amount).await,
        }
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    async fn create_project(&mut self, draft: ProjectDraft) -> Result<String, CoreError> {
        let project_id = match &draft.manual_project_id {
            Some(manual) => {
                validate_project_id(manual)?;
                manual.clone()
            }
            None => generate_project_id(&draft.billing_prefix)?,
        };

        // Convert every pending attachment to its embeddable form; the
        // composer usually finished this already.
        let mut attachments = Vec::with_capacity(draft.files.len());
        for pending in &draft.files {
            let attachment = match &pending.uploaded {
                Some(ready) => ready.clone(),
                None => self.encoder.encode(&pending.file).await?,
            };
            attachments.push(attachment);
        }

        let create = CreateProject {
            project_id,
            title: draft.title.clone(),
            brief: draft.brief.clone(),
            status: ProjectStatus::InProgress,
            account_id: draft.account_id.clone(),
            client_type: draft.client_type.clone(),
            client_name: draft.client_name.clone(),
            previous_logo_no: draft.previous_logo_no.clone(),
            medium: draft.medium.clone(),
            price: draft.price,
            attachments,
            due_date: Some(draft.due_date.clone()),
            due_time: draft.due_time.clone(),
            assignee_name: Some(draft.assignee_name.clone()),
        };

        let project = self.projects.insert_project(create).await?;
        tracing::info!(project_id = %project.project_id, "Project created");
        self.project_list.insert(0, project.clone());

        // Secondary effects carry catalog-only fields (order type, sold
        // items, addons) that are not persisted on the project row.
        let event = DashboardEvent::new(EVENT_PROJECT_CREATED)
            .for_project(&project.project_id)
            .with_payload(serde_json::json!({
                "project": project,
                "order_type": draft.order_type,
                "sold_items": draft.sold_items,
                "addons": draft.addons,
            }));
        self.spawn_notification(CreateNotification::new(
            KIND_PROJECT_CREATED,
            &project.project_id,
            format!("New project {} was created", project.project_id),
        ));
        self.spawn_webhook(event.clone());
        self.bus.publish(event);

        Ok(format!("Project {} created", project.project_id))
    }

    // -----------------------------------------------------------------------
    // Remove
    // -----------------------------------------------------------------------

    async fn remove_project(&mut self, project_id: &str) -> Result<String, CoreError> {
        // Notifications first, so an interrupted removal cannot leave
        // notifications pointing at a deleted project.
        self.notifications.delete_for_reference(project_id).await?;
        let deleted = self.projects.delete_project(project_id).await?;
        if deleted == 0 {
            return Err(CoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            });
        }
        tracing::info!(project_id, "Project removed");
        self.project_list.retain(|p| p.project_id != project_id);
        self.bus
            .publish(DashboardEvent::new(EVENT_PROJECT_REMOVED).for_project(project_id));
        Ok(format!("Project {project_id} removed"))
    }

    // -----------------------------------------------------------------------
    // Cancel / Approve
    // -----------------------------------------------------------------------

    async fn cancel_project(
        &mut self,
        project_id: &str,
        reason: String,
    ) -> Result<String, CoreError> {
        let project = self
            .projects
            .update_project(project_id, ProjectPatch::cancelled(reason))
            .await?;
        tracing::info!(project_id, "Project cancelled");
        self.replace_in_list(project);
        Ok(format!("Project {project_id} cancelled"))
    }

    async fn approve_project(
        &mut self,
        project_id: &str,
        tips_given: bool,
        tip_amount: f64,
    ) -> Result<String, CoreError> {
        let project = self
            .projects
            .update_project(project_id, ProjectPatch::approved(tips_given, tip_amount))
            .await?;
        tracing::info!(project_id, tips_given, "Project approved");
        self.replace_in_list(project);
        Ok(format!("Project {project_id} approved"))
    }

    fn replace_in_list(&mut self, project: Project) {
        if let Some(slot) = self
            .project_list
            .iter_mut()
            .find(|p| p.project_id == project.project_id)
        {
            *slot = project;
        }
    }

    // -----------------------------------------------------------------------
    // Secondary effects
    // -----------------------------------------------------------------------

    fn spawn_notification(&self, create: CreateNotification) {
        let store = Arc::clone(&self.notifications);
        tokio::spawn(async move {
            if let Err(err) = store.create_notification(create).await {
                tracing::warn!(error = %err, "Notification creation failed");
            }
        });
    }

    fn spawn_webhook(&self, event: DashboardEvent) {
        let sink = Arc::clone(&self.webhooks);
        tokio::spawn(async move {
            if let Err(err) = sink.dispatch(event).await {
                tracing::warn!(error = %err, "Webhook dispatch failed");
            }
        });
    }
}
