//! Glue between the wizard state machine and the submission coordinator,
//! as consumed by a UI host.

use std::sync::Arc;
use std::time::Duration;

use agencydesk_core::attachment::{FileData, PendingAttachment};
use agencydesk_core::error::CoreError;
use agencydesk_core::moves::Move;
use agencydesk_core::project::Account;
use agencydesk_core::wizard::catalog::build_submission_payload;
use agencydesk_core::wizard::{MoveState, WizardEngine, WizardStage};

use crate::coordinator::SubmissionCoordinator;
use crate::store::AttachmentEncoder;

/// Fixed delay shown as a loading indicator when entering review. A UX
/// affordance only; no network call happens here.
pub const REVIEW_TRANSITION_DELAY: Duration = Duration::from_millis(600);

/// Fallback toast message when an error carries no usable text.
pub const GENERIC_SUBMIT_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// The single success/failure toast every submission surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// Error toast carrying the raw message when there is one.
    pub fn failure(err: &CoreError) -> Self {
        let raw = err.to_string();
        Self {
            kind: ToastKind::Error,
            message: if raw.trim().is_empty() {
                GENERIC_SUBMIT_ERROR.to_string()
            } else {
                raw
            },
        }
    }
}

/// One open wizard modal: the engine, the account directory used to
/// resolve billing prefixes, and the coordinator that executes the
/// submission.
pub struct WizardSession {
    engine: WizardEngine,
    accounts: Vec<Account>,
    coordinator: SubmissionCoordinator,
    encoder: Arc<dyn AttachmentEncoder>,
}

impl WizardSession {
    pub fn new(
        accounts: Vec<Account>,
        coordinator: SubmissionCoordinator,
        encoder: Arc<dyn AttachmentEncoder>,
    ) -> Self {
        Self {
            engine: WizardEngine::new(),
            accounts,
            coordinator,
            encoder,
        }
    }

    pub fn engine(&self) -> &WizardEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut WizardEngine {
        &mut self.engine
    }

    pub fn coordinator(&self) -> &SubmissionCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut SubmissionCoordinator {
        &mut self.coordinator
    }

    pub fn choose_move(&mut self, mv: Move) -> Result<(), CoreError> {
        self.engine.choose_move(mv)
    }

    /// Advance one step. Entering review holds the loading indicator for
    /// [`REVIEW_TRANSITION_DELAY`] before the review surface shows.
    pub async fn advance(&mut self) -> Result<(), CoreError> {
        self.engine.advance()?;
        if self.engine.stage() == WizardStage::Review {
            tokio::time::sleep(REVIEW_TRANSITION_DELAY).await;
        }
        Ok(())
    }

    pub fn back(&mut self) -> Result<bool, CoreError> {
        self.engine.back()
    }

    /// Attach a file on the Add move's upload step. The slot appears
    /// immediately and is marked uploading until the conversion resolves;
    /// a failed conversion removes the slot again.
    pub async fn attach_brief_file(&mut self, file: FileData) -> Result<(), CoreError> {
        let index = {
            let fields = self
                .engine
                .state_mut()
                .and_then(MoveState::as_add_mut)
                .ok_or_else(|| {
                    CoreError::Conflict("Attachments only apply to the Add move".to_string())
                })?;
            fields.brief_attachments.push(PendingAttachment::new(file.clone()));
            fields.brief_attachments.len() - 1
        };

        let encoded = self.encoder.encode(&file).await;

        let fields = self
            .engine
            .state_mut()
            .and_then(MoveState::as_add_mut)
            .ok_or_else(|| CoreError::Internal("Add state vanished mid-upload".to_string()))?;
        match encoded {
            Ok(attachment) => {
                fields.brief_attachments[index].uploaded = Some(attachment);
                Ok(())
            }
            Err(err) => {
                fields.brief_attachments.remove(index);
                Err(err.into())
            }
        }
    }

    /// Confirm the review and execute the submission.
    ///
    /// On failure the modal stays open in review with the wizard state
    /// untouched; on success the wizard fully resets and closes.
    pub async fn submit(&mut self) -> Toast {
        if let Err(err) = self.engine.begin_submit() {
            return Toast::failure(&err);
        }

        let request = {
            let Some(state) = self.engine.state() else {
                self.engine.submit_failed();
                return Toast::failure(&CoreError::Internal(
                    "Submission without a selected move".to_string(),
                ));
            };
            match build_submission_payload(state, &self.accounts) {
                Ok(request) => request,
                Err(err) => {
                    self.engine.submit_failed();
                    return Toast::failure(&err);
                }
            }
        };

        match self.coordinator.submit(request).await {
            Ok(message) => {
                self.engine.submit_succeeded();
                Toast::success(message)
            }
            Err(err) => {
                self.engine.submit_failed();
                Toast::failure(&err)
            }
        }
    }
}
