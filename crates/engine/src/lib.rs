//! Async orchestration for the action wizard and the activity timeline.
//!
//! The core crate owns the pure state machines; this crate wires them to
//! the external store collaborators: [`coordinator::SubmissionCoordinator`]
//! executes wizard submissions, [`timeline::OptimisticTimelineStore`]
//! runs the local-first feed protocol, [`pager::TimelinePager`] handles
//! backward pagination, and [`session::WizardSession`] glues the wizard
//! together for a UI host.

pub mod coordinator;
pub mod pager;
pub mod session;
pub mod store;
pub mod timeline;

pub use coordinator::SubmissionCoordinator;
pub use pager::{TimelinePage, TimelinePager, PAGE_SIZE};
pub use session::{Toast, ToastKind, WizardSession};
pub use store::{
    AttachmentEncoder, NotificationStore, ProjectStore, StoreError, TimelineStore, WebhookSink,
};
pub use timeline::OptimisticTimelineStore;
