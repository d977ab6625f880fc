//! Pure domain logic for the agency operations dashboard.
//!
//! Everything in this crate is synchronous and free of I/O: the move
//! catalog, the wizard state machine, project id rules, the status
//! vocabulary, and the timeline entry model. Async orchestration lives in
//! `agencydesk-engine`, persistence in `agencydesk-db`.

pub mod attachment;
pub mod error;
pub mod moves;
pub mod notification;
pub mod project;
pub mod project_id;
pub mod status;
pub mod timeline;
pub mod types;
pub mod wizard;

pub use error::CoreError;
