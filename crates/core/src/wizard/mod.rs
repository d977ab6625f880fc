//! The "Choose Your Move" project action wizard.
//!
//! Split into three layers:
//! - [`state`] — per-move field structs (a tagged union, so a Remove flow
//!   can never touch Add-only fields),
//! - [`catalog`] — the step table: counts, pure per-step validators, and
//!   the submission payload transform,
//! - [`engine`] — the explicit finite state machine driving navigation.

pub mod catalog;
pub mod engine;
pub mod state;

pub use catalog::{step_count, OperationRequest};
pub use engine::{WizardEngine, WizardStage};
pub use state::MoveState;
