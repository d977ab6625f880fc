//! The wizard finite state machine.
//!
//! Stages: `Selecting` (step 1, no move committed) → `Step(n)` data steps
//! → `Review` → `Submitting`. The step counter always advances by exactly
//! one; the Approve tip-skip branch is handled by the dynamic step count
//! (the tip-amount step is never instantiated when the answer is "No"),
//! not by jumping over a step.

use crate::error::CoreError;
use crate::moves::Move;
use crate::wizard::catalog::{self, SELECT_STEP};
use crate::wizard::state::MoveState;

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    /// Step 1: no move committed yet.
    Selecting,
    /// A data step, `2..=step_count`.
    Step(u8),
    /// The re-editable review surface before submission.
    Review,
    /// A submission is in flight; navigation and edits are locked.
    Submitting,
}

/// Drives one wizard session.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardEngine {
    stage: WizardStage,
    state: Option<MoveState>,
}

impl WizardEngine {
    pub fn new() -> Self {
        Self {
            stage: WizardStage::Selecting,
            state: None,
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn state(&self) -> Option<&MoveState> {
        self.state.as_ref()
    }

    /// Mutable access for step and review editing. Locked while a
    /// submission is in flight.
    pub fn state_mut(&mut self) -> Option<&mut MoveState> {
        if self.stage == WizardStage::Submitting {
            return None;
        }
        self.state.as_mut()
    }

    /// Step count for the active move, if one is selected.
    pub fn step_count(&self) -> Option<u8> {
        self.state.as_ref().map(catalog::step_count)
    }

    /// Whether the current data step's validator passes. False outside
    /// data steps.
    pub fn is_current_step_valid(&self) -> bool {
        match (self.stage, &self.state) {
            (WizardStage::Step(n), Some(state)) => catalog::is_step_valid(state, n),
            _ => false,
        }
    }

    /// Whether the submit control is enabled: in Review, with every
    /// validator for the active move passing over the whole field set.
    pub fn can_submit(&self) -> bool {
        self.stage == WizardStage::Review
            && self
                .state
                .as_ref()
                .is_some_and(catalog::is_submittable)
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Commit a move choice and enter its first data step.
    ///
    /// Choosing a different move than a previously collected one discards
    /// all collected fields; re-choosing the same move keeps them.
    pub fn choose_move(&mut self, mv: Move) -> Result<(), CoreError> {
        if self.stage != WizardStage::Selecting {
            return Err(CoreError::Conflict(
                "A move can only be chosen on the selection step".to_string(),
            ));
        }
        match &self.state {
            Some(existing) if existing.move_kind() == mv => {}
            _ => self.state = Some(MoveState::new(mv)),
        }
        self.stage = WizardStage::Step(SELECT_STEP + 1);
        Ok(())
    }

    /// Advance one step forward, or into Review from the last data step.
    /// Gated on the current step's validator.
    pub fn advance(&mut self) -> Result<(), CoreError> {
        let WizardStage::Step(step) = self.stage else {
            return Err(CoreError::Conflict(
                "Cannot advance outside a data step".to_string(),
            ));
        };
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| CoreError::Internal("data step without a move".to_string()))?;
        if !catalog::is_step_valid(state, step) {
            return Err(CoreError::Validation(format!("Step {step} is incomplete")));
        }
        if step < catalog::step_count(state) {
            self.stage = WizardStage::Step(step + 1);
        } else {
            self.stage = WizardStage::Review;
        }
        Ok(())
    }

    /// Navigate one step backward. Never gated on validity.
    ///
    /// From Review this returns to the last data step with every
    /// collected value preserved. From the selection step it closes the
    /// whole flow; returns `true` in that case.
    pub fn back(&mut self) -> Result<bool, CoreError> {
        match self.stage {
            WizardStage::Selecting => {
                self.reset();
                Ok(true)
            }
            WizardStage::Step(n) if n <= SELECT_STEP + 1 => {
                // Keep the collected fields: re-choosing the same move
                // restores them.
                self.stage = WizardStage::Selecting;
                Ok(false)
            }
            WizardStage::Step(n) => {
                self.stage = WizardStage::Step(n - 1);
                Ok(false)
            }
            WizardStage::Review => {
                let state = self
                    .state
                    .as_ref()
                    .ok_or_else(|| CoreError::Internal("review without a move".to_string()))?;
                self.stage = WizardStage::Step(catalog::step_count(state));
                Ok(false)
            }
            WizardStage::Submitting => Err(CoreError::Conflict(
                "Cannot navigate while a submission is in flight".to_string(),
            )),
        }
    }

    /// Lock the wizard for submission. Re-validates the whole field set
    /// with the same predicates that gate step navigation.
    pub fn begin_submit(&mut self) -> Result<(), CoreError> {
        match self.stage {
            WizardStage::Review => {}
            WizardStage::Submitting => {
                return Err(CoreError::Conflict(
                    "A submission is already in flight".to_string(),
                ))
            }
            _ => {
                return Err(CoreError::Conflict(
                    "Submission is only possible from review".to_string(),
                ))
            }
        }
        if !self
            .state
            .as_ref()
            .is_some_and(catalog::is_submittable)
        {
            return Err(CoreError::Validation(
                "Required fields are missing or invalid".to_string(),
            ));
        }
        self.stage = WizardStage::Submitting;
        Ok(())
    }

    /// Record a failed submission: stay open in Review, state untouched,
    /// so the user can correct and resubmit.
    pub fn submit_failed(&mut self) {
        if self.stage == WizardStage::Submitting {
            self.stage = WizardStage::Review;
        }
    }

    /// Record a successful submission: the wizard fully resets and closes.
    pub fn submit_succeeded(&mut self) {
        if self.stage == WizardStage::Submitting {
            self.reset();
        }
    }

    /// Discard everything and return to the selection step.
    pub fn reset(&mut self) {
        self.stage = WizardStage::Selecting;
        self.state = None;
    }
}

impl Default for WizardEngine {
    fn default() -> Self {
        Self::new()
    }
}
