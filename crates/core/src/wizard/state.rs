//! Per-move wizard field structs.
//!
//! Each move owns exactly its own fields. Selecting a different move
//! constructs a fresh variant, which is the full-reset policy: nothing
//! collected under one move can leak into another move's payload.

use crate::attachment::PendingAttachment;
use crate::moves::Move;

/// The select-option value whose choice requires companion free text.
pub const OTHER_CHOICE: &str = "Other";

/// `logo_no_type` value meaning the user supplies the project number.
pub const LOGO_NO_MANUAL: &str = "Add Manually";

/// `logo_no_type` value meaning the number is generated at submission.
pub const LOGO_NO_GENERATE: &str = "Generate";

// ---------------------------------------------------------------------------
// Per-move field structs
// ---------------------------------------------------------------------------

/// Fields collected by the Add move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddFields {
    pub order_type: String,
    pub price: String,
    pub sold_items: Vec<String>,
    pub other_sold_text: String,
    pub account_id: String,
    pub logo_no_type: String,
    pub manual_logo_no: String,
    pub client_type: String,
    pub client_name: String,
    pub previous_logo_no: String,
    pub medium: String,
    pub project_title: String,
    pub project_brief: String,
    pub brief_attachments: Vec<PendingAttachment>,
    pub addons: Vec<String>,
    pub addons_other: String,
    pub due_date: String,
    pub due_time: String,
    pub assignee_name: String,
}

impl AddFields {
    /// Select or deselect a sold item. Deselecting "Other" also clears
    /// its companion free text.
    pub fn toggle_sold_item(&mut self, item: &str) {
        toggle_choice(&mut self.sold_items, &mut self.other_sold_text, item);
    }

    /// Select or deselect an addon, with the same "Other" companion rule.
    pub fn toggle_addon(&mut self, item: &str) {
        toggle_choice(&mut self.addons, &mut self.addons_other, item);
    }

    /// Set the logo-number mode. Leaving manual mode clears the manually
    /// entered number.
    pub fn set_logo_no_type(&mut self, value: &str) {
        if value != LOGO_NO_MANUAL {
            self.manual_logo_no.clear();
        }
        self.logo_no_type = value.to_string();
    }
}

/// Fields collected by the Remove move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoveFields {
    pub removal_reason: String,
    pub removal_other_text: String,
    pub target_project_id: String,
}

impl RemoveFields {
    /// Set the removal reason. Moving off "Other" clears its free text.
    pub fn set_reason(&mut self, reason: &str) {
        if reason != OTHER_CHOICE {
            self.removal_other_text.clear();
        }
        self.removal_reason = reason.to_string();
    }
}

/// Fields collected by the Cancel move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelFields {
    pub cancellation_reason: String,
    pub cancellation_other_text: String,
    pub target_project_id: String,
}

impl CancelFields {
    /// Set the cancellation reason. Moving off "Other" clears its free text.
    pub fn set_reason(&mut self, reason: &str) {
        if reason != OTHER_CHOICE {
            self.cancellation_other_text.clear();
        }
        self.cancellation_reason = reason.to_string();
    }
}

/// Fields collected by the Approve move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApproveFields {
    pub target_project_id: String,
    /// `None` until the tips question is answered.
    pub tips_given: Option<bool>,
    pub tip_amount: String,
}

impl ApproveFields {
    /// Answer the tips question. Answering "No" drops any entered amount
    /// along with the tip-amount step itself.
    pub fn set_tips_given(&mut self, given: bool) {
        if !given {
            self.tip_amount.clear();
        }
        self.tips_given = Some(given);
    }
}

fn toggle_choice(items: &mut Vec<String>, other_text: &mut String, item: &str) {
    if let Some(pos) = items.iter().position(|i| i == item) {
        items.remove(pos);
        if item == OTHER_CHOICE {
            other_text.clear();
        }
    } else {
        items.push(item.to_string());
    }
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// Wizard state for the currently selected move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveState {
    Add(AddFields),
    Remove(RemoveFields),
    Cancel(CancelFields),
    Approve(ApproveFields),
}

impl MoveState {
    /// Fresh, empty state for a move.
    pub fn new(mv: Move) -> Self {
        match mv {
            Move::Add => Self::Add(AddFields::default()),
            Move::Remove => Self::Remove(RemoveFields::default()),
            Move::Cancel => Self::Cancel(CancelFields::default()),
            Move::Approve => Self::Approve(ApproveFields::default()),
        }
    }

    /// Which move this state belongs to.
    pub fn move_kind(&self) -> Move {
        match self {
            Self::Add(_) => Move::Add,
            Self::Remove(_) => Move::Remove,
            Self::Cancel(_) => Move::Cancel,
            Self::Approve(_) => Move::Approve,
        }
    }

    pub fn as_add(&self) -> Option<&AddFields> {
        match self {
            Self::Add(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_add_mut(&mut self) -> Option<&mut AddFields> {
        match self {
            Self::Add(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_remove_mut(&mut self) -> Option<&mut RemoveFields> {
        match self {
            Self::Remove(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_cancel_mut(&mut self) -> Option<&mut CancelFields> {
        match self {
            Self::Cancel(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_approve_mut(&mut self) -> Option<&mut ApproveFields> {
        match self {
            Self::Approve(f) => Some(f),
            _ => None,
        }
    }
}
