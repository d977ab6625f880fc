//! The step table: counts, per-step validators, and the submission
//! payload transform.
//!
//! Step 1 is always the move-selection card. Data steps start at 2 and
//! run through the move's step count:
//!
//! | Move    | Steps                                                      |
//! |---------|------------------------------------------------------------|
//! | Add     | 2 order type, 3 price, 4 sold items, 5 account, 6 logo no, |
//! |         | 7 client, 8 previous logo no, 9 medium, 10 title,          |
//! |         | 11 brief, 12 attachments, 13 addons, 14 due/assignee       |
//! | Remove  | 2 reason, 3 target project id                              |
//! | Cancel  | 2 reason, 3 target project id                              |
//! | Approve | 2 target project id, 3 tips question, 4 tip amount         |
//! |         | (step 4 exists only when the answer is "Yes")              |
//!
//! Every validator is a pure function of the wizard state. They run on
//! each keystroke to gate the Next/Review controls, and again over the
//! whole field set to gate final submission.

use serde::{Deserialize, Serialize};

use crate::attachment::PendingAttachment;
use crate::error::CoreError;
use crate::project::Account;
use crate::project_id::is_valid_project_id;
use crate::wizard::state::{
    AddFields, ApproveFields, CancelFields, MoveState, RemoveFields, LOGO_NO_MANUAL, OTHER_CHOICE,
};

/// Step 1 for every move: the move-selection card.
pub const SELECT_STEP: u8 = 1;

pub const ADD_STEP_COUNT: u8 = 14;
pub const REMOVE_STEP_COUNT: u8 = 3;
pub const CANCEL_STEP_COUNT: u8 = 3;
pub const APPROVE_STEP_COUNT_WITH_TIP: u8 = 4;
pub const APPROVE_STEP_COUNT_NO_TIP: u8 = 3;

/// Total step count for the active move, including the selection step.
///
/// Approve is the only dynamic case: the tip-amount step exists only
/// when the tips question was answered "Yes".
pub fn step_count(state: &MoveState) -> u8 {
    match state {
        MoveState::Add(_) => ADD_STEP_COUNT,
        MoveState::Remove(_) => REMOVE_STEP_COUNT,
        MoveState::Cancel(_) => CANCEL_STEP_COUNT,
        MoveState::Approve(f) => {
            if f.tips_given == Some(true) {
                APPROVE_STEP_COUNT_WITH_TIP
            } else {
                APPROVE_STEP_COUNT_NO_TIP
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Whether a data step's fields are complete enough to advance past.
///
/// Steps outside `2..=step_count` are never valid.
pub fn is_step_valid(state: &MoveState, step: u8) -> bool {
    if step <= SELECT_STEP || step > step_count(state) {
        return false;
    }
    match state {
        MoveState::Add(f) => add_step_valid(f, step),
        MoveState::Remove(f) => remove_step_valid(f, step),
        MoveState::Cancel(f) => cancel_step_valid(f, step),
        MoveState::Approve(f) => approve_step_valid(f, step),
    }
}

/// Whole-set re-validation used to gate the final submit control.
pub fn is_submittable(state: &MoveState) -> bool {
    (SELECT_STEP + 1..=step_count(state)).all(|step| is_step_valid(state, step))
}

fn add_step_valid(f: &AddFields, step: u8) -> bool {
    match step {
        // Catalog-only selections are optional; only their "Other"
        // companion rule can invalidate them.
        2 => true,
        3 => true,
        4 => group_valid(&f.sold_items, &f.other_sold_text),
        5 => non_empty(&f.account_id),
        6 => logo_no_valid(f),
        7 => true,
        8 => f.previous_logo_no.trim().is_empty() || is_valid_project_id(f.previous_logo_no.trim()),
        9 => true,
        10 => non_empty(&f.project_title),
        11 => true,
        12 => uploads_settled(&f.brief_attachments),
        13 => group_valid(&f.addons, &f.addons_other),
        14 => non_empty(&f.due_date) && non_empty(&f.assignee_name),
        _ => false,
    }
}

fn remove_step_valid(f: &RemoveFields, step: u8) -> bool {
    match step {
        2 => choice_valid(&f.removal_reason, &f.removal_other_text),
        3 => is_valid_project_id(f.target_project_id.trim()),
        _ => false,
    }
}

fn cancel_step_valid(f: &CancelFields, step: u8) -> bool {
    match step {
        2 => choice_valid(&f.cancellation_reason, &f.cancellation_other_text),
        3 => is_valid_project_id(f.target_project_id.trim()),
        _ => false,
    }
}

fn approve_step_valid(f: &ApproveFields, step: u8) -> bool {
    match step {
        2 => is_valid_project_id(f.target_project_id.trim()),
        3 => f.tips_given.is_some(),
        // Only reachable when tips_given == Some(true).
        4 => parse_price(&f.tip_amount) > 0.0,
        _ => false,
    }
}

fn non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// A required single-select with an "Other" escape hatch: something must
/// be chosen, and choosing "Other" requires the companion text.
fn choice_valid(selected: &str, other_text: &str) -> bool {
    non_empty(selected) && (selected != OTHER_CHOICE || non_empty(other_text))
}

/// An optional multi-select: valid unless "Other" is ticked without its
/// companion text.
fn group_valid(items: &[String], other_text: &str) -> bool {
    !items.iter().any(|i| i == OTHER_CHOICE) || non_empty(other_text)
}

/// The logo-number step: the default (generate at submission) is always
/// valid; manual mode requires a well-formed project id.
fn logo_no_valid(f: &AddFields) -> bool {
    f.logo_no_type != LOGO_NO_MANUAL || is_valid_project_id(f.manual_logo_no.trim())
}

/// The upload step is invalid while any attachment is mid-upload.
fn uploads_settled(attachments: &[PendingAttachment]) -> bool {
    attachments.iter().all(|a| !a.is_uploading())
}

// ---------------------------------------------------------------------------
// Submission payload
// ---------------------------------------------------------------------------

/// A grouped multi-select normalized for submission: the chosen items
/// (without the "Other" placeholder) plus the free-text other value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedChoice {
    pub items: Vec<String>,
    pub other: Option<String>,
}

/// Everything the Add move collected, normalized but not yet resolved:
/// the id may still need generating and the files converting.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    /// Manually supplied id, already pattern-validated by step gating.
    pub manual_project_id: Option<String>,
    pub billing_prefix: String,
    pub account_id: String,
    pub title: String,
    pub brief: String,
    pub order_type: Option<String>,
    pub price: f64,
    pub sold_items: GroupedChoice,
    pub addons: GroupedChoice,
    pub client_type: Option<String>,
    pub client_name: Option<String>,
    pub previous_logo_no: Option<String>,
    pub medium: Option<String>,
    pub files: Vec<PendingAttachment>,
    pub due_date: String,
    pub due_time: Option<String>,
    pub assignee_name: String,
}

/// The one external mutation a successful wizard submission maps to.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRequest {
    CreateProject(Box<ProjectDraft>),
    RemoveProject {
        project_id: String,
    },
    CancelProject {
        project_id: String,
        reason: String,
    },
    ApproveProject {
        project_id: String,
        tips_given: bool,
        tip_amount: f64,
    },
}

/// Parse price text into a number by stripping non-numeric characters.
/// Unparseable input yields zero.
pub fn parse_price(text: &str) -> f64 {
    let numeric: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse().unwrap_or(0.0)
}

/// Pure transform of collected wizard state into an [`OperationRequest`].
///
/// For Add this resolves the account's billing prefix from the account
/// directory and normalizes the grouped selections; the project id and
/// attachment conversion are resolved at execution time.
pub fn build_submission_payload(
    state: &MoveState,
    accounts: &[Account],
) -> Result<OperationRequest, CoreError> {
    match state {
        MoveState::Add(f) => build_add_payload(f, accounts),
        MoveState::Remove(f) => Ok(OperationRequest::RemoveProject {
            project_id: f.target_project_id.trim().to_string(),
        }),
        MoveState::Cancel(f) => Ok(OperationRequest::CancelProject {
            project_id: f.target_project_id.trim().to_string(),
            reason: resolve_reason(&f.cancellation_reason, &f.cancellation_other_text),
        }),
        MoveState::Approve(f) => {
            let tips_given = f.tips_given.ok_or_else(|| {
                CoreError::Validation("The tips question has not been answered".to_string())
            })?;
            let tip_amount = if tips_given {
                parse_price(&f.tip_amount)
            } else {
                0.0
            };
            Ok(OperationRequest::ApproveProject {
                project_id: f.target_project_id.trim().to_string(),
                tips_given,
                tip_amount,
            })
        }
    }
}

fn build_add_payload(f: &AddFields, accounts: &[Account]) -> Result<OperationRequest, CoreError> {
    let account = accounts
        .iter()
        .find(|a| a.id == f.account_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "account",
            id: f.account_id.clone(),
        })?;

    let manual_project_id = if f.logo_no_type == LOGO_NO_MANUAL && non_empty(&f.manual_logo_no) {
        Some(f.manual_logo_no.trim().to_string())
    } else {
        None
    };

    Ok(OperationRequest::CreateProject(Box::new(ProjectDraft {
        manual_project_id,
        billing_prefix: account.billing_prefix.clone(),
        account_id: f.account_id.clone(),
        title: f.project_title.trim().to_string(),
        brief: f.project_brief.trim().to_string(),
        order_type: optional(&f.order_type),
        price: parse_price(&f.price),
        sold_items: normalize_group(&f.sold_items, &f.other_sold_text),
        addons: normalize_group(&f.addons, &f.addons_other),
        client_type: optional(&f.client_type),
        client_name: optional(&f.client_name),
        previous_logo_no: optional(&f.previous_logo_no),
        medium: optional(&f.medium),
        files: f.brief_attachments.clone(),
        due_date: f.due_date.trim().to_string(),
        due_time: optional(&f.due_time),
        assignee_name: f.assignee_name.trim().to_string(),
    })))
}

fn optional(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The chosen reason, or the free-text value when "Other" was chosen.
fn resolve_reason(selected: &str, other_text: &str) -> String {
    if selected == OTHER_CHOICE {
        other_text.trim().to_string()
    } else {
        selected.trim().to_string()
    }
}

/// Normalize a grouped selection into `{items, other}`.
fn normalize_group(items: &[String], other_text: &str) -> GroupedChoice {
    let other = if items.iter().any(|i| i == OTHER_CHOICE) {
        optional(other_text)
    } else {
        None
    };
    GroupedChoice {
        items: items
            .iter()
            .filter(|i| *i != OTHER_CHOICE)
            .cloned()
            .collect(),
        other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    fn account() -> Account {
        Account {
            id: "acct-1".into(),
            name: "Arson Creative".into(),
            billing_prefix: "ARS".into(),
        }
    }

    fn minimal_add() -> AddFields {
        AddFields {
            account_id: "acct-1".into(),
            project_title: "New brand mark".into(),
            due_date: "2026-09-01".into(),
            assignee_name: "Riley".into(),
            ..Default::default()
        }
    }

    // -- step counts --

    #[test]
    fn fixed_step_counts() {
        assert_eq!(step_count(&MoveState::new(Move::Add)), 14);
        assert_eq!(step_count(&MoveState::new(Move::Remove)), 3);
        assert_eq!(step_count(&MoveState::new(Move::Cancel)), 3);
    }

    #[test]
    fn approve_step_count_follows_the_tips_answer() {
        let mut state = MoveState::new(Move::Approve);
        assert_eq!(step_count(&state), 3); // unanswered

        state.as_approve_mut().unwrap().set_tips_given(true);
        assert_eq!(step_count(&state), 4);

        state.as_approve_mut().unwrap().set_tips_given(false);
        assert_eq!(step_count(&state), 3);
    }

    // -- validators --

    #[test]
    fn steps_outside_range_are_invalid() {
        let state = MoveState::new(Move::Remove);
        assert!(!is_step_valid(&state, 0));
        assert!(!is_step_valid(&state, 1));
        assert!(!is_step_valid(&state, 4));
    }

    #[test]
    fn reason_step_requires_other_text_when_other_chosen() {
        let mut state = MoveState::new(Move::Cancel);
        let f = state.as_cancel_mut().unwrap();
        f.set_reason(OTHER_CHOICE);
        assert!(!is_step_valid(&state, 2));

        state.as_cancel_mut().unwrap().cancellation_other_text = "Budget pulled".into();
        assert!(is_step_valid(&state, 2));

        state.as_cancel_mut().unwrap().set_reason("Client unresponsive");
        assert!(is_step_valid(&state, 2));
    }

    #[test]
    fn target_project_id_step_enforces_the_pattern() {
        let mut state = MoveState::new(Move::Remove);
        state.as_remove_mut().unwrap().set_reason("Duplicate entry");

        for bad in ["", "ars 123456", "ARS123456", "ARS 12345", "ARSEN 123456"] {
            state.as_remove_mut().unwrap().target_project_id = bad.into();
            assert!(!is_step_valid(&state, 3), "accepted '{bad}'");
            assert!(!is_submittable(&state));
        }

        state.as_remove_mut().unwrap().target_project_id = "ARS 123456".into();
        assert!(is_step_valid(&state, 3));
        assert!(is_submittable(&state));
    }

    #[test]
    fn upload_step_blocks_while_uploading() {
        use crate::attachment::{Attachment, FileData, PendingAttachment};

        let mut fields = minimal_add();
        fields.brief_attachments.push(PendingAttachment::new(FileData {
            name: "brief.pdf".into(),
            mime_type: "application/pdf".into(),
            bytes: vec![0; 8],
        }));
        let state = MoveState::Add(fields);
        assert!(!is_step_valid(&state, 12));

        let mut fields = match state {
            MoveState::Add(f) => f,
            _ => unreachable!(),
        };
        fields.brief_attachments[0].uploaded = Some(Attachment {
            name: "brief.pdf".into(),
            mime_type: "application/pdf".into(),
            size_bytes: 8,
            content: "data:application/pdf;base64,AAAA".into(),
        });
        assert!(is_step_valid(&MoveState::Add(fields), 12));
    }

    #[test]
    fn manual_logo_mode_requires_a_well_formed_id() {
        let mut fields = minimal_add();
        fields.set_logo_no_type(LOGO_NO_MANUAL);
        fields.manual_logo_no = "bogus".into();
        assert!(!is_step_valid(&MoveState::Add(fields.clone()), 6));

        fields.manual_logo_no = "ARS 654321".into();
        assert!(is_step_valid(&MoveState::Add(fields), 6));
    }

    #[test]
    fn minimal_add_state_is_submittable() {
        assert!(is_submittable(&MoveState::Add(minimal_add())));
    }

    #[test]
    fn add_missing_required_fields_blocks_submit() {
        let mut fields = minimal_add();
        fields.project_title.clear();
        assert!(!is_submittable(&MoveState::Add(fields)));

        let mut fields = minimal_add();
        fields.assignee_name = "   ".into();
        assert!(!is_submittable(&MoveState::Add(fields)));
    }

    #[test]
    fn approve_tip_amount_step_requires_a_positive_amount() {
        let mut state = MoveState::new(Move::Approve);
        {
            let f = state.as_approve_mut().unwrap();
            f.target_project_id = "ARS 123456".into();
            f.set_tips_given(true);
        }
        assert!(!is_step_valid(&state, 4));
        assert!(!is_submittable(&state));

        state.as_approve_mut().unwrap().tip_amount = "$25".into();
        assert!(is_step_valid(&state, 4));
        assert!(is_submittable(&state));
    }

    // -- price parsing --

    #[test]
    fn parse_price_strips_non_numeric() {
        assert_eq!(parse_price("$1,200"), 1200.0);
        assert_eq!(parse_price("USD 350.50"), 350.5);
        assert_eq!(parse_price("450"), 450.0);
    }

    #[test]
    fn parse_price_defaults_to_zero() {
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("free"), 0.0);
        assert_eq!(parse_price("1.2.3"), 0.0);
    }

    // -- payload building --

    #[test]
    fn add_payload_normalizes_groups_and_price() {
        let mut fields = minimal_add();
        fields.price = "$1,500".into();
        fields.toggle_sold_item("Logo");
        fields.toggle_sold_item(OTHER_CHOICE);
        fields.other_sold_text = " Stationery ".into();
        fields.toggle_addon("Business Card");

        let request =
            build_submission_payload(&MoveState::Add(fields), &[account()]).unwrap();
        let draft = match request {
            OperationRequest::CreateProject(draft) => draft,
            other => panic!("unexpected request: {other:?}"),
        };

        assert_eq!(draft.billing_prefix, "ARS");
        assert_eq!(draft.price, 1500.0);
        assert_eq!(draft.sold_items.items, vec!["Logo".to_string()]);
        assert_eq!(draft.sold_items.other.as_deref(), Some("Stationery"));
        assert_eq!(draft.addons.items, vec!["Business Card".to_string()]);
        assert_eq!(draft.addons.other, None);
        assert!(draft.manual_project_id.is_none());
    }

    #[test]
    fn add_payload_keeps_a_manual_project_id() {
        let mut fields = minimal_add();
        fields.set_logo_no_type(LOGO_NO_MANUAL);
        fields.manual_logo_no = " ARS 777777 ".into();

        let request =
            build_submission_payload(&MoveState::Add(fields), &[account()]).unwrap();
        match request {
            OperationRequest::CreateProject(draft) => {
                assert_eq!(draft.manual_project_id.as_deref(), Some("ARS 777777"));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn add_payload_requires_a_known_account() {
        let fields = minimal_add();
        let err = build_submission_payload(&MoveState::Add(fields), &[]).unwrap_err();
        assert!(err.to_string().contains("account"));
    }

    #[test]
    fn cancel_payload_resolves_the_other_reason() {
        let mut state = MoveState::new(Move::Cancel);
        {
            let f = state.as_cancel_mut().unwrap();
            f.set_reason(OTHER_CHOICE);
            f.cancellation_other_text = " Budget pulled ".into();
            f.target_project_id = "ARS 123456".into();
        }

        match build_submission_payload(&state, &[]).unwrap() {
            OperationRequest::CancelProject { project_id, reason } => {
                assert_eq!(project_id, "ARS 123456");
                assert_eq!(reason, "Budget pulled");
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn approve_payload_zeroes_the_tip_when_answered_no() {
        let mut state = MoveState::new(Move::Approve);
        {
            let f = state.as_approve_mut().unwrap();
            f.target_project_id = "ARS 123456".into();
            f.tip_amount = "$50".into();
            f.set_tips_given(false);
        }

        match build_submission_payload(&state, &[]).unwrap() {
            OperationRequest::ApproveProject {
                tips_given,
                tip_amount,
                ..
            } => {
                assert!(!tips_given);
                assert_eq!(tip_amount, 0.0);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn approve_payload_requires_the_tips_answer() {
        let mut state = MoveState::new(Move::Approve);
        state.as_approve_mut().unwrap().target_project_id = "ARS 123456".into();
        assert!(build_submission_payload(&state, &[]).is_err());
    }
}
