//! Project id format rules.
//!
//! A project id is a human-meaningful identifier of the form
//! `PREFIX NNNNNN`: a 2-4 letter uppercase billing prefix tied to an
//! account, one space, and a 6-digit number. The number is random unless
//! the user supplied one manually in the wizard.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::error::CoreError;

/// Pattern every project id must match.
pub const PROJECT_ID_PATTERN: &str = r"^[A-Z]{2,4} \d{6}$";

static PROJECT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROJECT_ID_PATTERN).expect("valid regex"));

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}$").expect("valid regex"));

/// Check whether a string is a well-formed project id.
pub fn is_valid_project_id(s: &str) -> bool {
    PROJECT_ID_RE.is_match(s)
}

/// Validate a project id, returning a descriptive error on failure.
pub fn validate_project_id(s: &str) -> Result<(), CoreError> {
    if is_valid_project_id(s) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid project id '{s}'. Expected 2-4 uppercase letters, a space, and 6 digits"
        )))
    }
}

/// Validate an account billing prefix (2-4 uppercase letters).
pub fn validate_prefix(prefix: &str) -> Result<(), CoreError> {
    if PREFIX_RE.is_match(prefix) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid billing prefix '{prefix}'. Expected 2-4 uppercase letters"
        )))
    }
}

/// Generate a fresh project id from an account billing prefix and a
/// random 6-digit suffix.
pub fn generate_project_id(prefix: &str) -> Result<String, CoreError> {
    validate_prefix(prefix)?;
    let suffix: u32 = rand::rng().random_range(0..1_000_000);
    Ok(format!("{prefix} {suffix:06}"))
}
