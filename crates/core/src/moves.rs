//! The four mutually exclusive project moves offered by the action wizard.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Top-level action chosen at wizard start.
///
/// The selected move determines which steps, validators, and submission
/// payload apply. It is immutable for the lifetime of one wizard session;
/// choosing a different move discards every collected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Add,
    Remove,
    Cancel,
    Approve,
}

/// All moves, in the order they are presented.
pub const ALL_MOVES: [Move; 4] = [Move::Add, Move::Remove, Move::Cancel, Move::Approve];

impl Move {
    /// Parse a move string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "cancel" => Ok(Self::Cancel),
            "approve" => Ok(Self::Approve),
            _ => Err(CoreError::Validation(format!(
                "Invalid move '{s}'. Must be one of: add, remove, cancel, approve"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Cancel => "cancel",
            Self::Approve => "approve",
        }
    }

    /// Human-readable label shown on the move card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "Add a Project",
            Self::Remove => "Remove a Project",
            Self::Cancel => "Cancel a Project",
            Self::Approve => "Approve a Project",
        }
    }
}
