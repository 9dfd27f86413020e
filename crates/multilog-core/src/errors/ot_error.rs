//! Algebra invariant violations.
//!
//! These are protocol errors, never merge conflicts: two diffs that do not
//! chain, or two concurrent diffs that did not branch from the same position.
//! Callers must not retry them.

use super::error_code::{self, MultilogErrorCode};
use crate::position::Position;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OtError {
    #[error("continuity violation on partition {partition}: first diff ends at {expected}, second starts at {found}")]
    ContinuityViolation {
        partition: String,
        expected: Position,
        found: Position,
    },

    #[error("anchor mismatch on partition {partition}: left starts at {left}, right starts at {right}")]
    AnchorMismatch {
        partition: String,
        left: Position,
        right: Position,
    },
}

impl MultilogErrorCode for OtError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ContinuityViolation { .. } => error_code::OT_CONTINUITY,
            Self::AnchorMismatch { .. } => error_code::OT_ANCHOR_MISMATCH,
        }
    }
}
