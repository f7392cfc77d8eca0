//! Errors for parsing user-facing coordinates and choices.

use thiserror::Error;

/// Errors that can occur when parsing squares and promotion choices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square: '{0}' (expected a file a-h followed by a rank 1-8)")]
    InvalidSquare(String),

    #[error("invalid promotion choice: '{0}' (expected Q, R, B or N)")]
    InvalidPromotionChoice(String),
}
