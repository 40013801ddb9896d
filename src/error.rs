//! Error types for the settlement engine.

use crate::money::Money;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while handling a settlement request.
///
/// Validation variants carry the 1-based position of the offending
/// transaction; validation fails fast on the first bad transaction in input
/// order, and the core computation never sees invalid data.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the request file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON request
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request listed no participants
    #[error("at least one participant is required")]
    NoParticipants,

    /// The same participant name appeared twice
    #[error("participant '{name}' is listed more than once")]
    DuplicateParticipant { name: String },

    /// Transaction payer is not in the participant list
    #[error("transaction {row}: payer '{payer}' is not a listed participant")]
    UnknownPayer { row: usize, payer: String },

    /// Transaction amount was zero or negative after rounding
    #[error("transaction {row}: amount must be > 0, got {amount}")]
    NonPositiveAmount { row: usize, amount: Money },

    /// A per-person share was negative
    #[error("transaction {row}: share for '{participant}' must be >= 0")]
    NegativeShare { row: usize, participant: String },

    /// Rounded shares do not add up to the rounded amount
    #[error("transaction {row}: sum of shares ({share_total}) does not equal the amount ({amount})")]
    ShareSumMismatch {
        row: usize,
        share_total: Money,
        amount: Money,
    },

    /// Missing request file argument
    #[error("Missing request file argument. Usage: expense-settler <request.json>")]
    MissingArgument,
}
