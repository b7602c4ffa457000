//! Defines the error types surfaced by the analytics core.

use thiserror::Error;

/// Errors that can occur while creating or appending a transaction record.
///
/// Validation happens at ingestion: a record that fails any of these checks
/// is rejected outright and the store is left unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A transaction was created with a negative or non-finite amount.
    ///
    /// Amounts are always non-negative; the direction of the money flow is
    /// carried by the transaction kind (income or expense), not by the sign.
    #[error("transaction amounts must be non-negative and finite, got {0}")]
    InvalidAmount(f64),

    /// A transaction was appended with an ID that already exists in the store.
    ///
    /// Records are immutable once stored. Corrections are new records with
    /// new IDs, not edits, so a repeated ID always indicates a caller bug.
    #[error("a transaction with the ID \"{0}\" already exists in the store")]
    DuplicateId(String),

    /// A group expense was created without payer and split details.
    #[error("group expenses must carry payer and split details")]
    MissingGroupDetails,

    /// A group expense was created with an empty split.
    #[error("group expenses must be split between at least one participant")]
    EmptySplit,

    /// The payer of a group expense is not one of the split participants.
    #[error("the payer \"{0}\" is not among the split participants")]
    PayerNotInSplit(String),

    /// A personal transaction was created with group split details attached.
    #[error("personal transactions must not carry group split details")]
    UnexpectedGroupDetails,
}

/// The error returned when evaluating a goal with a non-positive target.
///
/// Progress is the ratio `current / target`, which is meaningless for a zero
/// or negative target. No partial result is returned.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("goal targets must be positive, got {target}")]
pub struct InvalidGoalError {
    /// The rejected target value.
    pub target: f64,
}
