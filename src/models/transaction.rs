//! This file defines the type `Transaction`, the base record of the analytics
//! core, along with its builder and validation rules.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::ValidationError;

/// Whether a transaction brought money in or sent money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. salary or a reimbursement.
    Income,
    /// Money spent.
    Expense,
}

/// The partition a transaction belongs to.
///
/// Group and personal records live in separate partitions that are never
/// merged: a query against one mode only ever sees that mode's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Shared expenses split between group members.
    Group,
    /// The user's own income and spending.
    Personal,
}

/// How far along the settlement of a group expense is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Every participant has paid their share.
    Settled,
    /// No participant has paid yet.
    Pending,
    /// Some, but not all, participants have paid.
    Partial,
}

/// The split details carried by group expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDetails {
    /// The participant who fronted the money.
    pub paid_by: String,
    /// The participants the expense is split between, including the payer.
    pub split_between: Vec<String>,
    /// How far along settlement is. The core only records this; it performs
    /// no debt-netting arithmetic.
    pub settlement: SettlementStatus,
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build]. Records are
/// immutable once appended to a store; corrections are new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The unique ID of the transaction.
    pub id: String,
    /// A short title of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned. Always non-negative.
    pub amount: f64,
    /// Whether the money came in or went out.
    pub kind: TransactionKind,
    /// A user-defined category that describes the type of the transaction.
    ///
    /// Categories are compared by exact string match; case and punctuation
    /// differences are distinct categories.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// The partition the transaction belongs to.
    pub mode: Mode,
    /// Split details, present on group expenses and absent on personal
    /// records.
    pub group: Option<GroupDetails>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: f64,
    ) -> TransactionBuilder {
        TransactionBuilder::new(id, title, amount)
    }

    /// Check the record against the data model invariants.
    ///
    /// # Errors
    /// Returns a [ValidationError] describing the first violated invariant:
    /// - [ValidationError::InvalidAmount] if `amount` is negative or not finite,
    /// - [ValidationError::MissingGroupDetails] for a group expense without split details,
    /// - [ValidationError::EmptySplit] for a group expense split between nobody,
    /// - [ValidationError::PayerNotInSplit] if the payer is not a split participant,
    /// - [ValidationError::UnexpectedGroupDetails] for a personal record carrying split details.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ValidationError::InvalidAmount(self.amount));
        }

        match (self.mode, &self.group) {
            (Mode::Personal, Some(_)) => Err(ValidationError::UnexpectedGroupDetails),
            (Mode::Group, None) if self.kind == TransactionKind::Expense => {
                Err(ValidationError::MissingGroupDetails)
            }
            (Mode::Group, Some(details)) => {
                if details.split_between.is_empty() {
                    Err(ValidationError::EmptySplit)
                } else if !details.split_between.contains(&details.paid_by) {
                    Err(ValidationError::PayerNotInSplit(details.paid_by.clone()))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

/// Builder for creating a new [Transaction].
///
/// The function for finalizing the builder is [TransactionBuilder::finish],
/// which validates the record against the data model invariants.
#[derive(Debug, PartialEq)]
pub struct TransactionBuilder {
    id: String,
    title: String,
    amount: f64,
    kind: TransactionKind,
    category: String,
    date: Date,
    mode: Mode,
    group: Option<GroupDetails>,
}

impl TransactionBuilder {
    /// Create a builder for a new transaction.
    ///
    /// The record defaults to an uncategorized personal expense dated today
    /// (UTC).
    pub fn new(id: impl Into<String>, title: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            kind: TransactionKind::Expense,
            category: "Uncategorized".to_owned(),
            date: OffsetDateTime::now_utc().date(),
            mode: Mode::Personal,
            group: None,
        }
    }

    /// Set the kind (income or expense) of the transaction.
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the category of the transaction.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the date of the transaction.
    pub fn date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    /// Make this a group transaction with the given split details.
    pub fn group(mut self, details: GroupDetails) -> Self {
        self.mode = Mode::Group;
        self.group = Some(details);
        self
    }

    /// Finalize the builder, validating the record.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the record violates any data model
    /// invariant, see [Transaction::validate].
    pub fn finish(self) -> Result<Transaction, ValidationError> {
        let transaction = Transaction {
            id: self.id,
            title: self.title,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
            mode: self.mode,
            group: self.group,
        };

        transaction.validate()?;

        Ok(transaction)
    }
}
