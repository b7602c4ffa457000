//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    error::ValidationError,
    models::{Mode, Transaction},
};

/// Handles the ingestion and retrieval of transaction records.
///
/// Stores are mode-partitioned and append-only: records are immutable once
/// appended, and a query against one mode never sees the other mode's
/// transactions. Implementers must keep insertion order stable.
pub trait TransactionStore {
    /// Append a new transaction to the store.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the record violates any data model
    /// invariant or reuses an existing ID. The store is left unchanged on
    /// failure.
    fn append(&mut self, transaction: Transaction) -> Result<(), ValidationError>;

    /// Retrieve the transactions of `mode` whose date falls within
    /// `date_range` (inclusive), in insertion order.
    fn query(&self, mode: Mode, date_range: &RangeInclusive<Date>) -> Vec<Transaction>;
}
