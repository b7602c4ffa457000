//! An in-memory implementation of [TransactionStore].
//!
//! This is the only backing the core ships: persistence is an external
//! collaborator's responsibility, so production code loads records into a
//! memory store before the analytics run, and tests use it as a fixture.

use std::{collections::HashSet, ops::RangeInclusive};

use time::Date;

use crate::{
    error::ValidationError,
    models::{Mode, Transaction},
    stores::TransactionStore,
};

/// Holds transaction records in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactionStore {
    transactions: Vec<Transaction>,
    ids: HashSet<String>,
}

impl MemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `transactions`.
    ///
    /// # Errors
    /// Returns the first [ValidationError] encountered while appending.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Result<Self, ValidationError> {
        let mut store = Self::new();

        for transaction in transactions {
            store.append(transaction)?;
        }

        Ok(store)
    }

    /// Replace the stored snapshot with `transactions`.
    ///
    /// This is the refresh path: the new snapshot is served to all subsequent
    /// queries, and in-flight computations over the old snapshot are simply
    /// superseded by the next query (last-write-wins, recompute-on-demand).
    ///
    /// # Errors
    /// Returns the first [ValidationError] in `transactions`. The current
    /// snapshot is kept unchanged on failure.
    pub fn replace(&mut self, transactions: Vec<Transaction>) -> Result<(), ValidationError> {
        let next = Self::with_transactions(transactions)?;
        *self = next;

        Ok(())
    }

    /// The number of records in the store, across both modes.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn append(&mut self, transaction: Transaction) -> Result<(), ValidationError> {
        transaction.validate().inspect_err(|error| {
            tracing::warn!("rejected transaction \"{}\": {error}", transaction.id);
        })?;

        if self.ids.contains(&transaction.id) {
            tracing::warn!("rejected transaction \"{}\": duplicate ID", transaction.id);
            return Err(ValidationError::DuplicateId(transaction.id));
        }

        self.ids.insert(transaction.id.clone());
        self.transactions.push(transaction);

        Ok(())
    }

    fn query(&self, mode: Mode, date_range: &RangeInclusive<Date>) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.mode == mode && date_range.contains(&transaction.date))
            .cloned()
            .collect()
    }
}
