//! Contains the domain models of the analytics core.

mod goal;
mod transaction;

pub use goal::Goal;
pub use transaction::{
    GroupDetails, Mode, SettlementStatus, Transaction, TransactionBuilder, TransactionKind,
};
