//! Contains the trait and implementations for objects that store the domain
//! [models](crate::models).

mod memory;
mod transaction;

pub use memory::MemoryTransactionStore;
pub use transaction::TransactionStore;
