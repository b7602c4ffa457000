//! Defines the `Goal` type for budget, savings and investment targets.

use serde::{Deserialize, Serialize};

/// A financial target the user is working towards, e.g. "Savings Goal:
/// 31,000 of 40,000".
///
/// Progress towards a goal is evaluated with
/// [progress](crate::goals::progress), which clamps the ratio to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// A display label, e.g. "Monthly Budget".
    pub label: String,
    /// The amount accumulated so far.
    pub current: f64,
    /// The amount being aimed for. Must be positive to be evaluated.
    pub target: f64,
}

impl Goal {
    /// Create a new goal.
    pub fn new(label: impl Into<String>, current: f64, target: f64) -> Self {
        Self {
            label: label.into(),
            current,
            target,
        }
    }
}
