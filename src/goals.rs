//! Computes clamped progress ratios for budget, savings and investment
//! goals.

use serde::Serialize;

use crate::{error::InvalidGoalError, models::Goal};

/// A snapshot of how far along a goal is.
///
/// The ratio is clamped to `[0, 1]`; the raw current/target pair is carried
/// alongside so callers can display "31,000 of 40,000" next to the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    /// The goal's display label.
    pub label: String,
    /// The raw accumulated amount.
    pub current: f64,
    /// The raw target amount.
    pub target: f64,
    /// `current / target`, clamped to `[0, 1]`. Never exceeds 1 even when
    /// the goal is overshot.
    pub ratio: f64,
}

/// Evaluate the progress of `goal`.
///
/// # Errors
/// Returns an [InvalidGoalError] if the goal's target is zero or negative.
/// No partial result is returned.
pub fn progress(goal: &Goal) -> Result<GoalProgress, InvalidGoalError> {
    if goal.target <= 0.0 {
        return Err(InvalidGoalError {
            target: goal.target,
        });
    }

    Ok(GoalProgress {
        label: goal.label.clone(),
        current: goal.current,
        target: goal.target,
        ratio: (goal.current / goal.target).clamp(0.0, 1.0),
    })
}
