//! Computes income/expense/savings totals and headline insights for a time
//! window.

use std::{collections::BTreeMap, ops::RangeInclusive};

use serde::Serialize;
use time::Date;

use crate::models::{Transaction, TransactionKind};

/// The income, expense and savings totals of one window, e.g. for
/// month-over-month income vs. expense bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodSummary {
    /// The sum of income amounts in the window.
    pub income: f64,
    /// The sum of expense amounts in the window.
    pub expense: f64,
    /// `income - expense`. Negative when the window overspent.
    pub savings: f64,
}

/// A category name with its expense total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The category's expense total in the window.
    pub total: f64,
}

/// Headline figures for a window: the top spending category, the single
/// largest expense and the average daily spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// The category with the highest expense total, ties broken by name
    /// ascending. `None` when the window has no expenses.
    pub top_category: Option<CategoryTotal>,
    /// The single biggest expense record in the window. Amount ties keep the
    /// earliest appended record.
    pub largest_expense: Option<Transaction>,
    /// The expense total divided by the number of days in the window.
    pub daily_average: f64,
}

/// Sum the income and expense amounts of `records` within `range`.
pub fn summarize<'a, I>(records: I, range: &RangeInclusive<Date>) -> PeriodSummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = 0.0;
    let mut expense = 0.0;

    for record in records {
        if !range.contains(&record.date) {
            continue;
        }

        match record.kind {
            TransactionKind::Income => income += record.amount,
            TransactionKind::Expense => expense += record.amount,
        }
    }

    PeriodSummary {
        income,
        expense,
        savings: income - expense,
    }
}

/// Compute the headline insights of `records` within `range`.
pub fn insights<'a, I>(records: I, range: &RangeInclusive<Date>) -> Insights
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    let mut largest_expense: Option<&Transaction> = None;
    let mut expense_total = 0.0;

    for record in records {
        if record.kind != TransactionKind::Expense || !range.contains(&record.date) {
            continue;
        }

        *totals.entry(record.category.as_str()).or_insert(0.0) += record.amount;
        expense_total += record.amount;

        let is_larger = largest_expense
            .map(|current| record.amount > current.amount)
            .unwrap_or(true);
        if is_larger {
            largest_expense = Some(record);
        }
    }

    // BTreeMap iteration is name-ascending, so keeping strict "greater than"
    // picks the alphabetically first category on ties.
    let top_category = totals
        .into_iter()
        .fold(None::<CategoryTotal>, |best, (category, total)| {
            match best {
                Some(best) if best.total >= total => Some(best),
                _ => Some(CategoryTotal {
                    category: category.to_owned(),
                    total,
                }),
            }
        });

    let days = (*range.end() - *range.start()).whole_days() + 1;
    let daily_average = if days > 0 { expense_total / days as f64 } else { 0.0 };

    Insights {
        top_category,
        largest_expense: largest_expense.cloned(),
        daily_average,
    }
}
