//! Groups transactions by category within a time window and computes
//! per-category totals and trend deltas against the prior equal-length
//! window.

use std::{collections::BTreeMap, ops::RangeInclusive};

use serde::{Serialize, Serializer};
use time::{Date, Duration};

use crate::models::{Transaction, TransactionKind};

/// The period-over-period change of a category's spending.
///
/// Division by zero in the trend computation is not an error: a category with
/// no spending in the previous window is classified rather than faulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendDelta {
    /// The percentage change against the previous window, rounded to one
    /// decimal place. Positive for an increase, negative for a decrease.
    Percent(f64),
    /// The category had spending in the current window but none in the
    /// previous one, so a percentage is undefined.
    New,
    /// The category had spending in the previous window but none in the
    /// current one.
    Cleared,
}

impl Serialize for TrendDelta {
    // Serialized as a bare number or the strings "new"/"cleared" so the
    // rendering layer can branch on the JSON type.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TrendDelta::Percent(percent) => serializer.serialize_f64(*percent),
            TrendDelta::New => serializer.serialize_str("new"),
            TrendDelta::Cleared => serializer.serialize_str("cleared"),
        }
    }
}

/// The expense total of one category over a window, with its trend against
/// the previous window.
///
/// Aggregates are derived values: they are recomputed from the store snapshot
/// on every query, never mutated independently and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    /// The category the transactions were grouped by (exact string match).
    pub category: String,
    /// The sum of expense amounts in the current window.
    pub current_sum: f64,
    /// The sum of expense amounts in the previous window.
    pub previous_sum: f64,
    /// The period-over-period change.
    pub delta: TrendDelta,
    /// The color the rendering layer should use for this category.
    ///
    /// `None` until assigned by the [chart projector](crate::chart::ChartProjector).
    pub display_color: Option<String>,
}

/// The window immediately preceding `range`, of identical length.
///
/// A 31-day month is compared against the 31 days before its first day, even
/// when the preceding calendar month is shorter.
pub fn previous_range(range: &RangeInclusive<Date>) -> RangeInclusive<Date> {
    let length = Duration::days((*range.end() - *range.start()).whole_days() + 1);

    let end = range
        .start()
        .checked_sub(Duration::days(1))
        .unwrap_or(Date::MIN);
    let start = range.start().checked_sub(length).unwrap_or(Date::MIN);

    start..=end
}

/// Group `records` by category and compute each category's expense totals for
/// `current_range` and the immediately preceding window of identical length.
///
/// Only expense records count towards sums; income records and records
/// outside both windows are ignored. Categories with no spending in either
/// window are omitted. The result is an ordered map keyed by exact category
/// string, so repeated calls over an unchanged snapshot yield identical
/// results.
pub fn aggregate<'a, I>(
    records: I,
    current_range: &RangeInclusive<Date>,
) -> BTreeMap<String, CategoryAggregate>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let prior_range = previous_range(current_range);
    let mut sums: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for record in records {
        if record.kind != TransactionKind::Expense {
            continue;
        }

        let (current, previous) = sums.entry(record.category.clone()).or_insert((0.0, 0.0));

        if current_range.contains(&record.date) {
            *current += record.amount;
        } else if prior_range.contains(&record.date) {
            *previous += record.amount;
        }
    }

    let aggregates: BTreeMap<String, CategoryAggregate> = sums
        .into_iter()
        .filter(|(_, (current, previous))| *current > 0.0 || *previous > 0.0)
        .map(|(category, (current_sum, previous_sum))| {
            let delta = classify_delta(current_sum, previous_sum);

            (
                category.clone(),
                CategoryAggregate {
                    category,
                    current_sum,
                    previous_sum,
                    delta,
                    display_color: None,
                },
            )
        })
        .collect();

    tracing::debug!(
        "aggregated {} categories for {} to {}",
        aggregates.len(),
        current_range.start(),
        current_range.end(),
    );

    aggregates
}

fn classify_delta(current_sum: f64, previous_sum: f64) -> TrendDelta {
    if previous_sum > 0.0 && current_sum > 0.0 {
        let percent = (current_sum - previous_sum) / previous_sum * 100.0;
        TrendDelta::Percent(round_to_one_decimal(percent))
    } else if previous_sum > 0.0 {
        TrendDelta::Cleared
    } else {
        TrendDelta::New
    }
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod aggregation_tests {
    use time::macros::date;

    use crate::models::{Transaction, TransactionKind};

    use super::{TrendDelta, aggregate, previous_range};

    fn expense(id: &str, category: &str, amount: f64, date: time::Date) -> Transaction {
        Transaction::build(id, format!("{category} spend"), amount)
            .category(category)
            .date(date)
            .finish()
            .unwrap()
    }

    fn january() -> std::ops::RangeInclusive<time::Date> {
        date!(2024 - 01 - 01)..=date!(2024 - 01 - 31)
    }

    #[test]
    fn previous_range_shifts_back_by_window_length() {
        // January is 31 days, so the previous window is the 31 days ending
        // on December 31st, not calendar December.
        assert_eq!(
            previous_range(&january()),
            date!(2023 - 12 - 01)..=date!(2023 - 12 - 31)
        );

        assert_eq!(
            previous_range(&(date!(2024 - 03 - 04)..=date!(2024 - 03 - 10))),
            date!(2024 - 02 - 26)..=date!(2024 - 03 - 03)
        );
    }

    #[test]
    fn sums_expenses_per_category_in_each_window() {
        let records = vec![
            expense("1", "Food", 12400.0, date!(2024 - 01 - 10)),
            expense("2", "Food", 0.0, date!(2024 - 01 - 12)),
            expense("3", "Food", 10800.0, date!(2023 - 12 - 15)),
            expense("4", "Travel", 8900.0, date!(2024 - 01 - 20)),
            expense("5", "Travel", 12200.0, date!(2023 - 12 - 20)),
        ];

        let aggregates = aggregate(&records, &january());

        let food = &aggregates["Food"];
        assert_eq!(food.current_sum, 12400.0);
        assert_eq!(food.previous_sum, 10800.0);
        assert_eq!(food.delta, TrendDelta::Percent(14.8));

        let travel = &aggregates["Travel"];
        assert_eq!(travel.current_sum, 8900.0);
        assert_eq!(travel.previous_sum, 12200.0);
        assert_eq!(travel.delta, TrendDelta::Percent(-27.0));
    }

    #[test]
    fn delta_sign_matches_direction_of_change() {
        let records = vec![
            expense("1", "Up", 200.0, date!(2024 - 01 - 10)),
            expense("2", "Up", 100.0, date!(2023 - 12 - 10)),
            expense("3", "Down", 100.0, date!(2024 - 01 - 10)),
            expense("4", "Down", 200.0, date!(2023 - 12 - 10)),
            expense("5", "Flat", 150.0, date!(2024 - 01 - 10)),
            expense("6", "Flat", 150.0, date!(2023 - 12 - 10)),
        ];

        let aggregates = aggregate(&records, &january());

        assert_eq!(aggregates["Up"].delta, TrendDelta::Percent(100.0));
        assert_eq!(aggregates["Down"].delta, TrendDelta::Percent(-50.0));
        assert_eq!(aggregates["Flat"].delta, TrendDelta::Percent(0.0));
    }

    #[test]
    fn category_without_previous_spending_is_flagged_new() {
        let records = vec![expense("1", "Gadgets", 500.0, date!(2024 - 01 - 15))];

        let aggregates = aggregate(&records, &january());

        assert_eq!(aggregates["Gadgets"].delta, TrendDelta::New);
    }

    #[test]
    fn category_without_current_spending_is_flagged_cleared() {
        let records = vec![expense("1", "Gym", 1200.0, date!(2023 - 12 - 05))];

        let aggregates = aggregate(&records, &january());

        assert_eq!(aggregates["Gym"].delta, TrendDelta::Cleared);
        assert_eq!(aggregates["Gym"].current_sum, 0.0);
    }

    #[test]
    fn category_with_no_spending_in_either_window_is_omitted() {
        let records = vec![
            expense("1", "Ancient", 999.0, date!(2022 - 06 - 01)),
            expense("2", "Zeroes", 0.0, date!(2024 - 01 - 10)),
        ];

        let aggregates = aggregate(&records, &january());

        assert!(aggregates.is_empty());
    }

    #[test]
    fn income_records_do_not_count_towards_sums() {
        let records = vec![
            expense("1", "Food", 100.0, date!(2024 - 01 - 10)),
            Transaction::build("2", "Salary", 65000.0)
                .kind(TransactionKind::Income)
                .category("Food")
                .date(date!(2024 - 01 - 01))
                .finish()
                .unwrap(),
        ];

        let aggregates = aggregate(&records, &january());

        assert_eq!(aggregates["Food"].current_sum, 100.0);
    }

    #[test]
    fn categories_are_keyed_by_exact_string_match() {
        let records = vec![
            expense("1", "Food", 100.0, date!(2024 - 01 - 10)),
            expense("2", "food", 200.0, date!(2024 - 01 - 11)),
            expense("3", "Food & Dining", 300.0, date!(2024 - 01 - 12)),
        ];

        let aggregates = aggregate(&records, &january());

        assert_eq!(aggregates.len(), 3);
        assert_eq!(aggregates["Food"].current_sum, 100.0);
        assert_eq!(aggregates["food"].current_sum, 200.0);
        assert_eq!(aggregates["Food & Dining"].current_sum, 300.0);
    }

    #[test]
    fn delta_percent_is_rounded_to_one_decimal() {
        let records = vec![
            expense("1", "Food", 100.0, date!(2024 - 01 - 10)),
            expense("2", "Food", 300.0, date!(2023 - 12 - 10)),
        ];

        let aggregates = aggregate(&records, &january());

        // (100 - 300) / 300 * 100 = -66.666... rounds to -66.7.
        assert_eq!(aggregates["Food"].delta, TrendDelta::Percent(-66.7));
    }

    #[test]
    fn aggregate_is_idempotent_over_an_unchanged_snapshot() {
        let records = vec![
            expense("1", "Food", 12400.0, date!(2024 - 01 - 10)),
            expense("2", "Travel", 8900.0, date!(2024 - 01 - 20)),
            expense("3", "Food", 10800.0, date!(2023 - 12 - 15)),
        ];

        let first = aggregate(&records, &january());
        let second = aggregate(&records, &january());

        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_over_no_records_is_empty() {
        let aggregates = aggregate(&[], &january());

        assert!(aggregates.is_empty());
    }

    #[test]
    fn trend_delta_serializes_as_number_or_flag_string() {
        assert_eq!(
            serde_json::to_string(&TrendDelta::Percent(14.8)).unwrap(),
            "14.8"
        );
        assert_eq!(serde_json::to_string(&TrendDelta::New).unwrap(), "\"new\"");
        assert_eq!(
            serde_json::to_string(&TrendDelta::Cleared).unwrap(),
            "\"cleared\""
        );
    }
}
