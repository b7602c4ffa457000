//! Spendwise Analytics is the aggregation and projection core of the
//! Spendwise expense tracker.
//!
//! It turns a raw collection of personal and group transaction records into
//! stable, renderer-agnostic derived structures: per-category totals with
//! period-over-period trend deltas, share and magnitude chart series, period
//! income/expense summaries, and goal progress snapshots. The rendering
//! layer maps these structures to pie and bar visuals; the core itself owns
//! no pixels, no persistence and no transport.
//!
//! The typical flow is:
//!
//! 1. An ingestion path appends validated [Transaction](models::Transaction)
//!    records to a [store](stores::TransactionStore).
//! 2. [select](selection::select) resolves a `(mode, range)` pair into the
//!    matching records plus the previous window's records.
//! 3. [aggregate](aggregation::aggregate) computes category totals and trend
//!    deltas, and [ChartProjector](chart::ChartProjector) projects them into
//!    chart series.
//!
//! Every derived structure is recomputed from the current store snapshot on
//! each query; none of them is a source of truth.

#![warn(missing_docs)]

pub mod aggregation;
pub mod chart;
mod error;
pub mod goals;
pub mod models;
pub mod selection;
pub mod stores;
pub mod summary;
pub mod timezone;

pub use error::{InvalidGoalError, ValidationError};

#[cfg(test)]
mod analytics_pipeline_tests {
    use time::macros::date;

    use crate::{
        aggregation::TrendDelta,
        chart::{ChartProjector, Palette},
        goals,
        models::{Goal, GroupDetails, Mode, SettlementStatus, Transaction},
        selection::{TimeRange, select},
        stores::{MemoryTransactionStore, TransactionStore},
        summary::summarize,
    };

    fn group_expense(id: &str, category: &str, amount: f64, date: time::Date) -> Transaction {
        Transaction::build(id, format!("{category} spend"), amount)
            .category(category)
            .date(date)
            .group(GroupDetails {
                paid_by: "Rahul".to_owned(),
                split_between: vec!["Rahul".to_owned(), "Priya".to_owned(), "Amit".to_owned()],
                settlement: SettlementStatus::Pending,
            })
            .finish()
            .unwrap()
    }

    /// Walks the whole pipeline over the group spending fixture: store →
    /// selection → aggregation → projection, plus a goal snapshot.
    #[test]
    fn store_to_chart_pipeline() {
        let mut store = MemoryTransactionStore::new();
        let spending = [
            ("Food", 12400.0),
            ("Travel", 8900.0),
            ("Entertainment", 4200.0),
            ("Housing", 15000.0),
            ("Shopping", 3200.0),
        ];

        for (index, (category, amount)) in spending.iter().enumerate() {
            store
                .append(group_expense(
                    &format!("jan-{index}"),
                    category,
                    *amount,
                    date!(2024 - 01 - 15),
                ))
                .unwrap();
        }
        // Previous window spending so Food gets a numeric delta.
        store
            .append(group_expense(
                "dec-0",
                "Food",
                10800.0,
                date!(2023 - 12 - 15),
            ))
            .unwrap();

        let selection = select(
            &store,
            Mode::Group,
            &TimeRange::ThisMonth,
            date!(2024 - 01 - 20),
        );
        let aggregates = selection.aggregate();

        assert_eq!(aggregates["Food"].delta, TrendDelta::Percent(14.8));
        assert_eq!(aggregates["Housing"].delta, TrendDelta::New);

        let projector = ChartProjector::new(Palette::new(["#10b981", "#3b82f6", "#8b5cf6"]));
        let series = projector.share_series(&aggregates);

        let total: f64 = series.iter().map(|entry| entry.value).sum();
        assert_eq!(total, 43700.0);
        assert_eq!(series[0].name, "Housing");

        let summary = summarize(selection.records.iter(), &selection.range);
        assert_eq!(summary.expense, 43700.0);
        assert_eq!(summary.savings, -43700.0);

        let goal = goals::progress(&Goal::new("Monthly Budget", summary.expense, 50000.0))
            .unwrap();
        assert_eq!(goal.ratio, 0.874);
    }
}
