//! Selects which partition (group vs. personal) and which time range the
//! analytics operate over.
//!
//! Selection is the externally owned state of the analytics screens: the
//! active mode and range arrive as plain parameters, the selection is
//! resolved against the store, and the downstream computations stay pure.

use std::{collections::BTreeMap, ops::RangeInclusive};

use time::{Date, Month};

use crate::{
    aggregation::{self, CategoryAggregate},
    models::{Mode, Transaction},
    stores::TransactionStore,
    timezone,
};

/// The time window a query operates over.
///
/// The named variants resolve to calendar-aligned intervals relative to a
/// reference date; `Custom` passes an explicit interval through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// The Monday-to-Sunday week containing the reference date.
    ThisWeek,
    /// The calendar month containing the reference date.
    ThisMonth,
    /// The current month and the two before it, as full calendar months.
    Last3Months,
    /// The calendar year containing the reference date.
    ThisYear,
    /// An explicit inclusive interval.
    Custom {
        /// The first day of the window.
        start: Date,
        /// The last day of the window.
        end: Date,
    },
}

impl TimeRange {
    /// Resolve the range to a concrete calendar interval relative to
    /// `today`.
    ///
    /// Resolution is a pure function of its arguments so that selections are
    /// reproducible in tests; use [TimeRange::resolve_local] to resolve
    /// against the current date in a local timezone.
    pub fn resolve(&self, today: Date) -> RangeInclusive<Date> {
        match *self {
            TimeRange::ThisWeek => {
                let days_into_week = today.weekday().number_days_from_monday() as i64;
                let start = today
                    .checked_sub(time::Duration::days(days_into_week))
                    .unwrap_or(today);
                start..=saturating_add_days(start, 6)
            }
            TimeRange::ThisMonth => month_range(today.year(), today.month()),
            TimeRange::Last3Months => {
                let (start_year, start_month) = months_back(today.year(), today.month(), 2);
                let start = month_range(start_year, start_month);
                let end = month_range(today.year(), today.month());

                *start.start()..=*end.end()
            }
            TimeRange::ThisYear => {
                let start = Date::from_calendar_date(today.year(), Month::January, 1)
                    .unwrap_or(today);
                let end = Date::from_calendar_date(today.year(), Month::December, 31)
                    .unwrap_or(today);
                start..=end
            }
            TimeRange::Custom { start, end } => start..=end,
        }
    }

    /// Resolve the range against today's date in `canonical_timezone`, e.g.
    /// "Pacific/Auckland".
    ///
    /// Returns `None` if the timezone name is not a valid canonical
    /// timezone.
    pub fn resolve_local(&self, canonical_timezone: &str) -> Option<RangeInclusive<Date>> {
        timezone::local_date(canonical_timezone).map(|today| self.resolve(today))
    }
}

/// The records a `(mode, range)` selection yields: the current window's
/// records plus the records of the immediately preceding equal-length
/// window.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The mode the selection was made against. Only this partition's
    /// records are present.
    pub mode: Mode,
    /// The resolved current window.
    pub range: RangeInclusive<Date>,
    /// Records of `mode` within the current window, in insertion order.
    pub records: Vec<Transaction>,
    /// Records of `mode` within the preceding equal-length window, in
    /// insertion order.
    pub previous_records: Vec<Transaction>,
}

impl Selection {
    /// Aggregate the selected records by category, with trend deltas against
    /// the previous window.
    pub fn aggregate(&self) -> BTreeMap<String, CategoryAggregate> {
        aggregation::aggregate(
            self.records.iter().chain(&self.previous_records),
            &self.range,
        )
    }
}

/// Select the records of `mode` within `time_range` resolved against
/// `today`, plus the previous window's records for trend computation.
///
/// Selection is pure and side-effect-free: repeated calls with identical
/// arguments over an unchanged store return equivalent results, and the
/// group and personal partitions are never merged.
pub fn select<S: TransactionStore>(
    store: &S,
    mode: Mode,
    time_range: &TimeRange,
    today: Date,
) -> Selection {
    let range = time_range.resolve(today);
    let prior = aggregation::previous_range(&range);

    tracing::debug!(
        "selecting {mode:?} records for {} to {}",
        range.start(),
        range.end(),
    );

    Selection {
        mode,
        records: store.query(mode, &range),
        previous_records: store.query(mode, &prior),
        range,
    }
}

fn month_range(year: i32, month: Month) -> RangeInclusive<Date> {
    let length = month.length(year);
    let start = Date::from_calendar_date(year, month, 1);
    let end = Date::from_calendar_date(year, month, length);

    match (start, end) {
        (Ok(start), Ok(end)) => start..=end,
        // Unreachable for any year `time` can represent.
        _ => Date::MIN..=Date::MIN,
    }
}

fn months_back(year: i32, month: Month, count: u8) -> (i32, Month) {
    let mut year = year;
    let mut month = month;

    for _ in 0..count {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    (year, month)
}

fn saturating_add_days(date: Date, days: i64) -> Date {
    date.checked_add(time::Duration::days(days)).unwrap_or(date)
}
