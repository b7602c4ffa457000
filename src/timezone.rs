//! Resolves the current date in the user's local timezone.

use time::{Date, OffsetDateTime};
use time_tz::{Offset, TimeZone};

/// Today's date in `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// Named range selectors like "this month" are anchored to the user's wall
/// clock, not UTC, so callers resolve today here before selecting.
///
/// Returns `None` if `canonical_timezone` is not a valid canonical timezone
/// name.
pub fn local_date(canonical_timezone: &str) -> Option<Date> {
    let now = OffsetDateTime::now_utc();

    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|timezone| now.to_offset(timezone.get_offset_utc(&now).to_utc()).date())
}
