//! Rounding partial temporal values down to a concrete UTC instant.
//!
//! Every unspecified field is set to its minimum: month to January, day to
//! the 1st, time of day to midnight. Nothing is guessed and nothing is taken
//! from the system clock, so the result is always the *earliest* instant the
//! specified fields allow.
//!
//! # Functions
//!
//! - [`to_earliest_naive`] — earliest wall-clock date-time, expressed in UTC
//! - [`to_earliest_utc`] — the same instant as `DateTime<Utc>`
//! - [`to_utc`] — shorthand that honors any explicit offset
//! - [`to_earliest_utc_with_options`] — offset handling chosen via [`ResolveOptions`]

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::trace;
use serde::Serialize;

use crate::value::PartialTemporal;

/// The zone every resolved instant is expressed in.
pub const UTC: Utc = Utc;

// ── Options ─────────────────────────────────────────────────────────────────

/// What to do with an explicit UTC offset carried by the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetPolicy {
    /// Interpret the wall clock at its offset and shift to UTC.
    #[default]
    Apply,
    /// Read the wall clock as if it were already UTC.
    Ignore,
}

/// Options for [`to_earliest_utc_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// How an explicit offset is treated.
    pub offset: OffsetPolicy,
}

impl ResolveOptions {
    /// Options that read every wall clock as UTC.
    pub fn ignoring_offset() -> Self {
        ResolveOptions {
            offset: OffsetPolicy::Ignore,
        }
    }

    fn from_flag(ignore_offset: bool) -> Self {
        if ignore_offset {
            ResolveOptions::ignoring_offset()
        } else {
            ResolveOptions::default()
        }
    }
}

// ── Resolution to an instant ────────────────────────────────────────────────

/// Resolve to a UTC instant, honoring any explicit offset.
///
/// # Examples
///
/// ```
/// use partial_temporal::{resolve::to_utc, PartialTemporal};
///
/// let year = PartialTemporal::year(2005).unwrap();
/// let instant = to_utc(Some(&year)).unwrap();
/// assert_eq!(instant.to_rfc3339(), "2005-01-01T00:00:00+00:00");
/// ```
pub fn to_utc(value: Option<&PartialTemporal>) -> Option<DateTime<Utc>> {
    to_earliest_utc(value, false)
}

/// Resolve to the earliest UTC instant consistent with `value`.
///
/// When `ignore_offset` is set, an explicit offset is never consulted and the
/// wall clock is read as UTC.
///
/// Returns `None` when `value` is `None`.
pub fn to_earliest_utc(
    value: Option<&PartialTemporal>,
    ignore_offset: bool,
) -> Option<DateTime<Utc>> {
    to_earliest_utc_with_options(value, &ResolveOptions::from_flag(ignore_offset))
}

/// Resolve to the earliest UTC instant with options.
pub fn to_earliest_utc_with_options(
    value: Option<&PartialTemporal>,
    options: &ResolveOptions,
) -> Option<DateTime<Utc>> {
    to_earliest_naive_with_options(value, options).map(|naive| UTC.from_utc_datetime(&naive))
}

/// Resolve to the earliest wall-clock date-time, expressed in UTC.
pub fn to_earliest_naive(
    value: Option<&PartialTemporal>,
    ignore_offset: bool,
) -> Option<NaiveDateTime> {
    to_earliest_naive_with_options(value, &ResolveOptions::from_flag(ignore_offset))
}

/// Resolve to the earliest wall-clock date-time with options.
///
/// Only the offset path can move the calendar date away from the value's own
/// fields. Time-of-day values are truncated to their declared precision.
pub fn to_earliest_naive_with_options(
    value: Option<&PartialTemporal>,
    options: &ResolveOptions,
) -> Option<NaiveDateTime> {
    let Some(value) = value else {
        trace!("no value to resolve");
        return None;
    };

    let start_of = |date: NaiveDate| date.and_hms_opt(0, 0, 0);

    match value {
        PartialTemporal::OffsetDateTime {
            datetime,
            precision,
        } => {
            let wall_clock = match options.offset {
                OffsetPolicy::Apply => datetime.naive_utc(),
                OffsetPolicy::Ignore => datetime.naive_local(),
            };
            Some(precision.truncate(wall_clock))
        }
        PartialTemporal::DateTime {
            datetime,
            precision,
        } => Some(precision.truncate(*datetime)),
        PartialTemporal::Date(date) => start_of(*date),
        PartialTemporal::YearMonth(year_month) => start_of(year_month.first_day()),
        PartialTemporal::Year(year) => start_of(year.first_day()),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_none_resolves_to_none() {
        assert_eq!(to_earliest_utc(None, false), None);
        assert_eq!(to_earliest_utc(None, true), None);
        assert_eq!(to_utc(None), None);
    }

    #[test]
    fn test_year_month_rounds_to_first_day() {
        let ym = PartialTemporal::year_month(2005, 1).unwrap();
        assert_eq!(
            to_earliest_utc(Some(&ym), false),
            Some(utc("2005-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_year_rounds_to_january_first() {
        let year = PartialTemporal::year(2005).unwrap();
        assert_eq!(
            to_earliest_utc(Some(&year), false),
            Some(utc("2005-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_mid_year_month_keeps_month() {
        let ym = PartialTemporal::year_month(2005, 11).unwrap();
        assert_eq!(
            to_earliest_utc(Some(&ym), false),
            Some(utc("2005-11-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_date_rounds_to_midnight() {
        let date = PartialTemporal::date(2005, 3, 7).unwrap();
        assert_eq!(
            to_earliest_utc(Some(&date), false),
            Some(utc("2005-03-07T00:00:00Z"))
        );
    }

    #[test]
    fn test_naive_date_time_is_read_as_utc() {
        let dt = PartialTemporal::date_time(2005, 3, 7, 8, 9, 10).unwrap();
        assert_eq!(
            to_earliest_utc(Some(&dt), false),
            Some(utc("2005-03-07T08:09:10Z"))
        );
    }

    #[test]
    fn test_offset_applied_shifts_calendar_date() {
        // 23:30 at -05:00 is 04:30 the next day in UTC.
        let odt = PartialTemporal::date_time(2005, 12, 31, 23, 30, 0)
            .unwrap()
            .with_offset(-5 * 3600)
            .unwrap();
        assert_eq!(
            to_earliest_utc(Some(&odt), false),
            Some(utc("2006-01-01T04:30:00Z"))
        );
    }

    #[test]
    fn test_offset_ignored_reads_wall_clock() {
        let odt = PartialTemporal::date_time(2005, 12, 31, 23, 30, 0)
            .unwrap()
            .with_offset(-5 * 3600)
            .unwrap();
        assert_eq!(
            to_earliest_utc(Some(&odt), true),
            Some(utc("2005-12-31T23:30:00Z"))
        );
        assert_ne!(
            to_earliest_utc(Some(&odt), true),
            to_earliest_utc(Some(&odt), false)
        );
    }

    #[test]
    fn test_to_utc_honors_offset() {
        let odt = PartialTemporal::date_time(2005, 6, 1, 12, 0, 0)
            .unwrap()
            .with_offset(2 * 3600)
            .unwrap();
        assert_eq!(to_utc(Some(&odt)), Some(utc("2005-06-01T10:00:00Z")));
    }

    #[test]
    fn test_options_match_flag() {
        let odt = PartialTemporal::date_time(2005, 6, 1, 12, 0, 0)
            .unwrap()
            .with_offset(2 * 3600)
            .unwrap();
        assert_eq!(
            to_earliest_utc_with_options(Some(&odt), &ResolveOptions::ignoring_offset()),
            to_earliest_utc(Some(&odt), true)
        );
        assert_eq!(
            to_earliest_utc_with_options(Some(&odt), &ResolveOptions::default()),
            to_earliest_utc(Some(&odt), false)
        );
    }

    #[test]
    fn test_millis_kept_at_millisecond_precision() {
        let dt = PartialTemporal::date_time_milli(2005, 3, 7, 8, 9, 10, 250).unwrap();
        assert_eq!(
            to_earliest_utc(Some(&dt), false),
            Some(utc("2005-03-07T08:09:10.250Z"))
        );
    }

    #[test]
    fn test_sub_precision_digits_are_dropped() {
        let naive = NaiveDate::from_ymd_opt(2005, 3, 7)
            .unwrap()
            .and_hms_nano_opt(8, 9, 10, 250_999_999)
            .unwrap();
        let dt = PartialTemporal::DateTime {
            datetime: naive,
            precision: crate::value::TimePrecision::Second,
        };
        assert_eq!(
            to_earliest_naive(Some(&dt), false),
            naive.date().and_hms_opt(8, 9, 10)
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let ym = PartialTemporal::year_month(1999, 12).unwrap();
        let first = to_earliest_utc(Some(&ym), false);
        let second = to_earliest_utc(Some(&ym), false);
        assert_eq!(first, second);
    }
}
