//! Partial temporal values.
//!
//! A [`PartialTemporal`] is a date or date-time that may stop at any
//! granularity: a bare year, a year and month, a full date, a naive
//! date-time, or a date-time carrying a fixed UTC offset. Each variant holds
//! exactly the fields it specifies, so whether a field is present is decided
//! by the variant itself.
//!
//! Calendar validity is enforced here, at construction. The resolver and the
//! comparators downstream never re-validate.

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use serde::{Serialize, Serializer};

use crate::error::{Result, TemporalError};

const NANOS_PER_SECOND: u32 = 1_000_000_000;
const NANOS_PER_MILLI: u32 = 1_000_000;

// ── Year / YearMonth ────────────────────────────────────────────────────────

/// A calendar year with no month or day.
///
/// Stored as its first day so that rounding down can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(NaiveDate);

impl Year {
    /// Build a year, rejecting values outside chrono's calendar range.
    pub fn new(year: i32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .map(Self)
            .ok_or(TemporalError::InvalidYear(year))
    }

    pub fn value(self) -> i32 {
        self.0.year()
    }

    /// January 1st of this year.
    pub fn first_day(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y"))
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value())
    }
}

/// A year and month with no day.
///
/// Stored as the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Build a year-month. `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or(TemporalError::InvalidYear(year))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Day 1 of this month.
    pub fn first_day(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── TimePrecision ───────────────────────────────────────────────────────────

/// The finest time-of-day field a date-time specifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePrecision {
    /// Hours, minutes and seconds.
    Second,
    /// Hours, minutes, seconds and milliseconds.
    Millisecond,
}

impl TimePrecision {
    /// Infer the precision from a time's sub-second part.
    pub fn infer<T: Timelike>(time: &T) -> Self {
        if time.nanosecond() % NANOS_PER_SECOND == 0 {
            TimePrecision::Second
        } else {
            TimePrecision::Millisecond
        }
    }

    /// Drop every sub-second digit this precision does not specify.
    pub fn truncate(self, datetime: NaiveDateTime) -> NaiveDateTime {
        let nanos = datetime.nanosecond();
        let kept = match self {
            TimePrecision::Second => nanos - nanos % NANOS_PER_SECOND,
            TimePrecision::Millisecond => nanos - nanos % NANOS_PER_MILLI,
        };
        datetime.with_nanosecond(kept).unwrap_or(datetime)
    }
}

// ── TemporalField ───────────────────────────────────────────────────────────

/// A field a partial temporal value may or may not specify.
///
/// Declaration order is the coarse-to-fine comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Offset,
}

impl fmt::Display for TemporalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemporalField::Year => "year",
            TemporalField::Month => "month",
            TemporalField::Day => "day",
            TemporalField::Hour => "hour",
            TemporalField::Minute => "minute",
            TemporalField::Second => "second",
            TemporalField::Millisecond => "millisecond",
            TemporalField::Offset => "offset",
        };
        f.write_str(name)
    }
}

// ── PartialTemporal ─────────────────────────────────────────────────────────

/// A date or date-time specified down to some granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialTemporal {
    /// `2005`
    Year(Year),
    /// `2005-01`
    YearMonth(YearMonth),
    /// `2005-01-15`
    Date(NaiveDate),
    /// `2005-01-15T10:30:00`, no offset.
    DateTime {
        datetime: NaiveDateTime,
        precision: TimePrecision,
    },
    /// `2005-01-15T10:30:00+02:00`
    OffsetDateTime {
        datetime: DateTime<FixedOffset>,
        precision: TimePrecision,
    },
}

impl PartialTemporal {
    pub fn year(year: i32) -> Result<Self> {
        Year::new(year).map(PartialTemporal::Year)
    }

    pub fn year_month(year: i32, month: u32) -> Result<Self> {
        YearMonth::new(year, month).map(PartialTemporal::YearMonth)
    }

    pub fn date(year: i32, month: u32, day: u32) -> Result<Self> {
        naive_date(year, month, day).map(PartialTemporal::Date)
    }

    /// A naive date-time specified to the second.
    pub fn date_time(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        let date = naive_date(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            TemporalError::InvalidTime(format!("{hour:02}:{minute:02}:{second:02}"))
        })?;
        Ok(PartialTemporal::DateTime {
            datetime: date.and_time(time),
            precision: TimePrecision::Second,
        })
    }

    /// A naive date-time specified to the millisecond.
    pub fn date_time_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self> {
        let date = naive_date(year, month, day)?;
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, milli).ok_or_else(|| {
            TemporalError::InvalidTime(format!("{hour:02}:{minute:02}:{second:02}.{milli:03}"))
        })?;
        Ok(PartialTemporal::DateTime {
            datetime: date.and_time(time),
            precision: TimePrecision::Millisecond,
        })
    }

    /// Attach a fixed UTC offset to a naive date-time, keeping its wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidOffset`] if the offset is out of range,
    /// or [`TemporalError::InvalidTime`] if the value has no time of day.
    pub fn with_offset(self, offset_seconds: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(offset_seconds)
            .ok_or(TemporalError::InvalidOffset(offset_seconds))?;
        let (local, precision) = match self {
            PartialTemporal::DateTime {
                datetime,
                precision,
            } => (datetime, precision),
            PartialTemporal::OffsetDateTime {
                datetime,
                precision,
            } => (datetime.naive_local(), precision),
            other => {
                return Err(TemporalError::InvalidTime(format!(
                    "'{other}' has no time of day to carry an offset"
                )));
            }
        };
        let datetime = offset
            .from_local_datetime(&local)
            .single()
            .ok_or(TemporalError::InvalidOffset(offset_seconds))?;
        Ok(PartialTemporal::OffsetDateTime {
            datetime,
            precision,
        })
    }

    /// Re-declare the time-of-day precision, truncating finer digits.
    ///
    /// Values without a time of day are returned unchanged.
    pub fn with_precision(self, precision: TimePrecision) -> Self {
        match self {
            PartialTemporal::DateTime { datetime, .. } => PartialTemporal::DateTime {
                datetime: precision.truncate(datetime),
                precision,
            },
            PartialTemporal::OffsetDateTime { datetime, .. } => {
                let offset = *datetime.offset();
                let local = precision.truncate(datetime.naive_local());
                match offset.from_local_datetime(&local).single() {
                    Some(datetime) => PartialTemporal::OffsetDateTime {
                        datetime,
                        precision,
                    },
                    None => self,
                }
            }
            other => other,
        }
    }

    /// Whether this value specifies `field`.
    pub fn supports(&self, field: TemporalField) -> bool {
        match field {
            TemporalField::Year => true,
            TemporalField::Month => !matches!(self, PartialTemporal::Year(_)),
            TemporalField::Day => !matches!(
                self,
                PartialTemporal::Year(_) | PartialTemporal::YearMonth(_)
            ),
            TemporalField::Hour | TemporalField::Minute | TemporalField::Second => {
                self.precision().is_some()
            }
            TemporalField::Millisecond => self.precision() == Some(TimePrecision::Millisecond),
            TemporalField::Offset => self.offset().is_some(),
        }
    }

    /// Time-of-day precision, if the value has a time of day.
    pub fn precision(&self) -> Option<TimePrecision> {
        match self {
            PartialTemporal::DateTime { precision, .. }
            | PartialTemporal::OffsetDateTime { precision, .. } => Some(*precision),
            _ => None,
        }
    }

    /// The explicit UTC offset, if any.
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            PartialTemporal::OffsetDateTime { datetime, .. } => Some(*datetime.offset()),
            _ => None,
        }
    }
}

fn naive_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TemporalError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

impl From<Year> for PartialTemporal {
    fn from(year: Year) -> Self {
        PartialTemporal::Year(year)
    }
}

impl From<YearMonth> for PartialTemporal {
    fn from(year_month: YearMonth) -> Self {
        PartialTemporal::YearMonth(year_month)
    }
}

impl From<NaiveDate> for PartialTemporal {
    fn from(date: NaiveDate) -> Self {
        PartialTemporal::Date(date)
    }
}

impl From<NaiveDateTime> for PartialTemporal {
    fn from(datetime: NaiveDateTime) -> Self {
        PartialTemporal::DateTime {
            datetime,
            precision: TimePrecision::infer(&datetime),
        }
    }
}

impl From<DateTime<FixedOffset>> for PartialTemporal {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        PartialTemporal::OffsetDateTime {
            datetime,
            precision: TimePrecision::infer(&datetime),
        }
    }
}

impl fmt::Display for PartialTemporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialTemporal::Year(year) => fmt::Display::fmt(year, f),
            PartialTemporal::YearMonth(year_month) => fmt::Display::fmt(year_month, f),
            PartialTemporal::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PartialTemporal::DateTime {
                datetime,
                precision,
            } => write!(
                f,
                "{}",
                precision.truncate(*datetime).format(time_pattern(*precision))
            ),
            PartialTemporal::OffsetDateTime {
                datetime,
                precision,
            } => write!(
                f,
                "{}{}",
                precision
                    .truncate(datetime.naive_local())
                    .format(time_pattern(*precision)),
                datetime.format("%:z")
            ),
        }
    }
}

fn time_pattern(precision: TimePrecision) -> &'static str {
    match precision {
        TimePrecision::Second => "%Y-%m-%dT%H:%M:%S",
        TimePrecision::Millisecond => "%Y-%m-%dT%H:%M:%S%.3f",
    }
}

impl Serialize for PartialTemporal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_rejects_out_of_range() {
        assert_eq!(
            PartialTemporal::year(i32::MAX),
            Err(TemporalError::InvalidYear(i32::MAX))
        );
        assert!(PartialTemporal::year(2005).is_ok());
    }

    #[test]
    fn test_year_month_rejects_bad_month() {
        assert_eq!(
            PartialTemporal::year_month(2005, 13),
            Err(TemporalError::InvalidMonth(13))
        );
        assert_eq!(
            PartialTemporal::year_month(2005, 0),
            Err(TemporalError::InvalidMonth(0))
        );
    }

    #[test]
    fn test_date_rejects_impossible_day() {
        let err = PartialTemporal::date(2005, 2, 29).unwrap_err();
        assert_eq!(err, TemporalError::InvalidDate("2005-02-29".to_string()));
        assert!(PartialTemporal::date(2004, 2, 29).is_ok());
    }

    #[test]
    fn test_date_time_rejects_bad_time() {
        let err = PartialTemporal::date_time(2005, 1, 1, 24, 0, 0).unwrap_err();
        assert_eq!(err, TemporalError::InvalidTime("24:00:00".to_string()));
    }

    #[test]
    fn test_supports_follows_variant() {
        let year = PartialTemporal::year(2005).unwrap();
        assert!(year.supports(TemporalField::Year));
        assert!(!year.supports(TemporalField::Month));

        let date = PartialTemporal::date(2005, 1, 1).unwrap();
        assert!(date.supports(TemporalField::Day));
        assert!(!date.supports(TemporalField::Hour));

        let dt = PartialTemporal::date_time(2005, 1, 1, 10, 0, 0).unwrap();
        assert!(dt.supports(TemporalField::Second));
        assert!(!dt.supports(TemporalField::Millisecond));
        assert!(!dt.supports(TemporalField::Offset));

        let odt = PartialTemporal::date_time_milli(2005, 1, 1, 10, 0, 0, 250)
            .unwrap()
            .with_offset(3600)
            .unwrap();
        assert!(odt.supports(TemporalField::Millisecond));
        assert!(odt.supports(TemporalField::Offset));
    }

    #[test]
    fn test_with_offset_requires_time_of_day() {
        let date = PartialTemporal::date(2005, 1, 1).unwrap();
        assert!(matches!(
            date.with_offset(3600),
            Err(TemporalError::InvalidTime(_))
        ));

        let dt = PartialTemporal::date_time(2005, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(
            dt.with_offset(100_000),
            Err(TemporalError::InvalidOffset(100_000))
        );
    }

    #[test]
    fn test_with_offset_keeps_wall_clock() {
        let odt = PartialTemporal::date_time(2005, 1, 1, 10, 0, 0)
            .unwrap()
            .with_offset(2 * 3600)
            .unwrap();
        assert_eq!(odt.to_string(), "2005-01-01T10:00:00+02:00");
    }

    #[test]
    fn test_from_naive_infers_precision() {
        let whole = NaiveDate::from_ymd_opt(2005, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(
            PartialTemporal::from(whole).precision(),
            Some(TimePrecision::Second)
        );

        let fractional = NaiveDate::from_ymd_opt(2005, 1, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 5)
            .unwrap();
        assert_eq!(
            PartialTemporal::from(fractional).precision(),
            Some(TimePrecision::Millisecond)
        );
    }

    #[test]
    fn test_with_precision_truncates() {
        let dt = PartialTemporal::date_time_milli(2005, 1, 1, 10, 0, 0, 750)
            .unwrap()
            .with_precision(TimePrecision::Second);
        assert_eq!(dt.to_string(), "2005-01-01T10:00:00");
        assert_eq!(dt, PartialTemporal::date_time(2005, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_display_at_own_precision() {
        assert_eq!(PartialTemporal::year(2005).unwrap().to_string(), "2005");
        assert_eq!(
            PartialTemporal::year_month(2005, 3).unwrap().to_string(),
            "2005-03"
        );
        assert_eq!(
            PartialTemporal::date(2005, 3, 7).unwrap().to_string(),
            "2005-03-07"
        );
        assert_eq!(
            PartialTemporal::date_time_milli(2005, 3, 7, 8, 9, 10, 11)
                .unwrap()
                .to_string(),
            "2005-03-07T08:09:10.011"
        );
        assert_eq!(
            PartialTemporal::date_time(2005, 3, 7, 8, 9, 10)
                .unwrap()
                .with_offset(-5 * 3600)
                .unwrap()
                .to_string(),
            "2005-03-07T08:09:10-05:00"
        );
    }

    #[test]
    fn test_serializes_as_iso_string() {
        let ym = PartialTemporal::year_month(2005, 1).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2005-01\"");
        let year = Year::new(1999).unwrap();
        assert_eq!(serde_json::to_string(&year).unwrap(), "1999");
        assert_eq!(
            serde_json::to_string(&TimePrecision::Millisecond).unwrap(),
            "\"millisecond\""
        );
    }
}
