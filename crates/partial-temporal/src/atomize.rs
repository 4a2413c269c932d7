//! Field-level decomposition of partial temporal values.
//!
//! The comparators never look at a [`PartialTemporal`] directly. They ask an
//! [`Atomize`] implementor for its fields, each `None` unless the value
//! actually specifies it, plus a [`Resolution`] that orders values by how
//! much they specify.
//!
//! Fields are always the value's own wall-clock fields. An offset date-time
//! reports its local fields, not UTC-converted ones.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::value::{PartialTemporal, TemporalField, TimePrecision};

const NANOS_PER_MILLI: u32 = 1_000_000;
const MILLIS_PER_SECOND: u32 = 1_000;

// ── Resolution ──────────────────────────────────────────────────────────────

/// How much of a point in time a value specifies, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Year = 1,
    YearMonth,
    Date,
    DateTime,
    DateTimeMillis,
    OffsetDateTime,
    OffsetDateTimeMillis,
}

impl Resolution {
    /// Integer rank, strictly increasing with specificity.
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

// ── Atomized forms ──────────────────────────────────────────────────────────

/// Every field down to the millisecond, `None` where unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AtomizedDateTime {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub millisecond: Option<u32>,
    pub resolution: Resolution,
}

impl AtomizedDateTime {
    /// Fields in coarse-to-fine comparison order.
    fn fields(&self) -> [(TemporalField, Option<i64>); 7] {
        [
            (TemporalField::Year, self.year.map(i64::from)),
            (TemporalField::Month, self.month.map(i64::from)),
            (TemporalField::Day, self.day.map(i64::from)),
            (TemporalField::Hour, self.hour.map(i64::from)),
            (TemporalField::Minute, self.minute.map(i64::from)),
            (TemporalField::Second, self.second.map(i64::from)),
            (TemporalField::Millisecond, self.millisecond.map(i64::from)),
        ]
    }

    /// The first field both sides specify with different values.
    ///
    /// Fields only one side specifies never conflict.
    pub fn first_conflict(&self, other: &AtomizedDateTime) -> Option<TemporalField> {
        self.fields()
            .into_iter()
            .zip(other.fields())
            .find_map(|((field, ours), (_, theirs))| match (ours, theirs) {
                (Some(a), Some(b)) if a != b => Some(field),
                _ => None,
            })
    }
}

/// Year, month and day only, `None` where unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AtomizedDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl AtomizedDate {
    /// Whether year, month and day are all present.
    pub fn is_complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }
}

impl From<AtomizedDateTime> for AtomizedDate {
    fn from(atoms: AtomizedDateTime) -> Self {
        AtomizedDate {
            year: atoms.year,
            month: atoms.month,
            day: atoms.day,
        }
    }
}

// ── Atomize ─────────────────────────────────────────────────────────────────

/// Decomposition into nullable fields.
///
/// Implementors must report `None` for every field they do not genuinely
/// specify. A defaulted field turns "unknown" into a value that can conflict.
pub trait Atomize {
    fn atomize(&self) -> AtomizedDateTime;

    fn atomize_date(&self) -> AtomizedDate {
        self.atomize().into()
    }
}

impl Atomize for PartialTemporal {
    fn atomize(&self) -> AtomizedDateTime {
        match self {
            PartialTemporal::Year(year) => AtomizedDateTime {
                year: Some(year.value()),
                ..empty(Resolution::Year)
            },
            PartialTemporal::YearMonth(year_month) => AtomizedDateTime {
                year: Some(year_month.year()),
                month: Some(year_month.month()),
                ..empty(Resolution::YearMonth)
            },
            PartialTemporal::Date(date) => with_date(empty(Resolution::Date), date),
            PartialTemporal::DateTime {
                datetime,
                precision,
            } => with_time(
                datetime,
                *precision,
                match precision {
                    TimePrecision::Second => Resolution::DateTime,
                    TimePrecision::Millisecond => Resolution::DateTimeMillis,
                },
            ),
            PartialTemporal::OffsetDateTime {
                datetime,
                precision,
            } => with_time(
                &datetime.naive_local(),
                *precision,
                match precision {
                    TimePrecision::Second => Resolution::OffsetDateTime,
                    TimePrecision::Millisecond => Resolution::OffsetDateTimeMillis,
                },
            ),
        }
    }
}

fn empty(resolution: Resolution) -> AtomizedDateTime {
    AtomizedDateTime {
        year: None,
        month: None,
        day: None,
        hour: None,
        minute: None,
        second: None,
        millisecond: None,
        resolution,
    }
}

fn with_date(atoms: AtomizedDateTime, date: &NaiveDate) -> AtomizedDateTime {
    AtomizedDateTime {
        year: Some(date.year()),
        month: Some(date.month()),
        day: Some(date.day()),
        ..atoms
    }
}

fn with_time(
    datetime: &NaiveDateTime,
    precision: TimePrecision,
    resolution: Resolution,
) -> AtomizedDateTime {
    let millisecond = match precision {
        TimePrecision::Second => None,
        TimePrecision::Millisecond => {
            Some(datetime.nanosecond() / NANOS_PER_MILLI % MILLIS_PER_SECOND)
        }
    };
    AtomizedDateTime {
        hour: Some(datetime.hour()),
        minute: Some(datetime.minute()),
        second: Some(datetime.second()),
        millisecond,
        ..with_date(empty(resolution), &datetime.date())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
