//! # partial-temporal
//!
//! Normalization and comparison of partial dates and date-times.
//!
//! A recorded date is often only partly known: `2005`, `2005-01`,
//! `2005-01-15`, or a full timestamp with or without a UTC offset. This crate
//! answers three questions about such values without guessing any field the
//! value does not specify:
//!
//! 1. What is the earliest UTC instant it can denote?
//! 2. Given two values, which one says more, and do they agree at all?
//! 3. Do two values name the same date, or does one contain the other?
//!
//! All operations are pure and total. Absence (`None` in, no agreement,
//! nothing comparable) is reported through `Option` or `false`, never
//! through a panic or an error.
//!
//! ## Modules
//!
//! - [`value`] — [`PartialTemporal`] and its building blocks
//! - [`atomize`] — field-level decomposition and [`Resolution`] ranking
//! - [`resolve`] — rounding down to the earliest UTC instant
//! - [`compare`] — [`best_resolution`] and [`same_or_contained`]
//! - [`error`] — Error types

pub mod atomize;
pub mod compare;
pub mod error;
pub mod resolve;
pub mod value;

pub use atomize::{Atomize, AtomizedDate, AtomizedDateTime, Resolution};
pub use compare::{best_resolution, same_or_contained};
pub use error::TemporalError;
pub use resolve::{
    to_earliest_naive, to_earliest_naive_with_options, to_earliest_utc,
    to_earliest_utc_with_options, to_utc, OffsetPolicy, ResolveOptions, UTC,
};
pub use value::{PartialTemporal, TemporalField, TimePrecision, Year, YearMonth};
