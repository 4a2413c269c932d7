//! Error types for partial temporal value construction.
//!
//! Only building a value can fail. Rounding and comparison are total and
//! report absence through `Option`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),
}

pub type Result<T> = std::result::Result<T, TemporalError>;
