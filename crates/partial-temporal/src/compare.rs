//! Comparing partial temporal values of possibly different resolutions.
//!
//! - [`best_resolution`] picks the more specific of two values that do not
//!   contradict each other.
//! - [`same_or_contained`] checks that two values name the same date, or that
//!   the coarser one contains the finer one. It never looks past the day.
//!
//! Both work on the fields an [`Atomize`] implementor reports and never
//! synthesize a new value.

use log::debug;

use crate::atomize::Atomize;

/// Select the value with the best resolution, provided the two agree.
///
/// Every field present on both sides (year down to millisecond) must be
/// equal; the first disagreement yields `None`. Otherwise the value with the
/// strictly higher [`Resolution`](crate::atomize::Resolution) wins, and on a
/// tie `b` is returned.
///
/// A missing operand is always outranked by a present one, so
/// `best_resolution(None, Some(x))` is `Some(x)`.
///
/// # Examples
///
/// ```
/// use partial_temporal::{best_resolution, PartialTemporal};
///
/// let month = PartialTemporal::year_month(2005, 1).unwrap();
/// let day = PartialTemporal::date(2005, 1, 1).unwrap();
/// assert_eq!(best_resolution(Some(&month), Some(&day)), Some(&day));
///
/// let other = PartialTemporal::date(2005, 2, 1).unwrap();
/// assert_eq!(best_resolution(Some(&day), Some(&other)), None);
/// ```
pub fn best_resolution<'a, T>(a: Option<&'a T>, b: Option<&'a T>) -> Option<&'a T>
where
    T: Atomize + ?Sized,
{
    let (a, b) = match (a, b) {
        (None, None) => return None,
        (Some(a), None) => return Some(a),
        (None, Some(b)) => return Some(b),
        (Some(a), Some(b)) => (a, b),
    };

    let atoms_a = a.atomize();
    let atoms_b = b.atomize();

    if let Some(field) = atoms_a.first_conflict(&atoms_b) {
        debug!("values disagree on {field}, no best resolution");
        return None;
    }

    if atoms_a.resolution > atoms_b.resolution {
        Some(a)
    } else {
        Some(b)
    }
}

/// Whether two values name the same date, or one contains the other.
///
/// Time of day is ignored. Two complete dates must be equal. Otherwise the
/// years must match, and the comparison stops successfully at the first level
/// (month, then day) that either side leaves unspecified. A missing operand
/// yields `false`.
///
/// `false` covers both "different" and "cannot tell".
///
/// # Examples
///
/// ```
/// use partial_temporal::{same_or_contained, PartialTemporal};
///
/// let month = PartialTemporal::year_month(2005, 1).unwrap();
/// let day = PartialTemporal::date(2005, 1, 15).unwrap();
/// assert!(same_or_contained(Some(&month), Some(&day)));
/// assert!(!same_or_contained(None, Some(&day)));
/// ```
pub fn same_or_contained<T>(a: Option<&T>, b: Option<&T>) -> bool
where
    T: Atomize + ?Sized,
{
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };

    let ymd_a = a.atomize_date();
    let ymd_b = b.atomize_date();

    if ymd_a.is_complete() && ymd_b.is_complete() {
        return ymd_a == ymd_b;
    }

    if ymd_a.year != ymd_b.year {
        return false;
    }

    let (Some(month_a), Some(month_b)) = (ymd_a.month, ymd_b.month) else {
        return true;
    };
    if month_a != month_b {
        return false;
    }

    match (ymd_a.day, ymd_b.day) {
        (Some(day_a), Some(day_b)) => day_a == day_b,
        _ => true,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
