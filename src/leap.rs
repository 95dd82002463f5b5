//! Leap-day counting for the Gregorian and International Fixed calendars.
//!
//! The fixed calendar inserts its leap day at the end of its sixth month
//! while the Gregorian calendar inserts February 29, so date differences
//! between the two systems need to know how many of each fall inside an
//! interval. Both counting functions work on the half-open interval
//! `[earlier, later)`: the earlier date is included, the later excluded,
//! and the argument order does not matter.

use chrono::{Datelike, NaiveDate};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, GREGORIAN_CYCLE, GREGORIAN_LEAP_DAY,
    GREGORIAN_LEAP_MONTH, LEAP_DAY_GREGORIAN_DAY, LEAP_DAY_GREGORIAN_MONTH, LEAP_YEAR_CYCLE,
};

/// Returns `true` if the given year is a leap year under the Gregorian rules.
pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in the given fixed-calendar year (365 or 366).
pub const fn days_in_year(year: u16) -> u16 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

/// Counts the Gregorian leap days (February 29) between the given dates.
///
/// The count covers `[earlier, later)` and is symmetric in its arguments.
pub fn gregorian_leap_days_between(date1: NaiveDate, date2: NaiveDate) -> u32 {
    anchor_days_between(date1, date2, GREGORIAN_LEAP_MONTH, GREGORIAN_LEAP_DAY)
}

/// Counts the fixed-calendar leap days between the given dates.
///
/// A fixed leap day is anchored on June 27 of a Gregorian leap year.
/// The count covers `[earlier, later)` and is symmetric in its arguments.
pub fn fixed_leap_days_between(date1: NaiveDate, date2: NaiveDate) -> u32 {
    anchor_days_between(date1, date2, LEAP_DAY_GREGORIAN_MONTH, LEAP_DAY_GREGORIAN_DAY)
}

/// Counts leap-year `(month, day)` anchor dates in `[min(date1, date2), max(date1, date2))`.
fn anchor_days_between(date1: NaiveDate, date2: NaiveDate, month: u32, day: u32) -> u32 {
    let (earlier, later) = if date1 <= date2 {
        (date1, date2)
    } else {
        (date2, date1)
    };
    let count = anchors_before(later, month, day) - anchors_before(earlier, month, day);
    count as u32
}

/// Counts leap-year `(month, day)` anchor dates strictly before `date`.
///
/// Only differences of this function are meaningful; the absolute value is
/// relative to an arbitrary epoch. Closed form, so interval counts stay
/// O(1) no matter how many years they span.
fn anchors_before(date: NaiveDate, month: u32, day: u32) -> i64 {
    let year = date.year();
    let mut count = leap_years_through(year - 1);
    if is_proleptic_leap_year(year) && (date.month(), date.day()) > (month, day) {
        count += 1;
    }
    count
}

/// Leap years up to and including `year`, relative to an arbitrary epoch.
fn leap_years_through(year: i32) -> i64 {
    let year = i64::from(year);
    year.div_euclid(i64::from(LEAP_YEAR_CYCLE)) - year.div_euclid(i64::from(CENTURY_CYCLE))
        + year.div_euclid(i64::from(GREGORIAN_CYCLE))
}

/// Leap-year test over the full proleptic Gregorian year range of the
/// collaborating date type, negative years included.
fn is_proleptic_leap_year(year: i32) -> bool {
    (year.rem_euclid(i32::from(LEAP_YEAR_CYCLE)) == 0
        && year.rem_euclid(i32::from(CENTURY_CYCLE)) != 0)
        || year.rem_euclid(i32::from(GREGORIAN_CYCLE)) == 0
}
