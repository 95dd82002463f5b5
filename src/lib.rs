mod consts;
mod leap;
mod prelude;
mod types;

pub use consts::*;
pub use leap::{days_in_year, fixed_leap_days_between, gregorian_leap_days_between, is_leap_year};
pub use types::{Day, Days, Month, Year};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate, TimeDelta};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A date in the International Fixed Calendar: thirteen months of 28 days,
/// a Year Day closing every year, and a Leap Day at the end of the sixth
/// month in Gregorian leap years.
///
/// The canonical representation is the pair (day of year, year); every
/// other field is derived from it. The day of year always equals the
/// Gregorian ordinal day of the represented date; the Leap-Day-aware
/// shift is applied when deriving month and day-of-month, not here.
///
/// Values are immutable: arithmetic returns new instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedDate {
    day_of_year: u16,
    year: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid day of year {day_of_year} for year {year}")]
    InvalidDayOfYear { day_of_year: u16, year: u16 },
    #[display(fmt = "Date outside the supported years 1-{}", MAX_YEAR)]
    OutOfRange,
}

impl std::error::Error for DateError {}

/// Error type for parsing the canonical `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A component failed date validation.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Input does not match the canonical layout.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// Empty date string.
    #[error("Empty date string")]
    EmptyInput,
}

impl FixedDate {
    /// Creates the fixed date representing the given Gregorian date.
    ///
    /// The Gregorian ordinal day of year and the year carry over unchanged.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the Gregorian year is outside 1..=`MAX_YEAR`.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, DateError> {
        let year = date.year();
        if !(1..=i32::from(MAX_YEAR)).contains(&year) {
            return Err(DateError::OutOfRange);
        }
        Ok(Self {
            day_of_year: date.ordinal() as u16,
            year: year as u16,
        })
    }

    /// Creates a fixed date from a year and the ordinal day within it.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the year is 0 or > `MAX_YEAR`, and
    /// `DateError::InvalidDayOfYear` if the ordinal is 0 or past the end of
    /// the year (365, or 366 in a leap year).
    pub fn from_year_day(year: u16, day_of_year: u16) -> Result<Self, DateError> {
        let year = Year::new(year)?.get();
        if day_of_year == 0 || day_of_year > days_in_year(year) {
            return Err(DateError::InvalidDayOfYear { day_of_year, year });
        }
        Ok(Self { day_of_year, year })
    }

    /// Creates a fixed date from a (year, month, day) triple.
    ///
    /// Months run 1..=13 with 28 days each; day 29 is accepted only for the
    /// 13th month (Year Day) and for the 6th month of a leap year (Leap Day).
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear`, `DateError::InvalidMonth` or
    /// `DateError::InvalidDay` for a triple that violates those rules.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year.get(), month.get())?;

        let mut day_of_year =
            u16::from(month.get() - 1) * u16::from(DAYS_IN_MONTH) + u16::from(day.get());
        // Every slot after Leap Day shifts by one in a leap year
        if is_leap_year(year.get()) && month.get() > LEAP_DAY_MONTH {
            day_of_year += 1;
        }
        Ok(Self {
            day_of_year,
            year: year.get(),
        })
    }

    /// The fixed date for the current wall-clock date.
    pub fn today() -> Self {
        Self::from_gregorian(Local::now().date_naive())
            .expect("system clock is within the supported year range")
    }

    /// The year, in range 1..=9999
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Ordinal of the day in year, in range 1..=366
    pub const fn day_of_year(self) -> u16 {
        self.day_of_year
    }

    /// Whether the year of this date is a leap year
    pub const fn is_leap_year(self) -> bool {
        is_leap_year(self.year)
    }

    /// Whether this date is Leap Day, the intercalary day closing the sixth
    /// month of a leap year
    pub const fn is_leap_day(self) -> bool {
        is_leap_year(self.year) && self.day_of_year == LEAP_DAY_OF_YEAR
    }

    /// Whether this date is Year Day, the intercalary day closing every year
    pub const fn is_year_day(self) -> bool {
        self.day_of_year == days_in_year(self.year)
    }

    /// Day of year with the Leap Day slot removed, so the 28-day month grid
    /// applies uniformly. Only meaningful for ordinary days.
    const fn grid_ordinal(self) -> u16 {
        if is_leap_year(self.year) && self.day_of_year > LEAP_DAY_OF_YEAR {
            self.day_of_year - 1
        } else {
            self.day_of_year
        }
    }

    /// The month, in range 1..=13. Leap Day reports as the sixth month and
    /// Year Day as the thirteenth.
    pub const fn month(self) -> u8 {
        if self.is_leap_day() {
            LEAP_DAY_MONTH
        } else if self.is_year_day() {
            YEAR_DAY_MONTH
        } else {
            ((self.grid_ordinal() - 1) / DAYS_IN_MONTH as u16 + 1) as u8
        }
    }

    /// The day of month, in range 1..=29. The intercalary days report as 29.
    pub const fn day_of_month(self) -> u8 {
        if self.is_leap_day() || self.is_year_day() {
            INTERCALARY_DAY
        } else {
            ((self.grid_ordinal() - 1) % (DAYS_IN_MONTH as u16) + 1) as u8
        }
    }

    /// Ordinal of the day in week: 1 for Sunday through 7 for Saturday.
    ///
    /// `None` for Leap Day and Year Day, which fall outside the week cycle.
    pub const fn weekday(self) -> Option<u8> {
        if self.is_leap_day() || self.is_year_day() {
            None
        } else {
            Some((self.day_of_month() - 1) % DAYS_IN_WEEK + 1)
        }
    }

    /// Ordinal of the week in month, in range 1..=4. The intercalary days
    /// close out their month's fourth week.
    pub const fn week_of_month(self) -> u8 {
        if self.is_leap_day() || self.is_year_day() {
            WEEKS_IN_MONTH
        } else {
            (self.day_of_month() - 1) / DAYS_IN_WEEK + 1
        }
    }

    /// Ordinal of the week in year, in range 1..=53. Leap Day reports week
    /// 24; Year Day reports week 52, or 53 in a leap year where it is the
    /// 366th day.
    pub const fn week_of_year(self) -> u8 {
        if self.is_leap_day() {
            LEAP_DAY_WEEK_OF_YEAR
        } else if self.is_year_day() {
            if is_leap_year(self.year) {
                WEEKS_IN_YEAR + 1
            } else {
                WEEKS_IN_YEAR
            }
        } else {
            ((self.day_of_year - 1) / (DAYS_IN_WEEK as u16) + 1) as u8
        }
    }

    /// Quarter of the year, in range 1..=4. Year Day belongs to the fourth.
    pub const fn year_quarter(self) -> u8 {
        if self.is_year_day() {
            QUARTERS_IN_YEAR
        } else {
            ((self.day_of_year - 1) / DAYS_IN_QUARTER + 1) as u8
        }
    }

    /// The Gregorian date this fixed date represents.
    pub fn to_gregorian(self) -> NaiveDate {
        NaiveDate::from_yo_opt(i32::from(self.year), u32::from(self.day_of_year))
            .expect("a FixedDate always holds a valid (year, day of year) pair")
    }

    /// Returns the date `days` after this one. Does not modify this
    /// instance, but creates a new one.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves years 1..=`MAX_YEAR`.
    pub fn add_days(self, days: Days) -> Result<Self, DateError> {
        let delta = TimeDelta::try_days(days.get()).ok_or(DateError::OutOfRange)?;
        let date = self
            .to_gregorian()
            .checked_add_signed(delta)
            .ok_or(DateError::OutOfRange)?;
        Self::from_gregorian(date)
    }

    /// Returns the date `days` before this one.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves years 1..=`MAX_YEAR`.
    pub fn sub_days(self, days: Days) -> Result<Self, DateError> {
        let negated = days.get().checked_neg().ok_or(DateError::OutOfRange)?;
        self.add_days(Days::new(negated))
    }

    /// Signed number of fixed-calendar days from `other` to this date.
    ///
    /// A plain Gregorian day count is off by one across spans containing
    /// exactly one of the two calendars' leap days, because each calendar
    /// inserts its leap day at a different point of the year. The count is
    /// therefore corrected by the leap days each calendar inserts in the
    /// interval. Swapping the operands negates the result, and the result
    /// is zero whenever the two dates are equal.
    pub fn days_since(self, other: Self) -> Days {
        let this = self.to_gregorian();
        let that = other.to_gregorian();
        let gregorian_days = this.signed_duration_since(that).num_days();
        let correction = i64::from(fixed_leap_days_between(this, that))
            - i64::from(gregorian_leap_days_between(this, that));
        let days = if gregorian_days >= 0 {
            gregorian_days + correction
        } else {
            gregorian_days - correction
        };
        Days::new(days)
    }
}

impl FixedDate {
    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for FixedDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected year{DATE_SEPARATOR}month{DATE_SEPARATOR}day: {trimmed}"
            )));
        }

        let year = Self::parse_u16(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let day = Self::parse_u8(parts[2])?;

        Ok(Self::from_ymd(year, month, day)?)
    }
}

impl fmt::Display for FixedDate {
    /// Canonical `YYYY-MM-DD` form with months 01..13; the intercalary days
    /// render as day 29 of their month, e.g. Year Day of 2022 as `2022-13-29`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{}{:02}{}{:02}",
            self.year,
            DATE_SEPARATOR,
            self.month(),
            DATE_SEPARATOR,
            self.day_of_month()
        )
    }
}

impl PartialOrd for FixedDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixedDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.day_of_year).cmp(&(other.year, other.day_of_year))
    }
}

impl TryFrom<NaiveDate> for FixedDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_gregorian(date)
    }
}

impl From<FixedDate> for NaiveDate {
    fn from(date: FixedDate) -> Self {
        date.to_gregorian()
    }
}

impl serde::Serialize for FixedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for FixedDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
