// SPDX-License-Identifier: MIT

//!
//! The Timelive calendar date type
//!

use crate::DisplayUnit;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// The minimum year allowed in the Timelive system
pub const MIN_YEAR: i32 = 1;

/// The maximum year allowed in the Timelive system
pub const MAX_YEAR: i32 = 9999;

/// Errors that can arise in relation to a [`CalendarDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The year, month and day do not form a real calendar date (e.g. month
    /// 13, day 32, or the 30th of February)
    #[error("`{year:04}-{month:02}-{day:02}` is not a valid date")]
    InvalidDate { year: i64, month: i64, day: i64 },
}

/// The Timelive date type
///
/// A day-granularity point in time.  Every instance is a real calendar date,
/// so there is no "invalid date" value to guard against downstream.  Derived
/// dates (e.g. the start of a month) are always new values.
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Create a new [`CalendarDate`] if the result will be valid
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        let invalid = || DateError::InvalidDate {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        };
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(invalid)
    }

    /// Get the year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Get the month (1 to 12)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Get the day of the month (1 to 31)
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Get the underlying `chrono` date
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The first day of the unit (month or year) containing this date
    pub fn start_of(&self, unit: DisplayUnit) -> Self {
        let month = match unit {
            DisplayUnit::Month => self.month(),
            DisplayUnit::Year => 1,
        };
        // The first of any month of an existing year always exists
        CalendarDate(self.0.with_day(1).and_then(|d| d.with_month(month)).unwrap_or(self.0))
    }

    /// Advance (or go back, if negative) by a number of whole units.  The day
    /// of the month is clamped when the target month is shorter (e.g. the
    /// 31st of January plus one month is the 28th/29th of February).
    pub fn add_units(&self, unit: DisplayUnit, amount: i32) -> Self {
        let months = match unit {
            DisplayUnit::Month => amount,
            DisplayUnit::Year => amount.saturating_mul(12),
        };
        CalendarDate(add_months_clamped(self.0, months))
    }

    /// Advance (or go back, if negative) by a number of days
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = self
            .0
            .checked_add_signed(chrono::Duration::days(days))
            .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
        CalendarDate(shifted)
    }

    /// The number of days from `other` to `self` (negative if `self` is
    /// earlier)
    pub fn days_since(&self, other: &CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    /// The number of whole months from `other` to `self`, truncated towards
    /// zero
    pub fn whole_months_since(&self, other: &CalendarDate) -> i64 {
        match self.cmp(other) {
            Ordering::Equal => 0,
            Ordering::Less => -other.whole_months_since(self),
            Ordering::Greater => {
                let mut months = i64::from(self.year() - other.year()) * 12
                    + i64::from(self.month())
                    - i64::from(other.month());
                // The anchor is clamped to the end of shorter months, so a
                // month has only passed once the anchor has been reached
                let anchor = add_months_clamped(other.0, months as i32);
                if anchor > self.0 {
                    months -= 1;
                }
                months
            }
        }
    }

    /// The number of whole units from `other` to `self`, truncated towards
    /// zero
    pub fn whole_units_since(&self, other: &CalendarDate, unit: DisplayUnit) -> i64 {
        let months = self.whole_months_since(other);
        match unit {
            DisplayUnit::Month => months,
            DisplayUnit::Year => months / 12,
        }
    }

    /// Whether both dates render in the same labelled bucket for the unit
    pub fn same_unit(&self, other: &CalendarDate, unit: DisplayUnit) -> bool {
        match unit {
            DisplayUnit::Month => self.year() == other.year() && self.month() == other.month(),
            DisplayUnit::Year => self.year() == other.year(),
        }
    }

    /// The date halfway between `self` and `other` (rounded down to the day)
    pub fn midpoint(&self, other: &CalendarDate) -> Self {
        let (a, b) = if self <= other {
            (self, other)
        } else {
            (other, self)
        };
        a.add_days(b.days_since(a) / 2)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        CalendarDate(value)
    }
}

fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(if months < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}
