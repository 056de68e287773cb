// SPDX-License-Identifier: MIT

//!
//! Fuzzy parsing of `|date|` tokens into [`CalendarDate`]s
//!

use crate::{CalendarDate, ChronoDateMath, DateMath};
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Two digit years below this map to the 2000s, those at or above it map to
/// the 1900s (i.e. `00..=68` is `2000..=2068` and `69..=99` is `1969..=1999`)
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

/// Errors that can arise when parsing a date token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("The date is empty")]
    Empty,

    #[error("`{0}` is not a recognised date")]
    Unrecognised(String),
}

/// The order in which the numeric parts of a date are written
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// Year-Month-Day
    #[default]
    #[display("ymd")]
    Ymd,

    /// Day-Month-Year
    #[display("dmy")]
    Dmy,

    /// Month-Day-Year
    #[display("mdy")]
    Mdy,
}

impl DateOrder {
    /// The pattern used to write dates in this order (e.g. in a demo block)
    pub fn display_pattern(&self) -> &'static str {
        match self {
            DateOrder::Ymd => "YYYY-MM-DD",
            DateOrder::Dmy => "DD/MM/YYYY",
            DateOrder::Mdy => "MM/DD/YYYY",
        }
    }

    /// Which capture group (1 based) holds the year, month and day
    fn group_indices(&self) -> (usize, usize, usize) {
        match self {
            DateOrder::Ymd => (1, 2, 3),
            DateOrder::Dmy => (3, 2, 1),
            DateOrder::Mdy => (3, 1, 2),
        }
    }

    /// The three-group pattern matching this order
    fn regex(&self) -> &'static Regex {
        let patterns = patterns();
        match self {
            DateOrder::Ymd => &patterns.year_first,
            DateOrder::Dmy | DateOrder::Mdy => &patterns.year_last,
        }
    }
}

impl std::str::FromStr for DateOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ymd" => Ok(DateOrder::Ymd),
            "dmy" => Ok(DateOrder::Dmy),
            "mdy" => Ok(DateOrder::Mdy),
            _ => Err(ParseError::Unrecognised(s.to_string())),
        }
    }
}

struct Patterns {
    present: Regex,
    year_first: Regex,
    year_last: Regex,
    span_separator: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        present: Regex::new(r"(?i)\b(now|today|present)\b").unwrap(),
        year_first: Regex::new(r"^(\d{1,4})[-/\s](\d{1,2})[-/\s](\d{1,2})$").unwrap(),
        year_last: Regex::new(r"^(\d{1,2})[-/\s](\d{1,2})[-/\s](\d{1,4})$").unwrap(),
        span_separator: Regex::new(r"\s+-\s+").unwrap(),
    })
}

/// Expand a year below 100 using [`TWO_DIGIT_YEAR_PIVOT`]
pub fn expand_two_digit_year(year: i32) -> i32 {
    match year {
        0..TWO_DIGIT_YEAR_PIVOT => 2000 + year,
        TWO_DIGIT_YEAR_PIVOT..100 => 1900 + year,
        _ => year,
    }
}

/// Turns `|date|` tokens into calendar dates.
///
/// The preferred [`DateOrder`] is tried first, then year-month-day, then the
/// free-form parsing of the [`DateMath`] capability.
#[derive(Debug, Clone)]
pub struct DateParser<M = ChronoDateMath> {
    order: DateOrder,
    math: M,
}

impl DateParser<ChronoDateMath> {
    /// Create a parser backed by `chrono` and the local clock
    pub fn new(order: DateOrder) -> Self {
        Self::with_date_math(order, ChronoDateMath)
    }
}

impl<M: DateMath> DateParser<M> {
    /// Create a parser using the given date-math capability
    pub fn with_date_math(order: DateOrder, math: M) -> Self {
        Self { order, math }
    }

    /// The date-math capability (and so the clock) used for relative dates
    pub fn date_math(&self) -> &M {
        &self.math
    }

    /// Parse a single date token
    pub fn parse_date(&self, token: &str) -> Result<CalendarDate, ParseError> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return Err(ParseError::Empty);
        }

        // Relative keywords take precedence over everything else
        if patterns().present.is_match(&token) {
            return Ok(self.math.today());
        }

        let mut orders = vec![self.order];
        if self.order != DateOrder::Ymd {
            orders.push(DateOrder::Ymd);
        }
        if let Some(date) = orders
            .into_iter()
            .find_map(|order| Self::parse_numeric(&token, order))
        {
            trace!("parsed `{token}` as {date}");
            return Ok(date);
        }

        self.math
            .parse_free_form(&token)
            .ok_or(ParseError::Unrecognised(token))
    }

    /// Parse a `from - to` token into 0, 1 or 2 dates.
    ///
    /// An empty or unparseable token (or half of one) gives no dates, meaning
    /// the event should be skipped.  Reversed spans are swapped so that the
    /// earliest date comes first.
    pub fn parse_span(&self, token: &str) -> Vec<CalendarDate> {
        let parts: Vec<&str> = patterns()
            .span_separator
            .splitn(token, 2)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        let dates: Result<Vec<CalendarDate>, ParseError> =
            parts.iter().map(|part| self.parse_date(part)).collect();

        match dates {
            Ok(mut dates) => {
                if let [from, to] = dates.as_mut_slice() {
                    if from > to {
                        debug!("swapping reversed span `{token}`");
                        std::mem::swap(from, to);
                    }
                }
                dates
            }
            Err(error) => {
                debug!("skipping `{token}`: {error}");
                Vec::new()
            }
        }
    }

    /// Attempt to read the token as three numbers in the given order
    fn parse_numeric(token: &str, order: DateOrder) -> Option<CalendarDate> {
        let captures = order.regex().captures(token)?;
        let (year_index, month_index, day_index) = order.group_indices();
        let number = |index: usize| -> Option<u32> { captures.get(index)?.as_str().parse().ok() };

        let year = expand_two_digit_year(i32::try_from(number(year_index)?).ok()?);
        let month = number(month_index)?;
        let day = number(day_index)?;

        // Reject impossible combinations (e.g. month 13 or the 30th of February)
        match CalendarDate::from_ymd(year, month, day) {
            Ok(date) => Some(date),
            Err(error) => {
                trace!("`{token}` read as {order}: {error}");
                None
            }
        }
    }
}
