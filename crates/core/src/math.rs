// SPDX-License-Identifier: MIT

//!
//! The date-math capability supplied to the parser and formatter
//!

use crate::CalendarDate;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// The operations the parser and formatter need from a calendar library.
///
/// Calendar arithmetic lives on [`CalendarDate`] itself; this trait covers
/// what depends on the host (the clock, free-form parsing, display patterns)
/// so that it can be swapped out, e.g. for a fixed clock in tests.
pub trait DateMath {
    /// Today's date according to the host's clock
    fn today(&self) -> CalendarDate;

    /// Best effort parsing of a date in no particular format
    fn parse_free_form(&self, text: &str) -> Option<CalendarDate>;

    /// Render a date using a moment-style pattern (e.g. `YYYY-MM-DD`)
    fn format(&self, date: CalendarDate, pattern: &str) -> String;
}

/// The default [`DateMath`], backed by `chrono` and the local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateMath;

/// Free-form formats tried in order after the special cases
const FREE_FORM_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

const FREE_FORM_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

struct FreeFormPatterns {
    year_only: Regex,
    year_month: Regex,
    compact: Regex,
}

fn free_form_patterns() -> &'static FreeFormPatterns {
    static PATTERNS: OnceLock<FreeFormPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| FreeFormPatterns {
        year_only: Regex::new(r"^(\d{4})$").unwrap(),
        year_month: Regex::new(r"^(\d{4})[-/](\d{1,2})$").unwrap(),
        compact: Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap(),
    })
}

/// Pull a numeric capture group out as an integer
fn group<T: std::str::FromStr>(captures: &regex::Captures, index: usize) -> Option<T> {
    captures.get(index)?.as_str().parse().ok()
}

impl DateMath for ChronoDateMath {
    fn today(&self) -> CalendarDate {
        Local::now().date_naive().into()
    }

    fn parse_free_form(&self, text: &str) -> Option<CalendarDate> {
        let text = text.trim();
        let patterns = free_form_patterns();

        // Partial dates resolve to the first day of the period
        if let Some(captures) = patterns.year_only.captures(text) {
            return CalendarDate::from_ymd(group(&captures, 1)?, 1, 1).ok();
        }
        if let Some(captures) = patterns.year_month.captures(text) {
            return CalendarDate::from_ymd(group(&captures, 1)?, group(&captures, 2)?, 1).ok();
        }
        if let Some(captures) = patterns.compact.captures(text) {
            return CalendarDate::from_ymd(
                group(&captures, 1)?,
                group(&captures, 2)?,
                group(&captures, 3)?,
            )
            .ok();
        }

        let naive = FREE_FORM_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
            .or_else(|| {
                FREE_FORM_DATETIME_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                    .map(|datetime| datetime.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|datetime| datetime.date_naive())
            })?;

        // Re-check against the Timelive year limits
        CalendarDate::from_ymd(
            chrono::Datelike::year(&naive),
            chrono::Datelike::month(&naive),
            chrono::Datelike::day(&naive),
        )
        .ok()
    }

    fn format(&self, date: CalendarDate, pattern: &str) -> String {
        date.naive()
            .format(&moment_pattern_to_strftime(pattern))
            .to_string()
            .replace(ORDINAL_SUFFIX_MARKER, ordinal_suffix(date.day()))
    }
}

/// Stands in for the suffix of `Do` (strftime has no ordinal days)
const ORDINAL_SUFFIX_MARKER: char = '\u{1}';

/// `st`, `nd`, `rd` or `th`
fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Translate a moment-style pattern (`YYYY`, `MM`, `DD`, `MMM`, `Do`, ...) into
/// a `strftime` pattern.  Text inside `[...]` is copied literally.
///
/// `dd` (moment's two letter weekday) has no strftime equivalent and gives the
/// three letter weekday, the same as `ddd`.
pub fn moment_pattern_to_strftime(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        // Escaped literal text
        if c == '[' {
            let end = chars[i + 1..]
                .iter()
                .position(|&c| c == ']')
                .map(|offset| i + 1 + offset);
            if let Some(end) = end {
                for &literal in &chars[i + 1..end] {
                    push_literal(&mut out, literal);
                }
                i = end + 1;
                continue;
            }
        }

        // Ordinal day of the month
        if c == 'D' && chars.get(i + 1) == Some(&'o') {
            out.push_str("%-d");
            out.push(ORDINAL_SUFFIX_MARKER);
            i += 2;
            continue;
        }

        // Length of the run of the same character
        let run = chars[i..].iter().take_while(|&&other| other == c).count();
        let token = match (c, run) {
            ('Y', 2) => Some("%y"),
            ('Y', _) => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('D', 1) => Some("%-d"),
            ('D', 2) => Some("%d"),
            ('D', _) => Some("%j"),
            ('d', 1) => Some("%w"),
            ('d', 2) | ('d', 3) => Some("%a"),
            ('d', _) => Some("%A"),
            _ => None,
        };
        match token {
            Some(token) => {
                out.push_str(token);
                i += run;
            }
            None => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
