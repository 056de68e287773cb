// SPDX-License-Identifier: MIT

//!
//! Rendering [`CalendarDate`]s back into display strings
//!

use crate::{CalendarDate, ChronoDateMath, DateMath, DisplayUnit, TimeliveSettings};

/// Formats dates for popup titles and calendar tick labels
#[derive(Debug, Clone)]
pub struct DateFormatter<M = ChronoDateMath> {
    title_pattern: String,
    month_pattern: String,
    year_pattern: String,
    math: M,
}

impl DateFormatter<ChronoDateMath> {
    /// Create a formatter backed by `chrono` using the patterns in the settings
    pub fn new(settings: &TimeliveSettings) -> Self {
        Self::with_date_math(settings, ChronoDateMath)
    }
}

impl<M: DateMath> DateFormatter<M> {
    /// Create a formatter using the given date-math capability
    pub fn with_date_math(settings: &TimeliveSettings, math: M) -> Self {
        Self {
            title_pattern: settings.preview_title_date_format.clone(),
            month_pattern: settings.calendar_month_format.clone(),
            year_pattern: settings.calendar_year_format.clone(),
            math,
        }
    }

    /// Format a date for an event title
    pub fn format_date(&self, date: CalendarDate) -> String {
        self.math.format(date, &self.title_pattern)
    }

    /// Format a date span for an event title
    pub fn format_span(&self, from: CalendarDate, to: CalendarDate) -> String {
        format!("{} - {}", self.format_date(from), self.format_date(to))
    }

    /// Format a calendar tick label at the granularity of the unit
    pub fn format_calendar_date(&self, date: CalendarDate, unit: DisplayUnit) -> String {
        let pattern = match unit {
            DisplayUnit::Month => &self.month_pattern,
            DisplayUnit::Year => &self.year_pattern,
        };
        self.math.format(date, pattern)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timelive_macros::ymd;

    #[test]
    fn default_patterns() {
        let formatter = DateFormatter::new(&TimeliveSettings::default());
        let date = ymd!(2008, 2, 9);
        assert_eq!(formatter.format_date(date), "2008-02-09");
        assert_eq!(
            formatter.format_span(date, ymd!(2012, 9, 12)),
            "2008-02-09 - 2012-09-12"
        );
        assert_eq!(formatter.format_calendar_date(date, DisplayUnit::Month), "2008-02");
        assert_eq!(formatter.format_calendar_date(date, DisplayUnit::Year), "2008");
    }

    #[test]
    fn custom_patterns() {
        let settings = TimeliveSettings {
            preview_title_date_format: String::from("D MMMM YYYY"),
            calendar_month_format: String::from("MMM YY"),
            ..TimeliveSettings::default()
        };
        let formatter = DateFormatter::new(&settings);
        let date = ymd!(2008, 2, 9);
        assert_eq!(formatter.format_date(date), "9 February 2008");
        assert_eq!(formatter.format_calendar_date(date, DisplayUnit::Month), "Feb 08");
    }
}
