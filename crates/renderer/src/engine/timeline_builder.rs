// SPDX-License-Identifier: MIT

//!
//! Timeline builder (date range, display unit & positions)
//!

use crate::{MAX_MONTHS_FOR_MONTH_UNIT, round_to_3dp};
use log::{debug, trace};
use serde::Serialize;
use timelive_core::{CalendarDate, DateMath, DisplayUnit};

/// A range of dates and the unit it is displayed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeSpan {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
    pub unit: DisplayUnit,
}

/// Accumulates the dates of one render pass and maps them onto a 0 to 100
/// percentage axis.
///
/// The display unit is chosen retroactively as dates arrive, so positions are
/// only meaningful once every date of the render pass has been added.  Don't
/// cache positions calculated before then.
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    /// The observed range of all dates added so far
    actual_span: TimeSpan,

    /// The start of the unit containing the earliest date
    start_of_unit: Option<CalendarDate>,

    /// The number of whole units spanned (always at least 1)
    delta_in_unit: i64,

    /// Used to anchor the calendar when no dates have been added
    today: CalendarDate,
}

impl TimelineBuilder {
    /// Create an empty builder, anchored on today's date according to the
    /// date-math capability
    pub fn new<M: DateMath>(math: &M) -> Self {
        Self::with_today(math.today())
    }

    /// Create an empty builder anchored on the given date
    pub fn with_today(today: CalendarDate) -> Self {
        Self {
            actual_span: TimeSpan::default(),
            start_of_unit: None,
            delta_in_unit: 1,
            today,
        }
    }

    /// Incorporate another observed date.  Only dates that extend the range
    /// cause any recalculation.
    pub fn add_date(&mut self, date: CalendarDate) {
        let span = &mut self.actual_span;
        match (span.min, span.max) {
            (Some(min), Some(max)) => {
                if date < min {
                    span.min = Some(date);
                } else if date > max {
                    span.max = Some(date);
                } else {
                    // No updates to min/max dates
                    return;
                }
            }
            _ => {
                span.min = Some(date);
                span.max = Some(date);
            }
        }
        trace!("timeline range now {:?} to {:?}", span.min, span.max);
        self.update_unit_and_reference();
    }

    /// The observed range of dates
    pub fn actual_time_span(&self) -> TimeSpan {
        self.actual_span
    }

    /// The current display unit
    pub fn unit(&self) -> DisplayUnit {
        self.actual_span.unit
    }

    /// The displayed range: from the start of the unit containing the earliest
    /// date (or today) to one unit past the latest date.  This always covers
    /// at least one full unit.
    pub fn calendar_time_span(&self) -> TimeSpan {
        let unit = self.actual_span.unit;
        let start = self.actual_span.min.unwrap_or(self.today).start_of(unit);
        let end = self.actual_span.max.unwrap_or(start).add_units(unit, 1);
        TimeSpan {
            min: Some(start),
            max: Some(end),
            unit,
        }
    }

    /// Map a date to its percentage position on the axis (rounded to 3 decimal
    /// places).  Dates outside the observed range give values outside 0 to 100.
    pub fn calculate_position(&self, date: CalendarDate) -> f64 {
        let unit = self.actual_span.unit;
        let start = self
            .start_of_unit
            .unwrap_or_else(|| self.today.start_of(unit));
        let delta_days = date.days_since(&start) as f64;
        let total_days = self.delta_in_unit as f64 * unit.days_per_unit();
        round_to_3dp((delta_days / total_days) * 100.0)
    }

    /// Re-derive the display unit, the start of unit and the number of units
    /// from the current min/max dates
    fn update_unit_and_reference(&mut self) {
        let (Some(min), Some(max)) = (self.actual_span.min, self.actual_span.max) else {
            return;
        };

        // The unit only ever gets coarser
        let months = max.whole_months_since(&min);
        let unit = if months <= MAX_MONTHS_FOR_MONTH_UNIT {
            DisplayUnit::Month
        } else {
            DisplayUnit::Year
        }
        .max(self.actual_span.unit);

        if unit != self.actual_span.unit {
            debug!(
                "timeline unit changed from {} to {unit} ({months} months spanned)",
                self.actual_span.unit
            );
            self.actual_span.unit = unit;
        }

        let start_of_unit = min.start_of(unit);
        self.start_of_unit = Some(start_of_unit);
        self.delta_in_unit = 1 + max.whole_units_since(&start_of_unit, unit);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timelive_macros::ymd;

    fn builder_with(dates: &[CalendarDate]) -> TimelineBuilder {
        let mut builder = TimelineBuilder::with_today(ymd!(2020, 5, 17));
        for date in dates {
            builder.add_date(*date);
        }
        builder
    }

    #[test]
    fn unit_selection() {
        // 9 months apart
        let builder = builder_with(&[ymd!(2008, 1, 15), ymd!(2008, 10, 15)]);
        assert_eq!(builder.unit(), DisplayUnit::Month);

        // 10 months apart is still shown in months
        let builder = builder_with(&[ymd!(2008, 1, 15), ymd!(2008, 11, 15)]);
        assert_eq!(builder.unit(), DisplayUnit::Month);

        // 11 months apart
        let builder = builder_with(&[ymd!(2008, 1, 15), ymd!(2008, 12, 15)]);
        assert_eq!(builder.unit(), DisplayUnit::Year);
    }

    #[test]
    fn single_date() {
        let date = ymd!(2008, 2, 9);
        let builder = builder_with(&[date]);
        let span = builder.actual_time_span();
        assert_eq!(span.min, Some(date));
        assert_eq!(span.max, Some(date));
        assert_eq!(span.unit, DisplayUnit::Month);

        let calendar = builder.calendar_time_span();
        assert_eq!(calendar.min, Some(ymd!(2008, 2, 1)));
        assert_eq!(calendar.max, Some(ymd!(2008, 3, 9)));
        assert_eq!(builder.calculate_position(date), 25.806);
    }

    #[test]
    fn empty_builder() {
        let builder = builder_with(&[]);
        assert_eq!(builder.actual_time_span(), TimeSpan::default());
        let calendar = builder.calendar_time_span();
        assert_eq!(calendar.min, Some(ymd!(2020, 5, 1)));
        assert_eq!(calendar.max, Some(ymd!(2020, 6, 1)));
        assert_eq!(builder.calculate_position(ymd!(2020, 5, 1)), 0.0);
    }

    #[test]
    fn anchored_on_the_date_math_clock() {
        struct FixedClock;

        impl DateMath for FixedClock {
            fn today(&self) -> CalendarDate {
                ymd!(1999, 12, 31)
            }

            fn parse_free_form(&self, _text: &str) -> Option<CalendarDate> {
                None
            }

            fn format(&self, date: CalendarDate, _pattern: &str) -> String {
                date.to_string()
            }
        }

        let builder = TimelineBuilder::new(&FixedClock);
        let calendar = builder.calendar_time_span();
        assert_eq!(calendar.min, Some(ymd!(1999, 12, 1)));
        assert_eq!(calendar.max, Some(ymd!(2000, 1, 1)));
    }

    #[test]
    fn add_date_between_is_a_no_op() {
        let mut builder = builder_with(&[ymd!(2008, 1, 1), ymd!(2012, 1, 1)]);
        let before = builder.actual_time_span();
        builder.add_date(ymd!(2010, 6, 6));
        builder.add_date(ymd!(2008, 1, 1));
        assert_eq!(builder.actual_time_span(), before);
    }

    #[test]
    fn positions() {
        let builder = builder_with(&[ymd!(2008, 2, 9), ymd!(2008, 2, 20)]);
        assert_eq!(builder.calculate_position(ymd!(2008, 2, 1)), 0.0);
        assert_eq!(builder.calculate_position(ymd!(2008, 2, 20)), 61.29);

        let builder = builder_with(&[ymd!(2012, 9, 12), ymd!(2008, 2, 9)]);
        assert_eq!(builder.unit(), DisplayUnit::Year);
        assert_eq!(builder.calculate_position(ymd!(2008, 1, 1)), 0.0);
        assert_eq!(builder.calculate_position(ymd!(2012, 9, 12)), 93.965);

        // Not clamped
        assert!(builder.calculate_position(ymd!(2007, 1, 1)) < 0.0);
        assert!(builder.calculate_position(ymd!(2020, 1, 1)) > 100.0);
    }

    #[test]
    fn positions_are_monotonic() {
        let builder = builder_with(&[ymd!(2001, 3, 4), ymd!(2009, 8, 30)]);
        let mut date = ymd!(2000, 1, 1);
        let mut last = f64::MIN;
        while date < ymd!(2011, 1, 1) {
            let position = builder.calculate_position(date);
            assert!(position >= last, "{date}");
            last = position;
            date = date.add_days(17);
        }
    }

    #[test]
    fn unit_change_is_retroactive() {
        let mut builder = builder_with(&[ymd!(2008, 2, 9)]);
        let early = builder.calculate_position(ymd!(2008, 2, 9));
        builder.add_date(ymd!(2010, 2, 9));
        assert_eq!(builder.unit(), DisplayUnit::Year);
        let late = builder.calculate_position(ymd!(2008, 2, 9));
        assert_ne!(early, late);

        // Narrower dates never take the unit back to months
        builder.add_date(ymd!(2009, 1, 1));
        assert_eq!(builder.unit(), DisplayUnit::Year);
    }
}
