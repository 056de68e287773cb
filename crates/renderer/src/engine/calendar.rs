// SPDX-License-Identifier: MIT

//!
//! Calendar ticks (the labelled dates shown above the timeline)
//!

use crate::{CALENDAR_DEPTH, TimelineBuilder};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use timelive_core::{CalendarDate, DateFormatter, DateMath, DisplayUnit};

/// The set of representative dates to label, and the unit they were
/// generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDates {
    pub dates: BTreeSet<CalendarDate>,
    pub unit: DisplayUnit,
}

/// Information needed to draw a calendar label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// The start of the labelled unit
    pub date: CalendarDate,

    /// The formatted label
    pub label: String,

    /// Where the labelled unit starts on the axis (percentage)
    pub position: f64,
}

impl CalendarDates {
    /// Format the dates, in date order, dropping any whose label has already
    /// been produced (e.g. two days in the same year when shown in years)
    pub fn labels<M: DateMath>(&self, formatter: &DateFormatter<M>) -> Vec<String> {
        let mut seen = HashSet::new();
        self.dates
            .iter()
            .map(|date| formatter.format_calendar_date(*date, self.unit))
            .filter(|label| seen.insert(label.clone()))
            .collect()
    }
}

impl TimelineBuilder {
    /// Recursively subdivide the displayed span to find dates worth labelling
    pub fn build_calendar_dates(&self) -> CalendarDates {
        let span = self.calendar_time_span();
        let unit = span.unit;
        let mut dates = BTreeSet::new();
        if let (Some(start), Some(end)) = (span.min, span.max) {
            split_calendar_dates(&mut dates, start, end, unit, 0);
        }
        CalendarDates { dates, unit }
    }

    /// The calendar labels with their positions on the axis
    pub fn ticks<M: DateMath>(&self, formatter: &DateFormatter<M>) -> Vec<Tick> {
        let calendar_dates = self.build_calendar_dates();
        let unit = calendar_dates.unit;
        let mut seen = HashSet::new();
        calendar_dates
            .dates
            .into_iter()
            .map(|date| date.start_of(unit))
            .filter(|date| seen.insert(*date))
            .map(|date| Tick {
                date,
                label: formatter.format_calendar_date(date, unit),
                position: self.calculate_position(date),
            })
            .collect()
    }
}

/// Add `a` and `b` and recurse on both halves until both ends are in the same
/// unit or the depth budget is used up
fn split_calendar_dates(
    dates: &mut BTreeSet<CalendarDate>,
    a: CalendarDate,
    b: CalendarDate,
    unit: DisplayUnit,
    depth: u32,
) {
    if depth >= CALENDAR_DEPTH || a.same_unit(&b, unit) {
        return;
    }
    dates.insert(a);
    dates.insert(b);
    let mid = a.midpoint(&b);
    split_calendar_dates(dates, a, mid, unit, depth + 1);
    split_calendar_dates(dates, mid, b, unit, depth + 1);
}
