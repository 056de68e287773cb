// SPDX-License-Identifier: MIT

//!
//! The `timelive-renderer` engine
//!

mod calendar;
mod consts;
mod events;
mod helpers;
mod timeline_builder;

pub(crate) use helpers::*;

pub use calendar::*;
pub use consts::*;
pub use events::*;
pub use timeline_builder::*;

use log::debug;
use serde::Serialize;
use timelive_core::{CalendarDate, DateFormatter, DateMath, DisplayUnit};

/// The bar drawn under the events, covering the earliest to the latest date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Highlight {
    pub position: f64,
    pub width: f64,
}

/// Everything needed to draw one timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout<C> {
    /// The unit the timeline is shown in
    pub unit: DisplayUnit,

    /// The observed range of dates
    pub actual_span: TimeSpan,

    /// The displayed range of dates
    pub calendar_span: TimeSpan,

    /// The bar covering the observed range (if there are any dates)
    pub highlight: Option<Highlight>,

    /// The calendar labels
    pub ticks: Vec<Tick>,

    /// The events (with close single events merged), ordered by position
    pub events: Vec<TimeEvent<C>>,
}

/// Collects the events of one render pass and lays them out.
///
/// Every event must be added before [`EventLayoutEngine::layout`] is called,
/// because positions depend on the whole range of dates.
pub struct EventLayoutEngine<C> {
    /// Tracks the range of dates and maps them to positions
    builder: TimelineBuilder,

    /// Events anchored to a single date (positions calculated on layout)
    singles: Vec<SingleTimeEvent<C>>,

    /// Events anchored to a range of dates (geometry calculated on layout)
    spans: Vec<SpanTimeEvent<C>>,

    /// Placed between the contents of merged events
    separator: String,
}

impl<C: EventContent> EventLayoutEngine<C> {
    /// Create a new engine around an empty builder.  Pass in the separator to
    /// place between the contents of merged events.
    pub fn new<S: ToString>(builder: TimelineBuilder, separator: S) -> Self {
        Self {
            builder,
            singles: Vec::new(),
            spans: Vec::new(),
            separator: separator.to_string(),
        }
    }

    /// The number of events added (before merging)
    pub fn event_count(&self) -> usize {
        self.singles.len() + self.spans.len()
    }

    /// Add an event anchored to a single date
    pub fn add_single(&mut self, date: CalendarDate, content: C) {
        self.builder.add_date(date);
        self.singles.push(SingleTimeEvent {
            date,
            content,
            position: 0.0,
        });
    }

    /// Add an event anchored to a range of dates.  The dates are swapped if
    /// given in reverse.
    pub fn add_span(&mut self, from_date: CalendarDate, to_date: CalendarDate, content: C) {
        let (from_date, to_date) = if from_date <= to_date {
            (from_date, to_date)
        } else {
            (to_date, from_date)
        };
        self.builder.add_date(from_date);
        self.builder.add_date(to_date);
        self.spans.push(SpanTimeEvent {
            from_date,
            to_date,
            content,
            position: 0.0,
            width: 0.0,
        });
    }

    /// Add an event from the output of [`timelive_core::DateParser::parse_span`]:
    /// one date is a single event, two dates are a span, and no dates means
    /// the event is skipped.  Returns whether the event was added.
    pub fn add_parsed(&mut self, dates: &[CalendarDate], content: C) -> bool {
        match *dates {
            [date] => self.add_single(date, content),
            [from_date, to_date] => self.add_span(from_date, to_date, content),
            _ => {
                debug!("skipping event with {} dates", dates.len());
                return false;
            }
        }
        true
    }

    /// Calculate the geometry of every event, merge single events that are too
    /// close together, and generate the calendar labels
    pub fn layout<M: DateMath>(self, formatter: &DateFormatter<M>) -> TimelineLayout<C> {
        let builder = self.builder;

        // Spans are never merged
        let mut spans = self.spans;
        spans.sort_by(|a, b| a.from_date.cmp(&b.from_date));
        let spans = spans.into_iter().map(|mut span| {
            span.position = builder.calculate_position(span.from_date);
            span.width = builder.calculate_position(span.to_date) - span.position;
            TimeEvent::Span(span)
        });

        let singles: Vec<SingleTimeEvent<C>> = self
            .singles
            .into_iter()
            .map(|mut single| {
                single.position = builder.calculate_position(single.date);
                single
            })
            .collect();
        let single_count = singles.len();
        let singles = merge_close_events(singles, MERGE_THRESHOLD, &self.separator);
        debug!("merged {single_count} single events into {} markers", singles.len());

        // Stable, so spans stay ahead of markers at the same position
        let mut events: Vec<TimeEvent<C>> =
            spans.chain(singles.into_iter().map(TimeEvent::Single)).collect();
        events.sort_by(|a, b| a.position().total_cmp(&b.position()));

        let actual_span = builder.actual_time_span();
        let highlight = match (actual_span.min, actual_span.max) {
            (Some(min), Some(max)) => {
                let position = builder.calculate_position(min);
                Some(Highlight {
                    position,
                    width: builder.calculate_position(max) - position,
                })
            }
            _ => None,
        };

        TimelineLayout {
            unit: builder.unit(),
            actual_span,
            calendar_span: builder.calendar_time_span(),
            highlight,
            ticks: builder.ticks(formatter),
            events,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timelive_core::{DateOrder, DateParser, TimeliveSettings};
    use timelive_macros::ymd;

    fn engine() -> EventLayoutEngine<String> {
        EventLayoutEngine::new(TimelineBuilder::with_today(ymd!(2020, 5, 17)), "<hr/>")
    }

    fn formatter() -> DateFormatter {
        DateFormatter::new(&TimeliveSettings::default())
    }

    #[test]
    fn spans_and_singles() {
        let mut engine = engine();
        engine.add_span(ymd!(2012, 9, 12), ymd!(2008, 2, 9), String::from("span"));
        engine.add_single(ymd!(2010, 6, 1), String::from("single"));
        assert_eq!(engine.event_count(), 2);

        let layout = engine.layout(&formatter());
        assert_eq!(layout.unit, DisplayUnit::Year);
        assert_eq!(layout.events.len(), 2);

        let TimeEvent::Span(span) = &layout.events[0] else {
            panic!("expected the span first");
        };
        assert_eq!(span.from_date, ymd!(2008, 2, 9));
        assert_eq!(span.to_date, ymd!(2012, 9, 12));
        assert_eq!(span.width, 93.965 - span.position);

        let TimeEvent::Single(single) = &layout.events[1] else {
            panic!("expected the single event second");
        };
        assert_eq!(single.content, "single");
        assert!(single.position > span.position);

        let highlight = layout.highlight.unwrap();
        assert_eq!(highlight.position, span.position);
        assert_eq!(highlight.width, span.width);
        assert_eq!(layout.ticks.first().map(|tick| tick.label.as_str()), Some("2008"));
    }

    #[test]
    fn well_spaced_singles_are_kept() {
        let mut engine = engine();
        for (i, month) in [1, 4, 7, 10].into_iter().enumerate() {
            engine.add_single(ymd!(2008, 1, 1).add_units(DisplayUnit::Month, month - 1), i.to_string());
        }
        let layout = engine.layout(&formatter());
        let contents: Vec<&String> = layout.events.iter().map(TimeEvent::content).collect();
        assert_eq!(contents, vec!["0", "1", "2", "3"]);
        assert!(layout.events.windows(2).all(|pair| pair[0].position() < pair[1].position()));
    }

    #[test]
    fn close_singles_are_merged_in_date_order() {
        let mut engine = engine();
        engine.add_single(ymd!(2001, 1, 1), String::from("start"));
        engine.add_single(ymd!(2008, 2, 10), String::from("b"));
        engine.add_single(ymd!(2008, 2, 9), String::from("a"));
        engine.add_single(ymd!(2020, 1, 1), String::from("end"));

        let layout = engine.layout(&formatter());
        let contents: Vec<&String> = layout.events.iter().map(TimeEvent::content).collect();
        assert_eq!(contents, vec!["start", "a<hr/>b", "end"]);
    }

    #[test]
    fn parsed_tokens() {
        let parser = DateParser::new(DateOrder::Ymd);
        let mut engine = engine();
        assert!(engine.add_parsed(&parser.parse_span("2008-02-09"), String::from("a")));
        assert!(engine.add_parsed(&parser.parse_span("2008-03-01 - 2008-04-01"), String::from("b")));
        assert!(!engine.add_parsed(&parser.parse_span("not a date"), String::from("c")));
        assert!(!engine.add_parsed(&parser.parse_span(""), String::from("d")));
        assert_eq!(engine.event_count(), 2);

        let layout = engine.layout(&formatter());
        assert_eq!(layout.unit, DisplayUnit::Month);
        assert_eq!(layout.events.len(), 2);
        assert!(layout.events.iter().all(|event| event.position().is_finite()));
    }

    #[test]
    fn empty_engine() {
        let layout = engine().layout(&formatter());
        assert!(layout.events.is_empty());
        assert!(layout.highlight.is_none());
        assert_eq!(layout.calendar_span.min, Some(ymd!(2020, 5, 1)));
        assert_eq!(
            layout.ticks.iter().map(|tick| tick.label.as_str()).collect::<Vec<_>>(),
            vec!["2020-05", "2020-06"]
        );
    }
}
