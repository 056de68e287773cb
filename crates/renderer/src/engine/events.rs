// SPDX-License-Identifier: MIT

//!
//! Time events
//!

use serde::Serialize;
use timelive_core::CalendarDate;

/// The caller supplied payload of an event.  The engine never looks inside it,
/// but it does join the contents of events that are merged together.
pub trait EventContent {
    /// Append `other` after `self`, with `separator` in between
    fn append(&mut self, separator: &str, other: Self);
}

impl EventContent for String {
    fn append(&mut self, separator: &str, other: Self) {
        self.push_str(separator);
        self.push_str(&other);
    }
}

/// An event anchored to a single date (drawn as a marker)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleTimeEvent<C> {
    pub date: CalendarDate,
    pub content: C,

    /// Percentage position on the axis
    pub position: f64,
}

/// An event anchored to a range of dates (drawn as a bar)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanTimeEvent<C> {
    pub from_date: CalendarDate,
    pub to_date: CalendarDate,
    pub content: C,

    /// Percentage position of `from_date` on the axis
    pub position: f64,

    /// Percentage distance from `from_date` to `to_date`
    pub width: f64,
}

/// Information needed to draw an event on a timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimeEvent<C> {
    Single(SingleTimeEvent<C>),
    Span(SpanTimeEvent<C>),
}

impl<C> TimeEvent<C> {
    /// The percentage position of the start of the event
    pub fn position(&self) -> f64 {
        match self {
            TimeEvent::Single(event) => event.position,
            TimeEvent::Span(event) => event.position,
        }
    }

    pub fn content(&self) -> &C {
        match self {
            TimeEvent::Single(event) => &event.content,
            TimeEvent::Span(event) => &event.content,
        }
    }
}

/// Merge single events that would be drawn too close together.
///
/// Events are taken in date order.  Each is compared only against the last
/// marker that was kept (not against the previous event): if it is closer
/// than `threshold` its content is appended to that marker, otherwise it
/// becomes a new marker.
pub fn merge_close_events<C: EventContent>(
    mut events: Vec<SingleTimeEvent<C>>,
    threshold: f64,
    separator: &str,
) -> Vec<SingleTimeEvent<C>> {
    events.sort_by(|a, b| a.date.cmp(&b.date));

    let (_, merged) = events.into_iter().fold(
        (None, Vec::new()),
        |(last_position, mut merged): (Option<f64>, Vec<SingleTimeEvent<C>>), event| {
            if let (Some(last), Some(kept)) = (last_position, merged.last_mut()) {
                if event.position - last < threshold {
                    kept.content.append(separator, event.content);
                    return (last_position, merged);
                }
            }
            let position = event.position;
            merged.push(event);
            (Some(position), merged)
        },
    );
    merged
}
