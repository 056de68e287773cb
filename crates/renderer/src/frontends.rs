// SPDX-License-Identifier: MIT

//!
//! Frontends turn a laid out timeline into something that can be shown
//!

pub mod html;
pub mod json;

use crate::{EventLayoutEngine, ListItem, TimelineBuilder, TimelineLayout, TimelineList};
use log::debug;
use timelive_core::{CalendarDate, DateFormatter, DateMath, DateParser};

/// What a frontend needs the engine to know about event content
pub trait Frontend {
    /// Placed between the contents of merged events
    fn merge_separator(&self) -> &'static str;

    /// The content of one event, given its title (the formatted date) and the
    /// list item it came from
    fn event_content(&self, title: &str, item: &ListItem) -> String;
}

/// The title shown for an event: its formatted date, or `from - to` for a span
pub fn event_title<M: DateMath>(
    dates: &[CalendarDate],
    formatter: &DateFormatter<M>,
) -> Option<String> {
    match *dates {
        [date] => Some(formatter.format_date(date)),
        [from, to] => Some(formatter.format_span(from, to)),
        _ => None,
    }
}

/// Parse and lay out every item of a timeline list.  Items whose token can't
/// be parsed are skipped.  An empty timeline is anchored on today's date,
/// according to the parser's date math.
pub fn layout_list<M: DateMath, N: DateMath, F: Frontend>(
    list: &TimelineList,
    parser: &DateParser<M>,
    formatter: &DateFormatter<N>,
    frontend: &F,
) -> TimelineLayout<String> {
    let builder = TimelineBuilder::new(parser.date_math());
    let mut engine = EventLayoutEngine::new(builder, frontend.merge_separator());
    for item in &list.items {
        let dates = parser.parse_span(&item.token);
        let Some(title) = event_title(&dates, formatter) else {
            debug!("line {}: can't parse '{}', skipping", item.line, item.token);
            continue;
        };
        engine.add_parsed(&dates, frontend.event_content(&title, item));
    }
    engine.layout(formatter)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{TimeEvent, scan_timeline_lists};
    use timelive_core::{ChronoDateMath, DateOrder, TimeliveSettings};
    use timelive_macros::ymd;

    struct Plain;

    impl Frontend for Plain {
        fn merge_separator(&self) -> &'static str {
            "|"
        }

        fn event_content(&self, title: &str, item: &ListItem) -> String {
            format!("{title}:{}", item.content)
        }
    }

    /// Chrono date math with a fixed clock
    struct FixedClock(CalendarDate);

    impl DateMath for FixedClock {
        fn today(&self) -> CalendarDate {
            self.0
        }

        fn parse_free_form(&self, text: &str) -> Option<CalendarDate> {
            ChronoDateMath.parse_free_form(text)
        }

        fn format(&self, date: CalendarDate, pattern: &str) -> String {
            ChronoDateMath.format(date, pattern)
        }
    }

    #[test]
    fn titles() {
        let formatter = DateFormatter::new(&TimeliveSettings::default());
        assert_eq!(
            event_title(&[ymd!(2008, 2, 9)], &formatter),
            Some(String::from("2008-02-09"))
        );
        assert_eq!(
            event_title(&[ymd!(2008, 2, 9), ymd!(2012, 9, 12)], &formatter),
            Some(String::from("2008-02-09 - 2012-09-12"))
        );
        assert_eq!(event_title(&[], &formatter), None);
    }

    #[test]
    fn layout_a_list() {
        let markdown = "\
- |2008-02-09| First
- |2008-02-10| Next **day**
- |not a date at all| Skipped
- |2008-09-01 - 2008-10-01| Autumn
";
        let lists = scan_timeline_lists(markdown);
        let settings = TimeliveSettings::default();
        let layout = layout_list(
            &lists[0],
            &DateParser::new(DateOrder::Ymd),
            &DateFormatter::new(&settings),
            &Plain,
        );

        assert_eq!(layout.events.len(), 2);
        assert_eq!(
            layout.events[0].content(),
            "2008-02-09:First|2008-02-10:Next day"
        );
        let TimeEvent::Span(span) = &layout.events[1] else {
            panic!("expected a span");
        };
        assert_eq!(span.content, "2008-09-01 - 2008-10-01:Autumn");
    }

    #[test]
    fn clock_comes_from_the_parser() {
        let lists = scan_timeline_lists("- |now| Now\n- |not a date at all| Skipped\n");
        let settings = TimeliveSettings::default();
        let parser = DateParser::with_date_math(DateOrder::Ymd, FixedClock(ymd!(1999, 12, 31)));
        let formatter = DateFormatter::with_date_math(&settings, FixedClock(ymd!(1999, 12, 31)));
        let layout = layout_list(&lists[0], &parser, &formatter, &Plain);
        assert_eq!(layout.actual_span.min, Some(ymd!(1999, 12, 31)));
        assert_eq!(layout.calendar_span.min, Some(ymd!(1999, 12, 1)));
        assert_eq!(layout.events[0].content(), "1999-12-31:Now");

        // Nothing parses, so the calendar is anchored on the parser's today
        let lists = scan_timeline_lists("- |not a date at all| Skipped\n");
        let layout = layout_list(&lists[0], &parser, &formatter, &Plain);
        assert!(layout.events.is_empty());
        assert_eq!(layout.calendar_span.min, Some(ymd!(1999, 12, 1)));
        assert_eq!(layout.calendar_span.max, Some(ymd!(2000, 1, 1)));
    }
}
