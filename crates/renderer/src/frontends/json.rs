// SPDX-License-Identifier: MIT

//!
//! The JSON frontend (for other tools to draw timelines with)
//!

use crate::{Frontend, ListItem, TimelineLayout};

/// Separator inserted between the contents of merged events
pub const TEXT_MERGE_SEPARATOR: &str = "\n";

/// The JSON frontend.  Event content is plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFrontend {
    pub pretty: bool,
}

impl Frontend for JsonFrontend {
    fn merge_separator(&self) -> &'static str {
        TEXT_MERGE_SEPARATOR
    }

    fn event_content(&self, title: &str, item: &ListItem) -> String {
        if item.content.is_empty() {
            title.to_string()
        } else {
            format!("{title}: {}", item.content)
        }
    }
}

impl JsonFrontend {
    /// Render the timelines as a JSON array
    pub fn render_all(&self, layouts: &[TimelineLayout<String>]) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(layouts)
        } else {
            serde_json::to_string(layouts)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{EventLayoutEngine, TimelineBuilder, scan_timeline_lists};
    use serde_json::Value;
    use timelive_core::{CalendarDate, DateFormatter, TimeliveSettings};
    use timelive_macros::ymd;

    fn item(markdown: &str) -> ListItem {
        scan_timeline_lists(markdown).remove(0).items.remove(0)
    }

    #[test]
    fn event_content() {
        let frontend = JsonFrontend::default();
        assert_eq!(frontend.event_content("2008", &item("- |2008| *Text*")), "2008: Text");
        assert_eq!(frontend.event_content("2008", &item("- |2008|")), "2008");
    }

    #[test]
    fn render() {
        let frontend = JsonFrontend::default();
        let mut engine = EventLayoutEngine::new(
            TimelineBuilder::with_today(ymd!(2020, 5, 17)),
            frontend.merge_separator(),
        );
        engine.add_single(ymd!(2008, 2, 9), frontend.event_content("2008-02-09", &item("- |2008-02-09| A")));
        let layout = engine.layout(&DateFormatter::new(&TimeliveSettings::default()));

        let json = frontend.render_all(&[layout]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let timeline = &value[0];
        assert_eq!(timeline["unit"], "month");
        assert_eq!(timeline["actual_span"]["min"], "2008-02-09");
        assert_eq!(timeline["calendar_span"]["min"], "2008-02-01");
        assert_eq!(timeline["calendar_span"]["max"], "2008-03-09");
        assert_eq!(timeline["highlight"]["width"], 0.0);
        assert_eq!(timeline["ticks"][0]["label"], "2008-02");
        assert_eq!(timeline["events"][0]["kind"], "single");
        assert_eq!(timeline["events"][0]["content"], "2008-02-09: A");
        assert_eq!(timeline["events"][0]["position"], 25.806);

        let pretty = JsonFrontend { pretty: true }.render_all(&[]).unwrap();
        assert_eq!(pretty, "[]");
    }
}
