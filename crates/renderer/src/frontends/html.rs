// SPDX-License-Identifier: MIT

//!
//! The static HTML frontend
//!
//! Produces a self contained fragment per timeline.  Positions and widths are
//! written as percentages of the container width, so the fragment scales with
//! whatever it is embedded in.
//!

use crate::{Frontend, ListItem, TimeEvent, TimelineLayout};
use std::fmt::Write;

/// Separator inserted between the contents of merged events
pub const HTML_MERGE_SEPARATOR: &str = "<hr/>";

/// The HTML frontend
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFrontend;

impl Frontend for HtmlFrontend {
    fn merge_separator(&self) -> &'static str {
        HTML_MERGE_SEPARATOR
    }

    /// The title is escaped; the item is already HTML (rendered from markdown)
    fn event_content(&self, title: &str, item: &ListItem) -> String {
        format!(
            "<h4 class=\"tlv-date-title\">{}</h4>{}",
            escape_html(title),
            item.html
        )
    }
}

impl HtmlFrontend {
    /// Render one timeline
    pub fn render(&self, layout: &TimelineLayout<String>) -> String {
        let mut html = String::from("<div class=\"tlv-root\" style=\"min-width: 100%\">\n");

        html.push_str("  <div class=\"tlv-years\">\n");
        for tick in &layout.ticks {
            let _ = writeln!(
                html,
                "    <span style=\"left: {}%\">{}</span>",
                tick.position,
                escape_html(&tick.label)
            );
        }
        html.push_str("  </div>\n");

        html.push_str("  <div class=\"tlv-timeline\">\n");
        if let Some(highlight) = layout.highlight {
            let _ = writeln!(
                html,
                "    <div class=\"tlv-timeline-highlight\" style=\"left: {}%; width: {}%\"></div>",
                highlight.position, highlight.width
            );
        }
        for event in &layout.events {
            let (class, style) = match event {
                TimeEvent::Single(single) => ("tlv-marker", format!("left: {}%", single.position)),
                TimeEvent::Span(span) => (
                    "tlv-span",
                    format!("left: {}%; width: {}%", span.position, span.width),
                ),
            };
            let _ = writeln!(
                html,
                "    <div class=\"{class}\" style=\"{style}\">\
                 <div class=\"tlv-popup popover hover-popover\">{}</div></div>",
                event.content()
            );
        }
        html.push_str("  </div>\n");

        html.push_str("</div>\n");
        html
    }

    /// Render several timelines one after the other
    pub fn render_all(&self, layouts: &[TimelineLayout<String>]) -> String {
        layouts.iter().map(|layout| self.render(layout)).collect()
    }
}

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
