// SPDX-License-Identifier: MIT

//!
//! Finds the timeline lists in a markdown document
//!
//! A list is a timeline only if *every* item starts with a `|token|` of 3 to
//! 30 characters, e.g.
//!
//! ```markdown
//! - |2008-02-09| Something happened
//! - |2008-02-09 - 2012-09-12| Something lasted a while
//! - |now| Now
//! ```
//!
//! The document is walked as `pulldown-cmark` events, so code blocks, loose
//! lists and nested lists are treated the way any markdown renderer would.
//!

use log::debug;
use pulldown_cmark::{CowStr, Event, Parser, Tag, TagEnd, html};
use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\|(.{3,30}?)\|\s*").unwrap())
}

/// One item of a timeline list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// The date token found between the pipes (untrimmed)
    pub token: String,

    /// The rest of the item as plain text
    pub content: String,

    /// The rest of the item rendered to HTML
    pub html: String,

    /// The (1-based) line the item starts on
    pub line: usize,
}

/// A markdown list where every item carries a date token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineList {
    pub items: Vec<ListItem>,
}

/// The events of one top level list item, before checking for a token
struct RawItem<'a> {
    line: usize,
    events: Vec<Event<'a>>,
}

impl<'a> RawItem<'a> {
    fn into_list_item(self) -> Option<ListItem> {
        let mut events = self.events;

        // The token is at the start of the first run of text (a loose item's
        // text sits in a paragraph)
        let start = events
            .iter()
            .position(|event| !matches!(event, Event::Start(Tag::Paragraph)))?;
        let end = events[start..]
            .iter()
            .position(|event| !matches!(event, Event::Text(_)))
            .map_or(events.len(), |offset| start + offset);
        let lead: String = events[start..end]
            .iter()
            .filter_map(|event| match event {
                Event::Text(text) => Some(text.as_ref()),
                _ => None,
            })
            .collect();

        let captures = token_pattern().captures(&lead)?;
        let token = captures[1].to_string();
        let rest = lead[captures[0].len()..].to_string();
        events.drain(start..end);
        if !rest.is_empty() {
            events.insert(start, Event::Text(CowStr::from(rest)));
        }

        Some(ListItem {
            token,
            content: plain_text(&events),
            html: {
                let mut html = String::new();
                html::push_html(&mut html, events.into_iter());
                html.trim_end().to_string()
            },
            line: self.line,
        })
    }
}

/// The text of the events, with whitespace collapsed
fn plain_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(part) | Event::Code(part) => text.push_str(part),
            Event::SoftBreak
            | Event::HardBreak
            | Event::Start(Tag::Paragraph | Tag::List(_) | Tag::Item)
            | Event::End(TagEnd::Paragraph | TagEnd::List(_) | TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every item must carry a token for the list to be a timeline
fn into_timeline(items: Vec<RawItem>) -> Option<TimelineList> {
    let line = items.first().map_or(0, |item| item.line);
    let items: Option<Vec<ListItem>> = items.into_iter().map(RawItem::into_list_item).collect();
    match items {
        Some(items) if !items.is_empty() => Some(TimelineList { items }),
        _ => {
            debug!("list at line {line} ignored (item without a date token)");
            None
        }
    }
}

/// Scan a markdown document for timeline lists, in document order.  Only top
/// level lists are considered; nested lists are part of their item's content.
pub fn scan_timeline_lists(markdown: &str) -> Vec<TimelineList> {
    let line_of = |offset: usize| markdown[..offset].matches('\n').count() + 1;

    let mut lists = Vec::new();
    let mut items: Vec<RawItem> = Vec::new();
    let mut depth = 0usize;

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::List(_)) => {
                if let Some(item) = items.last_mut().filter(|_| depth > 0) {
                    item.events.push(event);
                }
                depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                depth -= 1;
                if depth == 0 {
                    lists.extend(into_timeline(std::mem::take(&mut items)));
                } else if let Some(item) = items.last_mut() {
                    item.events.push(event);
                }
            }
            Event::Start(Tag::Item) if depth == 1 => items.push(RawItem {
                line: line_of(range.start),
                events: Vec::new(),
            }),
            Event::End(TagEnd::Item) if depth == 1 => {}
            event if depth > 0 => {
                if let Some(item) = items.last_mut() {
                    item.events.push(event);
                }
            }
            _ => {}
        }
    }

    debug!("found {} timeline lists", lists.len());
    lists
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens(list: &TimelineList) -> Vec<&str> {
        list.items.iter().map(|item| item.token.as_str()).collect()
    }

    #[test]
    fn single_list() {
        let markdown = "\
## Demo
- |2008-02-09| First
- |2008-02-09 - 2012-09-12| Second
- |now| Now
";
        let lists = scan_timeline_lists(markdown);
        assert_eq!(lists.len(), 1);
        assert_eq!(tokens(&lists[0]), vec!["2008-02-09", "2008-02-09 - 2012-09-12", "now"]);
        assert_eq!(
            lists[0].items[0],
            ListItem {
                token: String::from("2008-02-09"),
                content: String::from("First"),
                html: String::from("First"),
                line: 2,
            }
        );
        assert_eq!(lists[0].items[2].line, 4);
    }

    #[test]
    fn lists_with_plain_items_are_ignored() {
        let markdown = "\
- |2008| Dated
- Not dated

Between the lists

1. |2009| Dated
2. |2010| Also dated
";
        let lists = scan_timeline_lists(markdown);
        assert_eq!(lists.len(), 1);
        assert_eq!(tokens(&lists[0]), vec!["2009", "2010"]);
        assert_eq!(lists[0].items[0].line, 6);
    }

    #[test]
    fn token_length_limits() {
        // Too short
        assert!(scan_timeline_lists("- |ab| Text").is_empty());

        // Too long
        let long = format!("- |{}| Text", "1".repeat(31));
        assert!(scan_timeline_lists(&long).is_empty());

        let lists = scan_timeline_lists("* |abc|");
        assert_eq!(tokens(&lists[0]), vec!["abc"]);
        assert_eq!(lists[0].items[0].content, "");
        assert_eq!(lists[0].items[0].html, "");
    }

    #[test]
    fn continuation_and_nested_lines() {
        let markdown = "\
- |2008| First
  carries on
  - a nested point
- |2009| Second
";
        let lists = scan_timeline_lists(markdown);
        assert_eq!(lists.len(), 1);
        assert_eq!(tokens(&lists[0]), vec!["2008", "2009"]);
        assert_eq!(lists[0].items[0].content, "First carries on a nested point");
        assert!(lists[0].items[0].html.contains("<li>a nested point</li>"));
    }

    #[test]
    fn loose_list_is_one_timeline() {
        let markdown = "- |2008-02-09| First\n\n- |2009-02-09| Second\n";
        let lists = scan_timeline_lists(markdown);
        assert_eq!(lists.len(), 1);
        assert_eq!(tokens(&lists[0]), vec!["2008-02-09", "2009-02-09"]);
        assert_eq!(lists[0].items[1].content, "Second");
        assert_eq!(lists[0].items[1].html, "<p>Second</p>");
        assert_eq!(lists[0].items[1].line, 3);
    }

    #[test]
    fn code_blocks_are_not_timelines() {
        let markdown = "```markdown\n- |2008-02-09| Inside a code block\n- |now| Also code\n```\n";
        assert!(scan_timeline_lists(markdown).is_empty());

        let markdown = "    - |2008-02-09| Indented code\n";
        assert!(scan_timeline_lists(markdown).is_empty());
    }

    #[test]
    fn inline_markup_is_rendered() {
        let markdown = "- |2008| Some **bold** and a [link](https://example.com) & `code`\n";
        let lists = scan_timeline_lists(markdown);
        let item = &lists[0].items[0];
        assert_eq!(item.content, "Some bold and a link & code");
        assert_eq!(
            item.html,
            "Some <strong>bold</strong> and a <a href=\"https://example.com\">link</a> \
             &amp; <code>code</code>"
        );
    }

    #[test]
    fn switching_list_kind_starts_a_new_list() {
        let markdown = "\
- |2008| Unordered
1. |2009| Ordered
";
        assert_eq!(scan_timeline_lists(markdown).len(), 2);
    }

    #[test]
    fn no_lists() {
        assert!(scan_timeline_lists("").is_empty());
        assert!(scan_timeline_lists("# Title\n\nSome |2008| text.\n").is_empty());
    }
}
