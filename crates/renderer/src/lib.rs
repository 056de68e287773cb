// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Timelive project*
//!
//! This crate lays out timelines written as markdown lists and draws them.
//!
//! The core of the crate is a platform independent engine responsible for:
//!
//! - Tracking the range of dates and choosing a display unit (month or year)
//! - Mapping dates to percentage positions on the axis
//! - Generating the calendar labels
//! - Merging single events that would be drawn on top of each other
//!
//! The rest of the crate finds timeline lists in markdown documents (using
//! `pulldown-cmark`), generates
//! demo blocks, and holds the frontends.  There are currently 2:
//!
//! - Static HTML (styled through the `tlv-*` CSS classes)
//! - JSON for other tools to draw with
//!
//! ## Usage
//!
//! ```
//! use timelive_core::{DateFormatter, DateParser, TimeliveSettings};
//! use timelive_renderer::{HtmlFrontend, layout_list, scan_timeline_lists};
//!
//! let settings = TimeliveSettings::default();
//! let parser = DateParser::new(settings.parse_date_format);
//! let formatter = DateFormatter::new(&settings);
//! for list in scan_timeline_lists("- |2008-02-09| Something\n- |now| Now\n") {
//!     let layout = layout_list(&list, &parser, &formatter, &HtmlFrontend);
//!     println!("{}", HtmlFrontend.render(&layout));
//! }
//! ```
//!

pub mod demo;
pub mod engine;
pub mod frontends;
pub mod scanner;

pub use demo::new_block;
pub use engine::*;
pub use frontends::html::{HTML_MERGE_SEPARATOR, HtmlFrontend};
pub use frontends::json::{JsonFrontend, TEXT_MERGE_SEPARATOR};
pub use frontends::*;
pub use scanner::*;
