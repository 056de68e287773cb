// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Timelive project*
//!
//! This crate defines the basic datatypes used across the Timelive project
//! (layout engine, frontends, command line tool).
//!
//! - [`CalendarDate`], a day-granularity date that is always valid
//! - [`DisplayUnit`], the month/year granularity of a timeline
//! - [`DateParser`], fuzzy parsing of `|date|` and `|from - to|` tokens
//! - [`DateFormatter`], rendering dates for titles and calendar labels
//! - [`TimeliveSettings`], the user settings
//!
//! Anything host specific (the clock, free-form parsing, display patterns)
//! goes through the [`DateMath`] capability, with [`ChronoDateMath`] as the
//! default.
//!

mod date;
mod formatter;
mod math;
mod parser;
mod settings;
mod unit;

pub use date::*;
pub use formatter::*;
pub use math::*;
pub use parser::*;
pub use settings::*;
pub use unit::*;
