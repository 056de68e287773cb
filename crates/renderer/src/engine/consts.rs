// SPDX-License-Identifier: MIT

//!
//! Engine constants
//!

/// Span (in whole months) up to which the timeline is shown in months rather
/// than years
pub const MAX_MONTHS_FOR_MONTH_UNIT: i64 = 10;

/// Single events closer than this (in percentage points) to the previously
/// kept marker are merged into it
pub const MERGE_THRESHOLD: f64 = 1.0;

/// The maximum recursion depth of the calendar tick subdivision.  This bounds
/// the number of candidate ticks to `2^(depth + 1) - 1`.
pub const CALENDAR_DEPTH: u32 = 3;
