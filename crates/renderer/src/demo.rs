// SPDX-License-Identifier: MIT

//!
//! The demo timeline block (a starting point for writing a new timeline)
//!

use timelive_core::{DateMath, DateOrder, DisplayUnit};

/// Generate a demo timeline block, with dates written in the given order
/// relative to today
pub fn new_block<M: DateMath>(order: DateOrder, math: &M) -> String {
    let today = math.today();
    let pattern = order.display_pattern();
    let dates = [
        (today.add_units(DisplayUnit::Year, -1), "Start"),
        (today.add_units(DisplayUnit::Month, -1), "One month ago"),
        (today.add_days(-1), "Yesterday"),
    ];

    let mut block = String::from("## Demo\n\n");
    for (date, description) in dates {
        block.push_str(&format!("- |{}| {description}\n", math.format(date, pattern)));
    }
    block.push_str("- |now| Now\n");
    block
}
