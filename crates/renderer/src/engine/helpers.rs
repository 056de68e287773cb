// SPDX-License-Identifier: MIT

//!
//! Helper functions
//!

/// Round an f64 value to 3 decimal places
pub(crate) fn round_to_3dp(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
