// SPDX-License-Identifier: MIT

//!
//! The display unit (granularity) of a timeline
//!

use serde::{Deserialize, Serialize};

/// The approximate number of days in a month (not calendar exact, so every
/// month is drawn the same width)
pub const DAYS_PER_MONTH: f64 = 31.0;

/// The mean number of days in a (tropical) year
pub const DAYS_PER_YEAR: f64 = 365.2422;

/// The granularity used for axis labelling and position scaling.  Ordered from
/// finest to coarsest.
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    #[display("month")]
    Month,
    #[display("year")]
    Year,
}

impl DisplayUnit {
    /// The fixed number of days used as the position denominator for one unit
    pub fn days_per_unit(&self) -> f64 {
        match self {
            DisplayUnit::Month => DAYS_PER_MONTH,
            DisplayUnit::Year => DAYS_PER_YEAR,
        }
    }
}
