// SPDX-License-Identifier: MIT

//!
//! Timelive settings
//!

use crate::DateOrder;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can arise when loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The user settings.  Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeliveSettings {
    /// Pattern used for the date title of each event
    pub preview_title_date_format: String,

    /// Pattern used for calendar labels when the timeline is shown in months
    pub calendar_month_format: String,

    /// Pattern used for calendar labels when the timeline is shown in years
    pub calendar_year_format: String,

    /// The order numeric dates are written in
    pub parse_date_format: DateOrder,
}

impl Default for TimeliveSettings {
    fn default() -> Self {
        TimeliveSettings {
            preview_title_date_format: String::from("YYYY-MM-DD"),
            calendar_month_format: String::from("YYYY-MM"),
            calendar_year_format: String::from("YYYY"),
            parse_date_format: DateOrder::Ymd,
        }
    }
}

impl TimeliveSettings {
    /// Load the settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        info!("Loading settings from {path:?}");
        let data = fs::read_to_string(path)?;
        let settings: TimeliveSettings = serde_json::from_str(&data)?;
        info!("Settings loaded = {settings:?}");
        Ok(settings)
    }

    /// Load the settings from a JSON file, or use the defaults if it doesn't
    /// exist
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No settings file at {path:?}, using defaults");
            Ok(Self::default())
        }
    }

    /// Save the settings to a JSON file (creating parent directories)
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Saving settings to {path:?}");
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
