// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod engine;
pub mod flight;
pub mod search;
pub mod settings;
pub mod sort;
pub mod source;

pub use engine::{FlightSelectionEngine, LoadStatus, MAX_FLIGHT_RESULTS};
pub use flight::{Flight, FlightsResponse};
pub use search::{derive_suggestions, MINIMUM_SEARCH_LENGTH};
pub use sort::{SortKey, SortOrder, SortState};
pub use source::{FlightSource, LoadError};

use std::path::PathBuf;

/// Directory holding `settings.json`.
///
/// `DEPARTURES_CONFIG_DIR` overrides the platform config directory.
pub fn get_config_root() -> PathBuf {
    if let Ok(dir) = std::env::var("DEPARTURES_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    directories::ProjectDirs::from("org", "departures", "departures")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".departures"))
}
