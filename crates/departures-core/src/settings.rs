// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::source::{FlightSource, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// File path or http(s) URL of the flight document
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn flight_source(&self) -> FlightSource {
        self.source
            .as_deref()
            .map(FlightSource::parse)
            .unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct SettingsManager {
    config_path: PathBuf,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    pub fn new() -> Self {
        Self::at_path(crate::get_config_root().join("settings.json"))
    }

    pub fn at_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Settings> {
        if !self.config_path.exists() {
            return Ok(Settings::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read settings.json")?;

        serde_json::from_str(&content).context("Failed to parse settings.json")
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&self.config_path, content).context("Failed to write settings.json")
    }
}
