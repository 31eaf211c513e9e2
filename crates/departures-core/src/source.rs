// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::flight::{Flight, FlightsResponse};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SOURCE: &str = "flights.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Why the one-shot flight load did not produce any data.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Malformed flight document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightSource {
    File(PathBuf),
    Url(String),
}

impl FlightSource {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FlightSource::Url(trimmed.to_string())
        } else {
            FlightSource::File(PathBuf::from(trimmed))
        }
    }
}

impl Default for FlightSource {
    fn default() -> Self {
        FlightSource::File(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for FlightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightSource::File(path) => write!(f, "{}", path.display()),
            FlightSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Reads and parses the flight document once. Never retries.
pub fn fetch_flights(source: &FlightSource, timeout: Duration) -> Result<Vec<Flight>, LoadError> {
    let content = match source {
        FlightSource::File(path) => {
            info!("Reading flight data — path={}", path.display());
            fs::read_to_string(path)?
        }
        FlightSource::Url(url) => {
            info!(
                "Fetching flight data — url={} timeout_secs={}",
                url,
                timeout.as_secs()
            );
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;

            let response = client.get(url).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status(status.as_u16()));
            }
            response.text()?
        }
    };

    debug!("Flight document read — bytes={}", content.len());
    let response = FlightsResponse::from_json(&content)?;
    info!("Loaded flights — count={}", response.flights.len());
    Ok(response.flights)
}
