// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use chrono::{NaiveDate, NaiveTime};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single departure as published by the flight data feed.
///
/// All fields are carried verbatim from the feed. `score` is opaque and only
/// ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_identifier: String,
    pub flight_number: String,
    pub airport: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Local time of day, `HH:MM`
    pub expected_time: String,
    pub original_time: String,
    pub url: String,
    pub score: String,
}

impl Flight {
    /// Expected departure as a time of day. The calendar date is not involved.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.expected_time)
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// True when the expected time no longer matches the published schedule.
    pub fn is_rescheduled(&self) -> bool {
        self.expected_time != self.original_time
    }

    pub fn to_display_line(&self) -> String {
        let original = if self.is_rescheduled() {
            format!("(was {})", self.original_time)
        } else {
            String::new()
        };
        format!(
            "{:>5} {:<10} {:<24} {:<8} {:>10}  {}",
            self.expected_time, original, self.airport, self.flight_number, self.date, self.score
        )
    }
}

pub(crate) fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// The `{ "flights": [...] }` document served by the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightsResponse {
    pub flights: Vec<Flight>,
}

impl FlightsResponse {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let response: FlightsResponse = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        for flight in &response.flights {
            if !seen.insert(flight.flight_identifier.as_str()) {
                warn!(
                    "Duplicate flight identifier in feed — flight_identifier={}",
                    flight.flight_identifier
                );
            }
        }

        Ok(response)
    }
}
