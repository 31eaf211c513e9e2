// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::flight::Flight;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "expectedTime")]
    ExpectedTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortParseError {
    #[error("Unknown sort key: {0} (expected 'date' or 'time')")]
    Key(String),
    #[error("Unknown sort order: {0} (expected 'asc' or 'desc')")]
    Order(String),
}

impl FromStr for SortKey {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "time" | "expectedtime" | "expected-time" => Ok(SortKey::ExpectedTime),
            _ => Err(SortParseError::Key(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Date => write!(f, "date"),
            SortKey::ExpectedTime => write!(f, "expectedTime"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(SortParseError::Order(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// Last direction applied per key. The two keys are remembered independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_time: Option<SortOrder>,
}

impl SortState {
    pub fn both_ascending() -> Self {
        Self {
            date: Some(SortOrder::Asc),
            expected_time: Some(SortOrder::Asc),
        }
    }

    pub fn get(&self, key: SortKey) -> Option<SortOrder> {
        match key {
            SortKey::Date => self.date,
            SortKey::ExpectedTime => self.expected_time,
        }
    }

    pub fn set(&mut self, key: SortKey, order: SortOrder) {
        match key {
            SortKey::Date => self.date = Some(order),
            SortKey::ExpectedTime => self.expected_time = Some(order),
        }
    }
}

fn compare_ascending(a: &Flight, b: &Flight, key: SortKey) -> Ordering {
    // Unparseable values are None and sort first; nothing here can panic.
    match key {
        SortKey::Date => a.calendar_date().cmp(&b.calendar_date()),
        SortKey::ExpectedTime => a.time_of_day().cmp(&b.time_of_day()),
    }
}

/// Stable in-place sort. Equal elements keep their relative order in both
/// directions.
pub fn sort_flights(flights: &mut [Flight], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => flights.sort_by(|a, b| compare_ascending(a, b, key)),
        SortOrder::Desc => flights.sort_by(|a, b| compare_ascending(b, a, key)),
    }
}
