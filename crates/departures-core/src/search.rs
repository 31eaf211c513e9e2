// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::flight::Flight;
use std::collections::HashSet;

/// Queries shorter than this (in characters) never produce suggestions.
pub const MINIMUM_SEARCH_LENGTH: usize = 3;

pub fn meets_minimum_length(query: &str) -> bool {
    query.chars().count() >= MINIMUM_SEARCH_LENGTH
}

/// Distinct airport names whose lowercase form contains the lowercase query.
///
/// Names are deduplicated case-insensitively; the casing of the first
/// occurrence in `flights` wins and results keep that first-occurrence order.
pub fn derive_suggestions(flights: &[Flight], query: &str) -> Vec<String> {
    if !meets_minimum_length(query) {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for flight in flights {
        let folded = flight.airport.to_lowercase();
        if !folded.contains(&needle) {
            continue;
        }
        if seen.insert(folded) {
            suggestions.push(flight.airport.clone());
        }
    }

    suggestions
}
