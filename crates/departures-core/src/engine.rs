// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::flight::Flight;
use crate::search::derive_suggestions;
use crate::sort::{sort_flights, SortKey, SortOrder, SortState};
use crate::source::{fetch_flights, FlightSource, LoadError};
use log::{debug, error, info};
use std::time::Duration;

/// At most this many flights are kept after an airport is selected.
pub const MAX_FLIGHT_RESULTS: usize = 5;

#[derive(Debug, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    /// The load finished without data. The engine keeps working on an empty set.
    Failed(LoadError),
}

/// Owns the loaded flights and everything derived from them for display:
/// airport suggestions for the current query, and the capped, sorted flight
/// list of the chosen airport.
#[derive(Debug, Default)]
pub struct FlightSelectionEngine {
    all_flights: Vec<Flight>,
    status: LoadStatus,
    search_query: String,
    suggested_airports: Vec<String>,
    selected_airport: Option<String>,
    selected_flights: Option<Vec<Flight>>,
    sort_state: SortState,
}

impl FlightSelectionEngine {
    /// An engine waiting for its flight data. See [`Self::finish_load`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_flights(flights: Vec<Flight>) -> Self {
        let mut engine = Self::new();
        engine.finish_load(Ok(flights));
        engine
    }

    /// Fetches from `source` once and builds an engine from the outcome.
    /// A failed fetch is recorded in [`Self::load_status`], not returned.
    pub fn load(source: &FlightSource, timeout: Duration) -> Self {
        let mut engine = Self::new();
        engine.finish_load(fetch_flights(source, timeout));
        engine
    }

    /// Installs the result of a load. A later call replaces the flight set
    /// wholesale.
    pub fn finish_load(&mut self, result: Result<Vec<Flight>, LoadError>) {
        match result {
            Ok(flights) => {
                info!("Flight data ready — count={}", flights.len());
                self.all_flights = flights;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                error!("Error fetching flights: {}", e);
                self.all_flights = Vec::new();
                self.status = LoadStatus::Failed(e);
            }
        }
        self.refresh_suggestions();
    }

    pub fn all_flights(&self) -> &[Flight] {
        &self.all_flights
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.status {
            LoadStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn suggested_airports(&self) -> &[String] {
        &self.suggested_airports
    }

    pub fn selected_airport(&self) -> Option<&str> {
        self.selected_airport.as_deref()
    }

    /// `None` until an airport has been selected; `Some(&[])` when the chosen
    /// airport has no departures.
    pub fn selected_flights(&self) -> Option<&[Flight]> {
        self.selected_flights.as_deref()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort_state
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refresh_suggestions();
    }

    fn refresh_suggestions(&mut self) {
        self.suggested_airports = derive_suggestions(&self.all_flights, &self.search_query);
        debug!(
            "Suggestions refreshed — query={:?} count={}",
            self.search_query,
            self.suggested_airports.len()
        );
    }

    /// Closes the search and shows the earliest departures (by time of day)
    /// for an exact airport name match.
    pub fn select_airport(&mut self, airport: &str) {
        self.set_search_query(String::new());

        let mut flights: Vec<Flight> = self
            .all_flights
            .iter()
            .filter(|f| f.airport == airport)
            .cloned()
            .collect();
        sort_flights(&mut flights, SortKey::ExpectedTime, SortOrder::Asc);
        let matched = flights.len();
        flights.truncate(MAX_FLIGHT_RESULTS);

        debug!(
            "Airport selected — airport={} matched={} kept={}",
            airport,
            matched,
            flights.len()
        );

        self.selected_airport = Some(airport.to_string());
        self.selected_flights = Some(flights);
        // Both indicators read ascending even though only time order was applied.
        self.sort_state = SortState::both_ascending();
    }

    /// Re-orders the current selection. Membership never changes; a no-op
    /// while nothing is selected.
    pub fn sort_flight_results(&mut self, sort_by: SortKey, order: SortOrder) {
        let Some(current) = &self.selected_flights else {
            return;
        };

        let mut sorted = current.clone();
        sort_flights(&mut sorted, sort_by, order);
        self.selected_flights = Some(sorted);
        self.sort_state.set(sort_by, order);
    }

    /// Flips the remembered direction for `key`; an unset key goes ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        let next = match self.sort_state.get(key) {
            Some(SortOrder::Asc) => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        self.sort_flight_results(key, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(id: &str, airport: &str, date: &str, time: &str) -> Flight {
        Flight {
            flight_identifier: id.to_string(),
            flight_number: id.to_string(),
            airport: airport.to_string(),
            date: date.to_string(),
            expected_time: time.to_string(),
            original_time: time.to_string(),
            url: format!("/en/departures/flight/{}/", id),
            score: "1.0".to_string(),
        }
    }

    #[test]
    fn test_new_engine_is_loading() {
        let engine = FlightSelectionEngine::new();
        assert!(engine.is_loading());
        assert!(engine.all_flights().is_empty());
        assert!(engine.selected_flights().is_none());
        assert_eq!(engine.sort_state(), SortState::default());
    }

    #[test]
    fn test_failed_load_degrades_to_empty() {
        let mut engine = FlightSelectionEngine::new();
        engine.finish_load(Err(LoadError::Status(404)));

        assert!(!engine.is_loading());
        assert!(matches!(engine.load_error(), Some(LoadError::Status(404))));
        assert!(engine.all_flights().is_empty());

        engine.set_search_query("Dublin");
        assert!(engine.suggested_airports().is_empty());
        engine.select_airport("Dublin");
        assert_eq!(engine.selected_flights(), Some(&[][..]));
    }

    #[test]
    fn test_reload_replaces_set_and_refreshes_suggestions() {
        let mut engine =
            FlightSelectionEngine::from_flights(vec![flight("1", "Paris", "2022-02-23", "10:00")]);
        engine.set_search_query("lon");
        assert!(engine.suggested_airports().is_empty());

        engine.finish_load(Ok(vec![flight("2", "London", "2022-02-23", "11:00")]));
        assert_eq!(engine.suggested_airports(), ["London".to_string()]);
        assert_eq!(engine.all_flights().len(), 1);
    }

    #[test]
    fn test_select_clears_search() {
        let mut engine = FlightSelectionEngine::from_flights(vec![
            flight("1", "Dublin", "2022-02-23", "10:00"),
            flight("2", "Dubai", "2022-02-23", "11:00"),
        ]);
        engine.set_search_query("dub");
        assert_eq!(engine.suggested_airports().len(), 2);

        engine.select_airport("Dubai");
        assert_eq!(engine.search_query(), "");
        assert!(engine.suggested_airports().is_empty());
        assert_eq!(engine.selected_airport(), Some("Dubai"));
        assert_eq!(engine.selected_flights().map(|f| f.len()), Some(1));
    }

    #[test]
    fn test_select_is_exact_and_case_sensitive() {
        let mut engine = FlightSelectionEngine::from_flights(vec![
            flight("1", "Dublin", "2022-02-23", "10:00"),
            flight("2", "DUBLIN", "2022-02-23", "11:00"),
            flight("3", "Dublin Weston", "2022-02-23", "12:00"),
        ]);
        engine.select_airport("Dublin");
        let selected = engine.selected_flights().unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].flight_identifier, "1");
    }

    #[test]
    fn test_select_sorts_by_time_only() {
        let mut engine = FlightSelectionEngine::from_flights(vec![
            flight("late", "Rome", "2022-02-20", "20:00"),
            flight("next-day", "Rome", "2022-02-24", "08:00"),
            flight("same-a", "Rome", "2022-02-23", "12:00"),
            flight("same-b", "Rome", "2022-02-21", "12:00"),
        ]);
        engine.select_airport("Rome");
        let ids: Vec<_> = engine
            .selected_flights()
            .unwrap()
            .iter()
            .map(|f| f.flight_identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["next-day", "same-a", "same-b", "late"]);
    }

    #[test]
    fn test_sort_never_changes_membership() {
        let flights: Vec<Flight> = (0..8)
            .map(|i| {
                flight(
                    &format!("F{}", i),
                    "Oslo",
                    &format!("2022-02-{:02}", 28 - i),
                    &format!("{:02}:00", 10 + i),
                )
            })
            .collect();
        let mut engine = FlightSelectionEngine::from_flights(flights);
        engine.select_airport("Oslo");

        engine.sort_flight_results(SortKey::Date, SortOrder::Asc);
        let selected = engine.selected_flights().unwrap();
        assert_eq!(selected.len(), MAX_FLIGHT_RESULTS);
        // The five earliest by time are F0..F4; date ascending reverses them
        let ids: Vec<_> = selected.iter().map(|f| f.flight_identifier.as_str()).collect();
        assert_eq!(ids, vec!["F4", "F3", "F2", "F1", "F0"]);
    }

    #[test]
    fn test_toggle_sort() {
        let mut engine = FlightSelectionEngine::from_flights(vec![
            flight("a", "Nice", "2022-02-23", "09:00"),
            flight("b", "Nice", "2022-02-23", "15:00"),
        ]);

        // Nothing selected: toggling is a no-op
        engine.toggle_sort(SortKey::ExpectedTime);
        assert_eq!(engine.sort_state(), SortState::default());

        engine.select_airport("Nice");
        engine.toggle_sort(SortKey::ExpectedTime);
        assert_eq!(engine.sort_state().expected_time, Some(SortOrder::Desc));
        assert_eq!(engine.selected_flights().unwrap()[0].flight_identifier, "b");

        engine.toggle_sort(SortKey::ExpectedTime);
        assert_eq!(engine.sort_state().expected_time, Some(SortOrder::Asc));
        assert_eq!(engine.selected_flights().unwrap()[0].flight_identifier, "a");
        assert_eq!(engine.sort_state().date, Some(SortOrder::Asc));
    }

    #[test]
    fn test_superseded_query_wins() {
        let mut engine = FlightSelectionEngine::from_flights(vec![
            flight("1", "Dublin", "2022-02-23", "10:00"),
            flight("2", "Paris", "2022-02-23", "11:00"),
        ]);
        engine.set_search_query("dub");
        engine.set_search_query("par");
        assert_eq!(engine.suggested_airports(), ["Paris".to_string()]);
        engine.set_search_query("pa");
        assert!(engine.suggested_airports().is_empty());
    }
}
