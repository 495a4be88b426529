//! Fixture-backed provider for development and tests.
//!
//! Serves the same three answers to every query. A stub built with
//! [`StubProvider::recording`] also remembers each call it receives, so tests
//! can assert on exactly which upstream requests a higher-level operation
//! caused.

use std::sync::{Mutex, PoisonError};

use crate::domain::StationId;

use super::error::ProviderError;
use super::xml::parse_records;
use super::{Record, TransitDataProvider};

const NEARBY_FIXTURE: &str = include_str!("../../data/stub/nearby.xml");
const SEARCH_FIXTURE: &str = include_str!("../../data/stub/search.xml");
const DEPARTURES_FIXTURE: &str = include_str!("../../data/stub/departures.xml");

/// A query received by a [`StubProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    FindNearby {
        x: i64,
        y: i64,
        max_radius: u32,
        max_results: u32,
    },
    SearchStop(String),
    DepartureBoard {
        stop_id: StationId,
        use_bus: bool,
        use_train: bool,
        use_metro: bool,
    },
}

/// Provider answering from fixed record lists.
#[derive(Debug)]
pub struct StubProvider {
    nearby: Vec<Record>,
    search: Vec<Record>,
    departures: Vec<Record>,
    /// `None` unless recording was switched on
    calls: Option<Mutex<Vec<ProviderCall>>>,
}

impl StubProvider {
    /// Create a stub serving the bundled Copenhagen fixtures.
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self::with_records(
            parse_records(NEARBY_FIXTURE)?,
            parse_records(SEARCH_FIXTURE)?,
            parse_records(DEPARTURES_FIXTURE)?,
        ))
    }

    /// Create a stub serving the given records.
    pub fn with_records(nearby: Vec<Record>, search: Vec<Record>, departures: Vec<Record>) -> Self {
        Self {
            nearby,
            search,
            departures,
            calls: None,
        }
    }

    /// Remember every call from now on.
    ///
    /// The history is unbounded, so this is for tests only.
    pub fn recording(mut self) -> Self {
        self.calls = Some(Mutex::new(Vec::new()));
        self
    }

    /// Calls received so far, oldest first. Always empty when not recording.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls
            .as_ref()
            .map(|calls| calls.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .unwrap_or_default()
    }

    /// Forget all recorded calls.
    pub fn clear_calls(&self) {
        if let Some(calls) = &self.calls {
            calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    fn record(&self, call: ProviderCall) {
        if let Some(calls) = &self.calls {
            calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        }
    }
}

impl TransitDataProvider for StubProvider {
    fn find_nearby(
        &self,
        x: i64,
        y: i64,
        max_radius: u32,
        max_results: u32,
    ) -> Result<Vec<Record>, ProviderError> {
        self.record(ProviderCall::FindNearby {
            x,
            y,
            max_radius,
            max_results,
        });
        Ok(self.nearby.clone())
    }

    fn search_stop(&self, name: &str) -> Result<Vec<Record>, ProviderError> {
        self.record(ProviderCall::SearchStop(name.to_string()));
        Ok(self.search.clone())
    }

    fn departure_board(
        &self,
        stop_id: StationId,
        use_bus: bool,
        use_train: bool,
        use_metro: bool,
    ) -> Result<Vec<Record>, ProviderError> {
        self.record(ProviderCall::DepartureBoard {
            stop_id,
            use_bus,
            use_train,
            use_metro,
        });
        Ok(self.departures.clone())
    }
}
