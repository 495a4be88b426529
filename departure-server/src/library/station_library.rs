//! The station library facade.

use std::str::FromStr;

use tracing::debug;

use crate::domain::{Departure, Position, Station, StationId};
use crate::provider::{STOP_LOCATION_TAG, TransitDataProvider};

use super::error::LibraryError;
use super::mapper::{departures_from_board, station_from_record, xy_from_position};

/// Search radius used when the caller gives none.
pub const DEFAULT_RADIUS_METERS: u32 = 100;

/// Result limit used when the caller gives none.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// How departures are ordered before they are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureOrder {
    /// Exactly as the provider listed them.
    Provider,
    /// Stable-sorted by departure time.
    Chronological,
}

/// A departure order name that is neither `provider` nor `chronological`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown departure order {0:?} (expected \"provider\" or \"chronological\")")]
pub struct ParseOrderError(pub String);

impl FromStr for DepartureOrder {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provider" => Ok(Self::Provider),
            "chronological" => Ok(Self::Chronological),
            other => Err(ParseOrderError(other.to_string())),
        }
    }
}

/// Domain operations over a transit-data provider.
///
/// Holds no state besides the provider and its configuration, so a library
/// can be shared between threads and called concurrently.
#[derive(Debug)]
pub struct StationLibrary<P> {
    provider: P,
    order: DepartureOrder,
}

impl<P: TransitDataProvider> StationLibrary<P> {
    pub fn new(provider: P, order: DepartureOrder) -> Self {
        Self { provider, order }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn order(&self) -> DepartureOrder {
        self.order
    }

    /// Stations within `radius_meters` of `position`, in provider order.
    pub fn find_nearby(
        &self,
        position: Position,
        radius_meters: u32,
        max_results: u32,
    ) -> Result<Vec<Station>, LibraryError> {
        let (x, y) = xy_from_position(position);
        debug!(x, y, radius_meters, max_results, "finding nearby stations");

        let records = self
            .provider
            .find_nearby(x, y, radius_meters, max_results)?;

        records
            .iter()
            .map(|record| station_from_record(record).map_err(LibraryError::from))
            .collect()
    }

    /// The first stop whose name matches `name`.
    ///
    /// Address and coordinate matches are skipped. Returns `None` when the
    /// search yields no stop at all.
    pub fn station_from_name(&self, name: &str) -> Result<Option<Station>, LibraryError> {
        debug!(query = name, "searching station by name");

        let records = self.provider.search_stop(name)?;
        let station = records
            .iter()
            .find(|record| record.tag() == STOP_LOCATION_TAG)
            .map(station_from_record)
            .transpose()?;

        Ok(station)
    }

    /// A station known only by its id.
    ///
    /// No upstream call is made, so the name is empty and the position is
    /// the origin regardless of whether the id exists.
    pub fn station_from_id(&self, id: StationId) -> Station {
        Station::stub(id)
    }

    /// The departure board of `station`.
    ///
    /// Every departure naming a final stop costs one extra name search.
    pub fn departures(&self, station: &Station) -> Result<Vec<Departure>, LibraryError> {
        debug!(station_id = station.id, "fetching departure board");

        let records = self
            .provider
            .departure_board(station.id, true, true, true)?;

        let mut departures =
            departures_from_board(&records, station, |name| self.station_from_name(name))?;

        if self.order == DepartureOrder::Chronological {
            departures.sort_by_key(|departure| departure.time);
        }

        Ok(departures)
    }
}
