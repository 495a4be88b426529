//! The versioned API tree.
//!
//! Every API operation is a leaf of one [`Handler`] built at startup:
//!
//! - `1.0/test`
//! - `1.0/StationLibrary/findNearby?lat=&long=[&radius=][&max=]`
//! - `1.0/StationLibrary/stationFromName?name=`
//! - `1.0/StationLibrary/stationFromId/<id>`
//! - `1.0/StationLibrary/departures/<id>`

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::dispatch::{DispatchError, Handler, Input, WILDCARD};
use crate::domain::{Departure, Position, Station, StationId};
use crate::library::{DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_METERS, LibraryError, StationLibrary};
use crate::provider::TransitDataProvider;

/// Result of an API operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// Serialized as `{}`.
    Empty {},
    Station(Station),
    /// Serialized as the station or `null`.
    MaybeStation(Option<Station>),
    Stations(Vec<Station>),
    Departures(Vec<Departure>),
}

/// Errors from API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request path does not name an operation
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A parameter is missing or unparsable
    #[error("{0}")]
    BadRequest(String),

    /// The provider failed or answered with unusable records
    #[error(transparent)]
    Upstream(#[from] LibraryError),

    #[error("{0}")]
    Internal(String),
}

/// The API tree for `library`.
pub fn api_handler<P>(library: Arc<StationLibrary<P>>) -> Handler<Reply, ApiError>
where
    P: TransitDataProvider + Send + Sync + 'static,
{
    let mut root = Handler::new();
    register_v1(&mut root, library);
    root
}

/// Register the `1.0` operations on `root`.
pub fn register_v1<P>(root: &mut Handler<Reply, ApiError>, library: Arc<StationLibrary<P>>)
where
    P: TransitDataProvider + Send + Sync + 'static,
{
    let v1 = root.register_child("1.0");
    v1.register_function("test", |_, _| Ok(Reply::Empty {}));

    let stations = v1.register_child("StationLibrary");

    let lib = Arc::clone(&library);
    stations.register_function("findNearby", move |_, input| {
        let position = Position::new(param(input, "lat")?, param(input, "long")?);
        let radius = param_or(input, "radius", DEFAULT_RADIUS_METERS)?;
        let max_results = param_or(input, "max", DEFAULT_MAX_RESULTS)?;
        Ok(Reply::Stations(lib.find_nearby(position, radius, max_results)?))
    });

    let lib = Arc::clone(&library);
    stations.register_function("stationFromName", move |_, input| {
        let name: String = param(input, "name")?;
        Ok(Reply::MaybeStation(lib.station_from_name(&name)?))
    });

    let lib = Arc::clone(&library);
    stations
        .register_child("stationFromId")
        .register_function(WILDCARD, move |segments, _| {
            Ok(Reply::Station(lib.station_from_id(station_id(segments)?)))
        });

    let lib = library;
    stations
        .register_child("departures")
        .register_function(WILDCARD, move |segments, _| {
            let station = lib.station_from_id(station_id(segments)?);
            Ok(Reply::Departures(lib.departures(&station)?))
        });
}

fn param<V: FromStr>(input: &Input, key: &str) -> Result<V, ApiError> {
    let value = input
        .get(key)
        .ok_or_else(|| ApiError::BadRequest(format!("missing parameter: {key}")))?;
    parse(key, value)
}

fn param_or<V: FromStr>(input: &Input, key: &str, default: V) -> Result<V, ApiError> {
    match input.get(key) {
        Some(value) => parse(key, value),
        None => Ok(default),
    }
}

fn parse<V: FromStr>(key: &str, value: &str) -> Result<V, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid value for {key}: {value:?}")))
}

/// The id segment a wildcard leaf was selected by.
fn station_id(segments: &[String]) -> Result<StationId, ApiError> {
    let segment = segments
        .first()
        .ok_or(ApiError::Dispatch(DispatchError::EmptyPath))?;
    parse("station id", segment)
}
