//! Station library: the domain operations over a transit-data provider.
//!
//! [`StationLibrary`] is the only component that issues upstream queries.
//! The pure record-to-entity conversions it relies on live in [`mapper`].

mod error;
pub mod mapper;
mod station_library;

pub use error::{LibraryError, MappingError};
pub use station_library::{
    DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_METERS, DepartureOrder, ParseOrderError, StationLibrary,
};
