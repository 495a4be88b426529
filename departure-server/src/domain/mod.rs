//! Domain types for the departure server.
//!
//! Stations, positions and departures are plain value types: they are built
//! fresh from each upstream answer, never mutated afterwards, and compare by
//! their fields.

mod departure;
mod station;
pub mod time;

pub use departure::Departure;
pub use station::{Position, Station, StationId};
pub use time::{
    BOARD_TIMEZONE, TimeError, board_timestamp, parse_board_date, parse_board_datetime, parse_clock,
};
