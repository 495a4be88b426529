//! Stations and their positions.

use serde::Serialize;

/// Upstream stop identifier.
pub type StationId = u64;

/// A geographic position in upstream fixed-point units.
///
/// Rejseplanen reports coordinates as integer degrees scaled by 10⁶
/// (`55673063` is 55.673063°). They are kept in that form so values pass
/// through to and from the provider without rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    #[serde(rename = "lat")]
    pub latitude: i64,
    #[serde(rename = "long")]
    pub longitude: i64,
}

impl Position {
    pub fn new(latitude: i64, longitude: i64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A transit stop.
///
/// A station built from an id alone (see [`Station::stub`]) has an empty
/// name and the origin as its position. It is still a valid value and can be
/// used to request a departure board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    #[serde(rename = "pos")]
    pub position: Position,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }

    /// A station known only by id.
    pub fn stub(id: StationId) -> Self {
        Self::new(id, "", Position::default())
    }
}
