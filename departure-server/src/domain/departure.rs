//! Departures from a station's board.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use super::Station;
use super::time::board_timestamp;

/// A single departure on a departure board.
///
/// `time` is the realtime estimate when the provider has one and the
/// scheduled time otherwise. Cancelled departures are never represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// The station whose board this departure was read from.
    #[serde(skip)]
    pub station: Station,

    /// Train or line name, e.g. `"Re 2221"`.
    pub name: String,

    /// Category code, e.g. `"REG"`, `"IC"`, `"M"`.
    pub departure_type: String,

    /// Local board time; serialized as Unix seconds.
    #[serde(rename = "date", serialize_with = "serialize_timestamp")]
    pub time: NaiveDateTime,

    /// Empty when the provider gives no direction.
    pub direction: String,

    /// Final stop of the service, when the provider names one and it can be
    /// found by name.
    pub final_stop: Option<Station>,
}

fn serialize_timestamp<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(board_timestamp(*time))
}
