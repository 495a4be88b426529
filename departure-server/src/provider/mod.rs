//! Upstream transit-data provider.
//!
//! The rest of the crate only sees the provider through the
//! [`TransitDataProvider`] trait, which answers three queries with flat
//! [`Record`]s. Two implementations live here:
//! - [`RejseplanenClient`] talks to the Rejseplanen XML REST interface
//! - [`StubProvider`] serves bundled fixture documents and records its calls

mod client;
mod error;
mod record;
mod stub;
mod xml;

pub use client::{RejseplanenClient, RejseplanenConfig};
pub use error::ProviderError;
pub use record::Record;
pub use stub::{ProviderCall, StubProvider};
pub use xml::parse_records;

use crate::domain::StationId;

/// Element tag of a record that is an actual transit stop.
pub const STOP_LOCATION_TAG: &str = "StopLocation";

/// Element tag of a geocoded address match.
pub const COORD_LOCATION_TAG: &str = "CoordLocation";

/// Source of raw transit records.
///
/// Calls are synchronous: each one blocks until the upstream answer has been
/// fetched and decoded. Failures are returned as-is; implementations do not
/// retry.
pub trait TransitDataProvider {
    /// Stops within `max_radius` metres of `(x, y)`, at most `max_results`.
    ///
    /// Records carry `id`, `name`, `x` and `y`.
    fn find_nearby(
        &self,
        x: i64,
        y: i64,
        max_radius: u32,
        max_results: u32,
    ) -> Result<Vec<Record>, ProviderError>;

    /// Locations matching a free-text name.
    ///
    /// Records are tagged [`STOP_LOCATION_TAG`] or [`COORD_LOCATION_TAG`].
    fn search_stop(&self, name: &str) -> Result<Vec<Record>, ProviderError>;

    /// The departure board of a stop.
    ///
    /// Records carry `name`, `type`, `time` and `date`, and optionally
    /// `rtTime`, `rtDate`, `direction`, `finalStop` and `cancelled`.
    fn departure_board(
        &self,
        stop_id: StationId,
        use_bus: bool,
        use_train: bool,
        use_metro: bool,
    ) -> Result<Vec<Record>, ProviderError>;
}
