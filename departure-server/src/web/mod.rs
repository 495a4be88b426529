//! Web layer for the departure server.
//!
//! Requests under `/api/` are resolved through the API handler tree; every
//! other path is served from the static directory.

mod api;
mod routes;
mod state;

pub use api::{ApiError, Reply, api_handler, register_v1};
pub use routes::{ErrorResponse, create_router, first_values, split_path};
pub use state::AppState;
