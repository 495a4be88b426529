//! Application state for the web layer.

use std::sync::Arc;

use crate::dispatch::Handler;

use super::api::{ApiError, Reply};

/// Shared application state.
///
/// The API tree is built once before the server starts and only read
/// afterwards.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<Handler<Reply, ApiError>>,
}

impl AppState {
    pub fn new(api: Handler<Reply, ApiError>) -> Self {
        Self { api: Arc::new(api) }
    }
}
