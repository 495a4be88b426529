use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use departure_server::config::ServerConfig;
use departure_server::library::StationLibrary;
use departure_server::provider::{RejseplanenClient, RejseplanenConfig, StubProvider};
use departure_server::web::{AppState, api_handler, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("departure_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // The API tree is built once here and shared read-only by all requests
    let api = match &config.base_url {
        Some(base_url) => {
            let client_config = RejseplanenConfig::new(base_url).with_timeout(config.timeout_secs);
            let client = RejseplanenClient::new(client_config, Handle::current())
                .expect("Failed to create Rejseplanen client");
            info!(%base_url, "using Rejseplanen provider");
            api_handler(Arc::new(StationLibrary::new(client, config.departure_order)))
        }
        None => {
            warn!("REJSEPLANEN_BASE_URL not set; serving bundled fixture data");
            let stub = StubProvider::new().expect("Failed to load fixture data");
            api_handler(Arc::new(StationLibrary::new(stub, config.departure_order)))
        }
    };

    let app = create_router(AppState::new(api), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!(
        addr = %config.bind_addr,
        static_dir = %config.static_dir.display(),
        order = ?config.departure_order,
        "departure server listening"
    );
    info!("  GET /health");
    info!("  GET /api/1.0/StationLibrary/findNearby?lat=&long=&radius=");
    info!("  GET /api/1.0/StationLibrary/stationFromName?name=");
    info!("  GET /api/1.0/StationLibrary/stationFromId/<id>");
    info!("  GET /api/1.0/StationLibrary/departures/<id>");

    axum::serve(listener, app).await.expect("Server error");
}
