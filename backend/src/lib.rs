//! SkyAPI Weather Service - backend library
//!
//! Serves realtime, hourly, daily and aggregated weather for locations
//! resolved either by explicit code or by the caller's IP address, and
//! lets clients bulk-replace a location's forecast through key-based
//! reconciliation.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use external::GeoIpResolver;
use services::LocationLocks;
use store::{ForecastStore, LocationDirectory, RealtimeStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn LocationDirectory>,
    pub forecasts: Arc<dyn ForecastStore>,
    pub realtime: Arc<dyn RealtimeStore>,
    pub geo: Arc<dyn GeoIpResolver>,
    pub locks: LocationLocks,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn LocationDirectory>,
        forecasts: Arc<dyn ForecastStore>,
        realtime: Arc<dyn RealtimeStore>,
        geo: Arc<dyn GeoIpResolver>,
    ) -> Self {
        Self {
            directory,
            forecasts,
            realtime,
            geo,
            locks: LocationLocks::new(),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint: entry-point map for API discovery
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "locations_url": "/v1/locations",
        "location_by_code_url": "/v1/locations/{code}",
        "realtime_weather_by_ip_url": "/v1/realtime",
        "realtime_weather_by_code_url": "/v1/realtime/{code}",
        "hourly_forecast_by_ip_url": "/v1/hourly",
        "hourly_forecast_by_code_url": "/v1/hourly/{code}",
        "daily_forecast_by_ip_url": "/v1/daily",
        "daily_forecast_by_code_url": "/v1/daily/{code}",
        "full_weather_by_ip_url": "/v1/full",
        "full_weather_by_code_url": "/v1/full/{code}",
    }))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
