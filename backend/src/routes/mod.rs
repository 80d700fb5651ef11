//! Route definitions for the SkyAPI Weather Service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes (mounted under /v1)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/locations", location_routes())
        .nest("/realtime", realtime_routes())
        .nest("/hourly", hourly_routes())
        .nest("/daily", daily_routes())
        .nest("/full", full_routes())
}

/// Location administration
fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_locations).post(handlers::add_location),
        )
        .route(
            "/:code",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
}

/// Realtime weather, by IP and by code
fn realtime_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_realtime_by_ip))
        .route(
            "/:code",
            get(handlers::get_realtime_by_code).put(handlers::update_realtime),
        )
}

/// Hourly forecasts; reads require the X-Current-Hour header
fn hourly_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_hourly_by_ip))
        .route(
            "/:code",
            get(handlers::get_hourly_by_code).put(handlers::update_hourly),
        )
}

/// Daily forecasts
fn daily_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_daily_by_ip))
        .route(
            "/:code",
            get(handlers::get_daily_by_code).put(handlers::update_daily),
        )
}

/// Aggregated full weather
fn full_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_full_by_ip))
        .route("/:code", get(handlers::get_full_by_code))
}
