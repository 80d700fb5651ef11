//! HTTP handlers for the aggregated "full weather" endpoint

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::error::AppResult;
use crate::handlers::client_ip;
use crate::services::full::FullWeather;
use crate::services::{FullWeatherService, GeolocationService, LocationService};
use crate::AppState;

/// Get full weather for the caller's IP-resolved location
pub async fn get_full_by_ip(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<FullWeather>> {
    let ip = client_ip(&headers);

    let location = GeolocationService::new(state.geo.clone(), state.directory.clone())
        .resolve(&ip)
        .await?;

    let service = FullWeatherService::new(state.forecasts, state.realtime);
    Ok(Json(service.get_full(&location).await?))
}

/// Get full weather for an explicit location code
pub async fn get_full_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<FullWeather>> {
    let location = LocationService::new(state.directory.clone()).get(&code).await?;

    let service = FullWeatherService::new(state.forecasts, state.realtime);
    Ok(Json(service.get_full(&location).await?))
}
