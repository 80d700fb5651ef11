//! HTTP handlers for hourly forecast endpoints

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::models::{HourlyForecast, Location};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{client_ip, current_hour};
use crate::services::{ForecastService, GeolocationService};
use crate::AppState;

/// Hourly forecast list for one location
#[derive(Debug, Serialize)]
pub struct HourlyListResponse {
    pub location: String,
    pub hourly_forecast: Vec<HourlyForecast>,
}

fn list_response(location: &Location, entries: Vec<HourlyForecast>) -> Response {
    if entries.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(HourlyListResponse {
        location: location.to_string(),
        hourly_forecast: entries,
    })
    .into_response()
}

fn validate_entries(entries: &[HourlyForecast]) -> AppResult<()> {
    for entry in entries {
        entry.validate().map_err(|e| {
            AppError::ValidationError(format!("hour {}: {}", entry.hour_of_day, e))
        })?;
    }
    Ok(())
}

/// Get hourly forecast for the caller's IP-resolved location
pub async fn get_hourly_by_ip(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let hour = current_hour(&headers)?;
    let ip = client_ip(&headers);

    let location = GeolocationService::new(state.geo.clone(), state.directory.clone())
        .resolve(&ip)
        .await?;

    let service = ForecastService::new(state.directory, state.forecasts, state.locks);
    let entries = service.hourly_by_location(&location, hour).await?;
    Ok(list_response(&location, entries))
}

/// Get hourly forecast for an explicit location code
pub async fn get_hourly_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let hour = current_hour(&headers)?;

    let service = ForecastService::new(state.directory, state.forecasts, state.locks);
    let (location, entries) = service.hourly_by_code(&code, hour).await?;
    Ok(list_response(&location, entries))
}

/// Bulk-replace the hourly forecast for a location
pub async fn update_hourly(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(entries): Json<Vec<HourlyForecast>>,
) -> AppResult<Response> {
    validate_entries(&entries)?;

    let service = ForecastService::new(state.directory, state.forecasts, state.locks);
    let (location, merged) = service.reconcile_hourly(&code, entries).await?;

    Ok(Json(HourlyListResponse {
        location: location.to_string(),
        hourly_forecast: merged,
    })
    .into_response())
}
