//! HTTP handlers for daily forecast endpoints

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::models::{DailyForecast, Location};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::client_ip;
use crate::services::{ForecastService, GeolocationService};
use crate::AppState;

/// Daily forecast list for one location
#[derive(Debug, Serialize)]
pub struct DailyListResponse {
    pub location: String,
    pub daily_forecast: Vec<DailyForecast>,
}

fn list_response(location: &Location, entries: Vec<DailyForecast>) -> Response {
    if entries.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(DailyListResponse {
        location: location.to_string(),
        daily_forecast: entries,
    })
    .into_response()
}

fn validate_entries(entries: &[DailyForecast]) -> AppResult<()> {
    for entry in entries {
        entry.validate().map_err(|e| {
            AppError::ValidationError(format!(
                "day {}/{}: {}",
                entry.day_of_month, entry.month, e
            ))
        })?;
        if entry.min_temp > entry.max_temp {
            return Err(AppError::ValidationError(format!(
                "day {}/{}: min_temp exceeds max_temp",
                entry.day_of_month, entry.month
            )));
        }
    }
    Ok(())
}

/// Get daily forecast for the caller's IP-resolved location
pub async fn get_daily_by_ip(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let ip = client_ip(&headers);

    let location = GeolocationService::new(state.geo.clone(), state.directory.clone())
        .resolve(&ip)
        .await?;

    let service = ForecastService::new(state.directory, state.forecasts, state.locks);
    let entries = service.daily_by_location(&location).await?;
    Ok(list_response(&location, entries))
}

/// Get daily forecast for an explicit location code
pub async fn get_daily_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Response> {
    let service = ForecastService::new(state.directory, state.forecasts, state.locks);
    let (location, entries) = service.daily_by_code(&code).await?;
    Ok(list_response(&location, entries))
}

/// Bulk-replace the daily forecast for a location
pub async fn update_daily(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(entries): Json<Vec<DailyForecast>>,
) -> AppResult<Response> {
    validate_entries(&entries)?;

    let service = ForecastService::new(state.directory, state.forecasts, state.locks);
    let (location, merged) = service.reconcile_daily(&code, entries).await?;

    Ok(Json(DailyListResponse {
        location: location.to_string(),
        daily_forecast: merged,
    })
    .into_response())
}
