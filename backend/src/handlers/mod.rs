//! HTTP handlers for the SkyAPI Weather Service

pub mod daily;
pub mod full;
pub mod hourly;
pub mod location;
pub mod realtime;

pub use daily::*;
pub use full::*;
pub use hourly::*;
pub use location::*;
pub use realtime::*;

use axum::http::HeaderMap;

use crate::error::{AppError, AppResult};

/// Client IP extraction: first X-Forwarded-For hop, falling back to
/// loopback when the header is absent (direct connections).
pub(crate) fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

/// Hourly endpoints require the client's local hour so results can be
/// restricted to upcoming hours.
pub(crate) fn current_hour(headers: &HeaderMap) -> AppResult<u8> {
    headers
        .get("x-current-hour")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u8>().ok())
        .filter(|hour| *hour <= 23)
        .ok_or_else(|| {
            AppError::ValidationError(
                "X-Current-Hour header is required and must be 0-23".to_string(),
            )
        })
}
