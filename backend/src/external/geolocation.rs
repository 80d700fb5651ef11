//! IP geolocation client
//!
//! Resolves a client IP to a coarse (city, country code) pair via an
//! ip-api.com style JSON endpoint. The provider only yields coarse
//! geography; the location directory remains the source of truth for
//! whether that geography maps to a served location.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Port for IP-to-place resolution; stubbed out in tests.
#[async_trait]
pub trait GeoIpResolver: Send + Sync {
    async fn lookup(&self, ip: &str) -> AppResult<GeoPlace>;
}

/// Coarse place returned by the geolocation provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoPlace {
    pub city_name: String,
    pub country_code: String,
}

/// Geolocation API client
#[derive(Clone)]
pub struct GeoIpClient {
    client: Client,
    base_url: String,
}

/// Provider response; `status` is "success" or "fail", with `message`
/// populated on failure.
#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(rename = "countryCode", default)]
    country_code: Option<String>,
}

impl GeoIpClient {
    /// Create a new GeoIpClient against the given provider endpoint
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("geolocation client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> AppResult<Self> {
        Self::new(base_url, Duration::from_secs(5))
    }
}

#[async_trait]
impl GeoIpResolver for GeoIpClient {
    async fn lookup(&self, ip: &str) -> AppResult<GeoPlace> {
        // Reject garbage before spending a network round trip on it.
        ip.parse::<IpAddr>()
            .map_err(|_| AppError::Geolocation(format!("invalid IP address: {}", ip)))?;

        let url = format!(
            "{}/json/{}?fields=status,message,city,countryCode",
            self.base_url, ip
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Geolocation(format!("provider request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Geolocation(format!(
                "provider returned {}",
                status
            )));
        }

        let data: GeoResponse = response
            .json()
            .await
            .map_err(|e| AppError::Geolocation(format!("unreadable provider response: {}", e)))?;

        if data.status != "success" {
            let message = data.message.unwrap_or_else(|| "lookup failed".to_string());
            return Err(AppError::Geolocation(message));
        }

        match (data.city, data.country_code) {
            (Some(city_name), Some(country_code)) if !city_name.is_empty() => Ok(GeoPlace {
                city_name,
                country_code,
            }),
            _ => Err(AppError::Geolocation(
                "provider response missing city or country".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_ip_fails_before_any_request() {
        // Unroutable base URL: a network call would error differently.
        let client = GeoIpClient::with_base_url("http://127.0.0.1:1".to_string()).unwrap();

        let err = client.lookup("not-an-ip").await.unwrap_err();
        match err {
            AppError::Geolocation(msg) => assert!(msg.contains("invalid IP address")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
