//! Geolocation resolver
//!
//! Turns a client IP into a served location: the external provider
//! yields a coarse (city, country) pair, and the directory decides
//! whether that pair maps to an enabled location. Provider failures are
//! client-correctable and never retried here.

use std::sync::Arc;

use shared::models::Location;

use crate::error::{AppError, AppResult};
use crate::external::GeoIpResolver;
use crate::store::LocationDirectory;

#[derive(Clone)]
pub struct GeolocationService {
    geo: Arc<dyn GeoIpResolver>,
    directory: Arc<dyn LocationDirectory>,
}

impl GeolocationService {
    pub fn new(geo: Arc<dyn GeoIpResolver>, directory: Arc<dyn LocationDirectory>) -> Self {
        Self { geo, directory }
    }

    /// Resolve a client IP to an enabled, non-trashed location.
    ///
    /// A provider failure surfaces as a geolocation error (400); a pair
    /// the directory does not serve surfaces as not-found (404).
    pub async fn resolve(&self, ip: &str) -> AppResult<Location> {
        let place = self.geo.lookup(ip).await?;

        tracing::debug!(ip, city = %place.city_name, country = %place.country_code, "resolved IP");

        self.directory
            .find_by_city_and_country(&place.city_name, &place.country_code)
            .await?
            .ok_or_else(|| {
                AppError::location_not_found(format!(
                    "for {}, {}",
                    place.city_name, place.country_code
                ))
            })
    }
}
