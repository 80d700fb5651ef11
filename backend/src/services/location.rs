//! Location directory administration
//!
//! Create/list/edit locations and soft-delete them. Trashed locations
//! stay in storage but are invisible to every read path, including the
//! geolocation resolver.

use std::sync::Arc;

use shared::models::Location;
use shared::validation::{validate_country_code, validate_location_code};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::LocationDirectory;

#[derive(Clone)]
pub struct LocationService {
    directory: Arc<dyn LocationDirectory>,
}

impl LocationService {
    pub fn new(directory: Arc<dyn LocationDirectory>) -> Self {
        Self { directory }
    }

    fn validate(location: &Location) -> AppResult<()> {
        location
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        validate_location_code(&location.code).map_err(|msg| AppError::Validation {
            field: "code".to_string(),
            message: msg.to_string(),
        })?;
        validate_country_code(&location.country_code).map_err(|msg| AppError::Validation {
            field: "country_code".to_string(),
            message: msg.to_string(),
        })?;
        Ok(())
    }

    pub async fn add(&self, location: Location) -> AppResult<Location> {
        Self::validate(&location)?;
        self.directory.insert(&location).await
    }

    pub async fn list(&self) -> AppResult<Vec<Location>> {
        self.directory.list().await
    }

    pub async fn get(&self, code: &str) -> AppResult<Location> {
        self.directory
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::location_not_found(code))
    }

    /// Replace the editable fields of an existing location. The code in
    /// the path wins over anything in the body; identity never changes.
    pub async fn update(&self, code: &str, mut location: Location) -> AppResult<Location> {
        location.code = code.to_string();
        Self::validate(&location)?;

        // Existence check first so an unknown code is a 404, not a 400.
        self.get(code).await?;
        self.directory.update(&location).await
    }

    pub async fn trash(&self, code: &str) -> AppResult<()> {
        self.directory.trash(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> LocationService {
        LocationService::new(Arc::new(MemoryStore::new()))
    }

    fn delhi() -> Location {
        Location::new("DELHI_IN", "Delhi", None, "India", "IN").enabled(true)
    }

    #[tokio::test]
    async fn add_then_get_round_trips() {
        let service = service();
        service.add(delhi()).await.unwrap();

        let found = service.get("DELHI_IN").await.unwrap();
        assert_eq!(found.city_name, "Delhi");
    }

    #[tokio::test]
    async fn add_rejects_malformed_code() {
        let err = service()
            .add(Location::new("delhi", "Delhi", None, "India", "IN"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn update_ignores_code_in_body() {
        let service = service();
        service.add(delhi()).await.unwrap();

        let mut edited = delhi();
        edited.code = "OTHER_IN".to_string();
        edited.city_name = "New Delhi".to_string();

        let updated = service.update("DELHI_IN", edited).await.unwrap();
        assert_eq!(updated.code, "DELHI_IN");
        assert_eq!(updated.city_name, "New Delhi");
    }

    #[tokio::test]
    async fn trash_hides_location_from_get() {
        let service = service();
        service.add(delhi()).await.unwrap();
        service.trash("DELHI_IN").await.unwrap();

        assert!(matches!(
            service.get("DELHI_IN").await,
            Err(AppError::NotFound(_))
        ));
    }
}
