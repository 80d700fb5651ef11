//! Realtime weather snapshot service
//!
//! One current-conditions record per location, replaced wholesale on
//! update. No reconciliation: cardinality is always zero-or-one.

use std::sync::Arc;

use chrono::Utc;
use shared::models::{Location, RealtimeSnapshot};

use crate::error::{AppError, AppResult};
use crate::store::{LocationDirectory, RealtimeStore};

#[derive(Clone)]
pub struct RealtimeService {
    directory: Arc<dyn LocationDirectory>,
    store: Arc<dyn RealtimeStore>,
}

impl RealtimeService {
    pub fn new(directory: Arc<dyn LocationDirectory>, store: Arc<dyn RealtimeStore>) -> Self {
        Self { directory, store }
    }

    async fn require_location(&self, code: &str) -> AppResult<Location> {
        self.directory
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::location_not_found(code))
    }

    pub async fn by_location(&self, location: &Location) -> AppResult<RealtimeSnapshot> {
        self.store.get(&location.code).await?.ok_or_else(|| {
            AppError::NotFound(format!("Realtime weather for location {}", location.code))
        })
    }

    pub async fn by_code(&self, code: &str) -> AppResult<(Location, RealtimeSnapshot)> {
        let location = self.require_location(code).await?;
        let snapshot = self.by_location(&location).await?;
        Ok((location, snapshot))
    }

    /// Wholesale replace of the snapshot. `last_updated` is stamped
    /// with the server clock, overriding any client-supplied value.
    pub async fn update(
        &self,
        code: &str,
        mut snapshot: RealtimeSnapshot,
    ) -> AppResult<(Location, RealtimeSnapshot)> {
        let location = self.require_location(code).await?;

        snapshot.location_code = location.code.clone();
        snapshot.last_updated = Utc::now();

        let stored = self.store.put(&snapshot).await?;
        Ok((location, stored))
    }
}
