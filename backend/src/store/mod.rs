//! Storage ports for the weather service
//!
//! The business-logic services talk to storage only through these
//! traits. `PgStore` backs them in production; `MemoryStore` backs the
//! test suites and keeps the reconciliation engine runnable without a
//! database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use shared::models::{DailyForecast, ForecastEntry, HourlyForecast, Location, RealtimeSnapshot};

use crate::error::AppResult;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Outcome of reconciling an incoming forecast list against the
/// persisted set. Applied by a `ForecastStore` as one atomic unit:
/// either all inserts, updates and deletes commit, or none do.
#[derive(Debug, Clone)]
pub struct ChangeSet<E: ForecastEntry> {
    pub inserts: Vec<E>,
    pub updates: Vec<E>,
    pub delete_keys: Vec<E::Key>,
}

impl<E: ForecastEntry> Default for ChangeSet<E> {
    fn default() -> Self {
        Self {
            inserts: Vec::new(),
            updates: Vec::new(),
            delete_keys: Vec::new(),
        }
    }
}

impl<E: ForecastEntry> ChangeSet<E> {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.delete_keys.is_empty()
    }
}

/// Authoritative directory of served locations, keyed by code.
///
/// Read operations never return a trashed location; soft-deleted rows
/// are logically absent to every other component.
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Location>>;

    /// Lookup used by the geolocation resolver: enabled, non-trashed
    /// locations only.
    async fn find_by_city_and_country(
        &self,
        city_name: &str,
        country_code: &str,
    ) -> AppResult<Option<Location>>;

    async fn list(&self) -> AppResult<Vec<Location>>;

    async fn insert(&self, location: &Location) -> AppResult<Location>;

    /// Update the field values of an existing location; identity (the
    /// code) is immutable.
    async fn update(&self, location: &Location) -> AppResult<Location>;

    /// Soft-delete: mark the location trashed without removing rows.
    async fn trash(&self, code: &str) -> AppResult<()>;
}

/// Per-location ordered collections of hourly and daily entries.
#[async_trait]
pub trait ForecastStore: Send + Sync {
    /// All hourly entries for a location, ascending by hour of day.
    async fn load_hourly(&self, location_code: &str) -> AppResult<Vec<HourlyForecast>>;

    /// All daily entries for a location, ascending by (month, day).
    async fn load_daily(&self, location_code: &str) -> AppResult<Vec<DailyForecast>>;

    /// Apply a reconciliation outcome atomically.
    async fn apply_hourly(
        &self,
        location_code: &str,
        changes: ChangeSet<HourlyForecast>,
    ) -> AppResult<()>;

    /// Apply a reconciliation outcome atomically.
    async fn apply_daily(
        &self,
        location_code: &str,
        changes: ChangeSet<DailyForecast>,
    ) -> AppResult<()>;
}

/// Single current-conditions record per location.
#[async_trait]
pub trait RealtimeStore: Send + Sync {
    async fn get(&self, location_code: &str) -> AppResult<Option<RealtimeSnapshot>>;

    /// Wholesale replace (insert-or-update) of the snapshot.
    async fn put(&self, snapshot: &RealtimeSnapshot) -> AppResult<RealtimeSnapshot>;
}
