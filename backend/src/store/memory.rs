//! In-memory storage
//!
//! Backs the test suites and mirrors the Postgres semantics: soft
//! deletes stay invisible to reads, change sets apply atomically under
//! one lock, and forecast collections keep ascending key order.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::models::{DailyForecast, DayOfMonth, ForecastEntry, HourlyForecast, Location, RealtimeSnapshot};

use crate::error::{AppError, AppResult};
use crate::store::{ChangeSet, ForecastStore, LocationDirectory, RealtimeStore};

#[derive(Default)]
struct MemoryInner {
    locations: HashMap<String, Location>,
    hourly: HashMap<String, BTreeMap<u8, HourlyForecast>>,
    daily: HashMap<String, BTreeMap<DayOfMonth, DailyForecast>>,
    realtime: HashMap<String, RealtimeSnapshot>,
}

/// In-memory implementation of all storage ports
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned lock means a test panicked mid-write; the data is
        // still usable for the remaining assertions.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn apply_changes<E: ForecastEntry>(
    map: &mut BTreeMap<E::Key, E>,
    changes: ChangeSet<E>,
) {
    for key in changes.delete_keys {
        map.remove(&key);
    }
    for entry in changes.updates {
        if let Some(stored) = map.get_mut(&entry.key()) {
            stored.copy_values_from(&entry);
        }
    }
    for entry in changes.inserts {
        map.insert(entry.key(), entry);
    }
}

#[async_trait]
impl LocationDirectory for MemoryStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Location>> {
        let inner = self.lock();
        Ok(inner.locations.get(code).filter(|l| !l.trashed).cloned())
    }

    async fn find_by_city_and_country(
        &self,
        city_name: &str,
        country_code: &str,
    ) -> AppResult<Option<Location>> {
        let inner = self.lock();
        Ok(inner
            .locations
            .values()
            .find(|l| {
                l.enabled
                    && !l.trashed
                    && l.city_name == city_name
                    && l.country_code == country_code
            })
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Location>> {
        let inner = self.lock();
        let mut locations: Vec<Location> = inner
            .locations
            .values()
            .filter(|l| !l.trashed)
            .cloned()
            .collect();
        locations.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(locations)
    }

    async fn insert(&self, location: &Location) -> AppResult<Location> {
        let mut inner = self.lock();
        if inner.locations.contains_key(&location.code) {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }
        inner
            .locations
            .insert(location.code.clone(), location.clone());
        Ok(location.clone())
    }

    async fn update(&self, location: &Location) -> AppResult<Location> {
        let mut inner = self.lock();
        match inner.locations.get_mut(&location.code) {
            Some(stored) if !stored.trashed => {
                stored.city_name = location.city_name.clone();
                stored.region_name = location.region_name.clone();
                stored.country_name = location.country_name.clone();
                stored.country_code = location.country_code.clone();
                stored.enabled = location.enabled;
                Ok(stored.clone())
            }
            _ => Err(AppError::location_not_found(&location.code)),
        }
    }

    async fn trash(&self, code: &str) -> AppResult<()> {
        let mut inner = self.lock();
        match inner.locations.get_mut(code) {
            Some(stored) if !stored.trashed => {
                stored.trashed = true;
                Ok(())
            }
            _ => Err(AppError::location_not_found(code)),
        }
    }
}

#[async_trait]
impl ForecastStore for MemoryStore {
    async fn load_hourly(&self, location_code: &str) -> AppResult<Vec<HourlyForecast>> {
        let inner = self.lock();
        Ok(inner
            .hourly
            .get(location_code)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn load_daily(&self, location_code: &str) -> AppResult<Vec<DailyForecast>> {
        let inner = self.lock();
        Ok(inner
            .daily
            .get(location_code)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn apply_hourly(
        &self,
        location_code: &str,
        changes: ChangeSet<HourlyForecast>,
    ) -> AppResult<()> {
        let mut inner = self.lock();
        let map = inner.hourly.entry(location_code.to_string()).or_default();
        apply_changes(map, changes);
        Ok(())
    }

    async fn apply_daily(
        &self,
        location_code: &str,
        changes: ChangeSet<DailyForecast>,
    ) -> AppResult<()> {
        let mut inner = self.lock();
        let map = inner.daily.entry(location_code.to_string()).or_default();
        apply_changes(map, changes);
        Ok(())
    }
}

#[async_trait]
impl RealtimeStore for MemoryStore {
    async fn get(&self, location_code: &str) -> AppResult<Option<RealtimeSnapshot>> {
        let inner = self.lock();
        Ok(inner.realtime.get(location_code).cloned())
    }

    async fn put(&self, snapshot: &RealtimeSnapshot) -> AppResult<RealtimeSnapshot> {
        let mut inner = self.lock();
        inner
            .realtime
            .insert(snapshot.location_code.clone(), snapshot.clone());
        Ok(snapshot.clone())
    }
}
