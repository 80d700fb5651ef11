//! Forecast reads and the reconciliation engine
//!
//! A client submits the complete forecast list it wants persisted for
//! one location; the engine diffs that list against the stored set by
//! time-unit key and turns the difference into inserts, updates and
//! deletes. Keys present in storage but absent from the submission are
//! removed; the engine never fabricates keys the client did not send.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use shared::models::{DailyForecast, ForecastEntry, HourlyForecast, Location};

use crate::error::{AppError, AppResult};
use crate::store::{ChangeSet, ForecastStore, LocationDirectory};

/// Per-location async locks serializing reconciliations for the same
/// location. Two racing calls would otherwise load overlapping
/// snapshots of the stored set and interleave their inserts/deletes.
/// Different locations proceed in parallel.
#[derive(Clone, Default)]
pub struct LocationLocks {
    inner: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl LocationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, code: &str) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            map.entry(code.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

/// Diff an incoming forecast list against the persisted entries.
///
/// Walks `incoming` in submission order, stamping each entry with the
/// owning location code. A key already persisted becomes an update
/// (value fields copied onto the stored entry, identity untouched); an
/// unseen key becomes an insert; persisted keys never claimed by the
/// walk become deletes. A key duplicated within `incoming` is resolved
/// last-occurrence-wins. Returns the change set together with the
/// merged list, ascending by key.
pub fn reconcile_entries<E: ForecastEntry>(
    location_code: &str,
    existing: Vec<E>,
    incoming: Vec<E>,
) -> (ChangeSet<E>, Vec<E>) {
    let mut unclaimed: BTreeMap<E::Key, E> =
        existing.into_iter().map(|e| (e.key(), e)).collect();
    let mut updates: BTreeMap<E::Key, E> = BTreeMap::new();
    let mut inserts: BTreeMap<E::Key, E> = BTreeMap::new();

    for mut entry in incoming {
        entry.set_location_code(location_code);
        let key = entry.key();

        if let Some(mut stored) = unclaimed.remove(&key) {
            stored.copy_values_from(&entry);
            updates.insert(key, stored);
        } else if let Some(claimed) = updates.get_mut(&key) {
            claimed.copy_values_from(&entry);
        } else {
            inserts.insert(key, entry);
        }
    }

    let changes = ChangeSet {
        delete_keys: unclaimed.into_keys().collect(),
        updates: updates.values().cloned().collect(),
        inserts: inserts.values().cloned().collect(),
    };

    let mut merged = updates;
    merged.extend(inserts);
    (changes, merged.into_values().collect())
}

/// Forecast service: reads plus the hourly/daily reconciliation entry
/// points.
#[derive(Clone)]
pub struct ForecastService {
    directory: Arc<dyn LocationDirectory>,
    store: Arc<dyn ForecastStore>,
    locks: LocationLocks,
}

impl ForecastService {
    pub fn new(
        directory: Arc<dyn LocationDirectory>,
        store: Arc<dyn ForecastStore>,
        locks: LocationLocks,
    ) -> Self {
        Self {
            directory,
            store,
            locks,
        }
    }

    async fn require_location(&self, code: &str) -> AppResult<Location> {
        self.directory
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::location_not_found(code))
    }

    /// Hourly entries for a location from `current_hour` onwards,
    /// ascending. An empty result means "no data yet", not an error.
    pub async fn hourly_by_location(
        &self,
        location: &Location,
        current_hour: u8,
    ) -> AppResult<Vec<HourlyForecast>> {
        let entries = self.store.load_hourly(&location.code).await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.hour_of_day >= current_hour)
            .collect())
    }

    pub async fn hourly_by_code(
        &self,
        code: &str,
        current_hour: u8,
    ) -> AppResult<(Location, Vec<HourlyForecast>)> {
        let location = self.require_location(code).await?;
        let entries = self.hourly_by_location(&location, current_hour).await?;
        Ok((location, entries))
    }

    pub async fn daily_by_location(&self, location: &Location) -> AppResult<Vec<DailyForecast>> {
        self.store.load_daily(&location.code).await
    }

    pub async fn daily_by_code(&self, code: &str) -> AppResult<(Location, Vec<DailyForecast>)> {
        let location = self.require_location(code).await?;
        let entries = self.daily_by_location(&location).await?;
        Ok((location, entries))
    }

    /// Replace a location's hourly forecast with the submitted list.
    pub async fn reconcile_hourly(
        &self,
        code: &str,
        incoming: Vec<HourlyForecast>,
    ) -> AppResult<(Location, Vec<HourlyForecast>)> {
        if incoming.is_empty() {
            return Err(AppError::EmptyForecastData);
        }

        let _guard = self.locks.acquire(code).await;
        let location = self.require_location(code).await?;

        let existing = self.store.load_hourly(&location.code).await?;
        let (changes, merged) = reconcile_entries(&location.code, existing, incoming);

        tracing::debug!(
            code = %location.code,
            inserts = changes.inserts.len(),
            updates = changes.updates.len(),
            deletes = changes.delete_keys.len(),
            "reconciling hourly forecast"
        );

        self.store.apply_hourly(&location.code, changes).await?;
        Ok((location, merged))
    }

    /// Replace a location's daily forecast with the submitted list.
    pub async fn reconcile_daily(
        &self,
        code: &str,
        incoming: Vec<DailyForecast>,
    ) -> AppResult<(Location, Vec<DailyForecast>)> {
        if incoming.is_empty() {
            return Err(AppError::EmptyForecastData);
        }

        let _guard = self.locks.acquire(code).await;
        let location = self.require_location(code).await?;

        let existing = self.store.load_daily(&location.code).await?;
        let (changes, merged) = reconcile_entries(&location.code, existing, incoming);

        tracing::debug!(
            code = %location.code,
            inserts = changes.inserts.len(),
            updates = changes.updates.len(),
            deletes = changes.delete_keys.len(),
            "reconciling daily forecast"
        );

        self.store.apply_daily(&location.code, changes).await?;
        Ok((location, merged))
    }
}
