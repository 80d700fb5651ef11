//! PostgreSQL-backed storage
//!
//! Runtime `query_as` strings against the schema in `migrations/`.
//! Forecast change sets are applied inside a single transaction so a
//! failed reconciliation never leaves a partially mutated set behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use shared::models::{DailyForecast, DayOfMonth, HourlyForecast, Location, RealtimeSnapshot};

use crate::error::{AppError, AppResult};
use crate::store::{ChangeSet, ForecastStore, LocationDirectory, RealtimeStore};

/// PostgreSQL implementation of all storage ports
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct LocationRow {
    code: String,
    city_name: String,
    region_name: Option<String>,
    country_name: String,
    country_code: String,
    enabled: bool,
    trashed: bool,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            code: row.code,
            city_name: row.city_name,
            region_name: row.region_name,
            country_name: row.country_name,
            country_code: row.country_code,
            enabled: row.enabled,
            trashed: row.trashed,
        }
    }
}

#[derive(FromRow)]
struct HourlyRow {
    location_code: String,
    hour_of_day: i16,
    temperature: i16,
    precipitation: i16,
    status: String,
}

impl From<HourlyRow> for HourlyForecast {
    fn from(row: HourlyRow) -> Self {
        HourlyForecast {
            location_code: row.location_code,
            hour_of_day: row.hour_of_day as u8,
            temperature: row.temperature,
            precipitation: row.precipitation as u8,
            status: row.status,
        }
    }
}

#[derive(FromRow)]
struct DailyRow {
    location_code: String,
    day_of_month: i16,
    month: i16,
    min_temp: i16,
    max_temp: i16,
    precipitation: i16,
    status: String,
}

impl From<DailyRow> for DailyForecast {
    fn from(row: DailyRow) -> Self {
        DailyForecast {
            location_code: row.location_code,
            day_of_month: row.day_of_month as u8,
            month: row.month as u8,
            min_temp: row.min_temp,
            max_temp: row.max_temp,
            precipitation: row.precipitation as u8,
            status: row.status,
        }
    }
}

#[derive(FromRow)]
struct RealtimeRow {
    location_code: String,
    temperature: i16,
    humidity: i16,
    precipitation: i16,
    wind_speed: i16,
    status: String,
    last_updated: DateTime<Utc>,
}

impl From<RealtimeRow> for RealtimeSnapshot {
    fn from(row: RealtimeRow) -> Self {
        RealtimeSnapshot {
            location_code: row.location_code,
            temperature: row.temperature,
            humidity: row.humidity as u8,
            precipitation: row.precipitation as u8,
            wind_speed: row.wind_speed as u16,
            status: row.status,
            last_updated: row.last_updated,
        }
    }
}

#[async_trait]
impl LocationDirectory for PgStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Location>> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT code, city_name, region_name, country_name, country_code, enabled, trashed
            FROM locations
            WHERE code = $1 AND NOT trashed
            "#,
        )
        .bind(code)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Location::from))
    }

    async fn find_by_city_and_country(
        &self,
        city_name: &str,
        country_code: &str,
    ) -> AppResult<Option<Location>> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT code, city_name, region_name, country_name, country_code, enabled, trashed
            FROM locations
            WHERE city_name = $1 AND country_code = $2 AND enabled AND NOT trashed
            "#,
        )
        .bind(city_name)
        .bind(country_code)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Location::from))
    }

    async fn list(&self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT code, city_name, region_name, country_name, country_code, enabled, trashed
            FROM locations
            WHERE NOT trashed
            ORDER BY code
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    async fn insert(&self, location: &Location) -> AppResult<Location> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            INSERT INTO locations (code, city_name, region_name, country_name, country_code, enabled)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (code) DO NOTHING
            RETURNING code, city_name, region_name, country_name, country_code, enabled, trashed
            "#,
        )
        .bind(&location.code)
        .bind(&location.city_name)
        .bind(&location.region_name)
        .bind(&location.country_name)
        .bind(&location.country_code)
        .bind(location.enabled)
        .fetch_optional(&self.db)
        .await?;

        // RETURNING yields no row when the code is already taken
        row.map(Into::into)
            .ok_or_else(|| AppError::DuplicateEntry("code".to_string()))
    }

    async fn update(&self, location: &Location) -> AppResult<Location> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            UPDATE locations
            SET city_name = $2, region_name = $3, country_name = $4, country_code = $5, enabled = $6
            WHERE code = $1 AND NOT trashed
            RETURNING code, city_name, region_name, country_name, country_code, enabled, trashed
            "#,
        )
        .bind(&location.code)
        .bind(&location.city_name)
        .bind(&location.region_name)
        .bind(&location.country_name)
        .bind(&location.country_code)
        .bind(location.enabled)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::location_not_found(&location.code))?;

        Ok(row.into())
    }

    async fn trash(&self, code: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE locations SET trashed = TRUE WHERE code = $1 AND NOT trashed")
            .bind(code)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::location_not_found(code));
        }

        Ok(())
    }
}

#[async_trait]
impl ForecastStore for PgStore {
    async fn load_hourly(&self, location_code: &str) -> AppResult<Vec<HourlyForecast>> {
        let rows = sqlx::query_as::<_, HourlyRow>(
            r#"
            SELECT location_code, hour_of_day, temperature, precipitation, status
            FROM weather_hourly
            WHERE location_code = $1
            ORDER BY hour_of_day
            "#,
        )
        .bind(location_code)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(HourlyForecast::from).collect())
    }

    async fn load_daily(&self, location_code: &str) -> AppResult<Vec<DailyForecast>> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT location_code, day_of_month, month, min_temp, max_temp, precipitation, status
            FROM weather_daily
            WHERE location_code = $1
            ORDER BY month, day_of_month
            "#,
        )
        .bind(location_code)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(DailyForecast::from).collect())
    }

    async fn apply_hourly(
        &self,
        location_code: &str,
        changes: ChangeSet<HourlyForecast>,
    ) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        for hour in &changes.delete_keys {
            sqlx::query("DELETE FROM weather_hourly WHERE location_code = $1 AND hour_of_day = $2")
                .bind(location_code)
                .bind(*hour as i16)
                .execute(&mut *tx)
                .await?;
        }

        for entry in &changes.updates {
            sqlx::query(
                r#"
                UPDATE weather_hourly
                SET temperature = $3, precipitation = $4, status = $5
                WHERE location_code = $1 AND hour_of_day = $2
                "#,
            )
            .bind(location_code)
            .bind(entry.hour_of_day as i16)
            .bind(entry.temperature)
            .bind(entry.precipitation as i16)
            .bind(&entry.status)
            .execute(&mut *tx)
            .await?;
        }

        for entry in &changes.inserts {
            sqlx::query(
                r#"
                INSERT INTO weather_hourly (location_code, hour_of_day, temperature, precipitation, status)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(location_code)
            .bind(entry.hour_of_day as i16)
            .bind(entry.temperature)
            .bind(entry.precipitation as i16)
            .bind(&entry.status)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn apply_daily(
        &self,
        location_code: &str,
        changes: ChangeSet<DailyForecast>,
    ) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        for DayOfMonth { month, day_of_month } in &changes.delete_keys {
            sqlx::query(
                "DELETE FROM weather_daily WHERE location_code = $1 AND month = $2 AND day_of_month = $3",
            )
            .bind(location_code)
            .bind(*month as i16)
            .bind(*day_of_month as i16)
            .execute(&mut *tx)
            .await?;
        }

        for entry in &changes.updates {
            sqlx::query(
                r#"
                UPDATE weather_daily
                SET min_temp = $4, max_temp = $5, precipitation = $6, status = $7
                WHERE location_code = $1 AND month = $2 AND day_of_month = $3
                "#,
            )
            .bind(location_code)
            .bind(entry.month as i16)
            .bind(entry.day_of_month as i16)
            .bind(entry.min_temp)
            .bind(entry.max_temp)
            .bind(entry.precipitation as i16)
            .bind(&entry.status)
            .execute(&mut *tx)
            .await?;
        }

        for entry in &changes.inserts {
            sqlx::query(
                r#"
                INSERT INTO weather_daily
                    (location_code, day_of_month, month, min_temp, max_temp, precipitation, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(location_code)
            .bind(entry.day_of_month as i16)
            .bind(entry.month as i16)
            .bind(entry.min_temp)
            .bind(entry.max_temp)
            .bind(entry.precipitation as i16)
            .bind(&entry.status)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl RealtimeStore for PgStore {
    async fn get(&self, location_code: &str) -> AppResult<Option<RealtimeSnapshot>> {
        let row = sqlx::query_as::<_, RealtimeRow>(
            r#"
            SELECT location_code, temperature, humidity, precipitation, wind_speed, status, last_updated
            FROM realtime_weather
            WHERE location_code = $1
            "#,
        )
        .bind(location_code)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(RealtimeSnapshot::from))
    }

    async fn put(&self, snapshot: &RealtimeSnapshot) -> AppResult<RealtimeSnapshot> {
        let row = sqlx::query_as::<_, RealtimeRow>(
            r#"
            INSERT INTO realtime_weather
                (location_code, temperature, humidity, precipitation, wind_speed, status, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (location_code) DO UPDATE
            SET temperature = $2, humidity = $3, precipitation = $4,
                wind_speed = $5, status = $6, last_updated = $7
            RETURNING location_code, temperature, humidity, precipitation, wind_speed, status, last_updated
            "#,
        )
        .bind(&snapshot.location_code)
        .bind(snapshot.temperature)
        .bind(snapshot.humidity as i16)
        .bind(snapshot.precipitation as i16)
        .bind(snapshot.wind_speed as i16)
        .bind(&snapshot.status)
        .bind(snapshot.last_updated)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}
