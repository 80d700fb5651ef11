//! Full-weather aggregation facade
//!
//! Composes the realtime snapshot with the hourly and daily forecast
//! reads into one response. Only a missing location is an error; absent
//! sub-data serializes as null/empty.

use std::sync::Arc;

use serde::Serialize;
use shared::models::{DailyForecast, HourlyForecast, Location, RealtimeSnapshot};

use crate::error::AppResult;
use crate::store::{ForecastStore, RealtimeStore};

/// Aggregated weather for one location
#[derive(Debug, Serialize)]
pub struct FullWeather {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_weather: Option<RealtimeSnapshot>,
    pub hourly_forecast: Vec<HourlyForecast>,
    pub daily_forecast: Vec<DailyForecast>,
}

#[derive(Clone)]
pub struct FullWeatherService {
    forecasts: Arc<dyn ForecastStore>,
    realtime: Arc<dyn RealtimeStore>,
}

impl FullWeatherService {
    pub fn new(forecasts: Arc<dyn ForecastStore>, realtime: Arc<dyn RealtimeStore>) -> Self {
        Self { forecasts, realtime }
    }

    pub async fn get_full(&self, location: &Location) -> AppResult<FullWeather> {
        let realtime = self.realtime.get(&location.code).await?;
        let hourly = self.forecasts.load_hourly(&location.code).await?;
        let daily = self.forecasts.load_daily(&location.code).await?;

        Ok(FullWeather {
            location: location.to_string(),
            realtime_weather: realtime,
            hourly_forecast: hourly,
            daily_forecast: daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ChangeSet, MemoryStore};

    #[tokio::test]
    async fn absent_sub_data_is_empty_not_an_error() {
        let store = Arc::new(MemoryStore::new());
        let location = Location::new("DELHI_IN", "Delhi", None, "India", "IN").enabled(true);

        let service = FullWeatherService::new(store.clone(), store);
        let full = service.get_full(&location).await.unwrap();

        assert!(full.realtime_weather.is_none());
        assert!(full.hourly_forecast.is_empty());
        assert!(full.daily_forecast.is_empty());
        assert_eq!(full.location, "Delhi, India");
    }

    #[tokio::test]
    async fn composes_all_three_reads() {
        let store = Arc::new(MemoryStore::new());
        let location = Location::new("DELHI_IN", "Delhi", None, "India", "IN").enabled(true);

        store
            .apply_hourly(
                "DELHI_IN",
                ChangeSet {
                    inserts: vec![HourlyForecast {
                        location_code: "DELHI_IN".to_string(),
                        hour_of_day: 10,
                        temperature: 30,
                        precipitation: 10,
                        status: "Sunny".to_string(),
                    }],
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let service = FullWeatherService::new(store.clone(), store);
        let full = service.get_full(&location).await.unwrap();
        assert_eq!(full.hourly_forecast.len(), 1);
    }
}
