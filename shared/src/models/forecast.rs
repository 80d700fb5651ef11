//! Hourly and daily forecast entries
//!
//! A forecast entry is identified by its location code plus a time unit
//! (hour of day, or day-of-month within a month). Two entries are equal
//! iff their composite keys are equal; the weather values carried by an
//! entry never participate in identity. The reconciliation engine relies
//! on this to diff a submitted list against the persisted set.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Common shape of hourly and daily entries, as seen by the
/// reconciliation engine: an ordered key, an owning location code, and
/// opaque value fields that can be copied onto a persisted entry.
pub trait ForecastEntry: Clone + Debug {
    /// Time-unit key, unique within one location's forecast list.
    type Key: Copy + Ord + Hash + Debug + Send;

    fn key(&self) -> Self::Key;
    fn location_code(&self) -> &str;
    fn set_location_code(&mut self, code: &str);

    /// Copy value fields from `other` onto `self`, leaving identity
    /// (location code + key) untouched.
    fn copy_values_from(&mut self, other: &Self);
}

/// One hourly weather record, keyed by hour of day within a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HourlyForecast {
    #[serde(skip)]
    pub location_code: String,

    #[validate(range(min = 0, max = 23))]
    pub hour_of_day: u8,

    #[validate(range(min = -50, max = 50))]
    pub temperature: i16,

    #[validate(range(min = 0, max = 100))]
    pub precipitation: u8,

    #[validate(length(min = 3, max = 50))]
    pub status: String,
}

impl ForecastEntry for HourlyForecast {
    type Key = u8;

    fn key(&self) -> u8 {
        self.hour_of_day
    }

    fn location_code(&self) -> &str {
        &self.location_code
    }

    fn set_location_code(&mut self, code: &str) {
        self.location_code = code.to_string();
    }

    fn copy_values_from(&mut self, other: &Self) {
        self.temperature = other.temperature;
        self.precipitation = other.precipitation;
        self.status = other.status.clone();
    }
}

impl PartialEq for HourlyForecast {
    fn eq(&self, other: &Self) -> bool {
        self.location_code == other.location_code && self.hour_of_day == other.hour_of_day
    }
}

impl Eq for HourlyForecast {}

/// Composite time-unit key for daily entries, ordered month-major so
/// ascending key order matches calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfMonth {
    pub month: u8,
    pub day_of_month: u8,
}

/// One daily weather record, keyed by (month, day of month)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DailyForecast {
    #[serde(skip)]
    pub location_code: String,

    #[validate(range(min = 1, max = 31))]
    pub day_of_month: u8,

    #[validate(range(min = 1, max = 12))]
    pub month: u8,

    #[validate(range(min = -50, max = 50))]
    pub min_temp: i16,

    #[validate(range(min = -50, max = 50))]
    pub max_temp: i16,

    #[validate(range(min = 0, max = 100))]
    pub precipitation: u8,

    #[validate(length(min = 3, max = 50))]
    pub status: String,
}

impl ForecastEntry for DailyForecast {
    type Key = DayOfMonth;

    fn key(&self) -> DayOfMonth {
        DayOfMonth {
            month: self.month,
            day_of_month: self.day_of_month,
        }
    }

    fn location_code(&self) -> &str {
        &self.location_code
    }

    fn set_location_code(&mut self, code: &str) {
        self.location_code = code.to_string();
    }

    fn copy_values_from(&mut self, other: &Self) {
        self.min_temp = other.min_temp;
        self.max_temp = other.max_temp;
        self.precipitation = other.precipitation;
        self.status = other.status.clone();
    }
}

impl PartialEq for DailyForecast {
    fn eq(&self, other: &Self) -> bool {
        self.location_code == other.location_code && self.key() == other.key()
    }
}

impl Eq for DailyForecast {}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(hour: u8, temp: i16) -> HourlyForecast {
        HourlyForecast {
            location_code: "NYC_USA".to_string(),
            hour_of_day: hour,
            temperature: temp,
            precipitation: 40,
            status: "Cloudy".to_string(),
        }
    }

    #[test]
    fn hourly_equality_ignores_values() {
        assert_eq!(hourly(10, 13), hourly(10, 25));
        assert_ne!(hourly(10, 13), hourly(11, 13));
    }

    #[test]
    fn copy_values_preserves_identity() {
        let mut stored = hourly(10, 13);
        let incoming = hourly(10, 21);
        stored.copy_values_from(&incoming);
        assert_eq!(stored.hour_of_day, 10);
        assert_eq!(stored.location_code, "NYC_USA");
        assert_eq!(stored.temperature, 21);
    }

    #[test]
    fn daily_keys_order_month_major() {
        let jan_31 = DayOfMonth {
            month: 1,
            day_of_month: 31,
        };
        let feb_1 = DayOfMonth {
            month: 2,
            day_of_month: 1,
        };
        assert!(jan_31 < feb_1);
    }

    #[test]
    fn hourly_validation_rejects_out_of_range() {
        use validator::Validate;

        let mut entry = hourly(10, 13);
        assert!(entry.validate().is_ok());

        entry.hour_of_day = 24;
        assert!(entry.validate().is_err());

        entry.hour_of_day = 10;
        entry.temperature = 60;
        assert!(entry.validate().is_err());
    }
}
