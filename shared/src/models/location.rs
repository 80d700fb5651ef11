//! Location model
//!
//! A location is a city-level place the system serves weather for,
//! identified by a short unique code (e.g. `NYC_USA`). Identity is the
//! code alone; field values never participate in equality.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A served location keyed by a short unique code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(length(min = 3, max = 12))]
    pub code: String,

    #[validate(length(min = 1, max = 128))]
    pub city_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub country_name: String,

    #[validate(length(equal = 2))]
    pub country_code: String,

    #[serde(default)]
    pub enabled: bool,

    // Soft-delete marker; trashed rows are invisible to every read path
    #[serde(skip)]
    pub trashed: bool,
}

impl Location {
    pub fn new(
        code: impl Into<String>,
        city_name: impl Into<String>,
        region_name: Option<String>,
        country_name: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            city_name: city_name.into(),
            region_name,
            country_name: country_name.into(),
            country_code: country_code.into(),
            enabled: false,
            trashed: false,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Location {}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region_name {
            Some(region) => write!(f, "{}, {}, {}", self.city_name, region, self.country_name),
            None => write!(f, "{}, {}", self.city_name, self.country_name),
        }
    }
}
