//! Realtime weather snapshot model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Current conditions for a location; at most one record per location,
/// replaced wholesale on update. `last_updated` is always assigned by
/// the server, never taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RealtimeSnapshot {
    #[serde(skip)]
    pub location_code: String,

    #[validate(range(min = -50, max = 50))]
    pub temperature: i16,

    #[validate(range(min = 0, max = 100))]
    pub humidity: u8,

    #[validate(range(min = 0, max = 100))]
    pub precipitation: u8,

    #[validate(range(min = 0, max = 200))]
    pub wind_speed: u16,

    #[validate(length(min = 3, max = 50))]
    pub status: String,

    // Server-assigned; a client-supplied value is accepted on input but
    // always overwritten before persisting.
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl PartialEq for RealtimeSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.location_code == other.location_code
    }
}

impl Eq for RealtimeSnapshot {}
