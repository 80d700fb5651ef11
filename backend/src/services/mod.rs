//! Business logic services for the SkyAPI Weather Service

pub mod forecast;
pub mod full;
pub mod geolocation;
pub mod location;
pub mod realtime;

pub use forecast::{ForecastService, LocationLocks};
pub use full::FullWeatherService;
pub use geolocation::GeolocationService;
pub use location::LocationService;
pub use realtime::RealtimeService;
