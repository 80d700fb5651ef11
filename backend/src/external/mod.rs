//! External API integrations

pub mod geolocation;

pub use geolocation::{GeoIpClient, GeoIpResolver, GeoPlace};
