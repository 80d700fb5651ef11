//! Domain models for the SkyAPI Weather Service

mod forecast;
mod location;
mod realtime;

pub use forecast::*;
pub use location::*;
pub use realtime::*;
