//! Shared types and models for the SkyAPI Weather Service
//!
//! This crate contains the domain model shared between the backend
//! service and any future client components.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
