//! Core library for the AirSense backend.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - AQI categorisation and concentration conversion
//! - The data-source gateway (live provider + simulated fallback)
//! - Synthetic hourly/weekly forecast generation
//! - The AI advisory client
//!
//! It is used by `airsense-server`, but can also be reused by other binaries or services.

pub mod advisor;
pub mod aqi;
pub mod config;
pub mod forecast;
pub mod model;
pub mod provider;

pub use advisor::Advisor;
pub use aqi::{Band, Pollutant, concentration};
pub use config::{Config, ServerConfig};
pub use model::{Advisory, DayPoint, HourPoint, Reading, Source};
pub use provider::{AqiProvider, Gateway, ProviderError};
