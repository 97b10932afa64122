//! HTTP layer for the AirSense backend.
//!
//! Exposes two JSON endpoints on top of `airsense-core`:
//! - `GET /api/current?city=<name>` — current reading plus synthetic forecasts
//! - `POST /api/chat` — AI advisory for a free-text question

pub mod app;
pub mod handlers;

pub use app::create_app;
