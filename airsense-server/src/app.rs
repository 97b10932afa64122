use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use airsense_core::{Advisor, Config, Gateway};

use crate::handlers::{self, ApiState};

pub fn create_app(config: &Config) -> Router {
    let state = ApiState {
        gateway: Arc::new(Gateway::from_config(config)),
        advisor: Arc::new(Advisor::from_config(config)),
    };

    Router::new()
        .route("/api/current", get(handlers::current))
        .route("/api/chat", post(handlers::chat))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
