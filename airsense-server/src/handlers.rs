use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::Local;
use serde::Deserialize;
use serde_json::{Value, json};

use airsense_core::{Advisor, Band, Gateway, forecast};

const DEFAULT_CITY: &str = "chennai";

#[derive(Clone)]
pub struct ApiState {
    pub gateway: Arc<Gateway>,
    pub advisor: Arc<Advisor>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    question: String,
    city: Option<String>,
}

/// `GET /api/current?city=<name>` — current reading plus hourly/weekly
/// forecasts. Upstream failures never surface here; the gateway falls back to
/// simulated data.
pub async fn current(
    Query(query): Query<CurrentQuery>,
    State(state): State<ApiState>,
) -> Json<Value> {
    let city = query.city.unwrap_or_else(|| DEFAULT_CITY.to_string());

    let reading = state.gateway.current_reading(&city).await;
    let now = Local::now().naive_local();

    let hourly = forecast::hourly_forecast(reading.aqi, now, forecast::DEFAULT_HOURLY_HORIZON);
    let weekly = forecast::weekly_forecast(reading.aqi, now);
    let band = Band::classify(reading.aqi);

    Json(json!({
        "current": {
            "aqi": reading.aqi,
            "pm25": reading.pm25,
            "pm10": reading.pm10,
            "temp": temp_value(reading.temperature),
            "category": band.label(),
            "color": band.color(),
            "location": reading.location,
            "timestamp": now.format("%I:%M %p").to_string(),
            "source": reading.source,
        },
        "hourly": hourly,
        "weekly": weekly,
    }))
}

/// `POST /api/chat` — AI advisory for a free-text question about the given
/// city. The response is always a structured advisory, error cases included.
pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Json<Value> {
    let city = request.city.unwrap_or_else(|| DEFAULT_CITY.to_string());

    let reading = state.gateway.current_reading(&city).await;
    let now = Local::now().naive_local();

    let weekly = forecast::weekly_forecast(reading.aqi, now);
    let hourly = forecast::hourly_forecast(reading.aqi, now, forecast::DEFAULT_HOURLY_HORIZON);

    let advisory = state
        .advisor
        .advise(&request.question, reading.aqi, reading.temperature, &weekly, &hourly)
        .await;

    Json(json!({ "response": advisory }))
}

/// Stations without a temperature sensor render as "--" in the UI.
fn temp_value(temperature: Option<f64>) -> Value {
    temperature.map_or_else(|| Value::from("--"), Value::from)
}
