use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use airsense_core::Config;
use airsense_server::create_app;

#[tokio::test]
async fn current_endpoint_serves_simulated_data_without_credentials() {
    let app = create_app(&Config::default());

    let request = Request::builder()
        .uri("/api/current?city=chennai")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(payload["current"]["source"], "Simulated");
    assert_eq!(payload["current"]["location"], "Chennai");

    let aqi = payload["current"]["aqi"].as_i64().unwrap();
    assert!((50..=300).contains(&aqi), "aqi {aqi} out of range");

    let category = payload["current"]["category"].as_str().unwrap();
    assert!(!category.is_empty());

    assert_eq!(payload["hourly"].as_array().unwrap().len(), 24);
    assert_eq!(payload["weekly"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn current_endpoint_defaults_the_city() {
    let app = create_app(&Config::default());

    let request = Request::builder()
        .uri("/api/current")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(payload["current"]["location"], "Chennai");
}

#[tokio::test]
async fn weekly_forecast_runs_forward_day_by_day() {
    let app = create_app(&Config::default());

    let request = Request::builder()
        .uri("/api/current?city=chennai")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();

    const DAYS: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    let weekly = payload["weekly"].as_array().unwrap();
    let first = weekly[0]["day"].as_str().unwrap();
    let start = DAYS.iter().position(|d| *d == first).unwrap();

    for (offset, point) in weekly.iter().enumerate() {
        assert_eq!(point["day"], DAYS[(start + offset) % 7]);
        let aqi = point["aqi"].as_i64().unwrap();
        assert!((50..=300).contains(&aqi));
    }
}

#[tokio::test]
async fn chat_endpoint_reports_missing_key_as_structured_advisory() {
    let app = create_app(&Config::default());

    let request = Request::builder()
        .uri("/api/chat")
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::json!({ "question": "is it safe to jog?", "city": "chennai" })
                .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(payload["response"]["recommendation"], "⚠️ API Key Missing");
    assert_eq!(payload["response"]["details"][0], "Please add Groq Key");
}
