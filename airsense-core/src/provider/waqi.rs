use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::aqi::{Pollutant, concentration};
use crate::model::{Reading, Source};
use crate::provider::{AqiProvider, ProviderError};

pub const BASE_URL: &str = "https://api.waqi.info";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the WAQI feed/search API.
///
/// The fetch is a fixed two-step chain: feed-by-city first; if the payload
/// comes back not-ok, resolve a station uid via keyword search and feed that
/// specific station. No further retries.
#[derive(Debug, Clone)]
pub struct WaqiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WaqiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    /// Feed request for a query (a city name or `@{uid}`). `Ok(None)` means
    /// the provider answered but did not recognise the query.
    async fn fetch_feed(&self, query: &str) -> Result<Option<FeedData>, ProviderError> {
        let url = format!("{}/feed/{}/", self.base_url, query);

        let res = self
            .http
            .get(&url)
            .query(&[("token", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body: truncate_body(&body) });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        if envelope.status != "ok" {
            debug!(%query, status = %envelope.status, "WAQI feed not ok");
            return Ok(None);
        }

        let data: FeedData = serde_json::from_value(envelope.data)?;
        Ok(Some(data))
    }

    /// Resolve an ambiguous city name to the uid of its first matching
    /// station.
    async fn search_station(&self, keyword: &str) -> Result<Option<i64>, ProviderError> {
        let url = format!("{}/search/", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("token", self.api_key.as_str()), ("keyword", keyword)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body: truncate_body(&body) });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        if envelope.status != "ok" {
            return Ok(None);
        }

        let results: Vec<SearchResult> = serde_json::from_value(envelope.data)?;
        Ok(results.first().map(|r| r.uid))
    }
}

#[async_trait]
impl AqiProvider for WaqiProvider {
    async fn current(&self, city: &str) -> Result<Reading, ProviderError> {
        let mut data = self.fetch_feed(city).await?;

        if data.is_none() {
            if let Some(uid) = self.search_station(city).await? {
                data = self.fetch_feed(&format!("@{uid}")).await?;
            }
        }

        let data = data
            .ok_or_else(|| ProviderError::NotOk(format!("no station found for '{city}'")))?;

        // WAQI occasionally reports a non-numeric aqi (e.g. "-"); coerce to 0.
        let aqi = data.aqi.as_i64().or_else(|| data.aqi.as_f64().map(|v| v as i64)).unwrap_or(0);

        let pm25 = data
            .iaqi
            .get("pm25")
            .map_or(0.0, |v| concentration(v.v, Pollutant::Pm25));
        let pm10 = data
            .iaqi
            .get("pm10")
            .map_or(0.0, |v| concentration(v.v, Pollutant::Pm10));
        let temperature = data.iaqi.get("t").map(|v| v.v);

        let location = data
            .city
            .and_then(|c| c.name)
            .unwrap_or_else(|| city.to_string());

        Ok(Reading {
            aqi,
            pm25,
            pm10,
            temperature,
            location,
            source: Source::Waqi,
            timestamp: Utc::now(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    #[serde(default)]
    aqi: serde_json::Value,
    #[serde(default)]
    iaqi: HashMap<String, IaqiValue>,
    #[serde(default)]
    city: Option<CityInfo>,
}

#[derive(Debug, Deserialize)]
struct IaqiValue {
    v: f64,
}

#[derive(Debug, Deserialize)]
struct CityInfo {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    uid: i64,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
