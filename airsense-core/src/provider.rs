//! Data-source gateway: live WAQI readings with a simulated fallback and a
//! small bounded memo cache.

use async_trait::async_trait;
use chrono::Local;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::model::Reading;
use crate::provider::waqi::WaqiProvider;

pub mod simulated;
pub mod waqi;

/// How the gateway's single upstream fetch can fail. Every variant ends in
/// the same place (a simulated reading), but the distinction is logged.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to AQI provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AQI provider returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("AQI provider reported not-ok payload: {0}")]
    NotOk(String),

    #[error("failed to parse AQI provider payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[async_trait]
pub trait AqiProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<Reading, ProviderError>;
}

const CACHE_CAPACITY: usize = 20;

/// Fixed-capacity memo keyed by (lowercased) city. Oldest insertion is
/// evicted on overflow; there is no time-based expiry. Readings therefore go
/// stale within a process lifetime, which is the documented tradeoff.
#[derive(Debug)]
struct ReadingCache {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, Reading>,
}

impl ReadingCache {
    fn new(capacity: usize) -> Self {
        Self { capacity, order: VecDeque::new(), entries: HashMap::new() }
    }

    fn get(&self, key: &str) -> Option<Reading> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, reading: Reading) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, reading);
            return;
        }

        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, reading);
    }
}

/// Front door for current readings. Never fails outward: any provider error
/// falls back to a simulated reading.
#[derive(Debug)]
pub struct Gateway {
    provider: Option<Box<dyn AqiProvider>>,
    cache: Mutex<ReadingCache>,
}

impl Gateway {
    pub fn new(provider: Option<Box<dyn AqiProvider>>) -> Self {
        Self { provider, cache: Mutex::new(ReadingCache::new(CACHE_CAPACITY)) }
    }

    /// Build from config: a configured WAQI key enables the live provider,
    /// otherwise every reading is simulated.
    pub fn from_config(config: &Config) -> Self {
        let provider = config
            .waqi_api_key
            .clone()
            .map(|key| Box::new(WaqiProvider::new(key)) as Box<dyn AqiProvider>);

        Self::new(provider)
    }

    /// Current reading for a city. Cached per distinct city; simulated
    /// results are cached the same way as live ones.
    pub async fn current_reading(&self, city: &str) -> Reading {
        let key = city.to_lowercase();

        if let Some(hit) = self.cache.lock().await.get(&key) {
            debug!(%city, "serving cached reading");
            return hit;
        }

        let reading = match &self.provider {
            Some(provider) => match provider.current(city).await {
                Ok(reading) => reading,
                Err(err) => {
                    warn!(%city, error = %err, "provider failed, falling back to simulated reading");
                    simulated::reading(Local::now().naive_local(), &title_case(city))
                }
            },
            None => {
                debug!(%city, "no provider configured, using simulated reading");
                simulated::reading(Local::now().naive_local(), &title_case(city))
            }
        };

        self.cache.lock().await.insert(key, reading.clone());
        reading
    }
}

/// "new delhi" -> "New Delhi", for display when the provider supplies no name.
fn title_case(city: &str) -> String {
    city.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
