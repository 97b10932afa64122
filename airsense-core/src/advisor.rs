//! AI advisory client: assembles a constrained prompt from current/forecast
//! data and a user question, calls the Groq chat-completions endpoint, and
//! parses the reply into a structured [`Advisory`].
//!
//! Every failure path returns a structured payload; the HTTP layer never has
//! to deal with a missing advisory.

use rand::seq::SliceRandom;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::model::{Advisory, DayPoint, HourPoint};

pub const QUIZ_TOPICS: [&str; 9] = [
    "Microplastics in Rain",
    "Electric Vehicles vs Gas",
    "Indoor Air Pollution",
    "The Ozone Layer",
    "PM2.5 vs Human Hair",
    "Deforestation Effects",
    "Ocean Acidification",
    "Recycling Facts",
    "Carbon Footprint",
];

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MODEL: &str = "llama-3.3-70b-versatile";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const AI_SOURCE: &str = "AI (Llama 3.3)";
const ERROR_SOURCE: &str = "error";

#[derive(Debug, Error)]
enum AdvisorError {
    #[error("request to AI provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse AI provider payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Advisor {
    api_key: Option<String>,
    endpoint: String,
    http: Client,
}

impl Advisor {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, CHAT_COMPLETIONS_URL.to_string())
    }

    pub fn with_endpoint(api_key: Option<String>, endpoint: String) -> Self {
        Self { api_key, endpoint, http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.groq_api_key.clone())
    }

    /// Produce an advisory for a free-text question. The hourly forecast is
    /// part of the call contract but does not feed the prompt; only the first
    /// three weekly entries do.
    pub async fn advise(
        &self,
        question: &str,
        current_aqi: i64,
        current_temp: Option<f64>,
        weekly: &[DayPoint],
        _hourly: &[HourPoint],
    ) -> Advisory {
        let Some(api_key) = &self.api_key else {
            return Advisory {
                recommendation: "⚠️ API Key Missing".to_string(),
                details: vec!["Please add Groq Key".to_string()],
                source: ERROR_SOURCE.to_string(),
            };
        };

        let topic = QUIZ_TOPICS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(QUIZ_TOPICS[0]);

        let system = system_rules(topic);
        let context = user_context(question, current_aqi, current_temp, weekly);

        match self.call_chat_completions(api_key, &system, &context).await {
            Ok(text) => parse_reply(&text),
            Err(AdvisorError::Status(status)) => {
                warn!(%status, "AI provider returned an error status");
                Advisory {
                    recommendation: "Error".to_string(),
                    details: vec!["AI Provider Error".to_string()],
                    source: ERROR_SOURCE.to_string(),
                }
            }
            Err(err) => {
                warn!(error = %err, "AI request failed");
                Advisory {
                    recommendation: "Sorry, I could not reach the AI service.".to_string(),
                    details: Vec::new(),
                    source: ERROR_SOURCE.to_string(),
                }
            }
        }
    }

    async fn call_chat_completions(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
    ) -> Result<String, AdvisorError> {
        let payload = serde_json::json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.8,
            "max_tokens": 150,
        });

        let res = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status));
        }

        let body = res.text().await?;
        let parsed: ChatCompletion = serde_json::from_str(&body)?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

fn system_rules(topic: &str) -> String {
    format!(
        "You are AirSense AI. Be EXTREMELY CONCISE (Max 30 words). \
         SECRET INSTRUCTION: If asking a quiz, it MUST be about: {topic}. \
         RULES: \
         1. IF USER WANTS A QUIZ: Just ask a True/False question. DO NOT give the answer yet. \
         2. IF USER ANSWERS (True/False): Start with 'Correct!' or 'Incorrect!', then give 1 short fact. \
         3. FOR TREES: Say 'Plant [AQI/10] trees per person.' Do not explain the math. \
         4. SAFETY CHECK: If AQI < 100, say 'Yes, it is safe.' If AQI > 150, say 'No, avoid outdoors.' \
         5. SMALL TALK: If user says 'ok'/'thanks', reply 'Stay safe!' \
         6. NEVER repeat the same question twice in a row."
    )
}

fn user_context(
    question: &str,
    current_aqi: i64,
    current_temp: Option<f64>,
    weekly: &[DayPoint],
) -> String {
    let forecast = if weekly.is_empty() {
        "No Data".to_string()
    } else {
        weekly
            .iter()
            .take(3)
            .map(|d| format!("- {}: AQI {}", d.day, d.aqi))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let temp = current_temp.map_or_else(|| "unknown".to_string(), |t| t.to_string());

    format!(
        "DATA:\n\
         • AQI: {current_aqi}\n\
         • Temp: {temp}°C\n\
         • Forecast: {forecast}\n\
         \n\
         USER QUESTION: \"{question}\""
    )
}

/// Split the raw reply into a headline plus detail lines, stripping bullet
/// markers. An all-whitespace reply falls back to the first 50 characters of
/// the raw text.
fn parse_reply(text: &str) -> Advisory {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let recommendation = match lines.first() {
        Some(first) => (*first).to_string(),
        None => text.chars().take(50).collect(),
    };

    let details = lines
        .iter()
        .skip(1)
        .map(|l| l.trim_start_matches(['-', '•', '*', ' ']).to_string())
        .filter(|l| !l.is_empty())
        .collect();

    Advisory { recommendation, details, source: AI_SOURCE.to_string() }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
