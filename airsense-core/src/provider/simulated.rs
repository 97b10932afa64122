//! Deterministic-ish fallback readings for when no provider is configured or
//! the upstream call fails.

use chrono::{NaiveDateTime, Timelike, Utc};
use rand_distr::{Distribution, Normal};

use crate::model::{Reading, Source};

const NOISE_SIGMA: f64 = 15.0;
const PLACEHOLDER_TEMPERATURE: f64 = 30.5;

/// Synthesize a plausible reading for the given local wall-clock time.
///
/// Baseline follows a three-tier daily schedule (commute peaks, overnight
/// lull), with Gaussian noise on top and the result clamped to [50, 300].
pub fn reading(now: NaiveDateTime, location: &str) -> Reading {
    let hour = now.hour();
    let base = baseline_for_hour(hour);

    let noise = match Normal::new(0.0, NOISE_SIGMA) {
        Ok(dist) => dist.sample(&mut rand::thread_rng()),
        Err(_) => 0.0,
    };
    let aqi = ((base + noise) as i64).clamp(50, 300);

    // Simpler two-segment rule than the converter table, kept deliberately
    // distinct: the fallback only needs a rough figure.
    let pm25 = if aqi <= 50 {
        aqi as f64 * 0.6
    } else {
        30.0 + (aqi - 50) as f64 * 0.6
    };
    let pm25 = round1(pm25);
    let pm10 = round1(pm25 * 1.8);

    Reading {
        aqi,
        pm25,
        pm10,
        temperature: Some(PLACEHOLDER_TEMPERATURE),
        location: location.to_string(),
        source: Source::Simulated,
        timestamp: Utc::now(),
    }
}

/// Elevated through commute windows, suppressed overnight.
fn baseline_for_hour(hour: u32) -> f64 {
    if (8..=10).contains(&hour) || (18..=20).contains(&hour) {
        165.0
    } else if hour >= 23 || hour <= 5 {
        95.0
    } else {
        130.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
