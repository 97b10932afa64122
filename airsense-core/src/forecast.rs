//! Synthetic short-term forecasts derived from a single current AQI value.
//!
//! There is no model here: each future hour/day perturbs the current AQI with
//! a pseudo-random factor whose generator is seeded from the target calendar
//! bucket (`YYYY-MM-DD-HH` or `YYYY-MM-DD`). The same current AQI and the same
//! bucket therefore always produce the same point, across calls and across
//! processes, without any shared generator state being touched.

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::aqi::Band;
use crate::model::{DayPoint, HourPoint};

pub const DEFAULT_HOURLY_HORIZON: usize = 24;

const AQI_FLOOR: i64 = 50;
const AQI_CEILING: i64 = 300;

/// Predict the next `hours` hourly AQI values, starting at the next full hour
/// after `now` (the caller's local wall-clock time).
pub fn hourly_forecast(current_aqi: i64, now: NaiveDateTime, hours: usize) -> Vec<HourPoint> {
    let start = next_full_hour(now);

    (0..hours)
        .map(|i| {
            let future = start + Duration::hours(i as i64);
            let mut rng = seeded_rng(&future.format("%Y-%m-%d-%H").to_string());

            let factor = time_of_day_factor(future.hour());
            let noise = rng.gen_range(0.9..=1.1);
            let aqi = clamp_aqi(current_aqi as f64 * factor * noise);
            let band = Band::classify(aqi);

            HourPoint {
                time: future.format("%I:%M %p").to_string(),
                aqi,
                category: band.label(),
                color: band.color(),
            }
        })
        .collect()
}

/// Predict AQI for each of the next 7 calendar days, starting tomorrow.
pub fn weekly_forecast(current_aqi: i64, now: NaiveDateTime) -> Vec<DayPoint> {
    (1..=7)
        .map(|day| {
            let future = now + Duration::days(day);
            let mut rng = seeded_rng(&future.format("%Y-%m-%d").to_string());

            let noise = rng.gen_range(0.85..=1.15);
            let aqi = clamp_aqi(current_aqi as f64 * noise);
            let band = Band::classify(aqi);

            DayPoint {
                day: future.format("%A").to_string(),
                date: future.format("%b %d").to_string(),
                aqi,
                category: band.label(),
                color: band.color(),
            }
        })
        .collect()
}

/// Commute hours push the index up, the small hours pull it down.
fn time_of_day_factor(hour: u32) -> f64 {
    if (8..=10).contains(&hour) || (17..=20).contains(&hour) {
        1.15
    } else if (1..=5).contains(&hour) {
        0.85
    } else {
        1.0
    }
}

fn next_full_hour(now: NaiveDateTime) -> NaiveDateTime {
    now.date()
        .and_hms_opt(now.hour(), 0, 0)
        .unwrap_or(now)
        + Duration::hours(1)
}

/// One generator per point, seeded from the calendar bucket key.
fn seeded_rng(key: &str) -> StdRng {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}

fn clamp_aqi(value: f64) -> i64 {
    (value.round() as i64).clamp(AQI_FLOOR, AQI_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monday_noon() -> NaiveDateTime {
        // 2025-06-02 is a Monday.
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    #[test]
    fn hourly_is_deterministic_for_a_pinned_clock() {
        let now = monday_noon();
        let first = hourly_forecast(142, now, DEFAULT_HOURLY_HORIZON);
        let second = hourly_forecast(142, now, DEFAULT_HOURLY_HORIZON);

        assert_eq!(first, second);
        assert_eq!(first.len(), 24);
    }

    #[test]
    fn weekly_is_deterministic_for_a_pinned_clock() {
        let now = monday_noon();

        assert_eq!(weekly_forecast(142, now), weekly_forecast(142, now));
    }

    #[test]
    fn hourly_starts_at_the_next_full_hour() {
        let points = hourly_forecast(142, monday_noon(), 2);

        assert_eq!(points[0].time, "01:00 PM");
        assert_eq!(points[1].time, "02:00 PM");
    }

    #[test]
    fn weekly_days_run_forward_from_tomorrow() {
        let days: Vec<String> = weekly_forecast(142, monday_noon())
            .into_iter()
            .map(|p| p.day)
            .collect();

        assert_eq!(
            days,
            vec![
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
                "Monday"
            ]
        );
    }

    #[test]
    fn extreme_inputs_stay_clamped() {
        let now = monday_noon();

        for point in hourly_forecast(0, now, 24) {
            assert_eq!(point.aqi, 50);
        }
        for point in hourly_forecast(1000, now, 24) {
            assert!((50..=300).contains(&point.aqi), "aqi {} out of range", point.aqi);
        }
        for point in weekly_forecast(0, now) {
            assert_eq!(point.aqi, 50);
        }
        for point in weekly_forecast(1000, now) {
            assert!((50..=300).contains(&point.aqi), "aqi {} out of range", point.aqi);
        }
    }

    #[test]
    fn points_carry_matching_category_and_color() {
        for point in hourly_forecast(142, monday_noon(), 24) {
            let band = Band::classify(point.aqi);
            assert_eq!(point.category, band.label());
            assert_eq!(point.color, band.color());
        }
    }

    #[test]
    fn commute_and_night_factors() {
        assert_eq!(time_of_day_factor(9), 1.15);
        assert_eq!(time_of_day_factor(18), 1.15);
        assert_eq!(time_of_day_factor(3), 0.85);
        assert_eq!(time_of_day_factor(12), 1.0);
    }
}
