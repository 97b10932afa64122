//! AQI categorisation and index-to-concentration conversion.

/// Particulate species the converter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
}

/// The six AQI bands, ordered. Breakpoints are {50,100,200,300,400} and a
/// boundary value belongs to the lower band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Band {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl Band {
    pub fn classify(aqi: i64) -> Self {
        match aqi {
            i64::MIN..=50 => Band::Good,
            51..=100 => Band::Satisfactory,
            101..=200 => Band::Moderate,
            201..=300 => Band::Poor,
            301..=400 => Band::VeryPoor,
            _ => Band::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Good => "Good",
            Band::Satisfactory => "Satisfactory",
            Band::Moderate => "Moderate",
            Band::Poor => "Poor",
            Band::VeryPoor => "Very Poor",
            Band::Severe => "Severe",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Band::Good => "#00E400",
            Band::Satisfactory => "#4facfe",
            Band::Moderate => "#43e97b",
            Band::Poor => "#ffc107",
            Band::VeryPoor => "#f5576c",
            Band::Severe => "#8B0000",
        }
    }
}

/// Convert an AQI sub-index back to an approximate mass concentration in
/// µg/m³ using EPA-style piecewise-linear breakpoints.
///
/// Scores above the highest defined breakpoint pass through unchanged, and
/// non-finite input fails soft: it is returned as-is rather than erroring.
pub fn concentration(score: f64, pollutant: Pollutant) -> f64 {
    if !score.is_finite() {
        return score;
    }

    match pollutant {
        Pollutant::Pm25 => {
            if score <= 50.0 {
                round1(score * (12.0 / 50.0))
            } else if score <= 100.0 {
                round1(12.1 + (score - 51.0) * (23.3 / 49.0))
            } else if score <= 150.0 {
                round1(35.5 + (score - 101.0) * (19.9 / 49.0))
            } else if score <= 200.0 {
                round1(55.5 + (score - 151.0) * (94.9 / 49.0))
            } else {
                round1(score)
            }
        }
        Pollutant::Pm10 => {
            if score <= 50.0 {
                round1(score * (54.0 / 50.0))
            } else if score <= 100.0 {
                round1(55.0 + (score - 51.0) * (99.0 / 49.0))
            } else {
                round1(score)
            }
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
