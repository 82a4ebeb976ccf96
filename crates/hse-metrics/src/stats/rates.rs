use serde::{Deserialize, Serialize};

const RECORDABLE_BASE_HOURS: f64 = 200_000.0;
const MILLION_HOURS: f64 = 1_000_000.0;

/// Period totals entered on the HSE statistics sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkforceFigures {
    pub manhours: f64,
    pub recordables: f64,
    pub lost_time_injuries: f64,
    pub fatalities: f64,
}

/// Frequency rates normalized to exposure hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SafetyRates {
    /// Recordable incidents per 200 000 hours.
    pub trir: f64,
    /// Lost-time injuries per 1 000 000 hours.
    pub ltifr: f64,
    /// Fatalities per 1 000 000 hours.
    pub fatality_rate: f64,
}

/// Compute rates; zero (or non-positive) manhours are treated as one hour.
#[must_use]
pub fn safety_rates(figures: &WorkforceFigures) -> SafetyRates {
    let hours = if figures.manhours > 0.0 {
        figures.manhours
    } else {
        1.0
    };
    SafetyRates {
        trir: figures.recordables * RECORDABLE_BASE_HOURS / hours,
        ltifr: figures.lost_time_injuries * MILLION_HOURS / hours,
        fatality_rate: figures.fatalities * MILLION_HOURS / hours,
    }
}
