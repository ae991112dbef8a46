//! Water Quality Index calculation.
//!
//! The index blends four sub-scores, each in `[0, 100]`:
//!
//! | parameter   | weight | full score when      | penalty outside          |
//! |-------------|--------|----------------------|--------------------------|
//! | TDS         | 0.3    | always linear        | `tds / 10`               |
//! | turbidity   | 0.3    | always linear        | `turbidity / 30`         |
//! | pH          | 0.2    | `6.5 ..= 8.5`        | `|ph - 7| * 10`          |
//! | temperature | 0.2    | `10 ..= 35`          | `|temperature - 25| * 2` |
//!
//! Water level does not contribute.

use crate::models::{PartialSensorReading, WqiScore};

// ---

const TDS_WEIGHT: f64 = 0.3;
const TURBIDITY_WEIGHT: f64 = 0.3;
const PH_WEIGHT: f64 = 0.2;
const TEMPERATURE_WEIGHT: f64 = 0.2;

const PH_OPTIMAL_MIN: f64 = 6.5;
const PH_OPTIMAL_MAX: f64 = 8.5;
const TEMPERATURE_OPTIMAL_MIN: f64 = 10.0;
const TEMPERATURE_OPTIMAL_MAX: f64 = 35.0;

// Calculator defaults, independent of the intake defaults in `models`.
const DEFAULT_TDS: f64 = 0.0;
const DEFAULT_TURBIDITY: f64 = 0.0;
const DEFAULT_PH: f64 = 7.0;
const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Use the feed's index when it sent one, otherwise derive it locally.
pub fn resolve_wqi(reading: &PartialSensorReading) -> WqiScore {
    // ---
    match reading.wqi {
        Some(upstream) => WqiScore::Upstream(upstream),
        None => WqiScore::Derived(compute_wqi(reading)),
    }
}

/// Compute the composite index for a (possibly incomplete) reading.
///
/// Total over every input: absent fields take the calculator defaults and
/// every sub-score is floored at zero, so the result is always in `[0, 100]`.
pub fn compute_wqi(reading: &PartialSensorReading) -> f64 {
    // ---
    let tds = tds_score(reading.tds.unwrap_or(DEFAULT_TDS));
    let turbidity = turbidity_score(reading.turbidity.unwrap_or(DEFAULT_TURBIDITY));
    let ph = ph_score(reading.ph.unwrap_or(DEFAULT_PH));
    let temperature = temperature_score(reading.temperature.unwrap_or(DEFAULT_TEMPERATURE));

    let wqi = tds * TDS_WEIGHT
        + turbidity * TURBIDITY_WEIGHT
        + ph * PH_WEIGHT
        + temperature * TEMPERATURE_WEIGHT;

    // f64::max/min return the non-NaN operand.
    wqi.min(100.0).max(0.0)
}

pub fn tds_score(tds: f64) -> f64 {
    (100.0 - tds / 10.0).max(0.0)
}

pub fn turbidity_score(turbidity: f64) -> f64 {
    (100.0 - turbidity / 30.0).max(0.0)
}

pub fn ph_score(ph: f64) -> f64 {
    // ---
    if ph < PH_OPTIMAL_MIN || ph > PH_OPTIMAL_MAX {
        (100.0 - (ph - 7.0).abs() * 10.0).max(0.0)
    } else {
        100.0
    }
}

pub fn temperature_score(temperature: f64) -> f64 {
    // ---
    if temperature < TEMPERATURE_OPTIMAL_MIN || temperature > TEMPERATURE_OPTIMAL_MAX {
        (100.0 - (temperature - 25.0).abs() / 0.5).max(0.0)
    } else {
        100.0
    }
}
