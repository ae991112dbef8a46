//! Display values for the dashboard gauges.
//!
//! Rendering itself belongs to whatever consumes the API; this module only
//! produces the text shown inside each gauge and how full it should be drawn.

use std::fmt;

use serde::Serialize;

use crate::models::SensorReading;

// ---

const TDS_FULL_SCALE: f64 = 1000.0;
const TURBIDITY_FULL_SCALE: f64 = 3000.0;
const TEMPERATURE_OFFSET: f64 = 10.0;
const TEMPERATURE_SPAN: f64 = 40.0;
const PH_FULL_SCALE: f64 = 14.0;

/// Round to the nearest integer, halves towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    // ---
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Format with one decimal place.
///
/// Rounds the exact binary value, so 8.45 (stored just below) shows as "8.4".
/// Values sitting exactly on a tie, like 6.25, round away from zero.
pub fn format_one_decimal(value: f64) -> String {
    // ---
    // An exact tie at one decimal is an odd number of quarters.
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let rounded = (value * 10.0).round() / 10.0;
        return format!("{rounded:.1}");
    }
    format!("{value:.1}")
}

/// Acidity class shown under the pH gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhClass {
    VeryAcidic,
    Acidic,
    SlightlyAcidic,
    Neutral,
    SlightlyBasic,
    Basic,
    VeryBasic,
}

impl PhClass {
    pub fn classify(ph: f64) -> Self {
        // ---
        if ph < 5.0 {
            PhClass::VeryAcidic
        } else if ph < 6.0 {
            PhClass::Acidic
        } else if ph < 7.0 {
            PhClass::SlightlyAcidic
        } else if ph == 7.0 {
            PhClass::Neutral
        } else if ph < 8.0 {
            PhClass::SlightlyBasic
        } else if ph < 9.0 {
            PhClass::Basic
        } else {
            PhClass::VeryBasic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhClass::VeryAcidic => "🔴 Very Acidic",
            PhClass::Acidic => "🟠 Acidic",
            PhClass::SlightlyAcidic => "🟡 Slightly Acidic",
            PhClass::Neutral => "🟢 Neutral",
            PhClass::SlightlyBasic => "🟡 Slightly Basic",
            PhClass::Basic => "🟠 Basic",
            PhClass::VeryBasic => "🔴 Very Basic",
        }
    }
}

impl fmt::Display for PhClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text and fill level (percent of the gauge) for one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub text: String,
    pub fill_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauges {
    // ---
    pub water_level: Gauge,
    pub tds: Gauge,
    pub turbidity: Gauge,
    pub temperature: Gauge,
    pub ph: Gauge,
    pub ph_class: PhClass,
    pub ph_label: &'static str,
    pub wqi: Gauge,
}

impl Gauges {
    pub fn from_reading(reading: &SensorReading, wqi: f64) -> Self {
        // ---
        let ph_class = PhClass::classify(reading.ph);

        Gauges {
            water_level: Gauge {
                text: format!("{}%", round_half_up(reading.water_level)),
                fill_percent: reading.water_level,
            },
            tds: Gauge {
                text: round_half_up(reading.tds).to_string(),
                fill_percent: (reading.tds / TDS_FULL_SCALE * 100.0).min(100.0),
            },
            turbidity: Gauge {
                text: round_half_up(reading.turbidity).to_string(),
                fill_percent: (reading.turbidity / TURBIDITY_FULL_SCALE * 100.0).min(100.0),
            },
            temperature: Gauge {
                text: format_one_decimal(reading.temperature),
                fill_percent: ((reading.temperature + TEMPERATURE_OFFSET) / TEMPERATURE_SPAN * 100.0)
                    .min(100.0),
            },
            ph: Gauge {
                text: format_one_decimal(reading.ph),
                fill_percent: reading.ph / PH_FULL_SCALE * 100.0,
            },
            ph_class,
            ph_label: ph_class.label(),
            wqi: Gauge {
                text: round_half_up(wqi).to_string(),
                fill_percent: wqi,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_round_half_up() {
        // ---
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(-0.5), 0.0);
    }

    #[test]
    fn test_format_one_decimal() {
        // ---
        assert_eq!(format_one_decimal(7.0), "7.0");
        assert_eq!(format_one_decimal(6.25), "6.3");
        assert_eq!(format_one_decimal(-6.25), "-6.3");
        assert_eq!(format_one_decimal(8.449), "8.4");
        assert_eq!(format_one_decimal(0.75), "0.8");
        assert_eq!(format_one_decimal(-0.25), "-0.3");
    }

    #[test]
    fn test_format_one_decimal_rounds_stored_value() {
        // ---
        // None of these are exact in binary; each is stored just below the tie.
        assert_eq!(format_one_decimal(8.45), "8.4");
        assert_eq!(format_one_decimal(6.35), "6.3");
        assert_eq!(format_one_decimal(7.05), "7.0");
        // Exact ties.
        assert_eq!(format_one_decimal(6.25), "6.3");
        assert_eq!(format_one_decimal(9.25), "9.3");
    }

    #[test]
    fn test_ph_classes() {
        // ---
        let cases = [
            (4.9, PhClass::VeryAcidic),
            (5.0, PhClass::Acidic),
            (6.0, PhClass::SlightlyAcidic),
            (6.99, PhClass::SlightlyAcidic),
            (7.0, PhClass::Neutral),
            (7.01, PhClass::SlightlyBasic),
            (8.0, PhClass::Basic),
            (9.0, PhClass::VeryBasic),
            (14.0, PhClass::VeryBasic),
        ];

        for (ph, expected) in cases {
            assert_eq!(PhClass::classify(ph), expected, "ph {ph}");
        }
        assert_eq!(PhClass::Neutral.to_string(), "🟢 Neutral");
    }

    #[test]
    fn test_gauges() {
        // ---
        let reading = SensorReading {
            water_level: 72.5,
            tds: 1500.0,
            turbidity: 750.0,
            temperature: 22.35,
            ph: 7.0,
        };
        let gauges = Gauges::from_reading(&reading, 64.4);

        assert_eq!(gauges.water_level.text, "73%");
        assert_eq!(gauges.water_level.fill_percent, 72.5);
        assert_eq!(gauges.tds.text, "1500");
        assert_eq!(gauges.tds.fill_percent, 100.0);
        assert_eq!(gauges.turbidity.fill_percent, 25.0);
        assert_eq!(gauges.temperature.text, "22.4");
        assert!((gauges.temperature.fill_percent - 80.875).abs() < 1e-9);
        assert_eq!(gauges.ph.text, "7.0");
        assert_eq!(gauges.ph.fill_percent, 50.0);
        assert_eq!(gauges.ph_label, "🟢 Neutral");
        assert_eq!(gauges.wqi.text, "64");
    }

    #[test]
    fn test_temperature_gauge_caps_at_full() {
        // ---
        let reading = SensorReading {
            water_level: 0.0,
            tds: 0.0,
            turbidity: 0.0,
            temperature: 45.0,
            ph: 7.0,
        };
        let gauges = Gauges::from_reading(&reading, 100.0);

        assert_eq!(gauges.temperature.text, "45.0");
        assert_eq!(gauges.temperature.fill_percent, 100.0);
        assert_eq!(gauges.wqi.text, "100");
    }
}
