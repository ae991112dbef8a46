//! Advisory generation.
//!
//! Every reading yields exactly six advisories, one per [`Category`], always
//! in the order of [`Category::ALL`]. Categories are evaluated independently
//! and the first matching threshold wins inside each one.

use std::fmt;

use serde::Serialize;

use crate::display::format_one_decimal;
use crate::models::SensorReading;

// ---

const WATER_LEVEL_LOW: f64 = 30.0;
const WATER_LEVEL_HIGH: f64 = 90.0;
const TDS_CRITICAL: f64 = 500.0;
const TDS_WARNING: f64 = 300.0;
const TURBIDITY_CRITICAL: f64 = 1000.0;
const TURBIDITY_WARNING: f64 = 500.0;
const PH_MIN: f64 = 6.5;
const PH_MAX: f64 = 8.5;
const TEMPERATURE_COLD: f64 = 15.0;
const TEMPERATURE_HOT: f64 = 32.0;
const WQI_EXCELLENT: f64 = 80.0;
const WQI_GOOD: f64 = 60.0;
const WQI_FAIR: f64 = 40.0;

const SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WaterLevel,
    Tds,
    Turbidity,
    Ph,
    Temperature,
    Wqi,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::WaterLevel,
        Category::Tds,
        Category::Turbidity,
        Category::Ph,
        Category::Temperature,
        Category::Wqi,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Good,
    Info,
    Warning,
    Critical,
}

/// One status/action message for a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    // ---
    pub category: Category,
    pub severity: Severity,
    pub icon: &'static str,
    pub text: String,
}

impl Advisory {
    fn new(category: Category, severity: Severity, icon: &'static str, text: impl Into<String>) -> Self {
        Advisory {
            category,
            severity,
            icon,
            text: text.into(),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.text)
    }
}

/// The six advisories for one reading, in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AdvisoryReport([Advisory; 6]);

#[allow(clippy::len_without_is_empty)]
impl AdvisoryReport {
    /// Always six.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Advisory> {
        self.0.iter()
    }

    pub fn get(&self, category: Category) -> &Advisory {
        // Variants are declared in report order.
        &self.0[category as usize]
    }

    /// Single-line rendering used by the dashboard banner.
    pub fn suggestion_line(&self) -> String {
        self.0
            .iter()
            .map(Advisory::to_string)
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}

/// Build the advisory report for a reading and its water quality index.
pub fn generate_advisories(reading: &SensorReading, wqi: f64) -> AdvisoryReport {
    // ---
    AdvisoryReport([
        water_level_advisory(reading.water_level),
        tds_advisory(reading.tds),
        turbidity_advisory(reading.turbidity),
        ph_advisory(reading.ph),
        temperature_advisory(reading.temperature),
        wqi_advisory(wqi),
    ])
}

fn water_level_advisory(level: f64) -> Advisory {
    // ---
    use Category::WaterLevel;

    if level < WATER_LEVEL_LOW {
        Advisory::new(WaterLevel, Severity::Warning, "⚠️", "Water level is low. Consider refilling.")
    } else if level > WATER_LEVEL_HIGH {
        Advisory::new(
            WaterLevel,
            Severity::Warning,
            "⚠️",
            "Water level is high. Check for potential overflow.",
        )
    } else {
        Advisory::new(WaterLevel, Severity::Good, "✅", "Water level is optimal.")
    }
}

fn tds_advisory(tds: f64) -> Advisory {
    // ---
    use Category::Tds;

    if tds > TDS_CRITICAL {
        Advisory::new(
            Tds,
            Severity::Critical,
            "🔴",
            "High TDS detected. Consider water treatment or replacement.",
        )
    } else if tds > TDS_WARNING {
        Advisory::new(Tds, Severity::Warning, "🟡", "TDS is moderately high. Monitor water quality.")
    } else {
        Advisory::new(Tds, Severity::Good, "✅", "TDS levels are healthy.")
    }
}

fn turbidity_advisory(turbidity: f64) -> Advisory {
    // ---
    use Category::Turbidity;

    if turbidity > TURBIDITY_CRITICAL {
        Advisory::new(
            Turbidity,
            Severity::Critical,
            "🔴",
            "High turbidity detected. Water needs filtration.",
        )
    } else if turbidity > TURBIDITY_WARNING {
        Advisory::new(
            Turbidity,
            Severity::Warning,
            "🟡",
            "Turbidity is elevated. Consider filtering water.",
        )
    } else {
        Advisory::new(Turbidity, Severity::Good, "✅", "Water clarity is good.")
    }
}

fn ph_advisory(ph: f64) -> Advisory {
    // ---
    let shown = format_one_decimal(ph);

    if ph < PH_MIN || ph > PH_MAX {
        Advisory::new(
            Category::Ph,
            Severity::Warning,
            "⚠️",
            format!("pH level ({shown}) is outside optimal range. Adjust pH balance."),
        )
    } else {
        Advisory::new(Category::Ph, Severity::Good, "✅", format!("pH level ({shown}) is optimal."))
    }
}

fn temperature_advisory(temperature: f64) -> Advisory {
    // ---
    use Category::Temperature;

    if temperature < TEMPERATURE_COLD {
        Advisory::new(
            Temperature,
            Severity::Warning,
            "❄️",
            "Water temperature is cold. Increase heating if necessary.",
        )
    } else if temperature > TEMPERATURE_HOT {
        Advisory::new(
            Temperature,
            Severity::Warning,
            "🔥",
            "Water temperature is high. Improve cooling or shade.",
        )
    } else {
        Advisory::new(Temperature, Severity::Good, "✅", "Water temperature is ideal.")
    }
}

fn wqi_advisory(wqi: f64) -> Advisory {
    // ---
    use Category::Wqi;

    if wqi > WQI_EXCELLENT {
        Advisory::new(Wqi, Severity::Good, "⭐", "Excellent water quality! Keep monitoring.")
    } else if wqi > WQI_GOOD {
        Advisory::new(Wqi, Severity::Info, "👍", "Good water quality. Continue regular monitoring.")
    } else if wqi > WQI_FAIR {
        Advisory::new(Wqi, Severity::Warning, "⚠️", "Fair water quality. Take corrective measures.")
    } else {
        Advisory::new(Wqi, Severity::Critical, "🔴", "Poor water quality. Immediate action required!")
    }
}
