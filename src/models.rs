//! Data models for the water quality monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryReport;
use crate::display::Gauges;

// ---

/// Raw sensor node as pushed by the live feed.
///
/// Every field may be missing or `null`. `wqi` is only present when the
/// device (or an upstream function) already computed the index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PartialSensorReading {
    // ---
    #[serde(default)]
    pub water_level: Option<f64>,
    #[serde(default)]
    pub tds: Option<f64>,
    #[serde(default)]
    pub turbidity: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub wqi: Option<f64>,
}

/// One complete snapshot of the five sensor values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    // ---
    pub water_level: f64,
    pub tds: f64,
    pub turbidity: f64,
    pub temperature: f64,
    pub ph: f64,
}

/// Where the water quality index of an evaluation came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum WqiScore {
    /// Supplied by the feed, taken verbatim.
    Upstream(f64),
    /// Computed locally, always within `[0, 100]`.
    Derived(f64),
}

impl WqiScore {
    pub fn value(&self) -> f64 {
        match *self {
            WqiScore::Upstream(v) | WqiScore::Derived(v) => v,
        }
    }
}

/// Intake defaults applied when the feed omits a field.
impl PartialSensorReading {
    // ---
    pub fn to_reading(&self) -> SensorReading {
        // ---
        SensorReading {
            water_level: self.water_level.unwrap_or(0.0),
            tds: self.tds.unwrap_or(0.0),
            turbidity: self.turbidity.unwrap_or(0.0),
            temperature: self.temperature.unwrap_or(0.0),
            ph: self.ph.unwrap_or(7.0),
        }
    }
}

/// Everything derived from a single reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    // ---
    pub reading: SensorReading,
    pub wqi: WqiScore,
    pub advisories: AdvisoryReport,
    pub suggestion: String,
    pub gauges: Gauges,
}

impl Evaluation {
    /// Run the full pipeline: intake defaults, WQI resolution, advisories, gauges.
    pub fn from_partial(partial: &PartialSensorReading) -> Self {
        // ---
        let reading = partial.to_reading();
        let wqi = crate::wqi::resolve_wqi(partial);
        let advisories = crate::advisory::generate_advisories(&reading, wqi.value());
        let suggestion = advisories.suggestion_line();
        let gauges = Gauges::from_reading(&reading, wqi.value());

        Evaluation {
            reading,
            wqi,
            advisories,
            suggestion,
            gauges,
        }
    }
}

/// Latest state published by the live feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    // ---
    pub connected: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub evaluation: Option<Evaluation>,
}

impl Snapshot {
    pub const INITIAL_SUGGESTION: &'static str = "Initializing system...";

    /// Snapshot of a freshly received reading; the feed is live by definition.
    pub fn from_reading(partial: &PartialSensorReading, at: DateTime<Utc>) -> Snapshot {
        // ---
        Snapshot {
            connected: true,
            last_update: Some(at),
            evaluation: Some(Evaluation::from_partial(partial)),
        }
    }

    /// Same evaluation, different connection state.
    pub fn with_connected(&self, connected: bool) -> Snapshot {
        Snapshot {
            connected,
            ..self.clone()
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.connected {
            "Connected"
        } else {
            "Disconnected"
        }
    }

    pub fn suggestion(&self) -> &str {
        self.evaluation
            .as_ref()
            .map_or(Self::INITIAL_SUGGESTION, |e| e.suggestion.as_str())
    }
}
