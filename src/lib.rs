//! Water quality monitoring for a pond fed by an ESP32 sensor node.
//!
//! The core is two pure functions:
//! - [`wqi::compute_wqi`] blends TDS, turbidity, pH and temperature into a
//!   0–100 Water Quality Index.
//! - [`advisory::generate_advisories`] turns a reading and its index into six
//!   ordered status/action messages.
//!
//! Around them, [`feed`] polls the realtime database for the latest reading
//! and [`routes`] serves the results over HTTP.

pub mod advisory;
pub mod config;
pub mod display;
pub mod feed;
pub mod models;
pub mod routes;
pub mod wqi;

pub use config::Config;

// Re-exported so `routes/*.rs` only depend on the crate root, not on the
// individual model modules.
pub use models::{Evaluation, PartialSensorReading, SensorReading, Snapshot, WqiScore};
