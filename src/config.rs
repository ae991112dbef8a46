//! Configuration loader for the `safepond-monitor` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate calls `env::var` for
//! application settings.
//!
use std::{env, time::Duration};

use anyhow::{anyhow, Result};

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Realtime database base URL, e.g. `https://<project>.firebasedatabase.app`.
    pub database_url: String,

    /// Path of the node holding the latest sensor reading.
    pub sensor_path: String,

    /// Optional database auth token (sent as `?auth=`).
    pub auth_token: Option<String>,

    /// Delay between two polls of the sensor node.
    pub poll_interval: Duration,

    /// Upper bound on a single poll, connect to last body byte.
    pub request_timeout: Duration,

    /// Port the HTTP API listens on.
    pub listen_port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `FIREBASE_DATABASE_URL` – realtime database base URL
///
/// Optional:
/// - `SENSOR_PATH` – sensor node path (default: `sensors`)
/// - `FIREBASE_AUTH` – auth token (default: none)
/// - `FEED_POLL_MS` – poll interval in milliseconds (default: 2000)
/// - `FEED_TIMEOUT_MS` – per-poll request timeout in milliseconds (default: 5000)
/// - `LISTEN_PORT` – HTTP port (default: 8080)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let database_url = require_env!("FIREBASE_DATABASE_URL");
    let sensor_path = env::var("SENSOR_PATH").unwrap_or_else(|_| "sensors".to_string());
    let auth_token = env::var("FIREBASE_AUTH").ok().filter(|t| !t.is_empty());
    let poll_ms = parse_env!("FEED_POLL_MS", u64, 2000);
    let timeout_ms = parse_env!("FEED_TIMEOUT_MS", u64, 5000);
    let listen_port = parse_env!("LISTEN_PORT", u16, 8080);

    if poll_ms == 0 {
        return Err(anyhow!("Invalid FEED_POLL_MS: must be greater than zero"));
    }
    if timeout_ms == 0 {
        return Err(anyhow!("Invalid FEED_TIMEOUT_MS: must be greater than zero"));
    }

    Ok(Config {
        database_url: database_url.trim_end_matches('/').to_string(),
        sensor_path: sensor_path.trim_matches('/').to_string(),
        auth_token,
        poll_interval: Duration::from_millis(poll_ms),
        request_timeout: Duration::from_millis(timeout_ms),
        listen_port,
    })
}

impl Config {
    /// URL of the sensor node in the database REST API, without credentials.
    pub fn sensor_url(&self) -> String {
        format!("{}/{}.json", self.database_url, self.sensor_path)
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// The auth token is never written out.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  FIREBASE_DATABASE_URL : {}", self.database_url);
        tracing::info!("  SENSOR_PATH           : {}", self.sensor_path);
        tracing::info!("  FIREBASE_AUTH         : {}", self.masked_auth());
        tracing::info!("  FEED_POLL_MS          : {}", self.poll_interval.as_millis());
        tracing::info!("  FEED_TIMEOUT_MS       : {}", self.request_timeout.as_millis());
        tracing::info!("  LISTEN_PORT           : {}", self.listen_port);
    }

    fn masked_auth(&self) -> String {
        // ---
        match &self.auth_token {
            None => "(none)".to_string(),
            Some(token) if token.chars().count() <= 4 => "****".to_string(),
            Some(token) => format!("{}****", token.chars().take(4).collect::<String>()),
        }
    }
}
