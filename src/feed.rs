//! Live data feed.
//!
//! Polls the sensor node of the realtime database over its REST interface and
//! publishes an immutable [`Snapshot`] after every poll. Consumers hold a
//! `watch::Receiver` and always see the most recent state; nothing is queued.

use std::fmt;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::models::{PartialSensorReading, Snapshot};
use crate::Config;

// ---

/// Errors that can arise while polling the sensor node.
#[derive(Debug, PartialEq)]
pub enum FeedError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    Transport(String),
    /// The database rejected the credentials or its security rules deny reads.
    PermissionDenied,
    /// Any other non-2xx response.
    HttpError(u16),
    /// The body was not a sensor node.
    ParseError(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FeedError::PermissionDenied => write!(f, "Permission denied"),
            FeedError::HttpError(code) => write!(f, "HTTP error: {}", code),
            FeedError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

/// Decode a sensor node body. `null` means the node exists but holds nothing yet.
pub fn parse_body(body: &str) -> Result<Option<PartialSensorReading>, FeedError> {
    // ---
    serde_json::from_str::<Option<PartialSensorReading>>(body)
        .map_err(|e| FeedError::ParseError(e.to_string()))
}

/// Fold one poll outcome into the previous snapshot.
pub fn apply(
    previous: &Snapshot,
    outcome: &Result<Option<PartialSensorReading>, FeedError>,
) -> Snapshot {
    // ---
    match outcome {
        Ok(Some(partial)) => Snapshot::from_reading(partial, Utc::now()),
        Ok(None) => previous.with_connected(true),
        Err(_) => previous.with_connected(false),
    }
}

pub struct SensorFeed {
    client: Client,
    url: String,
    auth_token: Option<String>,
}

impl SensorFeed {
    /// Build a feed for the configured sensor node.
    ///
    /// Every request is bounded by `config.request_timeout`; a database that
    /// accepts the connection but never answers surfaces as a transport error.
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        // ---
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        Ok(SensorFeed {
            client,
            url: config.sensor_url(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Fetch the current sensor node once.
    pub async fn fetch(&self) -> Result<Option<PartialSensorReading>, FeedError> {
        // ---
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(FeedError::PermissionDenied)
            }
            status if !status.is_success() => return Err(FeedError::HttpError(status.as_u16())),
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        debug!("Sensor node raw body: {}", body);
        parse_body(&body)
    }

    /// Poll forever, publishing a new snapshot after every attempt.
    ///
    /// Returns once every receiver has been dropped.
    pub async fn run(self, tx: watch::Sender<Snapshot>, interval: std::time::Duration) {
        // ---
        info!("Listening for sensor data at {}", self.url);
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let outcome = self.fetch().await;
            log_outcome(&outcome, tx.borrow().connected);

            let next = apply(&tx.borrow(), &outcome);
            if tx.send(next).is_err() {
                info!("No dashboard consumers left, stopping feed");
                break;
            }
        }
    }
}

fn log_outcome(outcome: &Result<Option<PartialSensorReading>, FeedError>, was_connected: bool) {
    // ---
    match outcome {
        Ok(reading) => {
            if !was_connected {
                info!("Connected to realtime database");
            }
            match reading {
                Some(r) => debug!("Data received from feed: {:?}", r),
                None => warn!("Sensor node exists but is empty; the device may not have sent data yet"),
            }
        }
        Err(e) => {
            if was_connected {
                info!("Disconnected from realtime database");
            }
            error!("Error reading sensor data: {}", e);
            if *e == FeedError::PermissionDenied {
                error!("Check the realtime database security rules or FIREBASE_AUTH");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_parse_body_null_is_empty_node() {
        // ---
        assert_eq!(parse_body("null"), Ok(None));
    }

    #[test]
    fn test_parse_body_reading() {
        // ---
        let body = r#"{"water_level":48.2,"tds":312,"turbidity":640,"temperature":27.5,"ph":7.4}"#;
        let partial = parse_body(body).unwrap().unwrap();

        assert_eq!(partial.tds, Some(312.0));
        assert_eq!(partial.wqi, None);
    }

    #[test]
    fn test_parse_body_rejects_non_objects() {
        // ---
        assert!(matches!(parse_body("\"offline\""), Err(FeedError::ParseError(_))));
        assert!(matches!(parse_body("{\"tds\": \"high\"}"), Err(FeedError::ParseError(_))));
    }

    #[test]
    fn test_apply_reading_marks_connected() {
        // ---
        let partial = PartialSensorReading {
            water_level: Some(95.0),
            ..Default::default()
        };
        let next = apply(&Snapshot::default(), &Ok(Some(partial)));

        assert!(next.connected);
        assert!(next.last_update.is_some());
        let evaluation = next.evaluation.unwrap();
        assert_eq!(evaluation.reading.water_level, 95.0);
        assert!(evaluation.suggestion.starts_with("⚠️ Water level is high."));
    }

    #[test]
    fn test_apply_empty_node_keeps_previous_evaluation() {
        // ---
        let live = apply(&Snapshot::default(), &Ok(Some(PartialSensorReading::default())));
        let next = apply(&live.with_connected(false), &Ok(None));

        assert!(next.connected);
        assert_eq!(next.evaluation, live.evaluation);
        assert_eq!(next.last_update, live.last_update);
    }

    #[test]
    fn test_apply_error_disconnects() {
        // ---
        let live = apply(&Snapshot::default(), &Ok(Some(PartialSensorReading::default())));
        let next = apply(&live, &Err(FeedError::HttpError(503)));

        assert!(!next.connected);
        assert_eq!(next.evaluation, live.evaluation);
    }

    #[test]
    fn test_error_display() {
        // ---
        assert_eq!(FeedError::HttpError(500).to_string(), "HTTP error: 500");
        assert_eq!(FeedError::PermissionDenied.to_string(), "Permission denied");
    }
}
