use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::sync::watch;

use safepond_monitor::{routes, Config, PartialSensorReading, Snapshot};

// ---

fn test_config() -> Config {
    // ---
    Config {
        database_url: "http://127.0.0.1:9".to_string(),
        sensor_path: "sensors".to_string(),
        auth_token: None,
        poll_interval: Duration::from_millis(2000),
        request_timeout: Duration::from_millis(5000),
        listen_port: 0,
    }
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_app(initial: Snapshot) -> Result<(String, watch::Sender<Snapshot>)> {
    // ---
    let (tx, rx) = watch::channel(initial);
    let app = routes::router(rx, test_config());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok((format!("http://{}", addr), tx))
}

#[tokio::test]
async fn health_endpoint_ok() -> Result<()> {
    // ---
    let (base, _tx) = spawn_app(Snapshot::default()).await?;

    let body: Value = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn dashboard_waits_for_first_reading() -> Result<()> {
    // ---
    let (base, _tx) = spawn_app(Snapshot::default()).await?;
    let client = Client::new();

    let response = client.get(format!("{}/api/dashboard", base)).send().await?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let status: Value = client
        .get(format!("{}/api/status", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(status["connected"], false);
    assert_eq!(status["status_text"], "Disconnected");
    assert_eq!(status["suggestion"], "Initializing system...");
    assert_eq!(status["sensor_url"], "http://127.0.0.1:9/sensors.json");

    Ok(())
}

#[tokio::test]
async fn dashboard_reflects_latest_snapshot() -> Result<()> {
    // ---
    let (base, tx) = spawn_app(Snapshot::default()).await?;
    let client = Client::new();

    let reading = PartialSensorReading {
        water_level: Some(95.0),
        tds: Some(1000.0),
        turbidity: Some(3000.0),
        temperature: Some(25.0),
        ph: Some(7.0),
        wqi: None,
    };
    tokio_test::assert_ok!(tx.send(Snapshot::from_reading(&reading, Utc::now())));

    let body: Value = client
        .get(format!("{}/api/dashboard", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["connected"], true);
    assert_eq!(body["wqi"]["source"], "derived");
    let wqi = body["wqi"]["value"].as_f64().unwrap_or(-1.0);
    assert!((wqi - 40.0).abs() < 1e-9, "expected WQI 40, got {}", wqi);

    let advisories = body["advisories"].as_array().cloned().unwrap_or_default();
    assert_eq!(advisories.len(), 6);
    assert_eq!(
        advisories[0]["text"],
        "Water level is high. Check for potential overflow."
    );
    assert_eq!(advisories[1]["severity"], "critical");
    assert_eq!(advisories[5]["severity"], "critical");
    assert_eq!(body["gauges"]["ph_label"], "🟢 Neutral");

    Ok(())
}

#[tokio::test]
async fn evaluate_prefers_upstream_wqi() -> Result<()> {
    // ---
    let (base, _tx) = spawn_app(Snapshot::default()).await?;
    let client = Client::new();

    let body: Value = client
        .post(format!("{}/api/evaluate", base))
        .json(&json!({ "water_level": 50, "ph": 7.2, "wqi": 81 }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["wqi"]["source"], "upstream");
    assert_eq!(body["wqi"]["value"], 81.0);
    assert_eq!(
        body["advisories"][5]["text"],
        "Excellent water quality! Keep monitoring."
    );
    // Temperature absent: the advisory sees 0 degrees.
    assert_eq!(body["reading"]["temperature"], 0.0);
    assert_eq!(body["advisories"][4]["icon"], "❄️");

    Ok(())
}

#[tokio::test]
async fn evaluate_rejects_malformed_body() -> Result<()> {
    // ---
    let (base, _tx) = spawn_app(Snapshot::default()).await?;

    let response = Client::new()
        .post(format!("{}/api/evaluate", base))
        .header("content-type", "application/json")
        .body(r#"{"tds": "cloudy"}"#)
        .send()
        .await?;

    assert!(response.status().is_client_error());
    Ok(())
}
