use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::AppState;
use crate::{Evaluation, PartialSensorReading};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/status", get(status))
        .route("/api/dashboard", get(dashboard))
        .route("/api/evaluate", post(evaluate))
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    connected: bool,
    status_text: &'static str,
    last_update: Option<DateTime<Utc>>,
    suggestion: String,
    sensor_url: String,
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    connected: bool,
    last_update: Option<DateTime<Utc>>,
    #[serde(flatten)]
    evaluation: Evaluation,
}

#[derive(Debug, Serialize)]
struct WaitingResponse {
    connected: bool,
    message: &'static str,
}

/// Handle `GET /api/status`: connection state and the current banner line.
async fn status(State((snapshots, config)): State<AppState>) -> Json<StatusResponse> {
    // ---
    let snapshot = snapshots.borrow().clone();

    Json(StatusResponse {
        connected: snapshot.connected,
        status_text: snapshot.status_text(),
        last_update: snapshot.last_update,
        suggestion: snapshot.suggestion().to_string(),
        sensor_url: config.sensor_url(),
    })
}

/// Handle `GET /api/dashboard`: the full evaluation of the latest reading.
async fn dashboard(State((snapshots, _config)): State<AppState>) -> impl IntoResponse {
    // ---
    let snapshot = snapshots.borrow().clone();

    match snapshot.evaluation {
        Some(evaluation) => {
            debug!("GET /api/dashboard - WQI {:?}", evaluation.wqi);
            (
                StatusCode::OK,
                Json(DashboardResponse {
                    connected: snapshot.connected,
                    last_update: snapshot.last_update,
                    evaluation,
                }),
            )
                .into_response()
        }
        None => {
            debug!("GET /api/dashboard - no reading yet");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(WaitingResponse {
                    connected: snapshot.connected,
                    message: "Waiting for sensor data",
                }),
            )
                .into_response()
        }
    }
}

/// Handle `POST /api/evaluate`: score an arbitrary reading without touching
/// the feed state.
async fn evaluate(Json(partial): Json<PartialSensorReading>) -> Json<Evaluation> {
    // ---
    let evaluation = Evaluation::from_partial(&partial);
    info!(
        "POST /api/evaluate - WQI {:.1} ({:?})",
        evaluation.wqi.value(),
        evaluation.wqi
    );
    Json(evaluation)
}
