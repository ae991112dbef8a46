//! Route gateway: merges every subrouter and attaches the shared state.

use axum::Router;
use tokio::sync::watch;

use crate::{Config, Snapshot};

mod dashboard;
mod health;

// ---

/// State shared by all handlers: the latest feed snapshot plus configuration.
pub type AppState = (watch::Receiver<Snapshot>, Config);

pub fn router(snapshots: watch::Receiver<Snapshot>, config: Config) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(health::router())
        .with_state((snapshots, config))
}
