//! Health check handler.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

/// GET /health response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Where snapshots are stored (directory path or `memory`).
    pub snapshots_dir: String,
    pub timestamp: DateTime<Utc>,
}

/// GET /health - Liveness probe.
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        snapshots_dir: state.store.location(),
        timestamp: Utc::now(),
    })
}
