//! In-memory stand-in for the run log service.
//!
//! Serves `POST /log` and `GET /version` like the real service, plus
//! `GET /runs` so tests can inspect what was stored. The DTOs here are
//! deliberately separate from `runlog-core`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

/// Status codes the service accepts on a run.
pub const KNOWN_STATUS_CODES: [i64; 9] = [0, 1100, 1101, 1102, 1200, 2000, 2001, 9999, 10000];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub score: f64,
    pub status_code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub browser_name: String,
    pub browser_version: String,
    pub plugin_name: String,
    pub plugin_version: String,
    pub extension_version: String,
    pub url: String,
    pub path: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LogBody {
    One(Run),
    Many(Vec<Run>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VersionBody {
    pub version: String,
}

#[derive(Clone)]
struct AppState {
    version: Arc<str>,
    runs: Arc<RwLock<Vec<Run>>>,
}

/// Router reporting this crate's version.
pub fn app() -> Router {
    app_with_version(env!("CARGO_PKG_VERSION"))
}

pub fn app_with_version(version: &str) -> Router {
    let state = AppState {
        version: Arc::from(version),
        runs: Arc::new(RwLock::new(Vec::new())),
    };
    Router::new()
        .route("/log", post(log_runs))
        .route("/version", get(get_version))
        .route("/runs", get(list_runs))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn log_runs(State(state): State<AppState>, Json(body): Json<LogBody>) -> StatusCode {
    let runs = match body {
        LogBody::One(run) => vec![run],
        LogBody::Many(runs) => runs,
    };
    if let Some(bad) = runs.iter().find(|r| !KNOWN_STATUS_CODES.contains(&r.status_code)) {
        warn!(status_code = bad.status_code, "rejecting run with unknown status code");
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    info!(count = runs.len(), "runs logged");
    state.runs.write().await.extend(runs);
    StatusCode::NO_CONTENT
}

async fn get_version(State(state): State<AppState>) -> Json<VersionBody> {
    Json(VersionBody {
        version: state.version.to_string(),
    })
}

async fn list_runs(State(state): State<AppState>) -> Json<Vec<Run>> {
    Json(state.runs.read().await.clone())
}
