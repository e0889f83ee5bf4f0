//! Liveness endpoint, mounted outside `/api/v1` and unauthenticated.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `ok`, or `degraded` while the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthStatus {
    fn from_db(db_healthy: bool) -> Self {
        HealthStatus {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let db_healthy = match questline_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            false
        }
    };
    Json(HealthStatus::from_db(db_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
