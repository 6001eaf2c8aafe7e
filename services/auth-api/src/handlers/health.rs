//! Health check handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::time::Instant;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checks: ReadyChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyChecks {
    pub database: CheckResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<CheckResult>,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: &'static str,
    pub latency_ms: u64,
}

impl CheckResult {
    fn from_outcome<E: std::fmt::Display>(
        name: &'static str,
        outcome: Result<(), E>,
        start: Instant,
    ) -> Self {
        let latency_ms = start.elapsed().as_millis() as u64;
        let status = match outcome {
            Ok(()) => "ok",
            Err(e) => {
                tracing::warn!(check = name, error = %e, "readiness check failed");
                "error"
            }
        };
        Self { status, latency_ms }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// GET /health - Liveness probe (fast, no dependencies)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "auth-api",
    })
}

/// GET /ready - Readiness probe (checks database and Redis connectivity)
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, (StatusCode, Json<ReadyResponse>)> {
    let start = Instant::now();
    let db_result = sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map(|_| ());
    let database = CheckResult::from_outcome("database", db_result, start);

    let redis = match &state.redis {
        Some(pool) => {
            let start = Instant::now();
            Some(CheckResult::from_outcome(
                "redis",
                warden_kv::ping(pool).await,
                start,
            ))
        }
        None => None,
    };

    let healthy = database.is_ok() && redis.as_ref().map_or(true, CheckResult::is_ok);
    let body = ReadyResponse {
        status: if healthy { "ready" } else { "not_ready" },
        service: "auth-api",
        checks: ReadyChecks { database, redis },
    };

    if healthy {
        Ok(Json(body))
    } else {
        // Return 503 if any check fails
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(body)))
    }
}
