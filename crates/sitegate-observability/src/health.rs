//! Health endpoints
//!
//! This module provides HTTP health check endpoints:
//! - `/healthz` - Liveness check (always returns 200 OK if server is running)
//! - `/readyz` - Readiness check (delegates to a [`ReadinessChecker`])
//! - `/metrics` - Prometheus metrics endpoint

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus::TextEncoder;
use serde::Serialize;
use std::sync::Arc;

use crate::metrics::Metrics;

/// Liveness response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Readiness response
#[derive(Debug, Serialize)]
struct ReadinessResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Outcome of a readiness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub ready: bool,
    /// Human-readable summary served on `/readyz`
    pub detail: String,
}

/// Decides whether the service can take traffic
pub trait ReadinessChecker: Send + Sync {
    fn check(&self) -> Readiness;
}

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub metrics: Arc<Metrics>,
    pub readiness_checker: Option<Arc<dyn ReadinessChecker>>,
}

impl HealthState {
    /// Health state that always reports ready
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            readiness_checker: None,
        }
    }

    /// Health state whose readiness is decided by `readiness_checker`
    pub fn with_readiness_checker(
        metrics: Arc<Metrics>,
        readiness_checker: Arc<dyn ReadinessChecker>,
    ) -> Self {
        Self {
            metrics,
            readiness_checker: Some(readiness_checker),
        }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// 503 Service Unavailable while the checker reports not ready
async fn readyz(State(state): State<HealthState>) -> Response {
    let Some(checker) = &state.readiness_checker else {
        return Json(ReadinessResponse {
            status: "ready",
            detail: None,
        })
        .into_response();
    };

    let readiness = checker.check();
    let (code, status) = if readiness.ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(ReadinessResponse {
            status,
            detail: Some(readiness.detail),
        }),
    )
        .into_response()
}

/// Prometheus metrics handler
async fn metrics_handler(State(state): State<HealthState>) -> Response {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry().gather();

    match encoder.encode_to_string(&metric_families) {
        Ok(body) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to encode metrics: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", err),
            )
                .into_response()
        }
    }
}
