//! Liveness and readiness probes.
//!
//! Readiness reports which record store backs the server so operators can
//! spot a deployment that silently fell back to memory.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Record store behind the running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Diesel repositories over PostgreSQL.
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Readiness body returned by `/health/ready`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessReport {
    pub ready: bool,
    pub store: StoreBackend,
}

/// Readiness flag shared with the server bootstrap.
pub struct HealthState {
    store: StoreBackend,
    ready: AtomicBool,
}

impl HealthState {
    /// Not-yet-ready state for a server backed by `store`.
    pub fn new(store: StoreBackend) -> Self {
        Self {
            store,
            ready: AtomicBool::new(false),
        }
    }

    /// Start reporting ready; called once the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn report(&self) -> ReadinessReport {
        ReadinessReport {
            ready: self.ready.load(Ordering::Acquire),
            store: self.store,
        }
    }
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Seeded and listening", body = ReadinessReport),
        (status = 503, description = "Still starting", body = ReadinessReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let report = state.report();
    let mut response = if report.ready {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(report)
}

/// Liveness probe; answers as long as the worker threads do.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is serving requests"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}
