//! Health endpoints: a summary document for humans plus liveness and
//! readiness probes for orchestration and load balancers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::SecondsFormat;
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};

/// Service name reported by `GET /health`.
pub const SERVICE_NAME: &str = "orders-service";

/// Readiness and liveness flags reported to orchestrators.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    users_service_url: String,
    clock: Arc<dyn Clock>,
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new(users_service_url: impl Into<String>) -> Self {
        Self::with_clock(users_service_url, Arc::new(DefaultClock))
    }

    /// Create a health state reading time from `clock`.
    pub fn with_clock(users_service_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            users_service_url: users_service_url.into(),
            clock,
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Configured users-service base URL.
    pub fn users_service_url(&self) -> &str {
        &self.users_service_url
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub users_service_url: String,
}

/// Summary document. Always reports `OK` while the process can answer.
#[get("/health")]
pub async fn summary(state: web::Data<HealthState>) -> HttpResponse {
    let body = HealthSummary {
        status: "OK".to_owned(),
        service: SERVICE_NAME.to_owned(),
        timestamp: state
            .clock
            .utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        users_service_url: state.users_service_url().to_owned(),
    };
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// Readiness probe. Return 200 when dependencies are initialised and the server can handle traffic; return 503 otherwise.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
/// Call `HealthState::mark_unhealthy` before graceful shutdown to surface the drain early.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
