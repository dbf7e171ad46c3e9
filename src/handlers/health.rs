//! Health check handler

use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;
use std::time::Instant;

use crate::TradeLedger;
use crate::models::{ApiResponse, HealthCheckResponse};

/// Health endpoints
#[derive(Clone)]
pub struct HealthHandlers {
    ledger: Arc<TradeLedger>,
    start_time: Instant,
}

impl HealthHandlers {
    /// Create new health handlers
    #[must_use]
    pub fn new(ledger: Arc<TradeLedger>, start_time: Instant) -> Self {
        Self { ledger, start_time }
    }

    /// Health check endpoint
    pub async fn health_check(
        State(handlers): State<Self>,
    ) -> Json<ApiResponse<HealthCheckResponse>> {
        let response = HealthCheckResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: handlers.start_time.elapsed().as_secs(),
            metrics: handlers.ledger.metrics(),
        };

        Json(ApiResponse::success(response))
    }
}
