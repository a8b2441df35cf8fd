//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let storage = storage_status(&state).await;
    let response = HealthResponse {
        status: if storage == "unreachable" { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        storage,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if storage == "unreachable" {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}

#[cfg(feature = "postgres")]
async fn storage_status(state: &AppState) -> &'static str {
    match &state.db {
        Some(db) => match db.main.ping().await {
            Ok(()) => "postgres",
            Err(e) => {
                tracing::error!("Database ping failed: {}", e);
                "unreachable"
            }
        },
        None => "in-memory",
    }
}

#[cfg(not(feature = "postgres"))]
async fn storage_status(_state: &AppState) -> &'static str {
    "in-memory"
}
