//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Service health with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK** — all components healthy
/// - **503 Service Unavailable** — one or more components degraded
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let click_queue = check_click_queue(&state);

    let all_healthy = database.status == "ok" && click_queue.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            database,
            click_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Database connectivity, probed through the default-domain query.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.domains.default_domain().await {
        Ok(domain) => CheckStatus {
            status: "ok",
            message: format!("Connected, default domain: {}", domain.hostname),
        },
        Err(e) => CheckStatus {
            status: "error",
            message: format!("Database check failed: {e}"),
        },
    }
}

fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_tx.is_closed() {
        CheckStatus {
            status: "error",
            message: "Click queue is closed".to_string(),
        }
    } else {
        CheckStatus {
            status: "ok",
            message: format!("Capacity: {}", state.click_tx.capacity()),
        }
    }
}
