//! Health check endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::context::AppContext;

/// Report process liveness and dependency health.
pub async fn health_check(State(context): State<Arc<AppContext>>) -> Json<serde_json::Value> {
    let db_status = match context.database_health().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!(error = %e, "database health check failed");
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status
        }
    }))
}
