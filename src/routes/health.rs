use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::db::users;
use crate::AppState;

/// Health check endpoint
///
/// Reports whether the credential table in the data directory is readable.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let storage = state.storage.clone();
    let storage_status = tokio::task::spawn_blocking(move || match users::load_users(&storage) {
        Ok(_) => "available",
        Err(e) => {
            tracing::error!("Storage health check failed: {:?}", e);
            "unavailable"
        }
    })
    .await
    .unwrap_or("error");

    Json(json!({
        "status": if storage_status == "available" { "healthy" } else { "unhealthy" },
        "storage": storage_status,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
