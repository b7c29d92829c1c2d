use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::services::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let feed = state.feed.snapshot().await;

    Ok(Json(json!({
        "status": "ok",
        "now": Utc::now(),
        "service": "cosmic-watch",
        "feed_cache": feed,
        "feed_cache_ttl_secs": state.feed.ttl().as_secs()
    })))
}
