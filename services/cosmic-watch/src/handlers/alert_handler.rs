use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::{Alert, AlertInput};
use crate::errors::ApiError;
use crate::repo::AlertRepo;
use crate::services::AppState;

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub upcoming: Option<bool>,
}

/// List a user's alerts, optionally only those not yet passed
pub async fn alert_list(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<AlertQuery>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let repo = AlertRepo::new(state.pool.clone());

    let alerts = if query.upcoming.unwrap_or(false) {
        repo.list_upcoming(user_id, Utc::now().date_naive()).await?
    } else {
        repo.list_for_user(user_id).await?
    };

    Ok(Json(alerts))
}

pub async fn alert_create(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(input): Json<AlertInput>,
) -> Result<Json<Alert>, ApiError> {
    input.validate()?;

    let repo = AlertRepo::new(state.pool.clone());
    let alert = repo
        .insert(user_id, &input.asteroid_name, input.approach_date)
        .await?;

    tracing::info!(
        "Created alert {} for user {}: {} on {}",
        alert.id,
        user_id,
        alert.asteroid_name,
        alert.approach_date
    );
    Ok(Json(alert))
}
