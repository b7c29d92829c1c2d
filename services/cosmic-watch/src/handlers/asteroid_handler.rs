use axum::{extract::State, Json};

use crate::domain::NearEarthObject;
use crate::errors::ApiError;
use crate::services::{AppState, AsteroidService};

/// Scored near-Earth objects for the current feed window
pub async fn asteroid_feed(
    State(state): State<AppState>,
) -> Result<Json<Vec<NearEarthObject>>, ApiError> {
    let objects = AsteroidService::scored_feed(&state.feed).await?;
    Ok(Json(objects))
}
