use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::domain::{WatchlistEntry, WatchlistInput};
use crate::errors::ApiError;
use crate::repo::WatchlistRepo;
use crate::services::AppState;

pub async fn watchlist_list(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<WatchlistEntry>>, ApiError> {
    let repo = WatchlistRepo::new(state.pool.clone());
    let entries = repo.list_for_user(user_id).await?;
    Ok(Json(entries))
}

/// Add an asteroid to the user's watchlist
pub async fn watchlist_add(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(input): Json<WatchlistInput>,
) -> Result<Json<WatchlistEntry>, ApiError> {
    input.validate()?;

    let repo = WatchlistRepo::new(state.pool.clone());
    let entry = repo.insert(user_id, &input.asteroid_id, &input.name).await?;

    tracing::info!(
        "User {} is watching asteroid {} ({})",
        user_id,
        entry.asteroid_id,
        entry.name
    );
    Ok(Json(entry))
}

pub async fn watchlist_get(
    State(state): State<AppState>,
    Path((user_id, asteroid_id)): Path<(i64, String)>,
) -> Result<Json<WatchlistEntry>, ApiError> {
    let repo = WatchlistRepo::new(state.pool.clone());

    repo.find(user_id, &asteroid_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "Asteroid {} is not on the watchlist of user {}",
                asteroid_id, user_id
            ))
        })
}

pub async fn watchlist_remove(
    State(state): State<AppState>,
    Path((user_id, asteroid_id)): Path<(i64, String)>,
) -> Result<Json<Value>, ApiError> {
    let repo = WatchlistRepo::new(state.pool.clone());

    if !repo.delete(user_id, &asteroid_id).await? {
        return Err(ApiError::not_found(format!(
            "Asteroid {} is not on the watchlist of user {}",
            asteroid_id, user_id
        )));
    }

    Ok(Json(json!({
        "ok": true,
        "removed": asteroid_id
    })))
}
