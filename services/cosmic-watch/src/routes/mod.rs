use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::handlers::{
    alert_create, alert_list, asteroid_feed, health_check, watchlist_add, watchlist_list,
    watchlist_get, watchlist_remove,
};
use crate::middleware::{rate_limit_middleware, request_logging_middleware};
use crate::services::AppState;

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Asteroid feed
        .route("/api/asteroids/feed", get(asteroid_feed))
        // Per-user records
        .route(
            "/api/users/:user_id/watchlist",
            get(watchlist_list).post(watchlist_add),
        )
        .route(
            "/api/users/:user_id/watchlist/:asteroid_id",
            get(watchlist_get).delete(watchlist_remove),
        )
        .route(
            "/api/users/:user_id/alerts",
            get(alert_list).post(alert_create),
        )
        // Apply middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
