use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::errors::ApiError;
use crate::services::AppState;

/// Fixed-window request counter per client key.
#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<RwLock<HashMap<String, (u32, Instant)>>>,
}

impl RateLimiter {
    /// Count one request for `client` at `now`; errors once it exceeds `max` in `window`.
    pub async fn check(
        &self,
        client: &str,
        max: u32,
        window: Duration,
        now: Instant,
    ) -> Result<(), ApiError> {
        let mut windows = self.windows.write().await;

        // Drop clients whose window has passed
        windows.retain(|_, (_, started)| now.duration_since(*started) < window);

        let entry = windows.entry(client.to_string()).or_insert((0, now));
        entry.0 += 1;

        if entry.0 > max {
            return Err(ApiError::rate_limit(format!(
                "Rate limit exceeded: {} requests per {} seconds",
                max,
                window.as_secs()
            )));
        }

        Ok(())
    }
}

pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = client_key(req.headers());

    state
        .limiter
        .check(
            &client,
            state.config.rate_limit_max_requests,
            Duration::from_secs(state.config.rate_limit_window_secs),
            Instant::now(),
        )
        .await?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn blocks_after_max_within_window() {
        let limiter = RateLimiter::default();
        let window = Duration::from_secs(60);
        let start = Instant::now();

        for _ in 0..3 {
            assert!(limiter.check("1.2.3.4", 3, window, start).await.is_ok());
        }
        let err = limiter.check("1.2.3.4", 3, window, start).await.unwrap_err();
        assert_eq!(err.code, "RATE_LIMIT_EXCEEDED");

        // Other clients are counted separately
        assert!(limiter.check("5.6.7.8", 3, window, start).await.is_ok());
    }

    #[tokio::test]
    async fn window_resets_after_expiry() {
        let limiter = RateLimiter::default();
        let window = Duration::from_secs(60);
        let start = Instant::now();

        assert!(limiter.check("a", 1, window, start).await.is_ok());
        assert!(limiter.check("a", 1, window, start).await.is_err());

        let later = start + Duration::from_secs(61);
        assert!(limiter.check("a", 1, window, later).await.is_ok());
    }

    #[test]
    fn client_key_prefers_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_key(&headers), "unknown");

        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_key(&headers), "10.0.0.2");

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_key(&headers), "203.0.113.7");
    }
}
