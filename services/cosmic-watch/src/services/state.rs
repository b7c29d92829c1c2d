use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::FeedCache;
use crate::config::Config;
use crate::middleware::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub feed: Arc<FeedCache>,
    pub config: Config,
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn new(pool: PgPool, feed: FeedCache, config: Config) -> Self {
        Self {
            pool,
            feed: Arc::new(feed),
            config,
            limiter: RateLimiter::default(),
        }
    }
}
