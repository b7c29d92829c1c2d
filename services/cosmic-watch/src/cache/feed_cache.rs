use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::clients::FeedSource;
use crate::errors::NeoError;

pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct CachedPayload {
    pub data: Arc<Value>,
    pub fetched_at: DateTime<Utc>,
    stored_at: Instant,
}

impl CachedPayload {
    fn new(data: Value) -> Self {
        Self {
            data: Arc::new(data),
            fetched_at: Utc::now(),
            stored_at: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub age_secs: u64,
    pub fresh: bool,
}

/// Single-slot TTL cache in front of a [`FeedSource`].
///
/// Created once at startup and shared through `AppState`. Refreshes are
/// serialized by `refresh`, so callers arriving during a miss wait for that one
/// fetch instead of issuing their own. The slot itself is only locked briefly,
/// so readers such as [`FeedCache::snapshot`] never wait on upstream.
pub struct FeedCache {
    source: Arc<dyn FeedSource>,
    ttl: Duration,
    slot: RwLock<Option<CachedPayload>>,
    refresh: Mutex<()>,
}

impl FeedCache {
    pub fn new(source: Arc<dyn FeedSource>, ttl: Duration) -> Self {
        info!("Initializing feed cache with TTL {} seconds", ttl.as_secs());

        Self {
            source,
            ttl,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn fresh_payload(&self) -> Option<Arc<Value>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|cached| cached.age() < self.ttl)
            .map(|cached| Arc::clone(&cached.data))
    }

    /// Return the cached payload while fresh, otherwise fetch and store a new one.
    ///
    /// A failed fetch is returned as-is. The previous payload stays in the slot but
    /// is not served.
    pub async fn get(&self) -> Result<Arc<Value>, NeoError> {
        if let Some(data) = self.fresh_payload().await {
            debug!("Feed cache hit");
            return Ok(data);
        }

        let _refresh = self.refresh.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(data) = self.fresh_payload().await {
            debug!("Feed cache refreshed by a concurrent request");
            return Ok(data);
        }

        info!("Feed cache empty or expired, fetching");

        let payload = self.source.fetch_feed().await.map_err(|e| {
            error!("Feed refresh failed: {}", e);
            e
        })?;

        let cached = CachedPayload::new(payload);
        let data = Arc::clone(&cached.data);
        *self.slot.write().await = Some(cached);

        info!("Feed cache refreshed");
        Ok(data)
    }

    /// Metadata about the stored payload. Never fetches and never waits on a refresh.
    pub async fn snapshot(&self) -> Option<CacheSnapshot> {
        let slot = self.slot.read().await;
        slot.as_ref().map(|cached| {
            let age = cached.age();
            CacheSnapshot {
                fetched_at: cached.fetched_at,
                age_secs: age.as_secs(),
                fresh: age < self.ttl,
            }
        })
    }
}
