use tracing::info;

use crate::cache::FeedCache;
use crate::domain::{assemble_feed, NearEarthObject, RiskLevel};
use crate::errors::ApiError;

pub struct AsteroidService;

impl AsteroidService {
    /// Cached feed, flattened and scored. Fails whole on any upstream or parse error.
    pub async fn scored_feed(cache: &FeedCache) -> Result<Vec<NearEarthObject>, ApiError> {
        let payload = cache.get().await?;
        let objects = assemble_feed(&payload)?;

        let high = objects
            .iter()
            .filter(|o| o.risk_level == RiskLevel::High)
            .count();
        info!(
            "Assembled NEO feed: {} objects, {} high risk",
            objects.len(),
            high
        );

        Ok(objects)
    }
}
