pub mod nasa_client;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::NeoError;

pub use nasa_client::NasaClient;

/// Anything that can produce a raw NeoWs feed payload.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self) -> Result<Value, NeoError>;
}
