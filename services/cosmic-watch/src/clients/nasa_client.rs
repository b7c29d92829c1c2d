use async_trait::async_trait;
use chrono::{Duration as DateDuration, NaiveDate, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

use crate::clients::FeedSource;
use crate::config::Config;
use crate::errors::NeoError;

pub struct NasaClient {
    client: Client,
    feed_url: String,
    api_key: String,
    window_days: u32,
}

impl NasaClient {
    pub fn new(
        feed_url: impl Into<String>,
        api_key: impl Into<String>,
        window_days: u32,
    ) -> Result<Self, NeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("CosmicWatch/0.1")
            .build()?;

        Ok(Self {
            client,
            feed_url: feed_url.into(),
            api_key: api_key.into(),
            window_days,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, NeoError> {
        Self::new(
            config.neo_feed_url.clone(),
            config.nasa_api_key.clone(),
            config.neo_feed_days,
        )
    }

    /// Fetch the Near-Earth Object feed for an explicit date window. Single attempt.
    pub async fn fetch_neo_feed(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Value, NeoError> {
        info!("Fetching NEO feed from {} to {}", start_date, end_date);

        let start = start_date.to_string();
        let end = end_date.to_string();

        let response = self
            .client
            .get(&self.feed_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("NEO feed request failed with status {}", status);
            return Err(NeoError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let payload = response.json::<Value>().await?;
        Ok(payload)
    }

    /// Window used by the cache: today (UTC) through `window_days` ahead.
    pub fn current_window(&self) -> (NaiveDate, NaiveDate) {
        let today = Utc::now().date_naive();
        (today, today + DateDuration::days(i64::from(self.window_days)))
    }
}

#[async_trait]
impl FeedSource for NasaClient {
    async fn fetch_feed(&self) -> Result<Value, NeoError> {
        let (start, end) = self.current_window();
        self.fetch_neo_feed(start, end).await
    }
}
