use std::env;

use anyhow::Context;

use crate::cache::DEFAULT_TTL;

pub const DEFAULT_NEO_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub nasa_api_key: String,
    pub neo_feed_url: String,

    // Days after today covered by one feed fetch (NeoWs caps this at 7)
    pub neo_feed_days: u32,
    // Feed cache time-to-live in seconds
    pub neo_cache_ttl: u64,

    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,

    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            nasa_api_key: env::var("NASA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string()),
            neo_feed_url: env::var("NEO_FEED_URL")
                .unwrap_or_else(|_| DEFAULT_NEO_FEED_URL.to_string()),

            neo_feed_days: Self::env_parse::<u32>("NEO_FEED_DAYS", 7).min(7),
            neo_cache_ttl: Self::env_parse("NEO_CACHE_TTL", DEFAULT_TTL.as_secs()),

            rate_limit_max_requests: Self::env_parse("RATE_LIMIT_MAX_REQUESTS", 100),
            rate_limit_window_secs: Self::env_parse("RATE_LIMIT_WINDOW_SECS", 60),

            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: Self::env_parse("SERVER_PORT", 8080),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
        env::var(key)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_on_garbage() {
        env::set_var("COSMIC_WATCH_TEST_PORT", "not-a-port");
        assert_eq!(Config::env_parse::<u16>("COSMIC_WATCH_TEST_PORT", 8080), 8080);

        env::set_var("COSMIC_WATCH_TEST_PORT", "9090");
        assert_eq!(Config::env_parse::<u16>("COSMIC_WATCH_TEST_PORT", 8080), 9090);

        env::remove_var("COSMIC_WATCH_TEST_PORT");
        assert_eq!(Config::env_parse::<u64>("COSMIC_WATCH_TEST_PORT", 600), 600);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            database_url: "postgres://localhost/cosmic".to_string(),
            nasa_api_key: "DEMO_KEY".to_string(),
            neo_feed_url: DEFAULT_NEO_FEED_URL.to_string(),
            neo_feed_days: 7,
            neo_cache_ttl: 600,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 60,
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
        };

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }
}
