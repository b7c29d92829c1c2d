//! In-process cache for the upstream NEO feed.
//!
//! A single slot holding the last payload and when it was fetched. Refreshes
//! happen inline on the first request after the TTL runs out.

mod feed_cache;

pub use feed_cache::{CacheSnapshot, CachedPayload, FeedCache, DEFAULT_TTL};
