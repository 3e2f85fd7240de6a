//! Redis Proxy - A read-through HTTP cache in front of Redis
//!
//! Serves `GET /<key>` from a bounded in-memory cache with TTL expiration and
//! LRU eviction, falling back to the backing store on a miss.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod proxy;

pub use api::AppState;
pub use config::Config;
pub use proxy::Proxy;
