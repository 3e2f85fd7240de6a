//! Configuration Module
//!
//! Loads proxy configuration from command-line flags, falling back to
//! environment variables and then to built-in defaults.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

const DEFAULT_REDIS_ADDR: &str = "redis:6379";
const DEFAULT_CACHE_TIME: i64 = 120;
const DEFAULT_CACHE_SIZE: usize = 5000;
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 3000;

/// Proxy configuration parameters.
///
/// Every value can be given as a flag or an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "redis_proxy")]
#[command(about = "Read-through HTTP caching proxy in front of Redis")]
#[command(version)]
pub struct Config {
    /// Address of the backing Redis (host:port)
    #[arg(long, env = "REDIS_ADDR", default_value = DEFAULT_REDIS_ADDR, value_name = "HOST:PORT")]
    pub redis_addr: String,

    /// Cache expiry time in seconds; zero or less disables caching
    #[arg(
        long,
        env = "CACHE_TIME",
        default_value_t = DEFAULT_CACHE_TIME,
        allow_hyphen_values = true,
        value_name = "SECONDS"
    )]
    pub cache_time: i64,

    /// Cache capacity (number of keys)
    #[arg(long, env = "CACHE_SIZE", default_value_t = DEFAULT_CACHE_SIZE, value_name = "COUNT")]
    pub cache_size: usize,

    /// TCP port the proxy listens on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Upper bound on a single backing store round trip, in milliseconds
    #[arg(
        long,
        env = "BACKEND_TIMEOUT_MS",
        default_value_t = DEFAULT_BACKEND_TIMEOUT_MS,
        value_name = "MILLIS"
    )]
    pub backend_timeout_ms: u64,
}

impl Config {
    /// TTL applied to every cached entry. Non-positive values yield zero,
    /// which makes every entry expired on arrival.
    pub fn ttl(&self) -> Duration {
        u64::try_from(self.cache_time)
            .map(Duration::from_secs)
            .unwrap_or(Duration::ZERO)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_addr: DEFAULT_REDIS_ADDR.to_string(),
            cache_time: DEFAULT_CACHE_TIME,
            cache_size: DEFAULT_CACHE_SIZE,
            port: DEFAULT_PORT,
            backend_timeout_ms: DEFAULT_BACKEND_TIMEOUT_MS,
        }
    }
}
