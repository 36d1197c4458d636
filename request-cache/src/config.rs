use crate::Error;
use chrono::Duration;

/// Default time-to-live of a cache entry, in milliseconds (5 minutes).
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Configuration for the request cache
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// How long an entry stays registered after its last `set`
    pub ttl: Duration,
    /// Whether caching is enabled
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::milliseconds(DEFAULT_TTL_MS as i64),
            enabled: true,
        }
    }
}

impl CacheConfig {
    /// Create an enabled configuration with the given TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, enabled: true }
    }

    /// Create a configuration from a TTL in milliseconds, as found in config files
    pub fn from_millis(ttl_ms: u64, enabled: bool) -> Result<Self, Error> {
        let ttl = i64::try_from(ttl_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .ok_or(Error::InvalidTtl(ttl_ms))?;

        Ok(Self { ttl, enabled })
    }

    /// TTL as a std duration; negative TTLs expire immediately.
    pub(crate) fn ttl_std(&self) -> std::time::Duration {
        self.ttl.to_std().unwrap_or(std::time::Duration::ZERO)
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl.num_milliseconds()
    }
}
