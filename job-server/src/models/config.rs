use crate::error::Error;
use figment::providers::{Format, Yaml};
use figment::Figment;
use request_cache::{CacheConfig, DEFAULT_TTL_MS};
use serde::Deserialize;
use serde_inline_default::serde_inline_default;
use simplelog::LevelFilter;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

const DEFAULT_CACHE_ENABLED: bool = true;

#[serde_inline_default]
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde_inline_default(DEFAULT_TTL_MS)]
    pub ttl_ms: u64,
    #[serde_inline_default(DEFAULT_CACHE_ENABLED)]
    pub enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            enabled: DEFAULT_CACHE_ENABLED,
        }
    }
}

impl CacheSettings {
    pub fn cache_config(&self) -> Result<CacheConfig, Error> {
        Ok(CacheConfig::from_millis(self.ttl_ms, self.enabled)?)
    }
}

#[serde_inline_default]
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde_inline_default(IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub address: IpAddr,
    #[serde_inline_default(8000)]
    pub port: u16,
    #[serde_inline_default("info".to_string())]
    pub log_level: String,
    #[serde_inline_default(PathBuf::from("jobs.json"))]
    pub jobs_file: PathBuf,
    #[serde(default)]
    pub cache: CacheSettings,
}

impl Config {
    /// Load the configuration from a YAML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, Error> {
        Ok(Figment::new().merge(Yaml::file(path)).extract()?)
    }

    pub fn log_level(&self) -> Result<LevelFilter, Error> {
        self.log_level
            .parse()
            .map_err(|_| Error::LogLevel(self.log_level.clone()))
    }
}
