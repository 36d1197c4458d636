use getset::Getters;
use log::info;
use std::sync::Arc;

use super::config::Config;
use crate::client::JobDataClient;
use crate::error::Error;
use crate::source::{FileJobSource, JobSource};

#[derive(Getters)]
#[get = "pub"]
pub struct Context {
    client: JobDataClient,
    config: Config,
}

impl Context {
    pub fn new(config: Config) -> Result<Self, Error> {
        let source = Arc::new(FileJobSource::new(config.jobs_file.clone()));
        Self::with_source(config, source)
    }

    pub fn with_source(config: Config, source: Arc<dyn JobSource>) -> Result<Self, Error> {
        let cache_config = config.cache.cache_config()?;
        info!(
            "Initialized job data cache (TTL: {}ms, enabled: {})",
            cache_config.ttl_ms(),
            cache_config.enabled
        );

        Ok(Self {
            client: JobDataClient::new(source, cache_config),
            config,
        })
    }
}

pub type ContextPointer = Arc<Context>;
