mod api;
mod client;
mod error;
mod models;
mod source;

use error::Error;
use log::info;
use models::config::Config;
use models::context::Context;
use rocket::config::LogLevel;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "job-server.yaml";

fn init_logging(config: &Config) -> Result<(), Error> {
    TermLogger::init(
        config.log_level()?,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    Ok(())
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&config_path)?;
    init_logging(&config)?;
    info!("Loaded configuration from {}", config_path.display());

    let rocket_config = rocket::Config {
        address: config.address,
        port: config.port,
        // Logging goes through simplelog
        log_level: LogLevel::Off,
        ..rocket::Config::release_default()
    };
    let context = Arc::new(Context::new(config)?);

    api::build(context, rocket_config).launch().await?;
    Ok(())
}
