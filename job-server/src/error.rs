/// Errors raised by a job source.
///
/// These end up cached next to successful results, so callers within the
/// TTL observe the same failure.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Job `{0}` not found")]
    NotFound(String),
    #[error("Failed to read job data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse job data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("Invalid log level `{0}`")]
    LogLevel(String),
    #[error(transparent)]
    Cache(#[from] request_cache::Error),
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] log::SetLoggerError),
    #[error("Server failed: {0}")]
    Launch(#[from] rocket::Error),
}
