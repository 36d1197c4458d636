/// Errors raised while building cache keys or configuration.
///
/// Cache operations themselves never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid cache key `{key}`: {reason}")]
    InvalidKey { key: String, reason: &'static str },
    #[error("Invalid cache TTL: {0}ms")]
    InvalidTtl(u64),
}
