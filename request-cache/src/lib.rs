//! Request coalescing for asynchronous fetches.
//!
//! A [`RequestCache`] maps a [`CacheKey`] to a pending or finished
//! [`Computation`]. Callers asking for the same key within the TTL share one
//! execution instead of each issuing their own round-trip.

pub mod cache;
mod computation;
mod config;
mod error;
mod key;


pub use cache::{CacheStats, RequestCache, SharedRequestCache};
pub use computation::{computation, same_computation, Computation};
pub use config::{CacheConfig, DEFAULT_TTL_MS};
pub use error::Error;
pub use key::CacheKey;
