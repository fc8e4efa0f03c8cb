//! DNS MX resolution, with a TTL-bounded cache and an ESP provider classifier.
//!
//! The public entry point is [`check_mx`], which performs a synchronous lookup
//! using the system resolver and returns a [`MxStatus`] describing the outcome.
//! [`MxCache`] wraps a resolver call with a process-local, lazily-evicted cache
//! keyed on the lowercased domain.

mod cache;
mod error;
mod provider;
mod resolver;
mod types;

pub use cache::MxCache;
pub use error::MxError as Error;
pub use provider::{Provider, classify_provider};
pub use resolver::check_mx;
pub use types::{MxRecord, MxStatus};

#[cfg(test)]
mod tests;
