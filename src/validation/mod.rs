//! Link validation logic
//!
//! Internal references are resolved against the filesystem; external ones
//! are probed over HTTP with retry and backoff.

pub mod resolver;
pub mod verifier;

// Re-export commonly used items
pub use resolver::InternalResolver;
pub use verifier::{AttemptResult, ExternalVerifier, ReqwestTransport, RetryPolicy, Transport};
