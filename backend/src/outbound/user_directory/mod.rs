//! User directory outbound adapters.
//!
//! [`HttpUserDirectory`] implements the `UserDirectory` port against the
//! remote users service and can be wrapped in a [`CircuitBreaker`].

mod circuit_breaker;
mod http_client;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};
pub use http_client::HttpUserDirectory;
