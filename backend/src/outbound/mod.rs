//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: process-local order storage.
//! - **user_directory**: HTTP client for the remote user directory, with an
//!   optional circuit breaker.
//!
//! Adapters translate between domain types and infrastructure details. They
//! contain no business rules.

pub mod persistence;
pub mod user_directory;
