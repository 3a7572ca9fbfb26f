//! Orders service library modules.
//!
//! An order ledger kept in memory. Orders are created only for users the
//! remote user directory confirms, and their status moves under a
//! configurable transition policy.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;
