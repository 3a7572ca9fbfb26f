//! Order storage adapters.
//!
//! Orders live in process memory only and are discarded when the process
//! exits.

mod in_memory_order_store;

pub use in_memory_order_store::InMemoryOrderStore;
