//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`OrdersCommand`], [`OrdersQuery`]) are what inbound
//! adapters call. Driven ports ([`OrderStore`], [`UserDirectory`]) are what
//! the domain needs from the outside world. Driven ports expose typed errors
//! so adapters map their failures into predictable variants.

mod macros;
mod order_store;
mod orders_command;
mod orders_query;
mod user_directory;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use order_store::MockOrderStore;
pub use order_store::{OrderFilter, OrderStore, OrderStoreError};
#[cfg(test)]
pub use orders_command::MockOrdersCommand;
pub use orders_command::OrdersCommand;
#[cfg(test)]
pub use orders_query::MockOrdersQuery;
pub use orders_query::OrdersQuery;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{StaticUserDirectory, UserDirectory, UserDirectoryError};
