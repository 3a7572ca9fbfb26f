//! Driving port for order reads.

use async_trait::async_trait;

use super::OrderFilter;
use crate::domain::{Order, OrderError, OrderId};

/// Driving port for order reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrdersQuery: Send + Sync {
    /// Orders matching `filter`, in creation order.
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderError>;

    /// A single order.
    ///
    /// # Errors
    ///
    /// [`OrderError::NotFound`] when no order has `id`.
    async fn get(&self, id: &OrderId) -> Result<Order, OrderError>;
}
