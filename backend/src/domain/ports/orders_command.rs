//! Driving port for order mutations.
//!
//! Inbound adapters call [`OrdersCommand`] to create orders, change their
//! status and delete them. Failures use the [`OrderError`] taxonomy; adapters
//! convert them into the transport-agnostic error payload.

use async_trait::async_trait;

use crate::domain::{Order, OrderError, OrderId, OrderSubmission};

/// Driving port for order mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrdersCommand: Send + Sync {
    /// Validate a submission, verify its user and store a `pending` order.
    ///
    /// # Errors
    ///
    /// - [`OrderError::Validation`] for structural problems.
    /// - [`OrderError::UnverifiedUser`] when the directory does not confirm
    ///   the user.
    async fn create(&self, submission: OrderSubmission) -> Result<Order, OrderError>;

    /// Change an order's status.
    ///
    /// `status` is raw text; it is checked after the order is found.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`] when no order has `id`.
    /// - [`OrderError::InvalidStatus`] for unknown status text.
    /// - [`OrderError::TransitionNotAllowed`] when the policy refuses.
    async fn update_status(&self, id: &OrderId, status: &str) -> Result<Order, OrderError>;

    /// Remove an order permanently.
    ///
    /// # Errors
    ///
    /// [`OrderError::NotFound`] when no order has `id`.
    async fn delete(&self, id: &OrderId) -> Result<(), OrderError>;
}
