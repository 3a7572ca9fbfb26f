//! Driven port for order record storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Order, OrderId, OrderStatus, TransitionPolicy};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order store adapters.
    pub enum OrderStoreError {
        /// No record has the given identifier.
        NotFound { id: String } => "order {id} not found",
        /// A record with the given identifier already exists.
        DuplicateId { id: String } => "order {id} already exists",
        /// The transition policy refused the record's current status change.
        TransitionRefused { from: OrderStatus, to: OrderStatus } =>
            "order cannot move from {from} to {to}",
    }
}

/// Predicate applied when listing orders.
///
/// Each supplied field must match exactly (case-sensitive string equality);
/// absent fields match everything. A status that names no known value
/// matches nothing.
///
/// # Examples
/// ```
/// use orders_service::domain::ports::OrderFilter;
///
/// let filter = OrderFilter::default().with_user_id("u1").with_status("shipped");
/// assert_eq!(filter.user_id(), Some("u1"));
/// assert_eq!(filter.status(), Some("shipped"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    user_id: Option<String>,
    status: Option<String>,
}

impl OrderFilter {
    /// Restrict results to one user.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Restrict results to one status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// User constraint, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Status constraint, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether `order` satisfies every supplied constraint.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        let user_matches = self
            .user_id()
            .is_none_or(|user_id| order.user_id().as_str() == user_id);
        let status_matches = self
            .status()
            .is_none_or(|status| order.status().as_str() == status);
        user_matches && status_matches
    }
}

/// Insertion-ordered collection of order records.
///
/// Implementations serialise access per operation. Callers must not assume a
/// record is unchanged between two calls, so any decision that depends on a
/// record's current state is made inside the operation that writes it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Append a new record.
    async fn insert(&self, order: Order) -> Result<(), OrderStoreError>;

    /// Fetch a record by identifier.
    async fn get(&self, id: &OrderId) -> Result<Order, OrderStoreError>;

    /// Records matching `filter`, in insertion order.
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderStoreError>;

    /// Delete a record.
    async fn remove(&self, id: &OrderId) -> Result<(), OrderStoreError>;

    /// Set a record's status and stamp its update time.
    ///
    /// `policy` judges the status the record holds at the moment of the
    /// write; a refusal leaves the record untouched.
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        policy: TransitionPolicy,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::Number;

    use super::*;
    use crate::domain::{OrderItem, UserId};

    #[fixture]
    fn order() -> Order {
        Order::new(
            OrderId::new("o-1"),
            UserId::new("u1").expect("non-empty"),
            vec![OrderItem::new("Laptop", Number::from(1), Number::from(999))],
            Number::from(999),
            Utc::now(),
        )
        .expect("one item")
    }

    #[rstest]
    #[case(OrderFilter::default(), true)]
    #[case(OrderFilter::default().with_user_id("u1"), true)]
    #[case(OrderFilter::default().with_user_id("u2"), false)]
    #[case(OrderFilter::default().with_user_id("U1"), false)]
    #[case(OrderFilter::default().with_status("pending"), true)]
    #[case(OrderFilter::default().with_status("Pending"), false)]
    #[case(OrderFilter::default().with_status("bogus"), false)]
    #[case(OrderFilter::default().with_user_id("u1").with_status("pending"), true)]
    #[case(OrderFilter::default().with_user_id("u1").with_status("shipped"), false)]
    fn filter_matches_exactly(order: Order, #[case] filter: OrderFilter, #[case] expected: bool) {
        assert_eq!(filter.matches(&order), expected);
    }

    #[rstest]
    fn errors_format_identifier() {
        assert_eq!(
            OrderStoreError::not_found("o-9").to_string(),
            "order o-9 not found"
        );
        assert_eq!(
            OrderStoreError::duplicate_id("o-9").to_string(),
            "order o-9 already exists"
        );
        assert_eq!(
            OrderStoreError::transition_refused(OrderStatus::Cancelled, OrderStatus::Processing)
                .to_string(),
            "order cannot move from cancelled to processing"
        );
    }
}
