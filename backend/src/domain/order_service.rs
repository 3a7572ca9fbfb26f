//! Order lifecycle domain service.
//!
//! [`OrderLifecycleService`] implements the order driving ports. It owns the
//! order store handed to it at start-up, asks the user directory before
//! creating anything, and routes every status change through one
//! [`TransitionPolicy`].
//!
//! The store is never locked across the directory call: verification happens
//! first and the insert is a separate store operation. Status changes are
//! judged by the store against the record it is about to write, so two
//! concurrent updates cannot both pass the policy on a stale status.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    OrderFilter, OrderStore, OrderStoreError, OrdersCommand, OrdersQuery, UserDirectory,
};
use crate::domain::{
    Order, OrderError, OrderId, OrderStatus, OrderSubmission, TransitionPolicy, UnknownStatus,
};

/// Order lifecycle service implementing [`OrdersCommand`] and [`OrdersQuery`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use orders_service::domain::ports::StaticUserDirectory;
/// use orders_service::domain::{OrderLifecycleService, TransitionPolicy};
/// use orders_service::outbound::persistence::InMemoryOrderStore;
///
/// let service = OrderLifecycleService::new(
///     Arc::new(InMemoryOrderStore::default()),
///     Arc::new(StaticUserDirectory::new(["u1"])),
///     Arc::new(DefaultClock),
/// )
/// .with_policy(TransitionPolicy::ForwardOnly);
/// assert_eq!(service.policy(), TransitionPolicy::ForwardOnly);
/// ```
#[derive(Clone)]
pub struct OrderLifecycleService<S, D> {
    store: Arc<S>,
    directory: Arc<D>,
    clock: Arc<dyn Clock>,
    policy: TransitionPolicy,
}

impl<S, D> OrderLifecycleService<S, D> {
    /// Create a service with the permissive transition policy.
    pub fn new(store: Arc<S>, directory: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            directory,
            clock,
            policy: TransitionPolicy::default(),
        }
    }

    /// Replace the transition policy.
    #[must_use]
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active transition policy.
    #[must_use]
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }
}

impl<S, D> OrderLifecycleService<S, D>
where
    S: OrderStore,
    D: UserDirectory,
{
    fn map_store_error(error: OrderStoreError) -> OrderError {
        match error {
            OrderStoreError::NotFound { id } => OrderError::NotFound {
                id: OrderId::new(id),
            },
            OrderStoreError::DuplicateId { id } => OrderError::DuplicateId {
                id: OrderId::new(id),
            },
            OrderStoreError::TransitionRefused { from, to } => {
                OrderError::TransitionNotAllowed { from, to }
            }
        }
    }

    fn parse_status(raw: &str) -> Result<OrderStatus, OrderError> {
        raw.parse()
            .map_err(|UnknownStatus(status)| OrderError::InvalidStatus { status })
    }
}

#[async_trait]
impl<S, D> OrdersCommand for OrderLifecycleService<S, D>
where
    S: OrderStore,
    D: UserDirectory,
{
    async fn create(&self, submission: OrderSubmission) -> Result<Order, OrderError> {
        let validated = submission.validate()?;

        if !self.directory.exists(&validated.user_id).await {
            warn!(user_id = %validated.user_id, "order rejected: user not verified");
            return Err(OrderError::UnverifiedUser {
                user_id: validated.user_id,
            });
        }

        let order = Order::new(
            OrderId::random(),
            validated.user_id,
            validated.items,
            validated.total,
            self.clock.utc(),
        )
        .map_err(|err| OrderError::Validation(err.into()))?;

        self.store
            .insert(order.clone())
            .await
            .map_err(Self::map_store_error)?;
        info!(
            order_id = %order.id(),
            user_id = %order.user_id(),
            items = order.items().len(),
            "order created"
        );
        Ok(order)
    }

    async fn update_status(&self, id: &OrderId, status: &str) -> Result<Order, OrderError> {
        self.store.get(id).await.map_err(Self::map_store_error)?;
        let next = Self::parse_status(status)?;

        let updated = self
            .store
            .update_status(id, next, self.policy, self.clock.utc())
            .await
            .inspect_err(|err| {
                if let OrderStoreError::TransitionRefused { from, to } = err {
                    warn!(order_id = %id, from = %from, to = %to, "status transition refused");
                }
            })
            .map_err(Self::map_store_error)?;
        info!(order_id = %id, to = %next, "order status updated");
        Ok(updated)
    }

    async fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        self.store.remove(id).await.map_err(Self::map_store_error)?;
        info!(order_id = %id, "order deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, D> OrdersQuery for OrderLifecycleService<S, D>
where
    S: OrderStore,
    D: UserDirectory,
{
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderError> {
        self.store
            .list(filter)
            .await
            .map_err(Self::map_store_error)
    }

    async fn get(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.store.get(id).await.map_err(Self::map_store_error)
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
