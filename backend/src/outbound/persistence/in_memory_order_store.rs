//! Process-local [`OrderStore`] backed by an insertion-ordered vector.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{OrderFilter, OrderStore, OrderStoreError};
use crate::domain::{Order, OrderId, OrderStatus, TransitionPolicy};

/// In-memory order store.
///
/// One mutex guards the whole collection and is held only for the duration
/// of a single operation. Lookups are linear scans.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrderStore {
    /// Number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Order>> {
        // Every mutation completes before the guard drops, so a poisoned
        // vector is still consistent.
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<(), OrderStoreError> {
        let mut orders = self.lock();
        if orders.iter().any(|existing| existing.id() == order.id()) {
            return Err(OrderStoreError::duplicate_id(order.id().as_str()));
        }
        orders.push(order);
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Order, OrderStoreError> {
        self.lock()
            .iter()
            .find(|order| order.id() == id)
            .cloned()
            .ok_or_else(|| OrderStoreError::not_found(id.as_str()))
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrderStoreError> {
        Ok(self
            .lock()
            .iter()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect())
    }

    async fn remove(&self, id: &OrderId) -> Result<(), OrderStoreError> {
        let mut orders = self.lock();
        let index = orders
            .iter()
            .position(|order| order.id() == id)
            .ok_or_else(|| OrderStoreError::not_found(id.as_str()))?;
        orders.remove(index);
        Ok(())
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        policy: TransitionPolicy,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError> {
        let mut orders = self.lock();
        let order = orders
            .iter_mut()
            .find(|order| order.id() == id)
            .ok_or_else(|| OrderStoreError::not_found(id.as_str()))?;
        let from = order.status();
        if !policy.permits(from, status) {
            return Err(OrderStoreError::transition_refused(from, status));
        }
        order.set_status(status, now);
        Ok(order.clone())
    }
}
