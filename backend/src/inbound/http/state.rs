//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{OrdersCommand, OrdersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Order mutations.
    pub orders: Arc<dyn OrdersCommand>,
    /// Order reads.
    pub orders_query: Arc<dyn OrdersQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use orders_service::domain::OrderLifecycleService;
    /// use orders_service::domain::ports::StaticUserDirectory;
    /// use orders_service::inbound::http::state::HttpState;
    /// use orders_service::outbound::persistence::InMemoryOrderStore;
    ///
    /// let service = Arc::new(OrderLifecycleService::new(
    ///     Arc::new(InMemoryOrderStore::default()),
    ///     Arc::new(StaticUserDirectory::new(["u1"])),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _ = state.orders.clone();
    /// ```
    pub fn new(orders: Arc<dyn OrdersCommand>, orders_query: Arc<dyn OrdersQuery>) -> Self {
        Self {
            orders,
            orders_query,
        }
    }
}
