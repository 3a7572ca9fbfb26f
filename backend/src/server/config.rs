//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::domain::TransitionPolicy;
use crate::outbound::user_directory::CircuitBreakerConfig;
use crate::settings::OrdersSettings;

const DEFAULT_USERS_SERVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users_service_url: Url,
    pub(crate) users_service_timeout: Duration,
    pub(crate) transition_policy: TransitionPolicy,
    pub(crate) circuit_breaker: Option<CircuitBreakerConfig>,
}

impl ServerConfig {
    /// Construct a configuration with default timeout, a permissive
    /// transition policy and no circuit breaker.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, users_service_url: Url) -> Self {
        Self {
            bind_addr,
            users_service_url,
            users_service_timeout: DEFAULT_USERS_SERVICE_TIMEOUT,
            transition_policy: TransitionPolicy::default(),
            circuit_breaker: None,
        }
    }

    /// Validate loaded settings and turn them into a server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for any invalid setting.
    pub fn from_settings(settings: &OrdersSettings) -> io::Result<Self> {
        let config = Self::new(settings.bind_addr()?, settings.users_service_url()?)
            .with_users_service_timeout(settings.users_service_timeout()?)
            .with_transition_policy(settings.transition_policy());
        Ok(match settings.circuit_breaker()? {
            Some(breaker) => config.with_circuit_breaker(breaker),
            None => config,
        })
    }

    /// Bound each user lookup by `timeout`.
    #[must_use]
    pub fn with_users_service_timeout(mut self, timeout: Duration) -> Self {
        self.users_service_timeout = timeout;
        self
    }

    /// Select the status transition policy.
    #[must_use]
    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// Guard user lookups with a circuit breaker.
    #[must_use]
    pub fn with_circuit_breaker(mut self, breaker: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = Some(breaker);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the user directory base URL.
    #[must_use]
    pub fn users_service_url(&self) -> &Url {
        &self.users_service_url
    }
}
