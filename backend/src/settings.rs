//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ORDERS_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::TransitionPolicy;
use crate::outbound::user_directory::CircuitBreakerConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3002;
const DEFAULT_USERS_SERVICE_URL: &str = "http://localhost:3001";
const DEFAULT_USERS_SERVICE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_CIRCUIT_RESET_SECS: u64 = 30;

/// Configuration values for the orders service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORDERS")]
pub struct OrdersSettings {
    /// Address to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Base URL of the user directory.
    pub users_service_url: Option<String>,
    /// Per-request timeout for user lookups, in milliseconds.
    pub users_service_timeout_ms: Option<u64>,
    /// Refuse backwards status changes.
    #[ortho_config(default = false)]
    pub strict_transitions: bool,
    /// Consecutive directory failures that open the circuit. Unset disables
    /// the breaker.
    pub circuit_failure_threshold: Option<u32>,
    /// Seconds the circuit stays open before probing again.
    pub circuit_reset_secs: Option<u64>,
}

impl OrdersSettings {
    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen host {host:?}: {err}"),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Parsed user directory base URL.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when the value is not an
    /// absolute HTTP(S) URL.
    pub fn users_service_url(&self) -> io::Result<Url> {
        let raw = self
            .users_service_url
            .as_deref()
            .unwrap_or(DEFAULT_USERS_SERVICE_URL);
        let url = Url::parse(raw).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid users service URL {raw:?}: {err}"),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("users service URL must use http or https: {raw}"),
            ));
        }
        Ok(url)
    }

    /// Timeout applied to each user lookup.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for a zero timeout.
    pub fn users_service_timeout(&self) -> io::Result<Duration> {
        match self
            .users_service_timeout_ms
            .unwrap_or(DEFAULT_USERS_SERVICE_TIMEOUT_MS)
        {
            0 => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "users service timeout must be greater than zero",
            )),
            millis => Ok(Duration::from_millis(millis)),
        }
    }

    /// Status transition policy.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy {
        TransitionPolicy::from_strict(self.strict_transitions)
    }

    /// Circuit breaker settings, when a failure threshold is configured.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for a zero threshold.
    pub fn circuit_breaker(&self) -> io::Result<Option<CircuitBreakerConfig>> {
        let Some(failure_threshold) = self.circuit_failure_threshold else {
            return Ok(None);
        };
        if failure_threshold == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "circuit failure threshold must be greater than zero",
            ));
        }
        Ok(Some(CircuitBreakerConfig {
            failure_threshold,
            reset_timeout: Duration::from_secs(
                self.circuit_reset_secs
                    .unwrap_or(DEFAULT_CIRCUIT_RESET_SECS),
            ),
            ..CircuitBreakerConfig::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const KEYS: [&str; 7] = [
        "ORDERS_HOST",
        "ORDERS_PORT",
        "ORDERS_USERS_SERVICE_URL",
        "ORDERS_USERS_SERVICE_TIMEOUT_MS",
        "ORDERS_STRICT_TRANSITIONS",
        "ORDERS_CIRCUIT_FAILURE_THRESHOLD",
        "ORDERS_CIRCUIT_RESET_SECS",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> OrdersSettings {
        let _guard = lock_env(KEYS.map(|key| {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned());
            (key, value)
        }));
        OrdersSettings::load_from_iter([OsString::from("orders-service")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let settings = load_with(&[]);

        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], 3002))
        );
        assert_eq!(
            settings.users_service_url().expect("default url").as_str(),
            "http://localhost:3001/"
        );
        assert_eq!(
            settings.users_service_timeout().expect("default timeout"),
            Duration::from_secs(5)
        );
        assert_eq!(settings.transition_policy(), TransitionPolicy::Permissive);
        assert!(settings.circuit_breaker().expect("valid").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("ORDERS_HOST", "127.0.0.1"),
            ("ORDERS_PORT", "8088"),
            ("ORDERS_USERS_SERVICE_URL", "https://users.internal/api/"),
            ("ORDERS_USERS_SERVICE_TIMEOUT_MS", "250"),
            ("ORDERS_STRICT_TRANSITIONS", "true"),
            ("ORDERS_CIRCUIT_FAILURE_THRESHOLD", "3"),
            ("ORDERS_CIRCUIT_RESET_SECS", "10"),
        ]);

        assert_eq!(
            settings.bind_addr().expect("address"),
            SocketAddr::from(([127, 0, 0, 1], 8088))
        );
        assert_eq!(
            settings.users_service_url().expect("url").as_str(),
            "https://users.internal/api/"
        );
        assert_eq!(
            settings.users_service_timeout().expect("timeout"),
            Duration::from_millis(250)
        );
        assert_eq!(settings.transition_policy(), TransitionPolicy::ForwardOnly);
        let breaker = settings
            .circuit_breaker()
            .expect("valid")
            .expect("breaker configured");
        assert_eq!(breaker.failure_threshold, 3);
        assert_eq!(breaker.reset_timeout, Duration::from_secs(10));
    }

    #[rstest]
    #[case::not_a_url("ORDERS_USERS_SERVICE_URL", "not a url")]
    #[case::wrong_scheme("ORDERS_USERS_SERVICE_URL", "ftp://users.internal")]
    #[case::zero_timeout("ORDERS_USERS_SERVICE_TIMEOUT_MS", "0")]
    #[case::zero_threshold("ORDERS_CIRCUIT_FAILURE_THRESHOLD", "0")]
    #[case::hostname("ORDERS_HOST", "localhost")]
    fn invalid_values_are_rejected(#[case] key: &str, #[case] value: &str) {
        let settings = load_with(&[(key, value)]);

        let failure = settings
            .bind_addr()
            .err()
            .or_else(|| settings.users_service_url().err())
            .or_else(|| settings.users_service_timeout().err())
            .or_else(|| settings.circuit_breaker().err())
            .expect("one accessor rejects the value");
        assert_eq!(failure.kind(), io::ErrorKind::InvalidInput);
    }
}
