//! Builders for HTTP state ports.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use crate::domain::OrderLifecycleService;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::InMemoryOrderStore;
use crate::outbound::user_directory::HttpUserDirectory;

use super::ServerConfig;

/// Build the user directory adapter described by `config`.
fn build_user_directory(config: &ServerConfig) -> io::Result<HttpUserDirectory> {
    let directory = HttpUserDirectory::new(
        config.users_service_url.clone(),
        config.users_service_timeout,
    )
    .map_err(|err| io::Error::other(format!("user directory client: {err}")))?;
    Ok(match config.circuit_breaker {
        Some(breaker) => {
            info!(
                failure_threshold = breaker.failure_threshold,
                reset_secs = breaker.reset_timeout.as_secs(),
                "user directory circuit breaker enabled"
            );
            directory.with_circuit_breaker(breaker)
        }
        None => directory,
    })
}

/// Wire the order lifecycle service over a fresh in-memory ledger.
///
/// The same service instance backs both the command and query ports so
/// reads observe every write.
///
/// # Errors
///
/// Returns an error when the HTTP client for the user directory cannot be
/// constructed.
pub fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let directory = build_user_directory(config)?;
    let service = Arc::new(
        OrderLifecycleService::new(
            Arc::new(InMemoryOrderStore::default()),
            Arc::new(directory),
            Arc::new(DefaultClock),
        )
        .with_policy(config.transition_policy),
    );
    Ok(web::Data::new(HttpState::new(service.clone(), service)))
}
