//! Reqwest-backed user directory adapter.
//!
//! One `GET {base}/users/{id}` per check, bounded by the client timeout. A
//! 2xx answer confirms the user. Every other outcome is logged with its
//! reason and reported as "not verified".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError};
use crate::domain::UserId;
use crate::domain::ports::{UserDirectory, UserDirectoryError};

/// User directory reached over HTTP.
#[derive(Debug)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: Url,
    breaker: Option<CircuitBreaker>,
}

impl HttpUserDirectory {
    /// Build an adapter whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            breaker: None,
        })
    }

    /// Guard lookups with a circuit breaker.
    #[must_use]
    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.breaker = Some(CircuitBreaker::new(config));
        self
    }

    /// Base URL of the directory.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look a user up, reporting why the answer was not positive.
    ///
    /// # Errors
    ///
    /// [`UserDirectoryError::NotFound`] for a 404 and an availability error
    /// for everything else that is not 2xx.
    pub async fn lookup(&self, user_id: &UserId) -> Result<(), UserDirectoryError> {
        match &self.breaker {
            None => self.fetch(user_id).await,
            Some(breaker) => breaker
                .call(
                    self.fetch(user_id),
                    UserDirectoryError::is_availability_failure,
                )
                .await
                .map_err(|err| match err {
                    CircuitBreakerError::CircuitOpen => UserDirectoryError::circuit_open(),
                    CircuitBreakerError::OperationFailed(inner) => inner,
                }),
        }
    }

    async fn fetch(&self, user_id: &UserId) -> Result<(), UserDirectoryError> {
        let url = user_url(&self.base_url, user_id)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(map_status_error(status, user_id))
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn exists(&self, user_id: &UserId) -> bool {
        match self.lookup(user_id).await {
            Ok(()) => true,
            Err(err) if err.is_availability_failure() => {
                warn!(user_id = %user_id, reason = %err, "user verification failed");
                false
            }
            Err(err) => {
                debug!(user_id = %user_id, reason = %err, "user not found");
                false
            }
        }
    }
}

fn user_url(base_url: &Url, user_id: &UserId) -> Result<Url, UserDirectoryError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            UserDirectoryError::transport(format!("base URL cannot carry a path: {base_url}"))
        })?
        .pop_if_empty()
        .push("users")
        .push(user_id.as_str());
    Ok(url)
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, user_id: &UserId) -> UserDirectoryError {
    match status {
        StatusCode::NOT_FOUND => UserDirectoryError::not_found(user_id.as_str()),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UserDirectoryError::timeout(format!("status {}", status.as_u16()))
        }
        _ => UserDirectoryError::unexpected_status(status.as_u16()),
    }
}
