//! Circuit breaker guarding calls to the user directory.
//!
//! States:
//! - `Closed`: calls pass through; consecutive failures are counted.
//! - `Open`: calls are refused without running until the reset window passes.
//! - `HalfOpen`: one window has passed; the next outcome decides whether the
//!   circuit closes again or re-opens.
//!
//! Only errors the caller classifies as failures count. A directory that
//! answers "no such user" is healthy.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{info, warn};

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation.
    Closed,
    /// Refusing calls.
    Open,
    /// Probing for recovery.
    HalfOpen,
}

/// Breaker thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// How long the circuit stays open before probing.
    pub reset_timeout: Duration,
    /// Successes needed in half-open state to close the circuit.
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_timeout: Duration::from_secs(30),
            success_threshold: 1,
        }
    }
}

/// Outcome of a guarded call that did not succeed.
#[derive(Debug, PartialEq, Eq)]
pub enum CircuitBreakerError<E> {
    /// The call was refused without running.
    CircuitOpen,
    /// The call ran and failed.
    OperationFailed(E),
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    failure_count: u32,
    success_count: u32,
    opened_at: Option<Instant>,
}

/// Consecutive-failure circuit breaker.
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    /// Create a closed breaker.
    #[must_use]
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            state: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                failure_count: 0,
                success_count: 0,
                opened_at: None,
            }),
            config,
        }
    }

    /// Run `operation` unless the circuit is open.
    ///
    /// Errors for which `is_failure` returns `false` are passed through and
    /// recorded as successes.
    pub async fn call<F, T, E>(
        &self,
        operation: F,
        is_failure: impl FnOnce(&E) -> bool,
    ) -> Result<T, CircuitBreakerError<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        if !self.admit().await {
            return Err(CircuitBreakerError::CircuitOpen);
        }

        match operation.await {
            Ok(value) => {
                self.record_success().await;
                Ok(value)
            }
            Err(err) => {
                if is_failure(&err) {
                    self.record_failure().await;
                } else {
                    self.record_success().await;
                }
                Err(CircuitBreakerError::OperationFailed(err))
            }
        }
    }

    /// Current state.
    pub async fn state(&self) -> CircuitState {
        self.state.lock().await.state
    }

    async fn admit(&self) -> bool {
        let mut guard = self.state.lock().await;
        if guard.state != CircuitState::Open {
            return true;
        }
        let elapsed = guard
            .opened_at
            .is_none_or(|opened| opened.elapsed() >= self.config.reset_timeout);
        if elapsed {
            info!("user directory circuit half-open");
            guard.state = CircuitState::HalfOpen;
            guard.success_count = 0;
        }
        elapsed
    }

    async fn record_success(&self) {
        let mut guard = self.state.lock().await;
        match guard.state {
            CircuitState::HalfOpen => {
                guard.success_count = guard.success_count.saturating_add(1);
                if guard.success_count >= self.config.success_threshold {
                    info!("user directory circuit closed");
                    guard.state = CircuitState::Closed;
                    guard.failure_count = 0;
                    guard.success_count = 0;
                    guard.opened_at = None;
                }
            }
            CircuitState::Closed => guard.failure_count = 0,
            CircuitState::Open => {}
        }
    }

    async fn record_failure(&self) {
        let mut guard = self.state.lock().await;
        guard.failure_count = guard.failure_count.saturating_add(1);
        match guard.state {
            CircuitState::Closed if guard.failure_count >= self.config.failure_threshold => {
                warn!(
                    failures = guard.failure_count,
                    "user directory circuit opened"
                );
                guard.state = CircuitState::Open;
                guard.opened_at = Some(Instant::now());
            }
            CircuitState::HalfOpen => {
                warn!("user directory probe failed; circuit re-opened");
                guard.state = CircuitState::Open;
                guard.success_count = 0;
                guard.opened_at = Some(Instant::now());
            }
            CircuitState::Closed | CircuitState::Open => {}
        }
    }
}
