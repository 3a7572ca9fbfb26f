//! Driven port for the remote user directory.
//!
//! The order ledger consumes exactly one capability from the directory:
//! asking whether a user exists. Implementations are fail-closed. Anything
//! short of a positive answer is reported as `false`, and the reason is only
//! logged.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Reasons a directory lookup produced no positive answer.
    ///
    /// Adapters use these for logging and health accounting; they never reach
    /// callers of [`UserDirectory::exists`].
    pub enum UserDirectoryError {
        /// The directory answered that the user does not exist.
        NotFound { user_id: String } =>
            "user {user_id} not found in directory",
        /// The lookup exceeded its time budget.
        Timeout { message: String } =>
            "user directory timed out: {message}",
        /// The request failed before a response arrived.
        Transport { message: String } =>
            "user directory transport failed: {message}",
        /// The directory replied with an unexpected status.
        UnexpectedStatus { status: u16 } =>
            "user directory returned status {status}",
        /// The lookup was skipped because the directory is considered down.
        CircuitOpen =>
            "user directory circuit is open",
    }
}

impl UserDirectoryError {
    /// Whether the failure says something about directory health rather
    /// than about the user.
    #[must_use]
    pub fn is_availability_failure(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

/// Existence check against the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether the directory confirms `user_id` exists.
    ///
    /// Never fails: timeouts, transport errors and non-success responses all
    /// yield `false`.
    async fn exists(&self, user_id: &UserId) -> bool;
}

/// In-process directory backed by a fixed set of identifiers.
///
/// # Examples
/// ```
/// use orders_service::domain::UserId;
/// use orders_service::domain::ports::{StaticUserDirectory, UserDirectory};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let directory = StaticUserDirectory::new(["u1"]);
/// assert!(directory.exists(&UserId::new("u1").expect("non-empty")).await);
/// assert!(!directory.exists(&UserId::new("u2").expect("non-empty")).await);
/// # });
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticUserDirectory {
    known: HashSet<String>,
}

impl StaticUserDirectory {
    /// Build a directory that knows exactly `ids`.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn exists(&self, user_id: &UserId) -> bool {
        self.known.contains(user_id.as_str())
    }
}
