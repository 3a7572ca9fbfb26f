//! Failure taxonomy of the order lifecycle.
//!
//! [`OrderError`] is what the order driving ports return. Conversion into the
//! transport-agnostic [`Error`] keeps the variant visible to clients through
//! `details.code`.

use serde_json::json;

use super::{Error, OrderId, OrderStatus, OrderValidationError, UserId};

/// Errors raised by order operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    /// The creation request is structurally invalid.
    #[error("{0}")]
    Validation(#[from] OrderValidationError),
    /// The user directory did not confirm the user.
    ///
    /// Absence and an unreachable directory are deliberately the same.
    #[error("user {user_id} could not be verified")]
    UnverifiedUser {
        /// The user that failed verification.
        user_id: UserId,
    },
    /// The requested status is not one of the known values.
    #[error("invalid status: {status}")]
    InvalidStatus {
        /// The rejected status text.
        status: String,
    },
    /// No order has the given identifier.
    #[error("order {id} not found")]
    NotFound {
        /// The missing identifier.
        id: OrderId,
    },
    /// The active transition policy rejected the change.
    #[error("order cannot move from {from} to {to}")]
    TransitionNotAllowed {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
    /// An order with this identifier is already stored.
    #[error("order {id} already exists")]
    DuplicateId {
        /// The clashing identifier.
        id: OrderId,
    },
}

impl OrderError {
    /// Stable name of the failure for client-facing details.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::UnverifiedUser { .. } => "unverified_user",
            Self::InvalidStatus { .. } => "invalid_status",
            Self::NotFound { .. } => "not_found",
            Self::TransitionNotAllowed { .. } => "transition_not_allowed",
            Self::DuplicateId { .. } => "duplicate_id",
        }
    }
}

fn allowed_statuses() -> Vec<&'static str> {
    OrderStatus::ALL.iter().map(|status| status.as_str()).collect()
}

impl From<OrderError> for Error {
    fn from(value: OrderError) -> Self {
        let kind = value.kind();
        match &value {
            OrderError::Validation(err) => {
                Error::invalid_request(err.message()).with_details(json!({
                    "code": kind,
                    "field": err.field(),
                    "reason": err.code().as_str(),
                }))
            }
            OrderError::UnverifiedUser { user_id } => Error::invalid_request(
                "User not found or users service unavailable",
            )
            .with_details(json!({ "code": kind, "userId": user_id.as_str() })),
            OrderError::InvalidStatus { status } => {
                Error::invalid_request(value.to_string()).with_details(json!({
                    "code": kind,
                    "value": status,
                    "allowed": allowed_statuses(),
                }))
            }
            OrderError::NotFound { .. } => {
                Error::not_found("Order not found").with_details(json!({ "code": kind }))
            }
            OrderError::TransitionNotAllowed { from, to } => Error::conflict(value.to_string())
                .with_details(json!({
                    "code": kind,
                    "from": from.as_str(),
                    "to": to.as_str(),
                })),
            OrderError::DuplicateId { .. } => Error::internal(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, OrderSubmission};
    use rstest::rstest;

    fn validation_error() -> OrderError {
        let err = OrderSubmission::default()
            .validate()
            .expect_err("empty submission is invalid");
        OrderError::from(err)
    }

    #[rstest]
    #[case(validation_error(), ErrorCode::InvalidRequest, Some("validation_failed"))]
    #[case(
        OrderError::UnverifiedUser { user_id: UserId::new("u9").expect("non-empty") },
        ErrorCode::InvalidRequest,
        Some("unverified_user")
    )]
    #[case(
        OrderError::InvalidStatus { status: "bogus".to_owned() },
        ErrorCode::InvalidRequest,
        Some("invalid_status")
    )]
    #[case(
        OrderError::NotFound { id: OrderId::new("nope") },
        ErrorCode::NotFound,
        Some("not_found")
    )]
    #[case(
        OrderError::TransitionNotAllowed { from: OrderStatus::Delivered, to: OrderStatus::Pending },
        ErrorCode::Conflict,
        Some("transition_not_allowed")
    )]
    #[case(
        OrderError::DuplicateId { id: OrderId::new("dup") },
        ErrorCode::InternalError,
        None
    )]
    fn maps_to_error_codes(
        #[case] error: OrderError,
        #[case] code: ErrorCode,
        #[case] detail_code: Option<&str>,
    ) {
        let mapped = Error::from(error);
        assert_eq!(mapped.code(), code);
        let observed = mapped
            .details()
            .and_then(|details| details.get("code"))
            .and_then(|value| value.as_str());
        assert_eq!(observed, detail_code);
    }

    #[rstest]
    fn validation_details_name_the_field() {
        let mapped = Error::from(validation_error());
        let details = mapped.details().expect("details present");
        assert_eq!(details.get("field"), Some(&json!("userId")));
        assert_eq!(details.get("reason"), Some(&json!("missing_field")));
    }

    #[rstest]
    fn invalid_status_lists_allowed_values() {
        let mapped = Error::from(OrderError::InvalidStatus {
            status: "bogus".to_owned(),
        });
        let allowed = mapped
            .details()
            .and_then(|details| details.get("allowed"))
            .cloned();
        assert_eq!(
            allowed,
            Some(json!(["pending", "processing", "shipped", "delivered", "cancelled"]))
        );
    }
}
