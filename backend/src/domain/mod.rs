//! Domain primitives, services and ports.
//!
//! Purpose: hold the order ledger's rules independent of any transport or
//! storage technology. Adapters depend on this module, never the reverse.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Order, OrderId, OrderItem, OrderStatus, UserId: the order record.
//! - OrderSubmission: loosely typed creation request and its validation.
//! - OrderError: failure taxonomy of the order operations.
//! - TransitionPolicy: the single place status changes are judged.
//! - OrderLifecycleService: implementation of the order driving ports.

pub mod error;
pub mod order;
pub mod order_error;
pub mod order_service;
pub mod order_validation;
pub mod ports;
pub mod trace_id;
pub mod transition_policy;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::order::{
    EmptyUserId, NoItems, Order, OrderId, OrderItem, OrderStatus, UnknownStatus, UserId,
};
pub use self::order_error::OrderError;
pub use self::order_service::OrderLifecycleService;
pub use self::order_validation::{
    OrderSubmission, OrderValidationError, ValidatedOrder, ValidationCode,
};
pub use self::trace_id::TraceId;
pub use self::transition_policy::TransitionPolicy;
