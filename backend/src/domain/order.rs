//! Order data model.
//!
//! An [`Order`] is created once, changes only through its status, and is
//! removed by explicit deletion. Fields are private so every mutation goes
//! through [`Order::set_status`], which keeps `updated_at` at or after
//! `created_at`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

/// Opaque order identifier, a UUID v4 rendered as text.
///
/// Lookups accept any text so that unknown identifiers simply miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an identifier received from a caller.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a user owned by the remote user directory.
///
/// The only local invariant is that it is non-empty; existence is checked
/// remotely when an order is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Validation error returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must not be empty")]
pub struct EmptyUserId;

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyUserId> {
        let id = id.into();
        if id.is_empty() {
            return Err(EmptyUserId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = EmptyUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle status of an order.
///
/// Parsing is exact and case-sensitive: `"Shipped"` is not a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Newly created, not yet picked up.
    Pending,
    /// Being prepared.
    Processing,
    /// Handed to a carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Abandoned before delivery.
    Cancelled,
}

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name an [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

/// A single line of an order.
///
/// Quantities and prices keep the caller's numeric representation; no bounds
/// are enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    name: String,
    quantity: Number,
    price: Number,
}

impl OrderItem {
    /// Construct a line item.
    pub fn new(name: impl Into<String>, quantity: Number, price: Number) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Item name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Quantity as supplied.
    #[must_use]
    pub fn quantity(&self) -> &Number {
        &self.quantity
    }

    /// Unit price as supplied.
    #[must_use]
    pub fn price(&self) -> &Number {
        &self.price
    }
}

/// Error returned when an order would have no line items.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("an order needs at least one item")]
pub struct NoItems;

/// An order record.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    items: Vec<OrderItem>,
    total: Number,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Materialise a new `pending` order.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use orders_service::domain::{Order, OrderId, OrderItem, OrderStatus, UserId};
    /// use serde_json::Number;
    ///
    /// let order = Order::new(
    ///     OrderId::random(),
    ///     UserId::new("u1").expect("non-empty"),
    ///     vec![OrderItem::new("Laptop", Number::from(1), Number::from(999))],
    ///     Number::from(999),
    ///     Utc::now(),
    /// )
    /// .expect("one item");
    /// assert_eq!(order.status(), OrderStatus::Pending);
    /// assert!(order.updated_at().is_none());
    /// ```
    pub fn new(
        id: OrderId,
        user_id: UserId,
        items: Vec<OrderItem>,
        total: Number,
        created_at: DateTime<Utc>,
    ) -> Result<Self, NoItems> {
        if items.is_empty() {
            return Err(NoItems);
        }
        Ok(Self {
            id,
            user_id,
            items,
            total,
            status: OrderStatus::Pending,
            created_at,
            updated_at: None,
        })
    }

    /// Order identifier.
    #[must_use]
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Owning user.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Line items in submission order.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        self.items.as_slice()
    }

    /// Caller-supplied total; never recomputed from the items.
    #[must_use]
    pub fn total(&self) -> &Number {
        &self.total
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last status change, if any.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Apply a status change observed at `now`.
    ///
    /// A clock reading earlier than `created_at` is clamped to it.
    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = Some(now.max(self.created_at));
    }
}
