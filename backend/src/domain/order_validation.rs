//! Structural validation of order submissions.
//!
//! Submissions arrive loosely typed so that "missing", "empty" and "wrong
//! type" can be told apart and reported per field. Only structure is checked:
//! numeric values are accepted as given, including zero and negatives.

use serde_json::{Map, Number, Value};

use super::{NoItems, OrderItem, UserId};

/// Raw creation request as received from a driving adapter.
///
/// `None` and JSON `null` both mean the field was not supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSubmission {
    /// Identifier of the ordering user; must be a non-empty string.
    pub user_id: Option<Value>,
    /// Line items; must be a non-empty array of item objects.
    pub items: Option<Value>,
    /// Order total; must be a number.
    pub total: Option<Value>,
}

/// A submission that passed structural validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    /// Ordering user, not yet verified against the user directory.
    pub user_id: UserId,
    /// Line items, never empty.
    pub items: Vec<OrderItem>,
    /// Caller-supplied total.
    pub total: Number,
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    /// The field is absent or `null`.
    MissingField,
    /// The field is present but empty.
    EmptyValue,
    /// The field has the wrong JSON type.
    InvalidType,
}

impl ValidationCode {
    /// Stable machine-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyValue => "empty_value",
            Self::InvalidType => "invalid_type",
        }
    }
}

/// First validation failure found in a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct OrderValidationError {
    field: String,
    code: ValidationCode,
    message: String,
}

impl OrderValidationError {
    fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("missing required field: {field}");
        Self {
            field,
            code: ValidationCode::MissingField,
            message,
        }
    }

    fn empty(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{field} must not be empty");
        Self {
            field,
            code: ValidationCode::EmptyValue,
            message,
        }
    }

    fn wrong_type(field: impl Into<String>, expected: &str) -> Self {
        let field = field.into();
        let message = format!("{field} must be {expected}");
        Self {
            field,
            code: ValidationCode::InvalidType,
            message,
        }
    }

    /// Path of the offending field, e.g. `items[0].price`.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ValidationCode {
        self.code
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<NoItems> for OrderValidationError {
    fn from(_: NoItems) -> Self {
        Self::empty("items")
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|inner| !inner.is_null())
}

impl OrderSubmission {
    /// Check the submission and convert it into typed order parts.
    ///
    /// Fields are checked in the order `userId`, `items`, `total`, and items
    /// in array order; the first failure is returned.
    ///
    /// # Examples
    /// ```
    /// use orders_service::domain::OrderSubmission;
    /// use serde_json::json;
    ///
    /// let submission = OrderSubmission {
    ///     user_id: Some(json!("u1")),
    ///     items: Some(json!([{"name": "Laptop", "quantity": 1, "price": 999.99}])),
    ///     total: Some(json!(999.99)),
    /// };
    /// let validated = submission.validate().expect("valid submission");
    /// assert_eq!(validated.user_id.as_str(), "u1");
    /// ```
    pub fn validate(self) -> Result<ValidatedOrder, OrderValidationError> {
        let user_id = validate_user_id(present(self.user_id))?;
        let items = validate_items(present(self.items))?;
        let total = validate_total(present(self.total))?;
        Ok(ValidatedOrder {
            user_id,
            items,
            total,
        })
    }
}

fn validate_user_id(value: Option<Value>) -> Result<UserId, OrderValidationError> {
    match value {
        None => Err(OrderValidationError::missing("userId")),
        Some(Value::String(raw)) => {
            UserId::new(raw).map_err(|_| OrderValidationError::empty("userId"))
        }
        Some(_) => Err(OrderValidationError::wrong_type("userId", "a string")),
    }
}

fn validate_items(value: Option<Value>) -> Result<Vec<OrderItem>, OrderValidationError> {
    let entries = match value {
        None => return Err(OrderValidationError::missing("items")),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(OrderValidationError::wrong_type("items", "an array")),
    };
    if entries.is_empty() {
        return Err(OrderValidationError::empty("items"));
    }
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| validate_item(index, entry))
        .collect()
}

fn validate_item(index: usize, entry: Value) -> Result<OrderItem, OrderValidationError> {
    let prefix = format!("items[{index}]");
    let Value::Object(mut fields) = entry else {
        return Err(OrderValidationError::wrong_type(prefix, "an object"));
    };
    let name = match take_field(&mut fields, &prefix, "name")? {
        Value::String(name) => name,
        _ => {
            return Err(OrderValidationError::wrong_type(
                format!("{prefix}.name"),
                "a string",
            ));
        }
    };
    let quantity = take_number(&mut fields, &prefix, "quantity")?;
    let price = take_number(&mut fields, &prefix, "price")?;
    Ok(OrderItem::new(name, quantity, price))
}

fn take_field(
    fields: &mut Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<Value, OrderValidationError> {
    present(fields.remove(key))
        .ok_or_else(|| OrderValidationError::missing(format!("{prefix}.{key}")))
}

fn take_number(
    fields: &mut Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<Number, OrderValidationError> {
    match take_field(fields, prefix, key)? {
        Value::Number(number) => Ok(number),
        _ => Err(OrderValidationError::wrong_type(
            format!("{prefix}.{key}"),
            "a number",
        )),
    }
}

fn validate_total(value: Option<Value>) -> Result<Number, OrderValidationError> {
    match value {
        None => Err(OrderValidationError::missing("total")),
        Some(Value::Number(total)) => Ok(total),
        Some(_) => Err(OrderValidationError::wrong_type("total", "a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn submission() -> OrderSubmission {
        OrderSubmission {
            user_id: Some(json!("u1")),
            items: Some(json!([
                {"name": "Laptop", "quantity": 1, "price": 999.99},
                {"name": "Mouse", "quantity": 2, "price": 25}
            ])),
            total: Some(json!(1049.99)),
        }
    }

    #[rstest]
    fn accepts_well_formed_submission(submission: OrderSubmission) {
        let validated = submission.validate().expect("valid submission");
        assert_eq!(validated.user_id.as_str(), "u1");
        assert_eq!(validated.items.len(), 2);
        assert_eq!(validated.items.first().map(OrderItem::name), Some("Laptop"));
        assert_eq!(validated.total.as_f64(), Some(1049.99));
    }

    // Only an absent or non-numeric total is rejected. A falsy-value check
    // would also turn away `0`, but a zero total is a valid number here.
    #[rstest]
    fn zero_total_is_accepted(mut submission: OrderSubmission) {
        submission.total = Some(json!(0));
        let validated = submission.validate().expect("zero is a number");
        assert_eq!(validated.total, Number::from(0));
    }

    #[rstest]
    #[case::missing_user(None, "userId", ValidationCode::MissingField)]
    #[case::null_user(Some(json!(null)), "userId", ValidationCode::MissingField)]
    #[case::empty_user(Some(json!("")), "userId", ValidationCode::EmptyValue)]
    #[case::numeric_user(Some(json!(7)), "userId", ValidationCode::InvalidType)]
    fn rejects_bad_user_id(
        mut submission: OrderSubmission,
        #[case] user_id: Option<Value>,
        #[case] field: &str,
        #[case] code: ValidationCode,
    ) {
        submission.user_id = user_id;
        let err = submission.validate().expect_err("user id is invalid");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), code);
    }

    #[rstest]
    #[case::missing(None, "items", ValidationCode::MissingField)]
    #[case::empty(Some(json!([])), "items", ValidationCode::EmptyValue)]
    #[case::not_array(Some(json!("Laptop")), "items", ValidationCode::InvalidType)]
    #[case::object(Some(json!({"name": "Laptop"})), "items", ValidationCode::InvalidType)]
    #[case::scalar_entry(Some(json!([1])), "items[0]", ValidationCode::InvalidType)]
    #[case::no_name(
        Some(json!([{"quantity": 1, "price": 2}])),
        "items[0].name",
        ValidationCode::MissingField
    )]
    #[case::no_price(
        Some(json!([{"name": "a", "quantity": 1, "price": 2}, {"name": "b", "quantity": 1}])),
        "items[1].price",
        ValidationCode::MissingField
    )]
    #[case::text_quantity(
        Some(json!([{"name": "a", "quantity": "1", "price": 2}])),
        "items[0].quantity",
        ValidationCode::InvalidType
    )]
    fn rejects_bad_items(
        mut submission: OrderSubmission,
        #[case] items: Option<Value>,
        #[case] field: &str,
        #[case] code: ValidationCode,
    ) {
        submission.items = items;
        let err = submission.validate().expect_err("items are invalid");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), code);
    }

    #[rstest]
    #[case::missing(None, ValidationCode::MissingField)]
    #[case::text(Some(json!("999.99")), ValidationCode::InvalidType)]
    fn rejects_bad_total(
        mut submission: OrderSubmission,
        #[case] total: Option<Value>,
        #[case] code: ValidationCode,
    ) {
        submission.total = total;
        let err = submission.validate().expect_err("total is invalid");
        assert_eq!(err.field(), "total");
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn user_id_is_checked_before_items() {
        let err = OrderSubmission::default()
            .validate()
            .expect_err("empty submission");
        assert_eq!(err.field(), "userId");
        assert_eq!(err.message(), "missing required field: userId");
        assert_eq!(err.to_string(), err.message());
    }
}
