//! Orders API handlers.
//!
//! ```text
//! GET    /orders?userId=u1&status=pending
//! GET    /orders/{id}
//! POST   /orders {"userId":"u1","items":[{"name":"Laptop","quantity":1,"price":999.99}],"total":999.99}
//! PATCH  /orders/{id}/status {"status":"shipped"}
//! DELETE /orders/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::domain::ports::OrderFilter;
use crate::domain::{Error, Order, OrderId, OrderItem, OrderSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::non_empty;

/// Request body for `POST /orders`.
///
/// Fields stay loosely typed so the domain can report which one is wrong.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default)]
    pub total: Option<Value>,
}

impl From<CreateOrderRequest> for OrderSubmission {
    fn from(value: CreateOrderRequest) -> Self {
        Self {
            user_id: value.user_id,
            items: value.items,
            total: value.total,
        }
    }
}

/// Request body for `PATCH /orders/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<Value>,
}

impl UpdateStatusRequest {
    /// Status text handed to the domain.
    ///
    /// A missing status becomes the empty string and non-string values use
    /// their JSON text, so both are rejected as unknown statuses.
    fn status_text(&self) -> String {
        match &self.status {
            None => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Query parameters for `GET /orders`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub user_id: Option<String>,
    pub status: Option<String>,
}

impl From<ListOrdersQuery> for OrderFilter {
    fn from(value: ListOrdersQuery) -> Self {
        let mut filter = OrderFilter::default();
        if let Some(user_id) = non_empty(value.user_id) {
            filter = filter.with_user_id(user_id);
        }
        if let Some(status) = non_empty(value.status) {
            filter = filter.with_status(status);
        }
        filter
    }
}

/// Line item as rendered to clients.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderItemResponse {
    pub name: String,
    pub quantity: Number,
    pub price: Number,
}

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name().to_owned(),
            quantity: item.quantity().clone(),
            price: item.price().clone(),
        }
    }
}

/// Order as rendered to clients.
///
/// Timestamps are RFC 3339 in UTC with millisecond precision. `updatedAt`
/// is omitted until the first status change.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total: Number,
    pub status: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().as_str().to_owned(),
            user_id: order.user_id().as_str().to_owned(),
            items: order.items().iter().map(OrderItemResponse::from).collect(),
            total: order.total().clone(),
            status: order.status().as_str().to_owned(),
            created_at: format_timestamp(order.created_at()),
            updated_at: order.updated_at().map(format_timestamp),
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// List orders, optionally filtered by user and status.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use orders_service::inbound::http::orders::list_orders;
///
/// let app = App::new().service(list_orders);
/// ```
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    query: web::Query<ListOrdersQuery>,
) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    let filter = OrderFilter::from(query.into_inner());
    let orders = state.orders_query.list(&filter).await.map_err(Error::from)?;
    Ok(web::Json(orders.iter().map(OrderResponse::from).collect()))
}

/// Fetch one order.
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderResponse>> {
    let id = OrderId::new(path.into_inner());
    let order = state.orders_query.get(&id).await.map_err(Error::from)?;
    Ok(web::Json(OrderResponse::from(&order)))
}

/// Create an order for a verified user.
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let submission = OrderSubmission::from(payload.into_inner());
    let order = state.orders.create(submission).await.map_err(Error::from)?;
    Ok(HttpResponse::Created().json(OrderResponse::from(&order)))
}

/// Change the status of an order.
#[patch("/orders/{id}/status")]
pub async fn update_order_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<OrderResponse>> {
    let id = OrderId::new(path.into_inner());
    let order = state
        .orders
        .update_status(&id, &payload.status_text())
        .await
        .map_err(Error::from)?;
    Ok(web::Json(OrderResponse::from(&order)))
}

/// Delete an order.
#[delete("/orders/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = OrderId::new(path.into_inner());
    state.orders.delete(&id).await.map_err(Error::from)?;
    Ok(HttpResponse::NoContent().finish())
}
