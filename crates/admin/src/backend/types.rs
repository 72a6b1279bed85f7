//! Wire types for the Rocket Computers backend API.
//!
//! These mirror the JSON the backend sends (camelCase, Mongo-style `_id`
//! keys). Fields the screens can live without are defaulted so one sparse
//! document does not fail a whole list.

use core::fmt;

use chrono::{DateTime, NaiveDate};
use rocket_computers_core::{CategoryId, CustomerId, Money, OrderId, PaymentStatus, ProductId};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

// =============================================================================
// Auth
// =============================================================================

/// Opaque session token issued by `/admin/login` or `/associate/login`.
///
/// Stored as-is and replayed as a bearer token. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// `{ "token": "..." }`
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: AuthToken,
}

/// `{ "message": "..." }` error body.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// A product as listed by the catalog and stock endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: String,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
}

/// Image attached to a new product.
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart payload for `POST /admin/product`.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: u32,
    pub category: String,
    pub image: ProductImage,
}

// =============================================================================
// Orders
// =============================================================================

/// One `{ productId, quantity }` entry of a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    #[serde(deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

/// An order as returned by the order endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_phone_number: String,
    #[serde(default)]
    pub associate_email: Option<String>,
    #[serde(default = "unknown_payment_status")]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub warranty_till: Option<String>,
    #[serde(default)]
    pub total_billable_price: Option<Money>,
    #[serde(default, rename = "products")]
    pub line_items: Vec<OrderLine>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Order {
    /// Billable subtotal; orders the backend has not priced count as zero.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.total_billable_price.unwrap_or(Money::ZERO)
    }

    /// Warranty end as `YYYY-MM-DD`, whether stored as a date or a timestamp.
    #[must_use]
    pub fn warranty_till_display(&self) -> String {
        self.warranty_till
            .as_deref()
            .map(display_date)
            .unwrap_or_default()
    }

    /// Creation time as `YYYY-MM-DD HH:MM UTC`.
    #[must_use]
    pub fn created_at_display(&self) -> String {
        self.created_at
            .as_deref()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw).map_or_else(
                    |_| raw.to_string(),
                    |ts| ts.naive_utc().format("%Y-%m-%d %H:%M UTC").to_string(),
                )
            })
            .unwrap_or_default()
    }

    /// Customer email, or an empty string.
    #[must_use]
    pub fn customer_email_display(&self) -> &str {
        self.customer_email.as_deref().unwrap_or_default()
    }
}

/// `{ "orders": [...] }` from `GET /orders/orders`.
///
/// Entries stay raw until [`OrdersEnvelope::into_orders`] so a malformed
/// document is skipped on its own.
#[derive(Debug, Deserialize)]
pub(crate) struct OrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<serde_json::Value>,
}

impl OrdersEnvelope {
    /// Decode each document, dropping (and logging) the ones that do not fit
    /// [`Order`].
    #[must_use]
    pub fn into_orders(self) -> Vec<Order> {
        self.orders
            .into_iter()
            .enumerate()
            .filter_map(|(index, document)| {
                serde_json::from_value(document)
                    .inspect_err(|e| warn!(index, error = %e, "Skipping undecodable order"))
                    .ok()
            })
            .collect()
    }
}

/// `{ "order": [ {...} ] }` from `GET /orders/getorder/:orderId`.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderLookupEnvelope {
    #[serde(default)]
    pub order: Vec<Order>,
}

/// `{ "order": {...} }` from `POST /orders/order`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedOrderEnvelope {
    pub order: Order,
}

fn unknown_payment_status() -> PaymentStatus {
    PaymentStatus::Other(String::new())
}

fn display_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.naive_utc().date().format("%Y-%m-%d").to_string();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Quantities typed into the original order form were posted as strings, so
/// stored orders may carry either `2` or `"2"`.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(u32),
        Text(String),
    }

    match Quantity::deserialize(deserializer)? {
        Quantity::Number(n) => Ok(n),
        Quantity::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid quantity '{s}'"))),
    }
}

/// Phone numbers arrive as strings, bare numbers or `null`.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Option::<Text>::deserialize(deserializer)? {
        Some(Text::Text(s)) => s,
        Some(Text::Integer(n)) => n.to_string(),
        Some(Text::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_order_from_backend_document() {
        let order: Order = serde_json::from_value(json!({
            "_id": "671e9f",
            "orderId": "ORD-1001",
            "customerId": "ROCK-CUST-42",
            "customerName": "Arjun Mehta",
            "customerPhoneNumber": "9800011122",
            "paymentStatus": "Paid",
            "warrantyTill": "2027-10-15T00:00:00.000Z",
            "totalBillablePrice": 1000,
            "products": [
                { "productId": "p1", "quantity": 2, "_id": "x" },
                { "productId": "p2", "quantity": "3" }
            ],
            "createdAt": "2026-10-15T09:30:00.000Z",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(order.order_id.as_str(), "ORD-1001");
        assert_eq!(order.subtotal().to_string(), "1000.00");
        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.line_items[1].quantity, 3);
        assert_eq!(order.warranty_till_display(), "2027-10-15");
        assert_eq!(order.created_at_display(), "2026-10-15 09:30 UTC");
        assert_eq!(order.customer_email_display(), "");
    }

    #[test]
    fn test_sparse_order_defaults() {
        let order: Order = serde_json::from_value(json!({ "orderId": "ORD-2" })).unwrap();
        assert!(order.line_items.is_empty());
        assert_eq!(order.subtotal(), Money::ZERO);
        assert_eq!(order.payment_status.as_str(), "");
        assert_eq!(order.warranty_till_display(), "");
    }

    #[test]
    fn test_plain_date_warranty() {
        let order: Order =
            serde_json::from_value(json!({ "orderId": "ORD-3", "warrantyTill": "2027-01-31" }))
                .unwrap();
        assert_eq!(order.warranty_till_display(), "2027-01-31");
    }

    #[test]
    fn test_numeric_or_null_phone_number() {
        let order: Order = serde_json::from_value(
            json!({ "orderId": "ORD-4", "customerPhoneNumber": 9_800_011_122_i64 }),
        )
        .unwrap();
        assert_eq!(order.customer_phone_number, "9800011122");

        let order: Order =
            serde_json::from_value(json!({ "orderId": "ORD-5", "customerPhoneNumber": null }))
                .unwrap();
        assert_eq!(order.customer_phone_number, "");
    }

    #[test]
    fn test_order_list_skips_malformed_documents() {
        let envelope: OrdersEnvelope = serde_json::from_value(json!({
            "orders": [
                { "orderId": "ORD-1", "customerPhoneNumber": 9_800_000_001_i64 },
                { "customerName": "No Id" },
                { "orderId": "ORD-3", "products": [{ "productId": "p", "quantity": "two" }] },
                { "orderId": "ORD-4", "customerName": "Meera" }
            ]
        }))
        .unwrap();

        let ids: Vec<String> = envelope
            .into_orders()
            .into_iter()
            .map(|o| o.order_id.to_string())
            .collect();
        assert_eq!(ids, ["ORD-1", "ORD-4"]);
    }

    #[test]
    fn test_bad_quantity_is_rejected() {
        let line = serde_json::from_value::<OrderLine>(json!({ "productId": "p", "quantity": "two" }));
        assert!(line.is_err());
    }

    #[test]
    fn test_product_and_category() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Ryzen 7 Desktop",
            "price": 64999.5,
            "stock": 4,
            "category": "Desktops",
            "image": "uploads/p1.png"
        }))
        .unwrap();
        assert_eq!(product.price.to_string(), "64999.50");

        let category: Category =
            serde_json::from_value(json!({ "_id": "c1", "name": "Desktops" })).unwrap();
        assert_eq!(category.name, "Desktops");
    }

    #[test]
    fn test_auth_token_debug_is_redacted() {
        let token = AuthToken::new("eyJhbGciOi");
        assert_eq!(format!("{token:?}"), "AuthToken([REDACTED])");
        assert_eq!(token.expose(), "eyJhbGciOi");
    }
}
