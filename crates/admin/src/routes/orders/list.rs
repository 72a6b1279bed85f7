//! Orders list page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use rocket_computers_core::{DEFAULT_PAGE_SIZE, Page};
use serde::Deserialize;
use tracing::instrument;

use crate::{backend::Order, filters, middleware::OptionalUser, state::AppState};

use super::order_path;
use super::super::{NavUser, nav};

/// Shown in place of the table when the orders cannot be loaded.
const LOAD_FAILED: &str = "Failed to load orders.";

/// Query parameters for the orders list.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Requested page; anything unparseable means page 1.
    pub page: Option<String>,
}

impl OrdersQuery {
    fn page_number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// One row of the orders table.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub order_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone_number: String,
    pub total_price: String,
    pub payment_status: String,
    pub warranty_till: String,
    pub created_at: String,
    /// Link to the order's summary page.
    pub detail_href: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email_display().to_string(),
            customer_phone_number: order.customer_phone_number.clone(),
            total_price: order.subtotal().to_string(),
            payment_status: order.payment_status.to_string(),
            warranty_till: order.warranty_till_display(),
            created_at: order.created_at_display(),
            detail_href: order_path(order.order_id.as_str(), &[]),
        }
    }
}

/// Orders list page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub nav: Option<NavUser>,
    pub page: Page<OrderRow>,
    pub error: Option<String>,
}

/// Orders list page handler.
///
/// The backend returns every order at once; pages are cut here.
#[instrument(skip(user, state))]
pub async fn index(
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> impl IntoResponse {
    let (rows, error) = match state.backend().orders().await {
        Ok(orders) => (orders.iter().map(OrderRow::from).collect(), None),
        Err(e) => {
            tracing::error!("Failed to fetch orders: {e}");
            (vec![], Some(LOAD_FAILED.to_string()))
        }
    };

    OrdersIndexTemplate {
        nav: nav(user.as_ref()),
        page: Page::new(rows, query.page_number(), DEFAULT_PAGE_SIZE),
        error,
    }
}
