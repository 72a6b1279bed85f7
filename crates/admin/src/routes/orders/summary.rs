//! Order summary (invoice) page and PDF download.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use rocket_computers_core::{Invoice, OrderId};
use tracing::instrument;

use crate::{
    error::AppError,
    filters,
    middleware::OptionalUser,
    services::{invoice_file_name, load_order_summary, render_invoice_pdf},
    state::AppState,
};

use super::order_path;
use super::super::{NavUser, nav};

/// Shown when the order cannot be loaded.
const LOAD_FAILED: &str = "Failed to fetch order data";

/// Order summary template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/summary.html")]
pub struct OrderSummaryTemplate {
    pub nav: Option<NavUser>,
    pub invoice: Option<Invoice>,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl OrderSummaryTemplate {
    /// Download link for the invoice PDF.
    #[must_use]
    pub fn pdf_href(&self) -> String {
        self.invoice
            .as_ref()
            .map(|i| order_path(i.order_id.as_str(), &["invoice.pdf"]))
            .unwrap_or_default()
    }
}

/// Invoice date: today, in UTC.
pub(super) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// GET /orders/{order_id}
#[instrument(skip(user, state))]
pub async fn show(
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> impl IntoResponse {
    let result = load_order_summary(
        state.backend(),
        &state.config().company,
        &order_id,
        today(),
    )
    .await;

    let (invoice, error) = match result {
        Ok(invoice) => (Some(invoice), None),
        Err(e) => {
            tracing::error!(order_id = %order_id, "Failed to fetch order: {e}");
            (None, Some(LOAD_FAILED.to_string()))
        }
    };

    OrderSummaryTemplate {
        nav: nav(user.as_ref()),
        invoice,
        error,
        success: None,
    }
}

/// GET /orders/{order_id}/invoice.pdf
#[instrument(skip(state))]
pub async fn invoice_pdf(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = load_order_summary(
        state.backend(),
        &state.config().company,
        &order_id,
        today(),
    )
    .await?;

    let bytes = render_invoice_pdf(&invoice)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        invoice_file_name(&invoice.order_id)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
