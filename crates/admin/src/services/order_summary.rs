//! Order summary: the order plus each line item's product details.
//!
//! Line items only carry product ids, so every product is looked up before
//! the invoice can be shown. Lookups run one after another in line-item
//! order. A lookup that fails is replaced by an "Unknown Product" row priced
//! at zero and the remaining items are still looked up.

use std::future::Future;

use chrono::NaiveDate;
use rocket_computers_core::{CompanyDetails, Invoice, InvoiceLine, OrderId, ProductId, TaxSummary};
use tracing::{instrument, warn};

use crate::backend::{BackendClient, BackendError, Order, OrderLine, Product};

/// Source of product details for enrichment.
pub trait ProductLookup {
    /// Fetch one product.
    fn lookup_product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Product, BackendError>> + Send;
}

impl ProductLookup for BackendClient {
    fn lookup_product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Product, BackendError>> + Send {
        self.product(id)
    }
}

/// Resolve every line item into an invoice line.
pub async fn enrich_line_items<L: ProductLookup + Sync>(
    lookup: &L,
    items: &[OrderLine],
) -> Vec<InvoiceLine> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let line = match lookup.lookup_product(&item.product_id).await {
            Ok(product) => InvoiceLine {
                product_id: item.product_id.clone(),
                product_name: product.name,
                unit_price: product.price,
                quantity: item.quantity,
            },
            Err(e) => {
                warn!(product_id = %item.product_id, error = %e, "Product lookup failed, using placeholder");
                InvoiceLine::unknown(item.product_id.clone(), item.quantity)
            }
        };
        lines.push(line);
    }
    lines
}

/// Assemble the invoice for `order` from already enriched lines.
#[must_use]
pub fn build_invoice(
    order: &Order,
    lines: Vec<InvoiceLine>,
    company: &CompanyDetails,
    issued_on: NaiveDate,
) -> Invoice {
    Invoice {
        company: company.clone(),
        order_id: order.order_id.clone(),
        customer_id: order.customer_id.clone(),
        customer_name: order.customer_name.clone(),
        issued_on,
        lines,
        taxes: TaxSummary::from_subtotal(order.subtotal()),
        payment_status: order.payment_status.clone(),
    }
}

/// Fetch an order and build its invoice.
///
/// # Errors
///
/// Returns error if the order itself cannot be fetched. Product lookup
/// failures never fail the summary.
#[instrument(skip(client, company))]
pub async fn load_order_summary(
    client: &BackendClient,
    company: &CompanyDetails,
    order_id: &OrderId,
    issued_on: NaiveDate,
) -> Result<Invoice, BackendError> {
    let order = client.order(order_id).await?;
    let lines = enrich_line_items(client, &order.line_items).await;
    Ok(build_invoice(&order, lines, company, issued_on))
}
