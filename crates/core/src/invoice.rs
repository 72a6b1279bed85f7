//! Invoice lines and the tax summary printed on order invoices.
//!
//! Tax is levied as two equal regional components, CGST and SGST, each 9% of
//! the order's billable subtotal:
//!
//! ```
//! use rocket_computers_core::{Money, TaxSummary};
//!
//! let taxes = TaxSummary::from_subtotal(Money::from(1000));
//! assert_eq!(taxes.cgst.to_string(), "90.00");
//! assert_eq!(taxes.sgst.to_string(), "90.00");
//! assert_eq!(taxes.grand_total.to_string(), "1180.00");
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CustomerId, Money, OrderId, PaymentStatus, ProductId};

/// Central GST rate (9%).
pub const CGST_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);

/// State GST rate (9%).
pub const SGST_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);

/// Name shown for a line whose product could not be looked up.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Seller details printed in the invoice header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyDetails {
    pub name: String,
    pub address: String,
    pub gst_number: String,
}

impl Default for CompanyDetails {
    fn default() -> Self {
        Self {
            name: "Rocket Computers".to_owned(),
            address: "123 Tech Park, Silicon Valley, CA".to_owned(),
            gst_number: "GST123456789".to_owned(),
        }
    }
}

/// One product row on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl InvoiceLine {
    /// Row for a product whose details are unavailable: priced at zero so
    /// the rest of the invoice still renders.
    #[must_use]
    pub fn unknown(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            product_name: UNKNOWN_PRODUCT_NAME.to_owned(),
            unit_price: Money::ZERO,
            quantity,
        }
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Subtotal, both tax components and the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxSummary {
    pub subtotal: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub grand_total: Money,
}

impl TaxSummary {
    /// Compute taxes on `subtotal`. Components are kept exact and only
    /// rounded when displayed.
    #[must_use]
    pub fn from_subtotal(subtotal: Money) -> Self {
        let cgst = subtotal.scale(CGST_RATE);
        let sgst = subtotal.scale(SGST_RATE);
        Self {
            subtotal,
            cgst,
            sgst,
            grand_total: subtotal + cgst + sgst,
        }
    }
}

/// Everything printed on an order invoice, both on screen and in the PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub company: CompanyDetails,
    pub order_id: OrderId,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub issued_on: NaiveDate,
    pub lines: Vec<InvoiceLine>,
    pub taxes: TaxSummary,
    pub payment_status: PaymentStatus,
}

impl Invoice {
    /// The customer id, or `-` for orders created without one.
    #[must_use]
    pub fn customer_id_display(&self) -> &str {
        self.customer_id.as_ref().map_or("-", CustomerId::as_str)
    }

    /// Issue date as printed (`YYYY-MM-DD`).
    #[must_use]
    pub fn issued_on_display(&self) -> String {
        self.issued_on.format("%Y-%m-%d").to_string()
    }
}
