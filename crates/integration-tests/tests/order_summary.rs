//! Order-summary enrichment and invoice rendering against the mock backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::NaiveDate;
use rocket_computers_admin::services::{load_order_summary, render_invoice_pdf};
use rocket_computers_core::{CompanyDetails, Money, OrderId};
use rocket_computers_integration_tests::{KNOWN_ORDER, MockBackend};

fn invoice_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

#[tokio::test]
async fn test_failed_lookup_becomes_unknown_product() {
    let backend = MockBackend::start().await;

    let invoice = load_order_summary(
        &backend.client(),
        &CompanyDetails::default(),
        &OrderId::new(KNOWN_ORDER),
        invoice_date(),
    )
    .await
    .expect("summary");

    let names: Vec<&str> = invoice.lines.iter().map(|l| l.product_name.as_str()).collect();
    assert_eq!(names, vec!["ThinkPad E14", "Unknown Product", "Ryzen 7 Desktop"]);
    assert_eq!(invoice.lines[1].unit_price, Money::ZERO);
    assert_eq!(invoice.lines[2].quantity, 2);

    // One lookup per line, including the one that failed
    assert_eq!(
        backend
            .requests()
            .iter()
            .filter(|r| r.path.starts_with("/products/product/"))
            .count(),
        3
    );

    assert_eq!(invoice.taxes.cgst.to_string(), "90.00");
    assert_eq!(invoice.taxes.sgst.to_string(), "90.00");
    assert_eq!(invoice.taxes.grand_total.to_string(), "1180.00");
}

#[tokio::test]
async fn test_invoice_pdf_renders() {
    let backend = MockBackend::start().await;

    let invoice = load_order_summary(
        &backend.client(),
        &CompanyDetails::default(),
        &OrderId::new(KNOWN_ORDER),
        invoice_date(),
    )
    .await
    .expect("summary");

    let bytes = render_invoice_pdf(&invoice).expect("pdf");
    assert!(bytes.starts_with(b"%PDF"));
}
