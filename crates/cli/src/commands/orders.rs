//! Order commands: list, show, invoice export.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use rocket_computers_admin::{
    backend::BackendClient,
    routes::orders::list::OrderRow,
    services::{invoice_file_name, load_order_summary, render_invoice_pdf},
};
use rocket_computers_core::{CompanyDetails, DEFAULT_PAGE_SIZE, Invoice, OrderId, Page};

use super::CliError;

/// `rc-cli orders list [--page N]`
pub async fn list(client: &BackendClient, page: usize, out: &mut impl Write) -> Result<(), CliError> {
    let orders = client.orders().await?;
    let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
    print_page(out, &Page::new(rows, page, DEFAULT_PAGE_SIZE))?;
    Ok(())
}

/// `rc-cli orders show ORDER_ID`
pub async fn show(
    client: &BackendClient,
    company: &CompanyDetails,
    order_id: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let order_id = OrderId::new(order_id);
    let invoice = load_order_summary(client, company, &order_id, Utc::now().date_naive()).await?;
    print_invoice(out, &invoice)?;
    Ok(())
}

/// `rc-cli orders invoice ORDER_ID [-o FILE]`
///
/// Returns the path the PDF was written to.
pub async fn invoice(
    client: &BackendClient,
    company: &CompanyDetails,
    order_id: String,
    output: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    let order_id = OrderId::new(order_id);
    let invoice = load_order_summary(client, company, &order_id, Utc::now().date_naive()).await?;
    let bytes = render_invoice_pdf(&invoice)?;

    let path = output.unwrap_or_else(|| PathBuf::from(invoice_file_name(&invoice.order_id)));
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

fn print_page(out: &mut impl Write, page: &Page<OrderRow>) -> std::io::Result<()> {
    if page.items.is_empty() {
        return writeln!(out, "No orders yet.");
    }
    writeln!(
        out,
        "{:<14} {:<24} {:<14} {:>12} {:<10} {:<12} {}",
        "ORDER", "CUSTOMER", "PHONE", "TOTAL", "STATUS", "WARRANTY", "CREATED"
    )?;
    for row in &page.items {
        writeln!(
            out,
            "{:<14} {:<24} {:<14} {:>12} {:<10} {:<12} {}",
            row.order_id,
            row.customer_name,
            row.customer_phone_number,
            row.total_price,
            row.payment_status,
            row.warranty_till,
            row.created_at
        )?;
    }
    writeln!(
        out,
        "Page {} of {} ({} orders)",
        page.number, page.total_pages, page.total_items
    )
}

fn print_invoice(out: &mut impl Write, invoice: &Invoice) -> std::io::Result<()> {
    writeln!(out, "{}", invoice.company.name)?;
    writeln!(out, "{}", invoice.company.address)?;
    writeln!(out, "GST No: {}", invoice.company.gst_number)?;
    writeln!(out)?;
    writeln!(out, "Order ID:    {}", invoice.order_id)?;
    writeln!(out, "Date:        {}", invoice.issued_on_display())?;
    writeln!(out, "Customer:    {}", invoice.customer_name)?;
    writeln!(out, "Customer ID: {}", invoice.customer_id_display())?;
    writeln!(out)?;

    if invoice.lines.is_empty() {
        writeln!(out, "No products found in this order.")?;
    } else {
        for line in &invoice.lines {
            writeln!(
                out,
                "{:<40} {:>4} x {:>10} = {:>12}",
                line.product_name,
                line.quantity,
                line.unit_price,
                line.line_total()
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Subtotal:       {:>12}", invoice.taxes.subtotal)?;
    writeln!(out, "CGST (9%):      {:>12}", invoice.taxes.cgst)?;
    writeln!(out, "SGST (9%):      {:>12}", invoice.taxes.sgst)?;
    writeln!(out, "Grand Total:    {:>12}", invoice.taxes.grand_total)?;
    writeln!(out, "Payment Status: {}", invoice.payment_status)
}
