//! Single-page A4 PDF rendering of an order invoice.
//!
//! The page is laid out top to bottom on a fixed line grid: seller block,
//! order and customer block, product table, tax summary. When the product
//! table would push the summary off the page, the table is cut short and
//! ends with an "and N more item(s)" row.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use rocket_computers_core::{Invoice, InvoiceLine, OrderId};
use thiserror::Error;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MM: f32 = 15.0;
const TOP_MM: f32 = 280.0;
const BOTTOM_MM: f32 = 20.0;
const LINE_MM: f32 = 6.0;

/// Grid rows between `TOP_MM` and `BOTTOM_MM`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const MAX_ROWS: usize = ((TOP_MM - BOTTOM_MM) / LINE_MM) as usize;

/// Rows the tax summary needs below the table (spacer + five lines).
const SUMMARY_ROWS: usize = 6;

/// Longest product name printed before it is cut.
const MAX_NAME_CHARS: usize = 48;

const COL_QTY_MM: f32 = 120.0;
const COL_PRICE_MM: f32 = 140.0;
const COL_TOTAL_MM: f32 = 172.0;

/// Errors from PDF generation.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(#[from] printpdf::Error),
}

/// Font weight of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// One positioned run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub weight: Weight,
}

/// Render `invoice` to PDF bytes.
///
/// # Errors
///
/// Returns `PdfError` if the document cannot be assembled.
pub fn render_invoice_pdf(invoice: &Invoice) -> Result<Vec<u8>, PdfError> {
    let title = format!("Invoice {}", invoice.order_id);
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Invoice");
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for run in layout(invoice) {
        let font: &IndirectFontRef = match run.weight {
            Weight::Regular => &regular,
            Weight::Bold => &bold,
        };
        layer.use_text(run.text, run.size_pt, Mm(run.x_mm), Mm(run.y_mm), font);
    }

    Ok(doc.save_to_bytes()?)
}

/// Position every piece of text on the page.
#[must_use]
pub fn layout(invoice: &Invoice) -> Vec<TextRun> {
    let mut page = Grid::default();
    let company = &invoice.company;

    page.text(&company.name, 16.0, Weight::Bold);
    page.text(&company.address, 10.0, Weight::Regular);
    page.text(&format!("GST No: {}", company.gst_number), 10.0, Weight::Regular);
    page.skip();

    page.text("INVOICE", 14.0, Weight::Bold);
    page.text(&format!("Order ID: {}", invoice.order_id), 10.0, Weight::Regular);
    page.text(&format!("Customer: {}", invoice.customer_name), 10.0, Weight::Regular);
    page.text(
        &format!("Customer ID: {}", invoice.customer_id_display()),
        10.0,
        Weight::Regular,
    );
    page.text(&format!("Date: {}", invoice.issued_on_display()), 10.0, Weight::Regular);
    page.skip();

    page.columns(["Product", "Qty", "Unit Price", "Total"], Weight::Bold);

    if invoice.lines.is_empty() {
        page.text("No products found in this order.", 10.0, Weight::Regular);
    } else {
        let capacity = MAX_ROWS.saturating_sub(page.row + SUMMARY_ROWS).max(1);
        let (shown, hidden) = split_lines(&invoice.lines, capacity);
        for line in shown {
            page.columns(
                [
                    truncate(&line.product_name, MAX_NAME_CHARS),
                    line.quantity.to_string(),
                    line.unit_price.to_string(),
                    line.line_total().to_string(),
                ],
                Weight::Regular,
            );
        }
        if hidden > 0 {
            page.text(&overflow_marker(hidden), 10.0, Weight::Regular);
        }
    }
    page.skip();

    let taxes = &invoice.taxes;
    page.text(&format!("Subtotal: {}", taxes.subtotal), 10.0, Weight::Regular);
    page.text(&format!("CGST (9%): {}", taxes.cgst), 10.0, Weight::Regular);
    page.text(&format!("SGST (9%): {}", taxes.sgst), 10.0, Weight::Regular);
    page.text(&format!("Grand Total: {}", taxes.grand_total), 12.0, Weight::Bold);
    page.text(
        &format!("Payment Status: {}", invoice.payment_status),
        10.0,
        Weight::Regular,
    );

    page.runs
}

/// `invoice-<orderId>.pdf`, with anything outside `[A-Za-z0-9._-]` replaced
/// so the name is safe in a `Content-Disposition` header and on disk.
#[must_use]
pub fn invoice_file_name(order_id: &OrderId) -> String {
    let safe: String = order_id
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("invoice-{safe}.pdf")
}

/// Row that replaces the product lines cut from the page.
///
/// Built-in PDF fonts have no reliable ellipsis glyph, so three dots are used.
#[must_use]
pub fn overflow_marker(hidden: usize) -> String {
    format!("... and {hidden} more item(s)")
}

/// Split `lines` so that at most `capacity` table rows are used, counting
/// the overflow marker as a row.
fn split_lines(lines: &[InvoiceLine], capacity: usize) -> (&[InvoiceLine], usize) {
    if lines.len() <= capacity {
        return (lines, 0);
    }
    let shown = capacity.saturating_sub(1);
    let (head, _) = lines.split_at(shown);
    (head, lines.len() - shown)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Top-down cursor over the line grid.
#[derive(Default)]
struct Grid {
    row: usize,
    runs: Vec<TextRun>,
}

impl Grid {
    #[allow(clippy::cast_precision_loss)]
    fn y(&self) -> f32 {
        (self.row as f32).mul_add(-LINE_MM, TOP_MM)
    }

    fn text(&mut self, text: &str, size_pt: f32, weight: Weight) {
        self.runs.push(TextRun {
            text: text.to_string(),
            x_mm: LEFT_MM,
            y_mm: self.y(),
            size_pt,
            weight,
        });
        self.row += 1;
    }

    fn columns<S: Into<String>>(&mut self, cells: [S; 4], weight: Weight) {
        let y = self.y();
        let xs = [LEFT_MM, COL_QTY_MM, COL_PRICE_MM, COL_TOTAL_MM];
        for (cell, x_mm) in cells.into_iter().zip(xs) {
            self.runs.push(TextRun {
                text: cell.into(),
                x_mm,
                y_mm: y,
                size_pt: 10.0,
                weight,
            });
        }
        self.row += 1;
    }

    fn skip(&mut self) {
        self.row += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use rocket_computers_core::{
        CompanyDetails, CustomerId, Money, PaymentStatus, ProductId, TaxSummary,
    };

    use super::*;

    fn invoice(lines: usize) -> Invoice {
        Invoice {
            company: CompanyDetails::default(),
            order_id: OrderId::new("ORD-42"),
            customer_id: Some(CustomerId::new("ROCK-CUST-42")),
            customer_name: "Kavya Rao".to_string(),
            issued_on: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
            lines: (0..lines)
                .map(|i| InvoiceLine {
                    product_id: ProductId::new(format!("p{i}")),
                    product_name: format!("Part {i}"),
                    unit_price: Money::from(100),
                    quantity: 1,
                })
                .collect(),
            taxes: TaxSummary::from_subtotal(Money::from(1000)),
            payment_status: PaymentStatus::Paid,
        }
    }

    fn texts(runs: &[TextRun]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_pdf_has_magic_header() {
        let bytes = render_invoice_pdf(&invoice(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_layout_contains_invoice_text() {
        let runs = layout(&invoice(2));
        let texts = texts(&runs);
        for expected in [
            "Rocket Computers",
            "123 Tech Park, Silicon Valley, CA",
            "GST No: GST123456789",
            "Order ID: ORD-42",
            "Customer ID: ROCK-CUST-42",
            "Date: 2026-10-15",
            "Part 0",
            "Part 1",
            "Subtotal: 1000.00",
            "CGST (9%): 90.00",
            "SGST (9%): 90.00",
            "Grand Total: 1180.00",
            "Payment Status: Paid",
        ] {
            assert!(texts.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn test_empty_order_message() {
        let runs = layout(&invoice(0));
        assert!(texts(&runs).contains(&"No products found in this order."));
    }

    #[test]
    fn test_overflow_is_cut_with_marker_and_stays_on_page() {
        let runs = layout(&invoice(200));
        let texts = texts(&runs);

        let shown = texts.iter().filter(|t| t.starts_with("Part ")).count();
        assert!(shown > 0 && shown < 200);
        let marker = overflow_marker(200 - shown);
        assert!(texts.contains(&marker.as_str()));
        assert!(texts.contains(&"Grand Total: 1180.00"));
        assert!(runs.iter().all(|r| r.y_mm >= BOTTOM_MM));
    }

    #[test]
    fn test_fitting_order_has_no_marker() {
        let runs = layout(&invoice(5));
        assert!(!runs.iter().any(|r| r.text.contains("more item(s)")));
    }

    #[test]
    fn test_long_names_are_truncated() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_invoice_file_name() {
        assert_eq!(invoice_file_name(&OrderId::new("ORD-1001")), "invoice-ORD-1001.pdf");
        assert_eq!(
            invoice_file_name(&OrderId::new("a\"b/c d")),
            "invoice-a_b_c_d.pdf"
        );
    }
}
