//! Business logic services for admin.
//!
//! # Services
//!
//! - `order_summary` - Order lookup with per-line product enrichment
//! - `invoice_pdf` - Single-page PDF rendering of an invoice

pub mod invoice_pdf;
pub mod order_summary;

pub use invoice_pdf::{PdfError, invoice_file_name, render_invoice_pdf};
pub use order_summary::{
    ProductLookup, build_invoice, enrich_line_items, load_order_summary,
};
