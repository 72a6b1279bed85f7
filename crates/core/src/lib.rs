//! Rocket Computers Core - Shared types library.
//!
//! This crate provides the types and arithmetic shared by the Rocket Computers
//! components:
//! - `admin` - Browser front-end for admins and store associates
//! - `cli` - Command-line access to the same backend operations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything here can be unit tested without a backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, money, statuses and roles
//! - [`order`] - Order draft validation and the warranty default
//! - [`invoice`] - Invoice lines and the CGST/SGST tax summary
//! - [`pagination`] - Client-side paging over fully fetched lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod invoice;
pub mod order;
pub mod pagination;
pub mod types;

pub use invoice::{CompanyDetails, Invoice, InvoiceLine, TaxSummary};
pub use order::{LineItem, NewOrder, OrderDraft, OrderDraftError, default_warranty_till};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, Paginator};
pub use types::*;
