//! Rocket Computers backend API client.
//!
//! The backend owns all persistent state (users, catalog, stock, orders).
//! This module is the only place the admin panel talks to it.
//!
//! # Endpoints
//!
//! ```text
//! POST /admin/register              { username, email, password }
//! POST /admin/login                 { email, password } -> { token }
//! GET  /admin/stock                 Authorization: Bearer <token>
//! POST /admin/product               multipart: name, price, stock, category, image
//! POST /associate/register          { name, email, password }
//! POST /associate/login             { email, password } -> { token }
//! GET  /products/categories
//! GET  /products/category/{name}
//! GET  /products/product/{id}
//! POST /orders/order                -> { order: {...} }
//! GET  /orders/orders               -> { orders: [...] }
//! GET  /orders/getorder/{orderId}   -> { order: [ {...} ] }
//! ```

pub mod client;
pub mod types;

pub use client::{BackendClient, Registration};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An endpoint URL could not be built from the base URL.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A multipart upload could not be assembled.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl BackendError {
    /// The `message` the backend put in its error body, if any.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                message: Some(m), ..
            } if !m.trim().is_empty() => Some(m),
            _ => None,
        }
    }

    /// Message to show a user: the backend's own message when it sent one,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}
