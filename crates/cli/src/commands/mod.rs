//! CLI command implementations.
//!
//! Each command fetches from the backend first and then writes plain text
//! through a `print_*` function, so formatting can be tested without a
//! network.

pub mod catalog;
pub mod orders;

use rocket_computers_admin::{backend::BackendError, config::ConfigError, services::PdfError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither `--api-url` nor `ROCKET_API_URL` was given.
    #[error("Missing backend URL: pass --api-url or set ROCKET_API_URL")]
    MissingApiUrl,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Failed to render invoice: {0}")]
    Pdf(#[from] PdfError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
