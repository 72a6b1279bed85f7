//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-memory store)
//! 4. Security headers
//!
//! Authentication is enforced per handler with the [`auth::RequireUser`]
//! extractor.

pub mod auth;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalUser, RequireUser, clear_current_user, set_current_user};
pub use security_headers::security_headers;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
