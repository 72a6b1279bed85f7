//! Session models for admin.

pub mod session;

pub use session::CurrentUser;
pub use session::keys as session_keys;
