//! Session-related types for front-end authentication.
//!
//! Types stored in the session for authentication state.

use rocket_computers_core::{Email, Role};
use serde::{Deserialize, Serialize};

use crate::backend::AuthToken;

/// Session-stored identity of the logged-in admin or associate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Which login screen was used.
    pub role: Role,
    /// Email the user logged in with.
    pub email: Email,
    /// Opaque backend token, replayed as a bearer token.
    pub token: AuthToken,
}

impl CurrentUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn is_associate(&self) -> bool {
        self.role == Role::Associate
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
