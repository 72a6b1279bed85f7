//! Front-end user roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Who is logged in to the front-end.
///
/// Both roles authenticate against the backend and receive an opaque token;
/// the role only decides which login/register endpoints are used and how the
/// user is greeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Store administrator: manages stock and the product catalog.
    Admin,
    /// Store associate: creates orders.
    Associate,
}

impl Role {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Associate => "Associate",
        }
    }

    /// Backend path segment for this role's auth endpoints
    /// (`/admin/login`, `/associate/register`, ...).
    #[must_use]
    pub const fn api_segment(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Associate => "associate",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
