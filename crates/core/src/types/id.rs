//! Newtype IDs for type-safe entity references.
//!
//! The backend hands out opaque string identifiers (document keys such as
//! `_id`, business keys such as `orderId`). The `define_id!` macro wraps them
//! so a product id can never be passed where an order id is expected.

/// Error returned when parsing an empty identifier.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} cannot be empty")]
pub struct IdError {
    /// Name of the id type that failed to parse.
    pub kind: &'static str,
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `as_str()`, `into_inner()`
/// - `Display`, `FromStr` (rejects blank input) and `From<String>`
///
/// # Example
///
/// ```rust
/// # use rocket_computers_core::define_id;
/// define_id!(WidgetId);
///
/// let id: WidgetId = "w-1".parse().unwrap();
/// assert_eq!(id.as_str(), "w-1");
/// assert!("  ".parse::<WidgetId>().is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier received from the backend.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the raw identifier.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(OrderId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(CustomerId);

impl CustomerId {
    /// Prefix used for customer ids minted by the order form.
    pub const PREFIX: &'static str = "ROCK-CUST-";

    /// Exclusive upper bound for the numeric suffix.
    pub const SUFFIX_RANGE: u32 = 10_000;

    /// Build a customer id from its numeric suffix, e.g. `ROCK-CUST-42`.
    ///
    /// The suffix is reduced modulo [`Self::SUFFIX_RANGE`].
    #[must_use]
    pub fn from_suffix(suffix: u32) -> Self {
        Self(format!("{}{}", Self::PREFIX, suffix % Self::SUFFIX_RANGE))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id: OrderId = "  ORD-7 ".parse().unwrap();
        assert_eq!(id.as_str(), "ORD-7");
    }

    #[test]
    fn test_parse_rejects_blank() {
        let err = "   ".parse::<ProductId>().unwrap_err();
        assert_eq!(err.kind, "ProductId");
        assert_eq!(err.to_string(), "ProductId cannot be empty");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new("66f1c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"66f1c0ffee\"");
        let back: ProductId = serde_json::from_str("\"66f1c0ffee\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_customer_id_from_suffix() {
        assert_eq!(CustomerId::from_suffix(42).as_str(), "ROCK-CUST-42");
        assert_eq!(CustomerId::from_suffix(9_999).as_str(), "ROCK-CUST-9999");
        assert_eq!(CustomerId::from_suffix(10_001).as_str(), "ROCK-CUST-1");
    }
}
