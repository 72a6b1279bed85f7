//! Order payment status.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Payment status recorded on an order.
///
/// The order form only offers `Paid`, `Pending` and `Failed`; anything else
/// the backend returns is kept verbatim in [`PaymentStatus::Other`] so old or
/// hand-edited orders still list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    #[default]
    Paid,
    Pending,
    Failed,
    Other(String),
}

impl PaymentStatus {
    /// The statuses selectable when creating an order, in display order.
    pub const SELECTABLE: [Self; 3] = [Self::Paid, Self::Pending, Self::Failed];

    /// Wire/display form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Paid" => Self::Paid,
            "Pending" => Self::Pending,
            "Failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.trim().to_owned()))
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_paid() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Paid);
    }

    #[test]
    fn test_known_values_roundtrip_through_json() {
        for status in PaymentStatus::SELECTABLE {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            let back: PaymentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_unknown_value_is_preserved() {
        let status: PaymentStatus = serde_json::from_str("\"Refunded\"").unwrap();
        assert_eq!(status, PaymentStatus::Other("Refunded".to_owned()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Refunded\"");
    }
}
