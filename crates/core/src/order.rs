//! Order creation: draft validation and defaults.
//!
//! An [`OrderDraft`] is what the order wizard collects, field for field, as
//! raw text. [`OrderDraft::validate`] turns it into a [`NewOrder`] that can be
//! posted to the backend, rejecting incomplete drafts before any request is
//! made.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, Email, EmailError, PaymentStatus, ProductId};

/// Reasons a draft cannot be submitted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderDraftError {
    #[error("Please provide an associate email")]
    MissingAssociateEmail,
    #[error("Invalid associate email: {0}")]
    InvalidAssociateEmail(EmailError),
    #[error("Please select a product")]
    MissingProduct,
    #[error("Quantity must be a whole number of at least 1 (got '{0}')")]
    InvalidQuantity(String),
    #[error("Please provide the customer name")]
    MissingCustomerName,
    #[error("Please provide the customer phone number")]
    MissingCustomerPhoneNumber,
    #[error("Missing customer id")]
    MissingCustomerId,
    #[error("Warranty date must be YYYY-MM-DD (got '{0}')")]
    InvalidWarrantyTill(String),
}

/// One product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Raw order form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
    pub associate_email: String,
    pub product_id: String,
    pub quantity: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_phone_number: String,
    pub payment_status: String,
    pub warranty_till: String,
}

/// A validated order, serialized exactly as `POST /orders/order` expects.
///
/// The backend prices the order itself, so no totals are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub associate_email: Email,
    pub products: Vec<LineItem>,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_phone_number: String,
    pub payment_status: PaymentStatus,
    pub warranty_till: NaiveDate,
}

impl OrderDraft {
    /// Validate the draft.
    ///
    /// The associate email is checked first, so a draft missing it always
    /// reports [`OrderDraftError::MissingAssociateEmail`]. A blank payment
    /// status falls back to `Paid`.
    ///
    /// # Errors
    ///
    /// Returns the first [`OrderDraftError`] found.
    pub fn validate(&self) -> Result<NewOrder, OrderDraftError> {
        let associate_email = match Email::parse(&self.associate_email) {
            Ok(email) => email,
            Err(EmailError::Empty) => return Err(OrderDraftError::MissingAssociateEmail),
            Err(e) => return Err(OrderDraftError::InvalidAssociateEmail(e)),
        };

        let product_id: ProductId = self
            .product_id
            .parse()
            .map_err(|_| OrderDraftError::MissingProduct)?;

        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| OrderDraftError::InvalidQuantity(self.quantity.trim().to_owned()))?;

        let customer_name = required(&self.customer_name, OrderDraftError::MissingCustomerName)?;
        let customer_phone_number = required(
            &self.customer_phone_number,
            OrderDraftError::MissingCustomerPhoneNumber,
        )?;
        let customer_id: CustomerId = self
            .customer_id
            .parse()
            .map_err(|_| OrderDraftError::MissingCustomerId)?;

        let payment_status = if self.payment_status.trim().is_empty() {
            PaymentStatus::default()
        } else {
            PaymentStatus::from(self.payment_status.trim().to_owned())
        };

        let warranty_till = NaiveDate::parse_from_str(self.warranty_till.trim(), "%Y-%m-%d")
            .map_err(|_| OrderDraftError::InvalidWarrantyTill(self.warranty_till.trim().to_owned()))?;

        Ok(NewOrder {
            associate_email,
            products: vec![LineItem {
                product_id,
                quantity,
            }],
            customer_id,
            customer_name,
            customer_phone_number,
            payment_status,
            warranty_till,
        })
    }
}

fn required(value: &str, missing: OrderDraftError) -> Result<String, OrderDraftError> {
    let value = value.trim();
    if value.is_empty() {
        Err(missing)
    } else {
        Ok(value.to_owned())
    }
}

/// Default warranty end: one year after `today`.
///
/// 29 February rolls back to 28 February of the following year.
#[must_use]
pub fn default_warranty_till(today: NaiveDate) -> NaiveDate {
    today.checked_add_months(Months::new(12)).unwrap_or(today)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete_draft() -> OrderDraft {
        OrderDraft {
            associate_email: "priya@rocket.example".to_owned(),
            product_id: "prod-1".to_owned(),
            quantity: "2".to_owned(),
            customer_id: "ROCK-CUST-77".to_owned(),
            customer_name: "Arjun Mehta".to_owned(),
            customer_phone_number: "9800011122".to_owned(),
            payment_status: "Pending".to_owned(),
            warranty_till: "2027-10-15".to_owned(),
        }
    }

    #[test]
    fn test_complete_draft_validates() {
        let order = complete_draft().validate().unwrap();
        assert_eq!(order.associate_email.as_str(), "priya@rocket.example");
        assert_eq!(order.products.len(), 1);
        assert_eq!(order.products[0].quantity, 2);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.warranty_till, NaiveDate::from_ymd_opt(2027, 10, 15).unwrap());
    }

    #[test]
    fn test_missing_associate_email_is_reported_first() {
        let draft = OrderDraft {
            associate_email: "  ".to_owned(),
            ..OrderDraft::default()
        };
        assert_eq!(draft.validate(), Err(OrderDraftError::MissingAssociateEmail));
        assert_eq!(
            OrderDraftError::MissingAssociateEmail.to_string(),
            "Please provide an associate email"
        );
    }

    #[test]
    fn test_malformed_associate_email() {
        let draft = OrderDraft {
            associate_email: "priya".to_owned(),
            ..complete_draft()
        };
        assert!(matches!(
            draft.validate(),
            Err(OrderDraftError::InvalidAssociateEmail(_))
        ));
    }

    #[test]
    fn test_quantity_must_be_positive_integer() {
        for bad in ["0", "-1", "1.5", "", "many"] {
            let draft = OrderDraft {
                quantity: bad.to_owned(),
                ..complete_draft()
            };
            assert!(
                matches!(draft.validate(), Err(OrderDraftError::InvalidQuantity(_))),
                "quantity {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_product_and_customer_fields() {
        let no_product = OrderDraft {
            product_id: String::new(),
            ..complete_draft()
        };
        assert_eq!(no_product.validate(), Err(OrderDraftError::MissingProduct));

        let no_name = OrderDraft {
            customer_name: " ".to_owned(),
            ..complete_draft()
        };
        assert_eq!(no_name.validate(), Err(OrderDraftError::MissingCustomerName));

        let no_phone = OrderDraft {
            customer_phone_number: String::new(),
            ..complete_draft()
        };
        assert_eq!(
            no_phone.validate(),
            Err(OrderDraftError::MissingCustomerPhoneNumber)
        );
    }

    #[test]
    fn test_blank_payment_status_defaults_to_paid() {
        let draft = OrderDraft {
            payment_status: String::new(),
            ..complete_draft()
        };
        assert_eq!(draft.validate().unwrap().payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_bad_warranty_date() {
        let draft = OrderDraft {
            warranty_till: "15/10/2027".to_owned(),
            ..complete_draft()
        };
        assert_eq!(
            draft.validate(),
            Err(OrderDraftError::InvalidWarrantyTill("15/10/2027".to_owned()))
        );
    }

    #[test]
    fn test_new_order_wire_shape() {
        let order = complete_draft().validate().unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "associateEmail": "priya@rocket.example",
                "products": [{ "productId": "prod-1", "quantity": 2 }],
                "customerId": "ROCK-CUST-77",
                "customerName": "Arjun Mehta",
                "customerPhoneNumber": "9800011122",
                "paymentStatus": "Pending",
                "warrantyTill": "2027-10-15"
            })
        );
    }

    #[test]
    fn test_default_warranty_till_is_one_year_out() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(
            default_warranty_till(today),
            NaiveDate::from_ymd_opt(2027, 10, 15).unwrap()
        );

        let leap_day = NaiveDate::from_ymd_opt(2028, 2, 29).unwrap();
        assert_eq!(
            default_warranty_till(leap_day),
            NaiveDate::from_ymd_opt(2029, 2, 28).unwrap()
        );
    }
}
