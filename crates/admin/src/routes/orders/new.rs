//! Order creation wizard.
//!
//! Step one picks a category (`GET /orders/new?category=NAME`), which loads
//! that category's products; step two fills in the customer and posts the
//! order. Drafts are validated before anything is sent to the backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rand::Rng;
use rocket_computers_core::{CustomerId, OrderDraft, PaymentStatus, default_warranty_till};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    backend::{Category, Product},
    filters,
    middleware::OptionalUser,
    models::CurrentUser,
    services::{build_invoice, enrich_line_items},
    state::AppState,
};

use super::super::{NavUser, nav};
use super::summary::{OrderSummaryTemplate, today};

const CATEGORIES_FAILED: &str = "Failed to fetch categories";
const PRODUCTS_FAILED: &str = "Failed to fetch products";
const CREATE_FAILED: &str = "Error creating order";
const CREATED: &str = "Order created successfully";

/// Query parameters for the wizard.
#[derive(Debug, Default, Deserialize)]
pub struct WizardQuery {
    pub category: Option<String>,
}

/// Submitted order form: the draft plus the category it was built in.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub category: String,
    pub associate_email: String,
    pub product_id: String,
    pub quantity: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_phone_number: String,
    pub payment_status: String,
    pub warranty_till: String,
}

impl OrderForm {
    fn draft(&self) -> OrderDraft {
        OrderDraft {
            associate_email: self.associate_email.clone(),
            product_id: self.product_id.clone(),
            quantity: self.quantity.clone(),
            customer_id: self.customer_id.clone(),
            customer_name: self.customer_name.clone(),
            customer_phone_number: self.customer_phone_number.clone(),
            payment_status: self.payment_status.clone(),
            warranty_till: self.warranty_till.clone(),
        }
    }
}

/// Order wizard template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/new.html")]
pub struct OrderWizardTemplate {
    pub nav: Option<NavUser>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub selected_category: String,
    pub draft: OrderDraft,
    pub payment_statuses: Vec<PaymentStatus>,
    pub error: Option<String>,
}

/// A fresh draft: new customer id, one unit, paid, one year of warranty.
/// The associate email is prefilled for a logged-in associate.
#[must_use]
pub fn fresh_draft(user: Option<&CurrentUser>) -> OrderDraft {
    let suffix = rand::rng().random_range(0..CustomerId::SUFFIX_RANGE);
    OrderDraft {
        associate_email: user
            .filter(|u| u.is_associate())
            .map(|u| u.email.to_string())
            .unwrap_or_default(),
        quantity: "1".to_string(),
        customer_id: CustomerId::from_suffix(suffix).into_inner(),
        payment_status: PaymentStatus::default().to_string(),
        warranty_till: default_warranty_till(today())
            .format("%Y-%m-%d")
            .to_string(),
        ..OrderDraft::default()
    }
}

/// GET /orders/new
#[instrument(skip(user, state))]
pub async fn form(
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
    Query(query): Query<WizardQuery>,
) -> impl IntoResponse {
    let category = query.category.unwrap_or_default();
    let draft = fresh_draft(user.as_ref());
    wizard(&state, nav(user.as_ref()), category, draft, None).await
}

/// POST /orders
#[instrument(skip_all)]
pub async fn create(
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
    Form(form): Form<OrderForm>,
) -> Response {
    let nav = nav(user.as_ref());
    let draft = form.draft();

    let new_order = match draft.validate() {
        Ok(order) => order,
        Err(e) => {
            tracing::debug!("Order draft rejected: {e}");
            return wizard(&state, nav, form.category, draft, Some(e.to_string()))
                .await
                .into_response();
        }
    };

    let order = match state.backend().create_order(&new_order).await {
        Ok(order) => order,
        Err(e) => {
            tracing::error!("Failed to create order: {e}");
            return wizard(&state, nav, form.category, draft, Some(CREATE_FAILED.to_string()))
                .await
                .into_response();
        }
    };
    tracing::info!(order_id = %order.order_id, "Order created");

    let lines = enrich_line_items(state.backend(), &order.line_items).await;
    let invoice = build_invoice(&order, lines, &state.config().company, today());

    OrderSummaryTemplate {
        nav,
        invoice: Some(invoice),
        error: None,
        success: Some(CREATED.to_string()),
    }
    .into_response()
}

/// Load the catalog and render the wizard.
///
/// Catalog failures are shown on the page; they never replace an error the
/// caller already has to report.
async fn wizard(
    state: &AppState,
    nav: Option<NavUser>,
    category: String,
    draft: OrderDraft,
    error: Option<String>,
) -> OrderWizardTemplate {
    let mut error = error;

    let categories = match state.backend().categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("Failed to fetch categories: {e}");
            error.get_or_insert_with(|| CATEGORIES_FAILED.to_string());
            vec![]
        }
    };

    let category = category.trim().to_string();
    let products = if category.is_empty() {
        vec![]
    } else {
        match state.backend().products_in_category(&category).await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(category = %category, "Failed to fetch products: {e}");
                error.get_or_insert_with(|| PRODUCTS_FAILED.to_string());
                vec![]
            }
        }
    };

    OrderWizardTemplate {
        nav,
        categories,
        products,
        selected_category: category,
        draft,
        payment_statuses: PaymentStatus::SELECTABLE.to_vec(),
        error,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocket_computers_core::{Email, Role};

    use super::*;
    use crate::backend::AuthToken;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            role,
            email: Email::parse("sam@rocket.example").unwrap(),
            token: AuthToken::new("t"),
        }
    }

    #[test]
    fn test_fresh_draft_defaults() {
        let draft = fresh_draft(None);
        assert!(draft.associate_email.is_empty());
        assert_eq!(draft.quantity, "1");
        assert_eq!(draft.payment_status, "Paid");

        let suffix: u32 = draft
            .customer_id
            .strip_prefix("ROCK-CUST-")
            .unwrap()
            .parse()
            .unwrap();
        assert!(suffix < 10_000);
        assert_eq!(draft.warranty_till, default_warranty_till(today()).to_string());
    }

    #[test]
    fn test_associate_email_is_prefilled() {
        let associate = user(Role::Associate);
        assert_eq!(fresh_draft(Some(&associate)).associate_email, "sam@rocket.example");

        let admin = user(Role::Admin);
        assert!(fresh_draft(Some(&admin)).associate_email.is_empty());
    }

    #[test]
    fn test_form_maps_to_draft() {
        let form = OrderForm {
            category: "Laptops".to_string(),
            associate_email: "sam@rocket.example".to_string(),
            product_id: "p1".to_string(),
            quantity: "2".to_string(),
            ..OrderForm::default()
        };
        let draft = form.draft();
        assert_eq!(draft.product_id, "p1");
        assert_eq!(draft.quantity, "2");
    }
}
