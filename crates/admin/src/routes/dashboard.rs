//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::{
    backend::Product, filters, middleware::RequireUser, state::AppState,
};

use super::NavUser;

/// Stock row for the dashboard.
#[derive(Debug, Clone)]
pub struct StockView {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: i64,
}

impl From<Product> for StockView {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            category: product.category,
            price: product.price.to_string(),
            stock: product.stock,
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Option<NavUser>,
    pub products: Vec<StockView>,
}

/// Dashboard page handler.
///
/// A failed stock request is logged and shown as an empty list.
#[instrument(skip(user, state))]
pub async fn dashboard(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let products = match state.backend().stock(&user.token).await {
        Ok(products) => products.into_iter().map(StockView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch stock: {e}");
            vec![]
        }
    };

    DashboardTemplate {
        nav: Some(NavUser::from(&user)),
        products,
    }
}
