//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Health check
//! GET  /                         - Home (links to the login/register screens)
//!
//! # Auth
//! GET  /login                    - Admin login page
//! POST /login                    - Admin login
//! GET  /register                 - Admin registration page
//! POST /register                 - Admin registration
//! GET  /associate/login          - Associate login page
//! POST /associate/login          - Associate login
//! GET  /associate/register       - Associate registration page
//! POST /associate/register       - Associate registration
//! POST /logout                   - Logout
//!
//! # Stock and catalog (login required)
//! GET  /dashboard                - Stock list
//! GET  /products/new             - Product form
//! POST /products                 - Create product (multipart)
//!
//! # Orders
//! GET  /orders                   - Order list (?page=N)
//! GET  /orders/new               - Order wizard (?category=NAME)
//! POST /orders                   - Create order
//! GET  /orders/{order_id}        - Order summary / invoice
//! GET  /orders/{order_id}/invoice.pdf - Invoice PDF download
//! ```

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod orders;
pub mod products;

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{create_session_layer, security_headers};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Largest accepted request body (product images).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Logged-in user as shown in the navigation bar.
#[derive(Debug, Clone)]
pub struct NavUser {
    pub email: String,
    pub role_label: &'static str,
    pub is_admin: bool,
}

impl From<&CurrentUser> for NavUser {
    fn from(user: &CurrentUser) -> Self {
        Self {
            email: user.email.to_string(),
            role_label: user.role.label(),
            is_admin: user.is_admin(),
        }
    }
}

/// Navigation state for a possibly anonymous visitor.
#[must_use]
pub fn nav(user: Option<&CurrentUser>) -> Option<NavUser> {
    user.map(NavUser::from)
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::admin_login_page).post(auth::admin_login),
        )
        .route(
            "/register",
            get(auth::admin_register_page).post(auth::admin_register),
        )
        .route(
            "/associate/login",
            get(auth::associate_login_page).post(auth::associate_login),
        )
        .route(
            "/associate/register",
            get(auth::associate_register_page).post(auth::associate_register),
        )
        .route("/logout", post(auth::logout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list::index).post(orders::new::create))
        .route("/new", get(orders::new::form))
        .route("/{order_id}", get(orders::summary::show))
        .route("/{order_id}/invoice.pdf", get(orders::summary::invoice_pdf))
}

/// Create all page routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .route("/dashboard", get(dashboard::dashboard))
        .route("/products/new", get(products::new_product_page))
        .route(
            "/products",
            post(products::create_product).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .nest("/orders", order_routes())
}

/// Build the complete application: routes, static files and the middleware
/// stack, with state applied.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState, static_dir: &str) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(security_headers))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
