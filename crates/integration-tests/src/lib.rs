//! Integration test harness for Rocket Computers Admin.
//!
//! [`MockBackend`] is an in-process stand-in for the Rocket Computers REST
//! API, bound to an ephemeral port. It serves a small fixed catalog and 25
//! orders, and records every request it receives so tests can assert on
//! what was (or was not) sent. [`AdminServer`] runs the real admin router
//! against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocket-computers-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rocket_computers_admin::{
    backend::BackendClient,
    config::{AdminConfig, BackendConfig},
    routes,
    state::AppState,
};
use serde_json::{Value, json};

/// Token the mock hands out to `ADMIN_EMAIL`.
pub const ADMIN_TOKEN: &str = "admin-token";
/// Token the mock hands out to `ASSOCIATE_EMAIL`.
pub const ASSOCIATE_TOKEN: &str = "associate-token";
pub const ADMIN_EMAIL: &str = "admin@rocket.example";
pub const ASSOCIATE_EMAIL: &str = "sam@rocket.example";
pub const PASSWORD: &str = "correct horse";
/// Registering with this email fails with `DUPLICATE_MESSAGE`.
pub const TAKEN_EMAIL: &str = "taken@rocket.example";
pub const DUPLICATE_MESSAGE: &str = "Email already registered";
/// Order that exists, with one line pointing at a missing product.
pub const KNOWN_ORDER: &str = "ORD-7";
/// Product id the catalog does not know.
pub const MISSING_PRODUCT: &str = "p-gone";
/// Number of orders served by `GET /orders/orders`.
pub const ORDER_COUNT: usize = 25;

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Body decoded as JSON, if it is JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// In-process mock of the backend REST API.
pub struct MockBackend {
    addr: SocketAddr,
    log: RequestLog,
}

impl MockBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn start() -> Self {
        let log = RequestLog::default();
        let app = mock_routes().layer(middleware::from_fn_with_state(log.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, log }
    }

    /// Base URL of the mock.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A backend client pointed at the mock.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn client(&self) -> BackendClient {
        let config =
            BackendConfig::new(&self.url(), Duration::from_secs(5)).expect("Invalid mock URL");
        BackendClient::new(&config).expect("Failed to build backend client")
    }

    /// Everything received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests matching a method and path.
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

/// The admin front-end running against a [`MockBackend`].
pub struct AdminServer {
    addr: SocketAddr,
    /// Browser-like client with a cookie store.
    pub http: reqwest::Client,
}

impl AdminServer {
    /// Start the admin router on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be configured or bound.
    #[allow(clippy::expect_used)]
    pub async fn start(backend: &MockBackend) -> Self {
        let api_url = backend.url();
        let config = AdminConfig::from_lookup(|key| match key {
            "ROCKET_API_URL" => Some(api_url.clone()),
            _ => None,
        })
        .expect("Invalid admin configuration");
        let state = AppState::new(config).expect("Failed to create application state");
        let app = routes::app(state, concat!(env!("CARGO_MANIFEST_DIR"), "/../admin/static"));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind admin server");
        let addr = listener.local_addr().expect("Admin server has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { addr, http }
    }

    /// Absolute URL for a front-end path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

// =============================================================================
// Mock routes
// =============================================================================

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    let entry = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_owned(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.to_vec(),
    };
    log.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(entry);

    next.run(Request::from_parts(parts, Body::from(body))).await
}

fn mock_routes() -> Router {
    Router::new()
        .route("/admin/register", post(register))
        .route("/associate/register", post(register))
        .route("/admin/login", post(login))
        .route("/associate/login", post(login))
        .route("/admin/stock", get(stock))
        .route("/admin/product", post(create_product))
        .route("/products/categories", get(categories))
        .route("/products/category/{name}", get(products_in_category))
        .route("/products/product/{id}", get(product))
        .route("/orders/order", post(create_order))
        .route("/orders/orders", get(orders))
        .route("/orders/getorder/{id}", get(order))
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn catalog() -> Vec<Value> {
    vec![
        json!({ "_id": "p1", "name": "ThinkPad E14", "price": 58000, "stock": 3, "category": "Laptops" }),
        json!({ "_id": "p2", "name": "Ryzen 7 Desktop", "price": "64999.50", "stock": 5, "category": "Desktops" }),
        json!({ "_id": "p3", "name": "Legion 5", "price": 99000, "stock": 1, "category": "Gaming Laptops/2026" }),
    ]
}

fn stored_order(n: usize) -> Value {
    json!({
        "orderId": format!("ORD-{n}"),
        "customerId": format!("ROCK-CUST-{n}"),
        "customerName": format!("Customer {n}"),
        "customerEmail": null,
        "customerPhoneNumber": "9800000000",
        "associateEmail": ASSOCIATE_EMAIL,
        "paymentStatus": "Paid",
        "warrantyTill": "2027-10-15",
        "totalBillablePrice": 1000,
        "products": [
            { "productId": "p1", "quantity": 1 },
            { "productId": MISSING_PRODUCT, "quantity": 1 },
            { "productId": "p2", "quantity": "2" }
        ],
        "createdAt": "2026-10-15T09:30:00Z"
    })
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == TAKEN_EMAIL {
        return message(StatusCode::BAD_REQUEST, DUPLICATE_MESSAGE);
    }
    message(StatusCode::CREATED, "Registered")
}

async fn login(Json(body): Json<Value>) -> Response {
    let token = match body["email"].as_str() {
        Some(ADMIN_EMAIL) => ADMIN_TOKEN,
        Some(ASSOCIATE_EMAIL) => ASSOCIATE_TOKEN,
        _ => return message(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    if body["password"] != PASSWORD {
        return message(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    Json(json!({ "token": token })).into_response()
}

async fn stock(headers: HeaderMap) -> Response {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(catalog()).into_response()
}

async fn create_product(headers: HeaderMap) -> Response {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    message(StatusCode::CREATED, "Product created")
}

async fn categories() -> Json<Value> {
    Json(json!([
        { "_id": "c1", "name": "Laptops" },
        { "_id": "c2", "name": "Desktops" },
        { "_id": "c3", "name": "Gaming Laptops/2026" }
    ]))
}

async fn products_in_category(Path(name): Path<String>) -> Json<Vec<Value>> {
    Json(
        catalog()
            .into_iter()
            .filter(|p| p["category"] == name.as_str())
            .collect(),
    )
}

async fn product(Path(id): Path<String>) -> Response {
    catalog()
        .into_iter()
        .find(|p| p["_id"] == id.as_str())
        .map_or_else(
            || message(StatusCode::NOT_FOUND, "Product not found"),
            |p| Json(p).into_response(),
        )
}

async fn create_order(Json(body): Json<Value>) -> Response {
    let mut order = body;
    order["orderId"] = json!("ORD-NEW");
    order["totalBillablePrice"] = json!(1000);
    order["createdAt"] = json!("2026-10-15T10:00:00Z");
    (StatusCode::CREATED, Json(json!({ "order": order }))).into_response()
}

async fn orders() -> Json<Value> {
    let orders: Vec<Value> = (1..=ORDER_COUNT).map(stored_order).collect();
    Json(json!({ "orders": orders }))
}

async fn order(Path(id): Path<String>) -> Json<Value> {
    let found: Vec<Value> = (1..=ORDER_COUNT)
        .map(stored_order)
        .filter(|o| o["orderId"] == id.as_str())
        .collect();
    Json(json!({ "order": found }))
}
