//! The admin front-end driven through HTTP, backed by the mock API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::{StatusCode, header};
use rocket_computers_integration_tests::{
    ADMIN_EMAIL, ADMIN_TOKEN, AdminServer, ASSOCIATE_EMAIL, DUPLICATE_MESSAGE, KNOWN_ORDER,
    MockBackend, PASSWORD, TAKEN_EMAIL,
};

async fn start() -> (MockBackend, AdminServer) {
    let backend = MockBackend::start().await;
    let admin = AdminServer::start(&backend).await;
    (backend, admin)
}

async fn get_text(admin: &AdminServer, path: &str) -> (reqwest::Url, String) {
    let resp = admin
        .http
        .get(admin.url(path))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
    let url = resp.url().clone();
    (url, resp.text().await.expect("body"))
}

fn order_form(associate_email: &str) -> Vec<(&'static str, String)> {
    vec![
        ("category", "Laptops".to_string()),
        ("associate_email", associate_email.to_string()),
        ("product_id", "p1".to_string()),
        ("quantity", "1".to_string()),
        ("customer_id", "ROCK-CUST-77".to_string()),
        ("customer_name", "Kavya Rao".to_string()),
        ("customer_phone_number", "9811100000".to_string()),
        ("payment_status", "Paid".to_string()),
        ("warranty_till", "2027-10-15".to_string()),
    ]
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let (_backend, admin) = start().await;

    let resp = admin.http.get(admin.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_orders_page_three_of_twenty_five() {
    let (_backend, admin) = start().await;

    let (_, body) = get_text(&admin, "/orders?page=3").await;
    assert!(body.contains("ORD-21"));
    assert!(body.contains("ORD-25"));
    assert!(!body.contains(">ORD-20<"));
    assert!(body.contains(r#"<span class="btn disabled">Next</span>"#));
    assert!(body.contains(r#"href="/orders?page=2">Previous</a>"#));

    let (_, first) = get_text(&admin, "/orders").await;
    assert!(first.contains(">ORD-1<"));
    assert!(first.contains(">ORD-10<"));
    assert!(!first.contains(">ORD-11<"));
    assert!(first.contains(r#"<span class="btn disabled">Previous</span>"#));
}

#[tokio::test]
async fn test_missing_associate_email_never_reaches_backend() {
    let (backend, admin) = start().await;

    let resp = admin
        .http
        .post(admin.url("/orders"))
        .form(&order_form(""))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();

    assert!(body.contains("Please provide an associate email"));
    assert!(backend.requests_to("POST", "/orders/order").is_empty());
}

#[tokio::test]
async fn test_created_order_shows_its_summary() {
    let (backend, admin) = start().await;

    let resp = admin
        .http
        .post(admin.url("/orders"))
        .form(&order_form(ASSOCIATE_EMAIL))
        .send()
        .await
        .unwrap();
    let body = resp.text().await.unwrap();

    assert!(body.contains("Order created successfully"));
    assert!(body.contains("ORD-NEW"));
    assert!(body.contains("ThinkPad E14"));
    assert!(body.contains("1180.00"));
    assert_eq!(backend.requests_to("POST", "/orders/order").len(), 1);
}

#[tokio::test]
async fn test_invoice_pdf_download() {
    let (_backend, admin) = start().await;

    let resp = admin
        .http
        .get(admin.url(&format!("/orders/{KNOWN_ORDER}/invoice.pdf")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers().clone();
    assert_eq!(
        headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    assert_eq!(
        headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some(r#"attachment; filename="invoice-ORD-7.pdf""#)
    );
    assert!(resp.bytes().await.unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_unknown_order_summary_shows_message() {
    let (_backend, admin) = start().await;

    let (_, body) = get_text(&admin, "/orders/ORD-404").await;
    assert!(body.contains("Failed to fetch order data"));

    let resp = admin
        .http
        .get(admin.url("/orders/ORD-404/invoice.pdf"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_failure_shows_backend_message() {
    let (_backend, admin) = start().await;

    let resp = admin
        .http
        .post(admin.url("/register"))
        .form(&[
            ("username", "Dup"),
            ("email", TAKEN_EMAIL),
            ("password", PASSWORD),
        ])
        .send()
        .await
        .unwrap();
    let body = resp.text().await.unwrap();

    assert!(body.contains(DUPLICATE_MESSAGE));
    assert!(body.contains(r#"value="Dup""#));
}

#[tokio::test]
async fn test_associate_registration_succeeds() {
    let (backend, admin) = start().await;

    let resp = admin
        .http
        .post(admin.url("/associate/register"))
        .form(&[
            ("name", "Sam"),
            ("email", "fresh@rocket.example"),
            ("password", PASSWORD),
        ])
        .send()
        .await
        .unwrap();
    let body = resp.text().await.unwrap();

    assert!(body.contains("Registration successful!"));
    assert_eq!(backend.requests_to("POST", "/associate/register").len(), 1);
}

#[tokio::test]
async fn test_dashboard_requires_login() {
    let (backend, admin) = start().await;

    let (url, body) = get_text(&admin, "/dashboard").await;
    assert_eq!(url.path(), "/login");
    assert!(body.contains("Admin Login"));
    assert!(backend.requests_to("GET", "/admin/stock").is_empty());
}

#[tokio::test]
async fn test_admin_login_then_dashboard_uses_token() {
    let (backend, admin) = start().await;

    let resp = admin
        .http
        .post(admin.url("/login"))
        .form(&[("email", ADMIN_EMAIL), ("password", PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/dashboard");
    let body = resp.text().await.unwrap();
    assert!(body.contains("ThinkPad E14"));
    assert!(body.contains("3 in stock"));

    let stock = backend.requests_to("GET", "/admin/stock");
    assert_eq!(
        stock[0].authorization.as_deref(),
        Some(format!("Bearer {ADMIN_TOKEN}").as_str())
    );

    // Logout clears the session
    admin.http.post(admin.url("/logout")).send().await.unwrap();
    let (url, _) = get_text(&admin, "/dashboard").await;
    assert_eq!(url.path(), "/login");
}

#[tokio::test]
async fn test_bad_admin_login_hides_backend_message() {
    let (_backend, admin) = start().await;

    let resp = admin
        .http
        .post(admin.url("/login"))
        .form(&[("email", ADMIN_EMAIL), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/login");
    let body = resp.text().await.unwrap();
    assert!(body.contains("Invalid email or password"));
    assert!(!body.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_wizard_lists_category_products() {
    let (_backend, admin) = start().await;

    let (_, body) = get_text(&admin, "/orders/new?category=Laptops").await;
    assert!(body.contains("ThinkPad E14"));
    assert!(!body.contains("Ryzen 7 Desktop"));
    assert!(body.contains("ROCK-CUST-"));
}
