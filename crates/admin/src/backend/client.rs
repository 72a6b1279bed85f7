//! HTTP client for the Rocket Computers backend.

use std::sync::Arc;

use reqwest::{Response, multipart};
use rocket_computers_core::{NewOrder, OrderId, ProductId, Role};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::BackendError;
use super::types::{
    AuthToken, Category, CreatedOrderEnvelope, MessageBody, NewProduct, Order, OrderLookupEnvelope,
    OrdersEnvelope, Product, TokenResponse,
};
use crate::config::BackendConfig;

/// Client for the backend REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Account details for `POST /admin/register` and `POST /associate/register`.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Sent as `username` for admins and `name` for associates.
    pub display_name: String,
    pub email: String,
    pub password: SecretString,
}

impl BackendClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Http` if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Register an admin or associate account.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` carrying the backend's message on rejection.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(
        &self,
        role: Role,
        registration: &Registration,
    ) -> Result<(), BackendError> {
        let name_key = match role {
            Role::Admin => "username",
            Role::Associate => "name",
        };
        let mut body = serde_json::Map::new();
        body.insert(
            name_key.to_string(),
            registration.display_name.clone().into(),
        );
        body.insert("email".to_string(), registration.email.clone().into());
        body.insert(
            "password".to_string(),
            registration.password.expose_secret().into(),
        );

        let url = self.endpoint(&[role.api_segment(), "register"])?;
        let response = self.inner.client.post(url).json(&body).send().await?;
        check_status(response).await?;

        debug!(%role, "Account registered");
        Ok(())
    }

    /// Log in and obtain a session token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` when the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        role: Role,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthToken, BackendError> {
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let url = self.endpoint(&[role.api_segment(), "login"])?;
        let response = self.inner.client.post(url).json(&body).send().await?;
        let TokenResponse { token } = read_json(response).await?;
        Ok(token)
    }

    // =========================================================================
    // Stock and catalog
    // =========================================================================

    /// Stock list for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token is rejected.
    #[instrument(skip(self, token))]
    pub async fn stock(&self, token: &AuthToken) -> Result<Vec<Product>, BackendError> {
        let url = self.endpoint(&["admin", "stock"])?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        read_json(response).await
    }

    /// Add a product with its image.
    ///
    /// # Errors
    ///
    /// Returns error if the upload cannot be built or the backend rejects it.
    #[instrument(skip(self, token, product), fields(name = %product.name, category = %product.category))]
    pub async fn create_product(
        &self,
        token: &AuthToken,
        product: NewProduct,
    ) -> Result<(), BackendError> {
        let NewProduct {
            name,
            price,
            stock,
            category,
            image,
        } = product;

        let mut image_part = multipart::Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            image_part = image_part
                .mime_str(content_type)
                .map_err(|e| BackendError::InvalidUpload(e.to_string()))?;
        }

        let form = multipart::Form::new()
            .text("name", name)
            .text("price", price.amount().to_string())
            .text("stock", stock.to_string())
            .text("category", category)
            .part("image", image_part);

        let url = self.endpoint(&["admin", "product"])?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose())
            .multipart(form)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// All product categories.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, BackendError> {
        let url = self.endpoint(&["products", "categories"])?;
        let response = self.inner.client.get(url).send().await?;
        read_json(response).await
    }

    /// Products in the named category.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, BackendError> {
        let url = self.endpoint(&["products", "category", category])?;
        let response = self.inner.client.get(url).send().await?;
        read_json(response).await
    }

    /// A single product.
    ///
    /// A `null` body is reported as `BackendError::NotFound`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, BackendError> {
        let url = self.endpoint(&["products", "product", id.as_str()])?;
        let response = self.inner.client.get(url).send().await?;
        let product: Option<Product> = read_json(response).await?;
        product.ok_or_else(|| BackendError::NotFound(format!("product {id}")))
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the order.
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, BackendError> {
        let url = self.endpoint(&["orders", "order"])?;
        let response = self.inner.client.post(url).json(order).send().await?;
        let CreatedOrderEnvelope { order } = read_json(response).await?;
        debug!(order_id = %order.order_id, "Order created");
        Ok(order)
    }

    /// Every order, newest as returned by the backend.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, BackendError> {
        let url = self.endpoint(&["orders", "orders"])?;
        let response = self.inner.client.get(url).send().await?;
        let envelope: OrdersEnvelope = read_json(response).await?;
        Ok(envelope.into_orders())
    }

    /// Look up an order by its business id.
    ///
    /// The backend answers with an array; the first element is the order.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` when the array is empty.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: &OrderId) -> Result<Order, BackendError> {
        let url = self.endpoint(&["orders", "getorder", id.as_str()])?;
        let response = self.inner.client.get(url).send().await?;
        let OrderLookupEnvelope { order } = read_json(response).await?;
        order
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("order {id}")))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-success response into `BackendError::Api`.
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<MessageBody>(&body)
        .ok()
        .and_then(|b| b.message);
    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Check the status and decode the JSON body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let response = check_status(response).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(&BackendConfig::new(base, Duration::from_secs(5)).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let c = client("http://localhost:5000");
        assert_eq!(
            c.endpoint(&["orders", "orders"]).unwrap().as_str(),
            "http://localhost:5000/orders/orders"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("https://api.rocket.example/v1/");
        assert_eq!(
            c.endpoint(&["products", "categories"]).unwrap().as_str(),
            "https://api.rocket.example/v1/products/categories"
        );
    }

    #[test]
    fn test_endpoint_percent_encodes_path_parameters() {
        let c = client("http://localhost:5000");
        assert_eq!(
            c.endpoint(&["products", "category", "Gaming Laptops/2026"])
                .unwrap()
                .as_str(),
            "http://localhost:5000/products/category/Gaming%20Laptops%2F2026"
        );
    }
}
