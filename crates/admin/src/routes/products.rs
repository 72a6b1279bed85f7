//! Product catalog form.
//!
//! The form is posted as multipart (it carries the product image) and
//! forwarded to the backend as multipart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
};
use rocket_computers_core::Money;
use tracing::instrument;

use crate::{
    backend::{NewProduct, ProductImage},
    filters,
    middleware::RequireUser,
    state::AppState,
};

use super::NavUser;

const ADDED: &str = "Product added successfully";
const FAILED: &str = "Error adding product";

/// Product form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct ProductFormTemplate {
    pub nav: Option<NavUser>,
    pub fields: ProductFields,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Text fields of the product form, kept to refill it after an error.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category: String,
}

impl ProductFields {
    /// Check the fields and attach the image.
    ///
    /// # Errors
    ///
    /// Returns the message to show above the form.
    pub fn validate(&self, image: Option<ProductImage>) -> Result<NewProduct, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please provide a product name".to_string());
        }
        let price = Money::parse_non_negative(&self.price)
            .map_err(|_| "Price must be a non-negative amount".to_string())?;
        let stock = self
            .stock
            .trim()
            .parse::<u32>()
            .map_err(|_| "Stock must be a whole number of zero or more".to_string())?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err("Please provide a category".to_string());
        }
        let image = image
            .filter(|i| !i.bytes.is_empty())
            .ok_or_else(|| "Please choose a product image".to_string())?;

        Ok(NewProduct {
            name: name.to_string(),
            price,
            stock,
            category: category.to_string(),
            image,
        })
    }
}

/// GET /products/new
pub async fn new_product_page(RequireUser(user): RequireUser) -> impl IntoResponse {
    ProductFormTemplate {
        nav: Some(NavUser::from(&user)),
        fields: ProductFields::default(),
        error: None,
        success: None,
    }
}

/// POST /products
#[instrument(skip_all)]
pub async fn create_product(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let mut page = ProductFormTemplate {
        nav: Some(NavUser::from(&user)),
        fields: ProductFields::default(),
        error: None,
        success: None,
    };

    let (fields, image) = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Failed to read product form: {e}");
            page.error = Some(FAILED.to_string());
            return page;
        }
    };

    let product = match fields.validate(image) {
        Ok(product) => product,
        Err(message) => {
            page.fields = fields;
            page.error = Some(message);
            return page;
        }
    };

    match state.backend().create_product(&user.token, product).await {
        Ok(()) => {
            tracing::info!(name = %fields.name, "Product added");
            page.success = Some(ADDED.to_string());
        }
        Err(e) => {
            tracing::error!("Failed to add product: {e}");
            page.fields = fields;
            page.error = Some(FAILED.to_string());
        }
    }
    page
}

/// Split the multipart body into text fields and the image.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(ProductFields, Option<ProductImage>), axum::extract::multipart::MultipartError> {
    let mut fields = ProductFields::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_owned();
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?.to_vec();
                image = Some(ProductImage {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "name" => fields.name = field.text().await?,
            "price" => fields.price = field.text().await?,
            "stock" => fields.stock = field.text().await?,
            "category" => fields.category = field.text().await?,
            _ => {}
        }
    }

    Ok((fields, image))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields() -> ProductFields {
        ProductFields {
            name: " Ryzen 7 Desktop ".to_string(),
            price: "64999.50".to_string(),
            stock: "4".to_string(),
            category: "Desktops".to_string(),
        }
    }

    fn image() -> Option<ProductImage> {
        Some(ProductImage {
            file_name: "desktop.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        })
    }

    #[test]
    fn test_valid_product() {
        let product = fields().validate(image()).unwrap();
        assert_eq!(product.name, "Ryzen 7 Desktop");
        assert_eq!(product.price.to_string(), "64999.50");
        assert_eq!(product.stock, 4);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let f = ProductFields {
            price: "-1".to_string(),
            ..fields()
        };
        assert!(f.validate(image()).unwrap_err().contains("Price"));
    }

    #[test]
    fn test_stock_must_be_whole_number() {
        for bad in ["-2", "1.5", "lots", ""] {
            let f = ProductFields {
                stock: bad.to_string(),
                ..fields()
            };
            assert!(f.validate(image()).is_err(), "stock {bad:?} should be rejected");
        }
    }

    #[test]
    fn test_image_is_required() {
        assert!(fields().validate(None).is_err());
        let empty = Some(ProductImage {
            file_name: "empty.png".to_string(),
            content_type: None,
            bytes: vec![],
        });
        assert!(fields().validate(empty).is_err());
    }
}
