//! Order route handlers.
//!
//! - `list` - Paginated order list
//! - `new` - Order creation wizard
//! - `summary` - Order summary / invoice and its PDF export

use url::Url;

pub mod list;
pub mod new;
pub mod summary;

/// `/orders/{order_id}/{rest...}` with every segment percent-encoded.
pub(crate) fn order_path(order_id: &str, rest: &[&str]) -> String {
    let Ok(mut url) = Url::parse("http://admin.invalid/orders") else {
        return "/orders".to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(order_id).extend(rest);
    }
    url.path().to_string()
}
