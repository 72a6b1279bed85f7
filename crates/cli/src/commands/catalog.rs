//! Catalog commands: categories, products, stock.

use std::io::Write;

use rocket_computers_admin::backend::{AuthToken, BackendClient, Category, Product};

use super::CliError;

/// `rc-cli categories`
pub async fn categories(client: &BackendClient, out: &mut impl Write) -> Result<(), CliError> {
    let categories = client.categories().await?;
    print_categories(out, &categories)?;
    Ok(())
}

/// `rc-cli products --category NAME`
pub async fn products(
    client: &BackendClient,
    category: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let products = client.products_in_category(category).await?;
    print_products(out, &products)?;
    Ok(())
}

/// `rc-cli stock`
pub async fn stock(
    client: &BackendClient,
    token: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let products = client.stock(&AuthToken::new(token)).await?;
    print_products(out, &products)?;
    Ok(())
}

fn print_categories(out: &mut impl Write, categories: &[Category]) -> std::io::Result<()> {
    if categories.is_empty() {
        return writeln!(out, "No categories.");
    }
    for category in categories {
        writeln!(out, "{}", category.name)?;
    }
    Ok(())
}

fn print_products(out: &mut impl Write, products: &[Product]) -> std::io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products available.");
    }
    writeln!(
        out,
        "{:<26} {:<40} {:<16} {:>12} {:>6}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    )?;
    for p in products {
        writeln!(
            out,
            "{:<26} {:<40} {:<16} {:>12} {:>6}",
            p.id, p.name, p.category, p.price, p.stock
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_print_products() {
        let products: Vec<Product> = serde_json::from_value(serde_json::json!([
            { "_id": "p1", "name": "ThinkPad E14", "price": 58000, "stock": 3, "category": "Laptops" }
        ]))
        .unwrap();

        let mut out = Vec::new();
        print_products(&mut out, &products).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("ID"));
        assert!(text.contains("ThinkPad E14"));
        assert!(text.contains("58000.00"));
    }

    #[test]
    fn test_empty_lists() {
        let mut out = Vec::new();
        print_products(&mut out, &[]).unwrap();
        print_categories(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No products available.\nNo categories.\n"
        );
    }
}
