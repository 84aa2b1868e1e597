//! Catalog listing commands.

use std::time::Instant;

use anyhow::Result;
use serde_json::json;
use storefront_commerce::catalog::Product;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{format_price, truncate, Output};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    if let Some(category) = &args.category {
        store.set_category(category);
    }
    if let Some(query) = args.query {
        store.set_query(query, Instant::now());
    }

    let products = store.visible_products();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "category": store.view().category().label(&store.config().labels),
            "query": store.view().query(),
            "products": products,
        }));
        return Ok(());
    }

    ctx.output.header(&format!(
        "Catalog ({} of {})",
        products.len(),
        store.catalog().len()
    ));
    print_products(&ctx.output, &products);

    if products.is_empty() {
        ctx.output.info("No products match the current filter");
    }

    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    let categories = store.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in categories {
        ctx.output.list_item(category);
    }

    Ok(())
}

/// Print products as a table.
pub fn print_products(output: &Output, products: &[&Product]) {
    if products.is_empty() {
        return;
    }
    let widths = [14, 28, 16, 20];
    output.table_row(&["ID", "NAME", "CATEGORY", "PRICE"], &widths);
    for p in products {
        output.table_row(
            &[
                &truncate(p.id.as_str(), widths[0]),
                &truncate(&p.name, widths[1]),
                &truncate(&p.category, widths[2]),
                &format_price(&p.current_price, &p.original_price),
            ],
            &widths,
        );
    }
}
