//! Catalog listing.

use anyhow::Result;
use mutajary_storefront::page::PRODUCT_LIST;
use mutajary_storefront::MemoryPage;

use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let mut page = MemoryPage::products();

    let spinner = ctx.output.spinner("Fetching products...");
    let products = shop.fetch_products(&mut page).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if args.html {
        ctx.output.raw(page.inner_html(PRODUCT_LIST).unwrap_or_default());
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.warn("No products found");
        return Ok(());
    }

    ctx.output.header(&format!("{} ({})", ctx.config.store.name, products.len()));
    let id_width = products.iter().map(|p| p.id.as_str().len()).max().unwrap_or(2).max(2);
    let name_width = products.iter().map(|p| p.name.chars().count()).max().unwrap_or(4).max(4);
    let widths = [id_width, name_width, 12];

    ctx.output.table_row(&["ID", "Name", "Price"], &widths);
    for product in &products {
        let price = shop.locale().money(product.price);
        ctx.output
            .table_row(&[product.id.as_str(), product.name.as_str(), price.as_str()], &widths);
    }

    Ok(())
}
