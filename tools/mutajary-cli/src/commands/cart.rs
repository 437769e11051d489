//! Cart commands.

use anyhow::Result;
use mutajary_commerce::ProductId;
use mutajary_storefront::page::{CART_ITEMS, CART_TOTAL};
use mutajary_storefront::{ConfiguredCart, MemoryPage};
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {
            let cart = ctx.cart()?;
            show_cart(&cart, args.html, ctx)
        }
        CartCommand::Add { id } => add(&ProductId::new(id), ctx).await,
        CartCommand::Remove { id } => remove(&ProductId::new(id), args.html, ctx),
        CartCommand::Clear => {
            ctx.cart()?.clear_cart();
            ctx.output.success("Cart cleared");
            Ok(())
        }
    }
}

async fn add(id: &ProductId, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    let spinner = ctx.output.spinner("Looking up product...");
    let product = shop.find_product(id).await;
    spinner.finish_and_clear();
    let product = product?;

    let mut page = MemoryPage::products();
    let item = shop.add_to_cart(&mut page, &product.id, &product.name, product.price);

    if ctx.output.is_json() {
        ctx.output.json(&item);
        return Ok(());
    }
    for alert in page.alerts() {
        ctx.output.success(alert);
    }
    ctx.output.kv(&item.name, &format!("× {}", item.quantity));
    Ok(())
}

fn remove(id: &ProductId, html: bool, ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    if cart.remove_from_cart(id) {
        ctx.output.success(&format!("Removed {}", id));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    show_cart(&cart, html, ctx)
}

fn show_cart(cart: &ConfiguredCart, html: bool, ctx: &Context) -> Result<()> {
    let page = ctx.cart_page(cart);
    let contents = cart.get_cart();
    let total = contents.total();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "items": contents, "total": total }));
        return Ok(());
    }

    if html {
        ctx.output.raw(page.inner_html(CART_ITEMS).unwrap_or_default());
        ctx.output.raw(page.inner_html(CART_TOTAL).unwrap_or_default());
        return Ok(());
    }

    if contents.is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    let locale = ctx.locale();
    ctx.output.header("Cart");
    let name_width = contents
        .items()
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let widths = [name_width, 8, 12];
    ctx.output.table_row(&["Name", "Qty", "Price"], &widths);
    for item in contents.items() {
        let quantity = item.quantity.to_string();
        let line_total = locale.money(item.line_total());
        ctx.output.table_row(
            &[item.name.as_str(), quantity.as_str(), line_total.as_str()],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv(&locale.total, &locale.money(total));

    Ok(())
}
