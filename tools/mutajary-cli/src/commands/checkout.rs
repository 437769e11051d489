//! Checkout.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};
use mutajary_commerce::CommerceError;
use mutajary_storefront::{MemoryPage, OrderReceipt};
use serde::Serialize;

use super::CheckoutArgs;
use crate::context::Context;

#[derive(Serialize)]
struct ReceiptSummary<'a> {
    order: &'a mutajary_commerce::Order,
    order_id: Option<&'a str>,
    store_error: Option<String>,
    relay_error: Option<String>,
    location: Option<&'a str>,
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    // An empty cart needs no remote services.
    let cart = ctx.cart()?.get_cart();
    let locale = ctx.locale();
    if cart.is_empty() {
        ctx.output.warn(&locale.empty_cart);
        bail!("Nothing to check out");
    }

    let shop = ctx.storefront()?;
    let name = field(args.name, "Name", args.yes)?;
    let email = field(args.email, "Email", args.yes)?;
    let address = field(args.address, "Address", args.yes)?;

    if !args.yes && !ctx.output.is_json() {
        ctx.output.kv(&locale.total, &locale.money(cart.total()));
        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let mut page = MemoryPage::checkout(&name, &email, &address);
    let spinner = ctx.output.spinner("Placing order...");
    let result = shop.place_order(&mut page).await;
    spinner.finish_and_clear();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(CommerceError::EmptyCart) => {
            for alert in page.alerts() {
                ctx.output.warn(alert);
            }
            bail!("Nothing to check out");
        }
        Err(e) => return Err(e.into()),
    };

    report(&receipt, &page, ctx);
    Ok(())
}

/// Use the flag value, or prompt unless `--yes` was given.
fn field(value: Option<String>, prompt: &str, skip_prompt: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if skip_prompt => Ok(String::new()),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

fn report(receipt: &OrderReceipt, page: &MemoryPage, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&ReceiptSummary {
            order: &receipt.order,
            order_id: receipt.stored.as_ref().ok().map(|id| id.as_str()),
            store_error: receipt.stored.as_ref().err().map(|e| e.to_string()),
            relay_error: receipt.relayed.as_ref().err().map(|e| e.to_string()),
            location: page.location(),
        });
        return;
    }

    let locale = ctx.locale();
    ctx.output.header("Order placed");
    ctx.output.kv(&locale.total, &locale.money(receipt.order.total));

    match &receipt.stored {
        Ok(id) => ctx.output.success(&format!("Order saved as {}", id)),
        Err(e) => ctx.output.warn(&format!("Order was not saved: {}", e)),
    }
    match &receipt.relayed {
        Ok(()) => ctx.output.success("Order email sent"),
        Err(e) => ctx.output.warn(&format!("Order email was not sent: {}", e)),
    }
    if let Some(location) = page.location() {
        ctx.output.debug(&format!("→ {}", location));
    }
    ctx.output.list_item("Cart cleared");
}
