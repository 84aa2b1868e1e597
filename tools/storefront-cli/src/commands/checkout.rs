//! Checkout snapshot command.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use storefront_commerce::checkout::CheckoutSnapshot;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::{format_timestamp, Output};

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    let Some(snapshot) = store.checkout_snapshot() else {
        bail!("Cart is empty; nothing to check out");
    };

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
    } else {
        print_snapshot(&ctx.output, &snapshot);
    }

    if args.start_new {
        if !args.yes && !ctx.output.is_json() {
            let confirmed = Confirm::new()
                .with_prompt("Start a new order now?")
                .default(true)
                .interact()?;
            if !confirmed {
                return Ok(());
            }
        }
        store.start_new_order();
        ctx.output.success("Started a new order");
    }

    Ok(())
}

/// Print a checkout snapshot.
pub fn print_snapshot(output: &Output, snapshot: &CheckoutSnapshot) {
    output.header("Order summary");
    for item in &snapshot.items {
        output.list_item(&format!(
            "{} x{}  {}",
            item.name,
            item.quantity,
            item.line_current().display()
        ));
    }
    output.info("");
    output.kv("Items", &snapshot.item_count.to_string());
    output.kv("Total", &snapshot.subtotal_current.display());
    output.kv("Captured", &format_timestamp(snapshot.captured_at));
}
