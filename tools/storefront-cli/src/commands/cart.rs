//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use storefront_commerce::cart::QuantityChange;
use storefront_commerce::Storefront;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{format_price, truncate, Output};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id } => {
            let quantity = store.add_by_id(&id)?;
            ctx.output.success(&format!("Added {} (quantity {})", id, quantity));
        }
        CartCommand::Update { id, delta } => match store.update_quantity(&id, delta) {
            QuantityChange::Updated(quantity) => {
                ctx.output.success(&format!("{} now has quantity {}", id, quantity));
            }
            QuantityChange::Removed => ctx.output.success(&format!("Removed {}", id)),
            QuantityChange::Unknown => ctx.output.warn(&format!("{} is not in the cart", id)),
        },
        CartCommand::Remove { id } => {
            if store.remove_from_cart(&id) {
                ctx.output.success(&format!("Removed {}", id));
            } else {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
        }
        CartCommand::Clear { yes } => {
            if store.cart().is_empty() {
                ctx.output.info("Cart is already empty");
            } else {
                if !yes && !ctx.output.is_json() {
                    let confirmed = Confirm::new()
                        .with_prompt("Empty the cart?")
                        .default(false)
                        .interact()?;
                    if !confirmed {
                        ctx.output.warn("Cancelled");
                        return Ok(());
                    }
                } else if !yes {
                    bail!("Refusing to clear the cart without --yes in JSON mode");
                }
                store.start_new_order();
                ctx.output.success("Cart cleared");
            }
        }
    }

    if !store.is_cart_persisted() {
        ctx.output.warn("Cart could not be saved; changes last only for this run");
    }

    print_cart(&ctx.output, &store);
    Ok(())
}

/// Print the cart with totals.
pub fn print_cart(output: &Output, store: &Storefront) {
    let cart = store.cart();
    let totals = store.totals();

    if output.is_json() {
        output.json(&json!({
            "items": cart.items(),
            "item_count": cart.item_count(),
            "totals": totals,
            "resume_state": store.resume_state().as_str(),
            "persisted": store.is_cart_persisted(),
        }));
        return;
    }

    output.header(&format!("Cart ({} item(s))", cart.item_count()));
    if cart.is_empty() {
        output.info("Cart is empty");
        return;
    }

    let widths = [14, 28, 5, 20, 12];
    output.table_row(&["ID", "NAME", "QTY", "UNIT", "LINE"], &widths);
    for item in cart.items() {
        output.table_row(
            &[
                &truncate(item.id.as_str(), widths[0]),
                &truncate(&item.name, widths[1]),
                &item.quantity.to_string(),
                &format_price(&item.current_price, &item.original_price),
                &item.line_current().display(),
            ],
            &widths,
        );
    }

    output.info("");
    output.kv("Subtotal", &totals.subtotal_current.display());
    if totals.has_savings() {
        output.kv("Before discount", &totals.subtotal_original.display());
        output.kv(
            "You save",
            &format!(
                "{} ({:.0}%)",
                totals.savings.display(),
                totals.savings_percentage()
            ),
        );
    }
}
