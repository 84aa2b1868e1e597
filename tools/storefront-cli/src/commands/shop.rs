//! Interactive shopping session.

use std::time::Instant;

use anyhow::{bail, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use serde_json::{json, Map, Value};
use storefront_commerce::cart::QuantityChange;
use storefront_commerce::catalog::UpsertOutcome;
use storefront_commerce::session::ResumeAction;
use storefront_commerce::Storefront;

use super::cart::print_cart;
use super::catalog::print_products;
use super::checkout::print_snapshot;
use super::ShopArgs;
use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Browse,
    Category,
    Search,
    Add,
    Adjust,
    Remove,
    ViewCart,
    Checkout,
    ToggleAdmin,
    EditProduct,
    DeleteProduct,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Browse => "Browse products",
            Action::Category => "Choose category",
            Action::Search => "Search by name",
            Action::Add => "Add to cart",
            Action::Adjust => "Change quantity",
            Action::Remove => "Remove from cart",
            Action::ViewCart => "View cart",
            Action::Checkout => "Check out",
            Action::ToggleAdmin => "Toggle admin mode",
            Action::EditProduct => "Add or edit product",
            Action::DeleteProduct => "Delete product",
            Action::Quit => "Quit",
        }
    }

    fn menu(admin: bool) -> Vec<Action> {
        let mut actions = vec![
            Action::Browse,
            Action::Category,
            Action::Search,
            Action::Add,
            Action::Adjust,
            Action::Remove,
            Action::ViewCart,
            Action::Checkout,
            Action::ToggleAdmin,
        ];
        if admin {
            actions.extend([Action::EditProduct, Action::DeleteProduct]);
        }
        actions.push(Action::Quit);
        actions
    }
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The interactive shop does not support --json");
    }

    let mut store = ctx.open_storefront()?;
    let theme = ColorfulTheme::default();
    ctx.output.clear_screen();

    if let Some(category) = &args.category {
        store.set_category(category);
    }

    if store.needs_resume_decision() {
        ask_resume(&mut store, &theme, ctx)?;
    }

    loop {
        let actions = Action::menu(store.is_admin());
        let labels: Vec<String> = actions.iter().map(|a| menu_label(*a, &store)).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt(status_line(&store))
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::Browse => browse(&store, ctx),
            Action::Category => choose_category(&mut store, &theme)?,
            Action::Search => search(&mut store, &theme, ctx)?,
            Action::Add => add(&mut store, &theme, ctx)?,
            Action::Adjust => adjust(&mut store, &theme, ctx)?,
            Action::Remove => remove(&mut store, &theme, ctx)?,
            Action::ViewCart => print_cart(&ctx.output, &store),
            Action::Checkout => checkout(&mut store, &theme, ctx)?,
            Action::ToggleAdmin => {
                let on = store.toggle_admin_mode();
                ctx.output.info(if on { "Admin mode on" } else { "Admin mode off" });
            }
            Action::EditProduct => edit_product(&mut store, &theme, ctx)?,
            Action::DeleteProduct => delete_product(&mut store, &theme, ctx)?,
            Action::Quit => break,
        }

        if !store.is_cart_persisted() {
            ctx.output.warn("Cart could not be saved; it will be lost when you quit");
        }
    }

    Ok(())
}

fn status_line(store: &Storefront) -> String {
    let view = store.view();
    let mut line = format!(
        "[{}] {} item(s), {}",
        view.category().label(&store.config().labels),
        store.cart().item_count(),
        store.totals().subtotal_current.display()
    );
    if !view.query().is_empty() {
        line.push_str(&format!(", search \"{}\"", view.query()));
    }
    if store.is_admin() {
        line.push_str(", admin");
    }
    line
}

fn menu_label(action: Action, store: &Storefront) -> String {
    match action {
        Action::ViewCart if !store.cart().is_empty() => {
            format!("{} ({})", action.label(), store.cart().item_count())
        }
        _ => action.label().to_string(),
    }
}

fn ask_resume(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    print_cart(&ctx.output, store);
    let choice = Select::with_theme(theme)
        .with_prompt("You have a saved order")
        .items(&["Continue saved order", "Start a new order"])
        .default(0)
        .interact()?;
    let action = if choice == 0 {
        ResumeAction::Resume
    } else {
        ResumeAction::StartNew
    };
    store.resolve_resume(action)?;
    if action == ResumeAction::StartNew {
        ctx.output.success("Started a new order");
    }
    Ok(())
}

fn browse(store: &Storefront, ctx: &Context) {
    let products = store.visible_products();
    ctx.output.header(&format!("{} product(s)", products.len()));
    print_products(&ctx.output, &products);
    if products.is_empty() {
        ctx.output.info("Nothing matches; try another category or search");
    }
}

fn choose_category(store: &mut Storefront, theme: &ColorfulTheme) -> Result<()> {
    let categories: Vec<String> = store.categories().into_iter().map(str::to_string).collect();
    let current = store.view().category().label(&store.config().labels).to_string();
    let choice = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&categories)
        .default(categories.iter().position(|c| *c == current).unwrap_or(0))
        .interact()?;
    store.set_category(&categories[choice]);
    Ok(())
}

fn search(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search (empty to clear)")
        .with_initial_text(store.view().query())
        .allow_empty(true)
        .interact_text()?;
    store.set_query(query, Instant::now());
    if store.is_searching(Instant::now()) {
        ctx.output.debug("searching…");
    }
    browse(store, ctx);
    Ok(())
}

fn add(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    let products: Vec<(String, String)> = store
        .visible_products()
        .iter()
        .map(|p| {
            (
                p.id.to_string(),
                format!("{}  {}", p.name, p.current_price.display()),
            )
        })
        .collect();
    if products.is_empty() {
        ctx.output.info("No products to add");
        return Ok(());
    }

    let items: Vec<&str> = products.iter().map(|(_, label)| label.as_str()).collect();
    let choice = Select::with_theme(theme)
        .with_prompt("Add which product?")
        .items(&items)
        .default(0)
        .interact()?;

    let id = &products[choice].0;
    let quantity = store.add_by_id(id)?;
    ctx.output.success(&format!("Added ({} in cart)", quantity));
    Ok(())
}

fn pick_line(store: &Storefront, theme: &ColorfulTheme, prompt: &str) -> Result<Option<String>> {
    let lines: Vec<(String, String)> = store
        .cart_items()
        .iter()
        .map(|i| (i.id.to_string(), format!("{} x{}", i.name, i.quantity)))
        .collect();
    if lines.is_empty() {
        return Ok(None);
    }
    let items: Vec<&str> = lines.iter().map(|(_, label)| label.as_str()).collect();
    let choice = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(Some(lines[choice].0.clone()))
}

fn adjust(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    let Some(id) = pick_line(store, theme, "Change which line?")? else {
        ctx.output.info("Cart is empty");
        return Ok(());
    };
    let delta: i64 = Input::with_theme(theme)
        .with_prompt("Change by (e.g. 1 or -1)")
        .default(1)
        .interact_text()?;

    match store.update_quantity(&id, delta) {
        QuantityChange::Updated(quantity) => ctx.output.success(&format!("Quantity now {}", quantity)),
        QuantityChange::Removed => ctx.output.success("Removed from cart"),
        QuantityChange::Unknown => ctx.output.warn("That line is no longer in the cart"),
    }
    Ok(())
}

fn remove(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    let Some(id) = pick_line(store, theme, "Remove which line?")? else {
        ctx.output.info("Cart is empty");
        return Ok(());
    };
    if store.remove_from_cart(&id) {
        ctx.output.success("Removed from cart");
    }
    Ok(())
}

fn checkout(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    let Some(snapshot) = store.checkout_snapshot() else {
        ctx.output.info("Cart is empty");
        return Ok(());
    };
    print_snapshot(&ctx.output, &snapshot);

    let done = Confirm::with_theme(theme)
        .with_prompt("Order sent? Start a new order")
        .default(false)
        .interact()?;
    if done {
        store.start_new_order();
        ctx.output.success("Started a new order");
    }
    Ok(())
}

fn edit_product(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    let id: String = Input::with_theme(theme)
        .with_prompt("Product ID (empty for a new product)")
        .allow_empty(true)
        .interact_text()?;
    let existing = store.catalog().get(id.trim()).cloned();

    let name: String = Input::with_theme(theme)
        .with_prompt("Name")
        .with_initial_text(existing.as_ref().map(|p| p.name.as_str()).unwrap_or(""))
        .allow_empty(true)
        .interact_text()?;
    let category: String = Input::with_theme(theme)
        .with_prompt("Category")
        .with_initial_text(existing.as_ref().map(|p| p.category.as_str()).unwrap_or(""))
        .allow_empty(true)
        .interact_text()?;
    let current_price: String = Input::with_theme(theme)
        .with_prompt("Price")
        .with_initial_text(
            existing
                .as_ref()
                .map(|p| p.current_price.display_amount())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()?;
    let original_price: String = Input::with_theme(theme)
        .with_prompt("Price before discount")
        .with_initial_text(
            existing
                .as_ref()
                .map(|p| p.original_price.display_amount())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()?;

    let mut record = Map::new();
    if !id.trim().is_empty() {
        record.insert("id".to_string(), json!(id.trim()));
    }
    record.insert("name".to_string(), json!(name));
    record.insert("category".to_string(), json!(category));
    record.insert("currentPrice".to_string(), json!(current_price));
    record.insert("originalPrice".to_string(), json!(original_price));
    if let Some(p) = &existing {
        if let Some(image) = &p.image {
            record.insert("image".to_string(), json!(image));
        }
        if let Some(description) = &p.description {
            record.insert("description".to_string(), json!(description));
        }
    }

    let (id, outcome) = store.upsert_record(Value::Object(record))?;
    match outcome {
        UpsertOutcome::Inserted => ctx.output.success(&format!("Added product {}", id)),
        UpsertOutcome::Replaced => ctx.output.success(&format!("Updated product {}", id)),
    }
    Ok(())
}

fn delete_product(store: &mut Storefront, theme: &ColorfulTheme, ctx: &Context) -> Result<()> {
    let products: Vec<(String, String)> = store
        .visible_products()
        .iter()
        .map(|p| (p.id.to_string(), format!("{} ({})", p.name, p.id)))
        .collect();
    if products.is_empty() {
        ctx.output.info("No products to delete");
        return Ok(());
    }

    let items: Vec<&str> = products.iter().map(|(_, label)| label.as_str()).collect();
    let choice = Select::with_theme(theme)
        .with_prompt("Delete which product?")
        .items(&items)
        .default(0)
        .interact()?;

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete {}?", products[choice].1))
        .default(false)
        .interact()?;
    if confirmed && store.remove_product(&products[choice].0)?.is_some() {
        ctx.output.success("Product deleted");
    }
    Ok(())
}
