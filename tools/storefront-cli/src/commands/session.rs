//! Resume decision commands.

use anyhow::Result;
use serde_json::json;
use storefront_commerce::session::ResumeAction;

use super::{SessionArgs, SessionCommand};
use crate::context::Context;
use crate::output::resume_badge;

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    match args.command {
        SessionCommand::Status => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "resume_state": store.resume_state().as_str(),
                    "saved_lines": store.cart().unique_item_count(),
                    "saved_items": store.cart().item_count(),
                    "admin_mode": store.is_admin(),
                    "storage": ctx.storage_path(),
                }));
                return Ok(());
            }

            ctx.output.header("Session");
            ctx.output.kv("Resume", &resume_badge(store.resume_state()));
            ctx.output.kv("Saved lines", &store.cart().unique_item_count().to_string());
            ctx.output.kv("Saved items", &store.cart().item_count().to_string());
            ctx.output.kv("Admin mode", &store.is_admin().to_string());
            ctx.output.kv("Storage", &ctx.storage_path().display().to_string());
            if store.needs_resume_decision() {
                ctx.output.info("");
                ctx.output.info(
                    "A saved order is waiting. Run `storefront session resume` or `storefront session start-new`.",
                );
            }
        }
        SessionCommand::Resume => {
            if !store.needs_resume_decision() {
                ctx.output.info("No saved order to resume");
                return Ok(());
            }
            store.resolve_resume(ResumeAction::Resume)?;
            ctx.output.success(&format!(
                "Resumed saved order ({} item(s))",
                store.cart().item_count()
            ));
        }
        SessionCommand::StartNew => {
            let discarded = store.cart().item_count();
            store.start_new_order();
            ctx.output.success(&format!(
                "Started a new order ({} saved item(s) discarded)",
                discarded
            ));
            if !store.is_cart_persisted() {
                ctx.output.warn("The empty cart could not be saved");
            }
        }
    }

    Ok(())
}
