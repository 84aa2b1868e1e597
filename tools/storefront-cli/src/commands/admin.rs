//! Admin mode commands.

use anyhow::Result;
use serde_json::json;

use super::{AdminArgs, AdminCommand};
use crate::context::Context;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    let enabled = match args.command.unwrap_or(AdminCommand::Status) {
        AdminCommand::Status => store.is_admin(),
        AdminCommand::On => {
            store.set_admin_mode(true);
            true
        }
        AdminCommand::Off => {
            store.set_admin_mode(false);
            false
        }
        AdminCommand::Toggle => store.toggle_admin_mode(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "admin_mode": enabled }));
    } else if enabled {
        ctx.output.success("Admin mode is on");
    } else {
        ctx.output.info("Admin mode is off");
    }

    Ok(())
}
