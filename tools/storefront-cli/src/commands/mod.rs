//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod session;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only show products whose name contains this text.
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Change a line's quantity by a signed amount.
    Update {
        /// Product ID.
        id: String,
        /// Quantity change, e.g. 2 or -1.
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show whether a saved cart awaits a decision.
    Status,
    /// Keep the saved cart.
    Resume,
    /// Discard the saved cart and start an empty order.
    StartNew,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: Option<AdminCommand>,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Show admin mode (default).
    Status,
    /// Turn admin mode on.
    On,
    /// Turn admin mode off.
    Off,
    /// Flip admin mode.
    Toggle,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Empty the cart after printing the snapshot.
    #[arg(long)]
    pub start_new: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Start with this category selected.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
