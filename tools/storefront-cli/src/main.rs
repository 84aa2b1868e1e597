//! Storefront CLI - browse a merged catalog and manage a persisted cart.
//!
//! Commands:
//! - `storefront catalog` - List products, optionally filtered
//! - `storefront categories` - List categories
//! - `storefront cart` - Show and change the cart
//! - `storefront session` - Resume or discard a saved cart
//! - `storefront admin` - Show or switch admin mode
//! - `storefront checkout` - Print the checkout snapshot
//! - `storefront config` - Manage configuration
//! - `storefront shop` - Interactive shopping session

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AdminArgs, CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, SessionArgs, ShopArgs};
use logging::LogFormat;

/// Storefront CLI - browse the catalog, fill the cart, check out
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog(CatalogArgs),

    /// List catalog categories
    Categories,

    /// Show or change the cart
    Cart(CartArgs),

    /// Resume or discard a saved cart
    Session(SessionArgs),

    /// Show or switch admin mode
    Admin(AdminArgs),

    /// Print the checkout snapshot
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Start an interactive shopping session
    Shop(ShopArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
