//! Configuration management commands.

use std::collections::HashSet;
use std::fs;

use anyhow::{bail, Result};
use storefront_commerce::catalog::CatalogSource;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // Sources
    ctx.output.info("");
    ctx.output.info("[[sources]]");
    if ctx.config.sources.is_empty() {
        ctx.output.list_item("(none)");
    }
    for source in &ctx.config.sources {
        ctx.output.list_item(&format!(
            "{} -> {}",
            source.tag,
            ctx.resolve_path(&source.path).display()
        ));
    }

    // Storage section
    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());

    // Storefront section
    let storefront = &ctx.config.storefront;
    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output.kv("currency", storefront.currency.code());
    ctx.output.kv("search_debounce_ms", &storefront.search_debounce_ms.to_string());
    ctx.output.kv("storage_keys.cart", &storefront.storage_keys.cart);
    ctx.output.kv("storage_keys.admin_mode", &storefront.storage_keys.admin_mode);
    ctx.output.kv("labels.all", &storefront.labels.all);
    ctx.output.kv("labels.uncategorized", &storefront.labels.uncategorized);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);
    let mut warnings = warnings;

    // Sources must exist and hold a record list
    for source in &ctx.config.sources {
        let path = ctx.resolve_path(&source.path);
        if !path.exists() {
            warnings.push(format!("source '{}': {} does not exist", source.tag, path.display()));
        } else if CatalogSource::from_path(source.tag.as_str(), &path).records().is_none() {
            warnings.push(format!("source '{}': {} holds no product list", source.tag, path.display()));
        }
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Static checks that need no file access. Returns (errors, warnings).
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.sources.is_empty() {
        warnings.push("no catalog sources configured; the catalog will be empty".to_string());
    }

    let mut tags = HashSet::new();
    for (i, source) in config.sources.iter().enumerate() {
        if source.tag.trim().is_empty() {
            errors.push(format!("sources[{}].tag is required", i));
        } else if !tags.insert(source.tag.as_str()) {
            errors.push(format!("sources[{}].tag '{}' is used twice", i, source.tag));
        }
        if source.path.trim().is_empty() {
            errors.push(format!("sources[{}].path is required", i));
        }
    }

    if config.storage.path.trim().is_empty() {
        errors.push("storage.path is required".to_string());
    }

    let storefront = &config.storefront;
    if storefront.storage_keys.cart.is_empty() || storefront.storage_keys.admin_mode.is_empty() {
        errors.push("storefront.storage_keys must not be empty".to_string());
    } else if storefront.storage_keys.cart == storefront.storage_keys.admin_mode {
        errors.push("storefront.storage_keys.cart and admin_mode must differ".to_string());
    }

    if storefront.labels.all.trim().is_empty() || storefront.labels.uncategorized.trim().is_empty() {
        errors.push("storefront.labels must not be empty".to_string());
    } else if storefront.labels.all == storefront.labels.uncategorized {
        warnings.push("storefront.labels.all equals labels.uncategorized".to_string());
    }

    if storefront.search_debounce_ms > 5_000 {
        warnings.push(format!(
            "storefront.search_debounce_ms {} is unusually long",
            storefront.search_debounce_ms
        ));
    }

    (errors, warnings)
}
