//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::Cache;
use storefront_commerce::catalog::CatalogSource;
use storefront_commerce::Storefront;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a config path relative to the config file's directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Catalog sources named by the config, in merge order.
    pub fn sources(&self) -> Vec<CatalogSource> {
        self.config
            .sources
            .iter()
            .map(|s| CatalogSource::from_path(s.tag.as_str(), self.resolve_path(&s.path)))
            .collect()
    }

    /// Path of the durable session store.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// Open the storefront over the configured sources and storage.
    pub fn open_storefront(&self) -> Result<Storefront> {
        let storage = self.storage_path();
        let cache = Cache::open(&storage)
            .with_context(|| format!("Failed to open session store: {}", storage.display()))?;
        debug!(storage = %storage.display(), sources = self.config.sources.len(), "opening storefront");

        let storefront = Storefront::open(&self.sources(), cache, self.config.storefront.clone());
        let report = storefront.merge_report();
        if report.malformed_sources > 0 {
            self.output.warn(&format!(
                "{} of {} catalog source(s) held no products",
                report.malformed_sources, report.sources
            ));
        }
        Ok(storefront)
    }
}
