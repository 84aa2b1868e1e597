//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::StorefrontConfig;

/// Default location of the durable session store.
pub const DEFAULT_STORAGE_PATH: &str = ".storefront/session.json";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog sources, merged in this order.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Durable storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Storefront behaviour.
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// One catalog source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Tag prefixed to every product id from this source.
    pub tag: String,

    /// JSON file holding the source.
    pub path: String,
}

/// Durable storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File backing the session store.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    DEFAULT_STORAGE_PATH.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

# Catalog sources are merged in order. Every product id is prefixed with its
# source tag, so "1" in source A and "1" in source B stay distinct.
[[sources]]
tag = "A"
path = "catalog/a.json"

[[sources]]
tag = "B"
path = "catalog/b.json"

[storage]
path = "{storage}"

[storefront]
currency = "EGP"
search_debounce_ms = 450

[storefront.storage_keys]
cart = "storefront-cart"
admin_mode = "storefront-admin-mode"

[storefront.labels]
all = "all"
uncategorized = "uncategorized"
"#,
        storage = DEFAULT_STORAGE_PATH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::Currency;

    #[test]
    fn test_default_config_parses() {
        let config = CliConfig::parse("storefront.toml", &generate_default_config()).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].tag, "A");
        assert_eq!(config.storage.path, DEFAULT_STORAGE_PATH);
        assert_eq!(config.storefront, StorefrontConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("storefront.toml", "").unwrap();
        assert!(config.sources.is_empty());
        assert_eq!(config.storefront.currency, Currency::EGP);
        assert_eq!(config.storefront.search_debounce_ms, 450);
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "storefront.json",
            r#"{"sources": [{"tag": "S", "path": "s.json"}], "storefront": {"currency": "USD"}}"#,
        )
        .unwrap();
        assert_eq!(config.sources[0].path, "s.json");
        assert_eq!(config.storefront.currency, Currency::USD);
    }

    #[test]
    fn test_bad_config_reports_path() {
        let err = CliConfig::parse("broken.toml", "[[sources]]\ntag = 1").unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
    }
}
