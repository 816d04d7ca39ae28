//! Configuration file support for modcat.
//!
//! Provides YAML-based configuration through `modcat.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! flags always take precedence over config values.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const CONFIG_FILENAME: &str = "modcat.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Default catalog TOML path.
    pub catalog: Option<String>,
    /// Default collection selection.
    pub collections: Option<Vec<String>>,
    /// Default output format ("table" or "json").
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref collections) = config.collections {
        for (i, name) in collections.iter().enumerate() {
            if name.trim().is_empty() {
                bail!(
                    "Invalid config: collections[{}] must not be empty.\n\n\
                     💡 Hint: Each collections entry must be a non-empty collection name (e.g., \"MPI\").",
                    i
                );
            }
        }
    }

    if let Some(ref format) = config.format {
        if format.parse::<crate::cli::OutputFormat>().is_err() {
            bail!(
                "Invalid config: format must be 'table' or 'json', got '{}'.",
                format
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
