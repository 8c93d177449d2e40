use anyhow::{Context, Result};
use confyg::{env, Confygery};
use oeuvre_core::{EraConfig, Layout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::StoreResult;

/// Keys accepted by `oeuvre config get` and `oeuvre config set`.
pub const KEYS: &[&str] = &[
    "catalog_path",
    "early_era_cutoff",
    "first_era_start",
    "layout",
    "logging.level",
    "logging.coloured",
];

/// Configuration for oeuvre.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (OEUVRE_* prefix)
/// 3. Config file (~/.config/oeuvre/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the catalog snapshot exported by the data store.
    ///
    /// Can be set via:
    /// - CLI: --catalog /path/to/catalog.json
    /// - ENV: OEUVRE_CATALOG_PATH
    /// - Config: catalog_path = "/path/to/catalog.json"
    /// - Default: ~/.local/share/oeuvre/catalog.json
    pub catalog_path: PathBuf,

    /// Inclusive end of the Early Era, as a datetime or a bare date.
    pub early_era_cutoff: String,

    /// Lower bound of the first milestone era, as a datetime or a bare date.
    pub first_era_start: String,

    /// Default browser layout, `list` or `grid`.
    pub layout: String,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            early_era_cutoff: "2025-11-20T23:59:59".to_string(),
            first_era_start: "2025-11-21".to_string(),
            layout: Layout::default().to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Settings for the logger installed by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            coloured: true,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/oeuvre/config.toml
    /// Reads environment variables with OEUVRE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from an explicit file, plus the environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("oeuvre");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        log::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Load configuration with a custom catalog path.
    ///
    /// This is used when the --catalog CLI flag is provided.
    pub fn load_with_catalog_path(catalog_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.catalog_path = catalog_path;
        Ok(config)
    }

    /// The era bounds this configuration describes.
    pub fn era_config(&self) -> StoreResult<EraConfig> {
        Ok(EraConfig::parse(
            &self.early_era_cutoff,
            &self.first_era_start,
        )?)
    }

    pub fn layout(&self) -> StoreResult<Layout> {
        Ok(self.layout.parse()?)
    }

    /// The effective value of one of [`KEYS`].
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog_path" => Some(self.catalog_path.display().to_string()),
            "early_era_cutoff" => Some(self.early_era_cutoff.clone()),
            "first_era_start" => Some(self.first_era_start.clone()),
            "layout" => Some(self.layout.clone()),
            "logging.level" => Some(self.logging.level.clone()),
            "logging.coloured" => Some(self.logging.coloured.to_string()),
            _ => None,
        }
    }

    /// The effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Get the default catalog path.
///
/// Returns: ~/.local/share/oeuvre/catalog.json (or platform equivalent)
fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oeuvre")
        .join("catalog.json")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/oeuvre/config.toml
/// - macOS: ~/Library/Application Support/oeuvre/config.toml
/// - Windows: %APPDATA%\oeuvre\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oeuvre")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Oeuvre Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (OEUVRE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Catalog snapshot exported by the data store
#
# Can also be set via:
# - CLI: oeuvre --catalog /custom/catalog.json eras
# - Environment: OEUVRE_CATALOG_PATH=/custom/catalog.json
#
# Default: Platform-specific data directory
#catalog_path = "/path/to/catalog.json"

# Inclusive end of the Early Era. Everything written up to this instant
# belongs to it, whatever milestones exist.
early_era_cutoff = "2025-11-20T23:59:59"

# Where the first milestone era begins. Later eras begin on their
# milestone's release date.
first_era_start = "2025-11-21"

# Default layout of the archive browser: "list" or "grid"
layout = "list"

[logging]
# One of: trace, debug, info, warn, error
level = "info"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// [`ensure_config_file`] for an explicit location.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.catalog_path.as_os_str().is_empty());
        assert_eq!(config.layout, "list");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.coloured);
        assert_eq!(config.era_config().unwrap(), EraConfig::default());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_catalog_path() {
        let custom_path = PathBuf::from("/tmp/catalog.json");
        let config = Config::load_with_catalog_path(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().catalog_path, custom_path);
    }

    #[test]
    fn test_example_config_is_loadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("oeuvre").join("config.toml");
        assert!(ensure_config_file_at(&path).unwrap());
        assert!(!ensure_config_file_at(&path).unwrap());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.first_era_start, "2025-11-21");
        assert_eq!(config.layout().unwrap(), Layout::List);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "layout = \"grid\"\nfirst_era_start = \"2025-12-01\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.layout().unwrap(), Layout::Grid);
        assert_eq!(config.get("logging.level").as_deref(), Some("debug"));
        assert_eq!(config.get("early_era_cutoff").as_deref(), Some("2025-11-20T23:59:59"));
        assert!(config.logging.coloured);
    }

    #[test]
    fn test_bad_era_bounds_surface_as_core_errors() {
        let config = Config {
            first_era_start: "2025-01-01".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.era_config(), Err(StoreError::Core(_))));

        let config = Config {
            layout: "table".to_string(),
            ..Config::default()
        };
        assert!(config.layout().is_err());
    }

    #[test]
    fn test_get_covers_every_key() {
        let config = Config::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "missing value for {key}");
        }
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[logging]"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
