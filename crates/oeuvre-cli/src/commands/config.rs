use anyhow::{bail, Context, Result};
use oeuvre_core::{EraConfig, Layout};
use oeuvre_store::config::{self, KEYS};
use oeuvre_store::Config;
use toml_edit::{value, DocumentMut, Item, Table};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let path = config::config_file_path();
    println!("Config file: {}", path.display());
    let exists = path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    for key in KEYS {
        println!("  {key}: {}", config.get(key).unwrap_or_default());
    }

    println!("\nPriority: CLI args > ENV vars (OEUVRE_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or the whole config file without a key.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        match config.get(&key) {
            Some(v) => println!("{v}"),
            None => bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS.join(", ")),
        }
        return Ok(());
    }

    let config_path = config::config_file_path();
    if config_path.exists() {
        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        print!("{contents}");
    } else {
        println!("Config file does not exist: {}", config_path.display());
        println!("\nRun 'oeuvre config init' to create it.");
    }

    Ok(())
}

/// The string stored at a top-level `key`, or the built-in default.
fn stored_or(doc: &DocumentMut, key: &str, default: String) -> String {
    doc.get(key)
        .and_then(Item::as_str)
        .map_or(default, str::to_string)
}

/// Check a value before it is written, so a bad edit never reaches disk.
///
/// Era bounds are checked against the other bound as the file holds it.
fn check_value(doc: &DocumentMut, key: &str, raw: &str) -> Result<()> {
    match key {
        "layout" => {
            raw.parse::<Layout>()?;
        }
        "early_era_cutoff" => {
            let start = stored_or(doc, "first_era_start", Config::default().first_era_start);
            EraConfig::parse(raw, &start)?;
        }
        "first_era_start" => {
            let cutoff = stored_or(doc, "early_era_cutoff", Config::default().early_era_cutoff);
            EraConfig::parse(&cutoff, raw)?;
        }
        "logging.level" if !LOG_LEVELS.contains(&raw) => {
            bail!("Unknown log level '{}' (expected one of {})", raw, LOG_LEVELS.join(", "));
        }
        _ => {}
    }
    Ok(())
}

/// Write `key = raw` into a TOML document, keeping comments and layout.
fn apply_setting(contents: &str, key: &str, raw: &str) -> Result<String> {
    if !KEYS.contains(&key) {
        bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS.join(", "));
    }
    let mut doc: DocumentMut = contents.parse().context("Config file is not valid TOML")?;
    check_value(&doc, key, raw)?;

    let item = if key == "logging.coloured" {
        let flag: bool = raw
            .parse()
            .with_context(|| format!("Expected true or false for {key}, got '{raw}'"))?;
        value(flag)
    } else {
        value(raw)
    };

    match key.split_once('.') {
        Some((section, field)) => {
            let table = doc
                .entry(section)
                .or_insert_with(|| Item::Table(Table::new()))
                .as_table_mut()
                .with_context(|| format!("'{section}' in the config file is not a table"))?;
            table[field] = item;
        }
        None => doc[key] = item,
    }

    Ok(doc.to_string())
}

/// Set a config value.
pub fn set_config(key: &str, raw: &str) -> Result<()> {
    let config_path = config::config_file_path();

    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = apply_setting(&contents, key, raw)?;
    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {key} = {raw}");
    println!("  in {}", config_path.display());

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure oeuvre.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_comments() {
        let updated = apply_setting(config::example_config(), "layout", "grid").unwrap();
        assert!(updated.contains("layout = \"grid\""));
        assert!(updated.contains("# Default layout of the archive browser"));
        assert!(!updated.contains("layout = \"list\""));
    }

    #[test]
    fn test_set_nested_key_creates_table() {
        let updated = apply_setting("", "logging.coloured", "false").unwrap();
        let doc: DocumentMut = updated.parse().unwrap();
        assert_eq!(doc["logging"]["coloured"].as_bool(), Some(false));
    }

    #[test]
    fn test_set_nested_key_in_existing_table() {
        let updated =
            apply_setting(config::example_config(), "logging.level", "debug").unwrap();
        let doc: DocumentMut = updated.parse().unwrap();
        assert_eq!(doc["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(doc["logging"]["coloured"].as_bool(), Some(true));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        assert!(apply_setting("", "nope", "1").is_err());
        assert!(apply_setting("", "layout", "table").is_err());
        assert!(apply_setting("", "logging.level", "loud").is_err());
        assert!(apply_setting("", "logging.coloured", "maybe").is_err());
        assert!(apply_setting("", "first_era_start", "2020-01-01").is_err());
    }

    #[test]
    fn test_set_era_bounds() {
        let updated = apply_setting("", "first_era_start", "2025-12-01").unwrap();
        assert!(updated.contains("first_era_start = \"2025-12-01\""));
    }

    #[test]
    fn test_moving_both_era_bounds_later() {
        let updated = apply_setting("", "first_era_start", "2026-01-01").unwrap();
        let updated = apply_setting(&updated, "early_era_cutoff", "2025-12-15").unwrap();
        let doc: DocumentMut = updated.parse().unwrap();
        assert_eq!(doc["first_era_start"].as_str(), Some("2026-01-01"));
        assert_eq!(doc["early_era_cutoff"].as_str(), Some("2025-12-15"));
    }

    #[test]
    fn test_era_bound_checked_against_stored_value() {
        let contents = "early_era_cutoff = \"2025-12-15\"\n";
        assert!(apply_setting(contents, "first_era_start", "2025-12-10").is_err());
        assert!(apply_setting(contents, "first_era_start", "2025-12-16").is_ok());
    }
}
