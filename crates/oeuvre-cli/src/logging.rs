use anyhow::{anyhow, Result};
use oeuvre_store::LoggingConfig;

/// Map a configured level name onto twyg's levels. Unknown names fall back
/// to `info`.
fn level_from_name(name: &str) -> twyg::LogLevel {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => twyg::LogLevel::Trace,
        "debug" => twyg::LogLevel::Debug,
        "warn" | "warning" => twyg::LogLevel::Warn,
        "error" => twyg::LogLevel::Error,
        _ => twyg::LogLevel::Info,
    }
}

/// Install the process-wide logger.
///
/// `verbose` forces debug output whatever the configuration says.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        twyg::LogLevel::Debug
    } else {
        level_from_name(&config.level)
    };

    let opts = twyg::OptsBuilder::new()
        .coloured(config.coloured)
        .level(level)
        .report_caller(verbose)
        .build()
        .map_err(|e| anyhow!("Invalid logging options: {e}"))?;

    twyg::setup(opts).map_err(|e| anyhow!("Failed to set up logging: {e}"))?;
    log::debug!("Logging initialised (configured level {}, verbose {})", config.level, verbose);
    Ok(())
}
