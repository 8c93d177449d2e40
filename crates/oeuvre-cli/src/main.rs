use anyhow::{Context, Result};
use clap::Parser;
use oeuvre_store::Config;
use std::path::PathBuf;

mod commands;
mod logging;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "oeuvre", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the catalog snapshot (default: ~/.local/share/oeuvre/catalog.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Which works to show
    #[arg(long, global = true, value_enum, default_value_t = commands::CategoryArg::Full)]
    category: commands::CategoryArg,

    /// Warn about snapshot violations instead of refusing to load it
    #[arg(long, global = true)]
    lenient: bool,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List eras in chronological order with their work counts
    ///
    /// The Early Era holds everything written up to the configured cutoff.
    /// Each standard milestone then opens an era that runs until the next
    /// one is released. Deluxe and anniversary editions never open an era.
    Eras,
    /// Show which era a work belongs to
    Era {
        /// Work title (case-insensitive) or id
        work: String,
    },
    /// Print the grouping tree as an outline
    ///
    /// Works are grouped by era, then release status (Released, Unreleased,
    /// Sessions), and session takes by their base title. With --search only
    /// matching works are kept and the folders that must be open to show
    /// them are listed.
    Tree {
        /// Case-insensitive title filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Flat archive listing, excluding session takes
    Archive {
        /// Only this sub-category (e.g. Released, Unreleased, Demos)
        #[arg(long, default_value = "all")]
        status: String,

        /// Case-insensitive title filter
        #[arg(long)]
        search: Option<String>,

        /// Sort field: title or date
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export complete songs by era as Markdown-style text
    Report,
    /// Export every full work and session take with lyrics
    Lyrics,
    /// List milestones with their type and era role
    Milestones,
    /// Show a milestone's editions and tracklist
    Milestone {
        /// Milestone name (case-insensitive) or id
        milestone: String,
    },
    /// Browse the archive interactively
    Browse {
        /// Start in grid layout instead of the configured one
        #[arg(long)]
        grid: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file without a key
    Get { key: Option<String> },
    /// Set a value in the config file, keeping its comments
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.catalog {
        Some(path) => Config::load_with_catalog_path(path.clone()),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    logging::init(&config.logging, cli.verbose)?;

    let open = || commands::Workspace::open(&config, cli.category, cli.lenient);

    match cli.command {
        Commands::Eras => commands::eras::show_eras(&open()?)?,
        Commands::Era { work } => commands::eras::show_era(&open()?, &work)?,
        Commands::Tree { search } => {
            commands::tree::show_tree(&open()?, search.as_deref().unwrap_or(""))?;
        }
        Commands::Archive {
            status,
            search,
            sort,
            asc,
            json,
        } => {
            let query = commands::archive::build_query(
                &status,
                search.unwrap_or_default(),
                &sort,
                asc,
            )?;
            commands::archive::show_archive(&open()?, &query, json)?;
        }
        Commands::Report => commands::report::show_report(&open()?)?,
        Commands::Lyrics => commands::report::show_lyrics(&open()?)?,
        Commands::Milestones => commands::milestones::show_milestones(&open()?)?,
        Commands::Milestone { milestone } => {
            commands::milestones::show_milestone(&open()?, &milestone)?;
        }
        Commands::Browse { grid } => {
            let layout = if grid {
                oeuvre_core::Layout::Grid
            } else {
                config.layout().context("Invalid layout in configuration")?
            };
            tui::run_tui(open()?, layout)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
