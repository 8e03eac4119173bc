use anyhow::Result;
use bookr_core::model::BookId;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "bookr", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/bookr/bookr.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Create the database and apply the schema
    Init,
    /// Show row counts for every table
    Status,
    /// Describe the declared entities and their fields
    ///
    /// Without an argument every entity is listed. The argument matches
    /// either the entity name (`Book`) or its table (`books`).
    Schema {
        /// Entity or table name
        entity: Option<String>,
    },
    /// Show a book with its publisher, contributors, and reviews
    Book {
        /// Book id (UUID)
        id: BookId,
    },
    /// Load a JSON fixture into the database in one transaction
    ///
    /// Every record is validated before it is written. If any record is
    /// invalid or references a missing row, nothing is loaded.
    Load {
        /// Path to the fixture file
        path: PathBuf,
    },
    /// Write every record to a JSON fixture
    Dump {
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_with_db_path(cli.db)?;

    init_logging(&config.log_level);
    log::debug!("Using database {}", config.database_path.display());

    let db_path = config.database_path.clone();

    // Ensure database directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match cli.command {
        Commands::Init => commands::init_database(db_path)?,
        Commands::Status => commands::show_status(db_path)?,
        Commands::Schema { entity } => commands::show_schema(entity.as_deref())?,
        Commands::Book { id } => commands::show_book(db_path, id)?,
        Commands::Load { path } => commands::load_fixture(db_path, path)?,
        Commands::Dump { output } => commands::dump_fixture(db_path, output)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
