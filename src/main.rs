use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use till::cli::{
    handle_audit_command, handle_entry_command, handle_import_command, handle_report_command,
    EntryCommands, ReportCommands,
};
use till::config::{paths::TillPaths, settings::Settings};
use till::reports::weekday_name;
use till::storage::Storage;

#[derive(Parser)]
#[command(
    name = "till",
    author = "Kaylee Beyene",
    version,
    about = "Daily cash-register ledger",
    long_about = "till records what a cash register took in each day (cash, card, \
                  cheque) and what was paid out of the drawer, then rolls the days \
                  up into weekly and monthly sheets with a few statistics."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Monthly sheet and statistics
    #[command(subcommand)]
    Report(ReportCommands),

    /// Import entries from a CSV file
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Show recent audit log records
    Audit {
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the ledger directories and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TillPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(Commands::Entry(cmd)) => handle_entry_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Import { file }) => handle_import_command(&storage, &file)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing till at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Record a day with 'till entry set 2024-06-03 --cash 120.50 --card 80'.");
        }
        Some(Commands::Config) => {
            println!("Till Configuration");
            println!("==================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            if !paths.is_initialized() {
                println!("(not initialized, run 'till init' to save these settings)");
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Week ends on:    {}", weekday_name(settings.week_end_day));
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("till - daily cash-register ledger");
            println!();
            println!("Run 'till --help' for usage information.");
        }
    }

    Ok(())
}
