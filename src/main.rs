use anyhow::Result;
use clap::{Parser, Subcommand};

use opsdesk::cli::{handle_collections_command, handle_export_command, CollectionsCommands, ExportArgs};
use opsdesk::config::{paths::OpsPaths, settings::Settings};
use opsdesk::storage::Storage;

#[derive(Parser)]
#[command(
    name = "opsdesk",
    version,
    about = "Terminal-based operations console for small distribution businesses",
    long_about = "opsdesk keeps a small distribution business's orders, customers, \
                  drivers, and suppliers in one place, derives the outstanding \
                  credit/cheque collections worklist, and exports any record set \
                  to CSV or XLSX."
)]
struct Cli {
    /// Act as this user (email); overrides the configured operator
    #[arg(long = "as", global = true, value_name = "EMAIL")]
    acting_as: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collections worklist commands
    #[command(subcommand, alias = "col")]
    Collections(CollectionsCommands),

    /// Export a record set to CSV or XLSX
    Export(ExportArgs),

    /// Initialize a fresh data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = OpsPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Collections(cmd)) => {
            handle_collections_command(&storage, &settings, cmd, cli.acting_as)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing opsdesk at: {}", paths.data_dir().display());
            opsdesk::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("A default admin account has been created:");
            println!("  admin@opsdesk.local");
            println!();
            println!("Set \"operator\" in config.json (or pass --as <email>) to act as a user.");
        }
        Some(Commands::Config) => {
            println!("opsdesk Configuration");
            println!("=====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!(
                "  Operator:       {}",
                settings.operator.as_deref().unwrap_or("(not set)")
            );
            println!("  Export format:  {:?}", settings.export_format);
        }
        None => {
            println!("opsdesk - operations console");
            println!();
            println!("Run 'opsdesk --help' for usage information.");
            println!("Run 'opsdesk init' to set up a fresh data directory.");
        }
    }

    Ok(())
}
