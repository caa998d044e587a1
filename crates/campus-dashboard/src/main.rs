//! Campus Dashboard - CLI entry point
//!
//! Inspects and edits the personalized dashboard layout stored on disk.

use campus_dashboard::catalog::{DeviceClass, WidgetCatalog};
use campus_dashboard::config::{default, loader::ConfigLoader, schema::Config, xdg};
use campus_dashboard::layout::Layout;
use campus_dashboard::{logging, Direction, PersonalizationEngine};
use clap::{Parser, Subcommand};
use layout_store::FileStore;
use std::path::PathBuf;
use std::process::ExitCode;

/// Personalized campus dashboard
#[derive(Parser)]
#[command(name = "cdash")]
#[command(version, about = "Personalize the campus dashboard layout")]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/campus-dashboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Layout store file, overriding `[storage] path`
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Device class for the first-run layout, overriding `[dashboard] device`
    #[arg(long, global = true)]
    device: Option<DeviceClass>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the cdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Print shown and hidden widgets with their indices
    Show,
    /// Print every known widget
    Catalog,
    /// Move a shown widget one position up or down
    Move {
        /// Index in the shown list
        index: usize,
        /// "up" or "down"
        #[arg(allow_hyphen_values = true)]
        direction: Direction,
    },
    /// Hide a shown widget
    Hide {
        /// Widget key
        key: String,
    },
    /// Show a hidden widget again
    Restore {
        /// Index in the hidden list
        index: usize,
    },
    /// Show every widget in catalog order
    Reset,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Config { action } = &cli.command {
        return run_config_command(action, cli.config.as_deref());
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging.log_level);

    let mut engine = open_engine(&cli, &config);
    match cli.command {
        Commands::Show => print_layout(engine.current_layout()),
        Commands::Catalog => print_catalog(engine.catalog()),
        Commands::Move { index, direction } => {
            report(engine.move_entry(index, direction), || {
                format!("Cannot move entry {index} {direction}")
            });
            print_layout(engine.current_layout());
        }
        Commands::Hide { key } => {
            report(engine.hide_entry(&key), || {
                format!("Widget '{key}' is not shown")
            });
            print_layout(engine.current_layout());
        }
        Commands::Restore { index } => {
            report(engine.restore_entry(index), || {
                format!("No hidden widget at index {index}")
            });
            print_layout(engine.current_layout());
        }
        Commands::Reset => {
            engine.reset_to_default();
            print_layout(engine.current_layout());
        }
        Commands::Config { .. } => {}
    }

    ExitCode::SUCCESS
}

fn open_engine(cli: &Cli, config: &Config) -> PersonalizationEngine<FileStore> {
    let path = cli
        .store
        .clone()
        .unwrap_or_else(|| config.storage.resolve_path());
    let device = cli.device.unwrap_or(config.dashboard.device);
    tracing::debug!(store = %path.display(), %device, "Opening layout store");
    PersonalizationEngine::load(FileStore::new(path), WidgetCatalog::builtin(), device)
}

/// Prints a notice for engine no-ops; they are not failures.
fn report(changed: bool, notice: impl FnOnce() -> String) {
    if !changed {
        println!("{}, nothing changed", notice());
    }
}

fn print_layout(layout: &Layout) {
    println!("Shown:");
    for (i, widget) in layout.shown().iter().enumerate() {
        println!("  {i:>2}  {:<12} {}", widget.key, widget.label);
    }
    println!("Hidden:");
    if layout.hidden().is_empty() {
        println!("  (none)");
    }
    for (i, widget) in layout.hidden().iter().enumerate() {
        println!("  {i:>2}  {:<12} {}", widget.key, widget.label);
    }
}

fn print_catalog(catalog: &WidgetCatalog) {
    for widget in catalog.all() {
        let note = if widget.device_restricted {
            "  (desktop only)"
        } else {
            ""
        };
        println!("{:<12} {}{}", widget.key, widget.label, note);
    }
}

fn run_config_command(action: &ConfigAction, path: Option<&std::path::Path>) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => {
            default::create_default_config(path, *force).map(|written| {
                println!("Created configuration at {}", written.display());
            })
        }
        ConfigAction::Path => {
            let path = path.map(PathBuf::from).unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(path).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
