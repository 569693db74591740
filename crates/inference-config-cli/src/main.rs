//! Inference Config CLI
//!
//! Inspect and repair the context parameters an on-device LLM client
//! persists between releases.
//!
//! # Commands
//!
//! - `migrate <FILE>`: Upgrade a persisted blob to the current schema
//! - `validate <FILE>`: Check a blob's structure and cache compatibility
//! - `devices`: List selectable device options for the platform
//! - `check`: Verdict for one cache type / flash attention / backend triple
//! - `options`: Cache-type option lists for a flash attention mode and backend
//!
//! # Exit Codes
//! - 0: Success
//! - 1: Warning (I/O or configuration problem, unsafe combination)
//! - 2: Blocking (structurally invalid or unusable parameters)

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use inference_config_core::Platform;

mod commands;
mod error;
mod probe;

pub use error::CliExitCode;

/// Inference Config CLI - context parameter migration and compatibility checks
#[derive(Parser)]
#[command(name = "inference-config")]
#[command(version)]
#[command(about = "Migrate, validate, and inspect inference context parameters")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "INFERENCE_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Target platform (ios, android); overrides the configuration
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Device list fixture (JSON) standing in for the native probe
    #[arg(long, global = true)]
    devices_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade persisted parameters to the current schema
    Migrate(commands::migrate::MigrateArgs),
    /// Validate persisted parameters
    Validate(commands::validate::ValidateArgs),
    /// List device options for the platform
    Devices(commands::devices::DevicesArgs),
    /// Check one cache type / flash attention / backend combination
    Check(commands::check::CheckArgs),
    /// List K and V cache-type options
    Options(commands::options::OptionsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let global = commands::GlobalOptions {
        config: cli.config,
        platform: cli.platform,
        devices_file: cli.devices_file,
    };

    // Dispatch to command handlers
    let exit_code = match cli.command {
        Commands::Migrate(args) => commands::migrate::migrate_command(args, &global).await,
        Commands::Validate(args) => commands::validate::validate_command(args, &global).await,
        Commands::Devices(args) => commands::devices::devices_command(args, &global).await,
        Commands::Check(args) => commands::check::check_command(args).await,
        Commands::Options(args) => commands::options::options_command(args).await,
    };

    std::process::exit(exit_code);
}
