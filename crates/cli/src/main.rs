//! Command-line driver for the gathering engine.
//!
//! Each invocation loads the world snapshot, runs one operation against the
//! wall clock and exits. Logs go to the platform cache directory.

mod commands;
mod dirs;
mod logging;
mod output;
mod workspace;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use gathering_runtime::{RuntimeConfig, RuntimeError};

use commands::Command;
use output::OutputFormat;
use workspace::Workspace;

/// Gathering progression engine
#[derive(Parser)]
#[command(name = "gathering")]
#[command(about = "Resource gathering sessions, nodes, tools and skills", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for the world snapshot (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    // Load .env file if it exists (for GATHERING_* overrides)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let format = cli.format;

    let _guard = match logging::setup_logging(&dirs::log_dir()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: file logging disabled: {err:#}");
            None
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<RuntimeError>() {
            Some(runtime) => {
                output::emit_error(format, runtime);
                tracing::warn!(code = runtime.error_code(), "command failed: {runtime}");
                if runtime.is_retryable() {
                    ExitCode::from(75)
                } else {
                    ExitCode::FAILURE
                }
            }
            None => {
                eprintln!("error: {err:#}");
                tracing::error!("command failed: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = RuntimeConfig::from_env();
    let data_dir = cli.data_dir.unwrap_or_else(dirs::data_dir);
    let snapshot = workspace::snapshot_path(&config, &data_dir);

    let mut lock = Workspace::lock(&snapshot)?;
    let _held = lock.write()?;
    let workspace = Workspace::open(config, &snapshot)?;

    let result = cli.command.execute(&workspace, cli.format);
    // Saved on failure too; the store keeps whatever it committed.
    workspace.save()?;
    result
}
