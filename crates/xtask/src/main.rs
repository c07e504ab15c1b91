//! Development tasks for modkit
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;
mod session;

use anyhow::Result;
use clap::Parser;
use commands::{CheckCatalog, Clean, Dump, InspectKeys};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Development tasks for modkit
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for modkit databases", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to `xtask.log` in the log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Show the key → ID bindings of persistent key stores
    InspectKeys(InspectKeys),

    /// Build every catalog in a data directory and report problems
    CheckCatalog(CheckCatalog),

    /// Print records built from the catalogs
    Dump(Dump),

    /// Delete key stores and logs
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for MODKIT_* overrides)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file)?;

    match cli.command {
        Command::InspectKeys(cmd) => cmd.execute(),
        Command::CheckCatalog(cmd) => cmd.execute(),
        Command::Dump(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}

/// Installs a stderr subscriber, plus a file layer when requested.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(to_file: bool) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let (file_layer, guard) = if to_file {
        let log_dir = dirs::log_dir();
        std::fs::create_dir_all(&log_dir)?;
        let file_appender = tracing_appender::rolling::never(&log_dir, "xtask.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
