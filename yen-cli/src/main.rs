use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use yen_cli::commands::{CalcCommand, CompareCommand, list_prefectures};
use yen_cli::logging;
use yen_core::RateConfig;
use yen_data::load_rate_config;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Take-home pay calculator for salaries in Japan.
///
/// Estimates income tax, resident tax and social insurance for a gross
/// annual salary, and compares scenarios side by side.
#[derive(Debug, Parser)]
#[command(name = "yenkit", version)]
struct Cli {
    /// TOML file overriding the built-in rate tables.
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `yen_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Calc(CalcCommand),
    Compare(CompareCommand),
    /// List health insurance rates by prefecture and other rates in use
    Prefectures,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<RateConfig> {
    match path {
        Some(path) => load_rate_config(path)
            .with_context(|| format!("loading rate table from '{}'", path.display())),
        None => {
            debug!("using built-in rate tables");
            Ok(RateConfig::default())
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let config = load_config(cli.rates.as_ref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Calc(cmd) => cmd.exec(&config, &mut out),
        Command::Compare(cmd) => cmd.exec(&config, &mut out),
        Command::Prefectures => list_prefectures(&config, &mut out),
    }
}
