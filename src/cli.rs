use clap::{Args, Parser, Subcommand};

use crate::config;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one pass immediately, then repeat on the interval forever.
    Watch(WatchArgs),
    /// Run exactly one pass and exit.
    Once(OnceArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Listings site origin.
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// SQLite database file holding reconciled project rows.
    #[arg(long, default_value = config::DEFAULT_DB_FILE)]
    pub db: String,

    /// Seconds between passes.
    #[arg(long, default_value_t = config::DEFAULT_INTERVAL_SECS)]
    pub interval_secs: u64,

    /// Lower bound of the politeness delay before each request (ms).
    #[arg(long, default_value_t = config::DEFAULT_DELAY_MS_MIN)]
    pub delay_ms_min: u64,

    /// Upper bound of the politeness delay before each request (ms).
    #[arg(long, default_value_t = config::DEFAULT_DELAY_MS_MAX)]
    pub delay_ms_max: u64,
}

#[derive(Debug, Args)]
pub struct OnceArgs {
    /// Listings site origin.
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// SQLite database file holding reconciled project rows.
    #[arg(long, default_value = config::DEFAULT_DB_FILE)]
    pub db: String,

    /// Lower bound of the politeness delay before each request (ms).
    #[arg(long, default_value_t = config::DEFAULT_DELAY_MS_MIN)]
    pub delay_ms_min: u64,

    /// Upper bound of the politeness delay before each request (ms).
    #[arg(long, default_value_t = config::DEFAULT_DELAY_MS_MAX)]
    pub delay_ms_max: u64,
}
