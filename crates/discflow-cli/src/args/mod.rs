mod commands;

pub use commands::*;

use crate::types::LogLevel;
use clap::Parser;

#[derive(Parser)]
#[command(name = "discflow")]
#[command(about = "Reconstruct throws, pulls and points from ultimate play-by-play payloads", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: DISCFLOW_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level for stderr; RUST_LOG takes precedence when set
    #[arg(long, default_value = "error", global = true)]
    pub log_level: LogLevel,

    /// Worker threads (default: config file, then one per core)
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}
