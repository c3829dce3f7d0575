use crate::types::OutputFormat;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Parse payload files into throw, pull and point records")]
    Parse {
        /// Payload files or directories (searched for *.json)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,

        /// Include a digest of each game's records
        #[arg(long)]
        fingerprint: bool,
    },

    #[command(about = "Parse payloads and report diagnostics only; fails on errors")]
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    #[command(about = "Print the event code registry")]
    Codes {
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    #[command(about = "List the effective payload and clock corrections")]
    Corrections {
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },
}
