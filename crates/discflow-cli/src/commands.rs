use super::args::{Cli, Commands};
use super::handlers;
use crate::logging;
use anyhow::Result;
use discflow_runtime::{Batch, Config, resolve_config_path};
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)?;
    debug!(path = %config_path.display(), "loaded config");
    if let Some(workers) = cli.workers {
        anyhow::ensure!(workers > 0, "--workers must be at least 1");
        config.workers = Some(workers);
    }

    match cli.command {
        Commands::Parse {
            paths,
            format,
            fingerprint,
        } => {
            let outcome = Batch::from_config(&config).run_paths(&paths)?;
            handlers::parse::handle(&outcome, format, fingerprint)
        }
        Commands::Check { paths, format } => {
            let outcome = Batch::from_config(&config).run_paths(&paths)?;
            handlers::check::handle(&outcome, format)
        }
        Commands::Codes { format } => handlers::codes::handle(format),
        Commands::Corrections { format } => handlers::corrections::handle(&config, format),
    }
}
