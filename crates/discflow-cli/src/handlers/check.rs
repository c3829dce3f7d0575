use super::parse::{print_diagnostic, print_failure, print_summary};
use crate::output::Palette;
use crate::types::OutputFormat;
use anyhow::{Result, bail};
use discflow_runtime::BatchOutcome;

pub fn handle(outcome: &BatchOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for result in &outcome.results {
                for diagnostic in &result.diagnostics {
                    println!("{}", serde_json::to_string(diagnostic)?);
                }
            }
            for failure in &outcome.failures {
                println!("{}", serde_json::to_string(failure)?);
            }
        }
        OutputFormat::Plain => {
            let palette = Palette::detect();
            for result in outcome.results.iter().filter(|r| !r.diagnostics.is_empty()) {
                println!("{}", palette.heading(result.game_id.as_str()));
                for diagnostic in &result.diagnostics {
                    print_diagnostic(&palette, diagnostic);
                }
            }
            for failure in &outcome.failures {
                print_failure(&palette, failure);
            }
            print_summary(&palette, &outcome.summary());
        }
    }

    if outcome.has_errors() {
        let summary = outcome.summary();
        bail!(
            "{} of {} games failed, {} error diagnostics",
            summary.failed,
            summary.games,
            summary.errors
        );
    }
    Ok(())
}
