use crate::output::Palette;
use crate::types::OutputFormat;
use anyhow::Result;
use discflow_engine::GameResult;
use discflow_runtime::{BatchOutcome, BatchSummary, GameFailure};
use discflow_types::{Diagnostic, GameId, GameRecords, Score};
use serde::Serialize;

/// One JSON line per parsed game.
#[derive(Serialize)]
struct GameDocument<'a> {
    game_id: &'a GameId,
    final_score: Score,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
    records: &'a GameRecords,
    diagnostics: &'a [Diagnostic],
}

/// One JSON line per game that could not be parsed.
#[derive(Serialize)]
struct FailureDocument<'a> {
    game_id: &'a GameId,
    error: &'a str,
}

pub fn handle(outcome: &BatchOutcome, format: OutputFormat, fingerprint: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for result in &outcome.results {
                let digest = if fingerprint {
                    Some(result.records.fingerprint()?)
                } else {
                    None
                };
                let document = GameDocument {
                    game_id: &result.game_id,
                    final_score: result.final_score,
                    fingerprint: digest,
                    records: &result.records,
                    diagnostics: &result.diagnostics,
                };
                println!("{}", serde_json::to_string(&document)?);
            }
            for failure in &outcome.failures {
                let document = FailureDocument {
                    game_id: &failure.game_id,
                    error: &failure.cause,
                };
                println!("{}", serde_json::to_string(&document)?);
            }
        }
        OutputFormat::Plain => {
            let palette = Palette::detect();
            for result in &outcome.results {
                print_game(&palette, result, fingerprint)?;
            }
            for failure in &outcome.failures {
                print_failure(&palette, failure);
            }
            print_summary(&palette, &outcome.summary());
        }
    }
    Ok(())
}

fn print_game(palette: &Palette, result: &GameResult, fingerprint: bool) -> Result<()> {
    let records = &result.records;
    println!(
        "{}  {}  {}",
        palette.heading(result.game_id.as_str()),
        result.final_score,
        palette.dim(&format!(
            "{} points, {} throws, {} pulls",
            records.points.len(),
            records.throws.len(),
            records.pulls.len()
        ))
    );
    if fingerprint {
        println!("  fingerprint {}", records.fingerprint()?);
    }
    for diagnostic in &result.diagnostics {
        print_diagnostic(palette, diagnostic);
    }
    Ok(())
}

pub(crate) fn print_diagnostic(palette: &Palette, diagnostic: &Diagnostic) {
    let mut location = diagnostic.period.to_string();
    if let Some(point) = diagnostic.point_index {
        location.push_str(&format!(", point {}", point));
    }
    println!(
        "  {}: {} {}",
        palette.severity(diagnostic.severity),
        diagnostic.kind,
        palette.dim(&format!("({}, score {})", location, diagnostic.score))
    );
}

pub(crate) fn print_failure(palette: &Palette, failure: &GameFailure) {
    println!(
        "{}  {} {}",
        palette.heading(failure.game_id.as_str()),
        palette.failure("failed:"),
        failure.cause
    );
}

pub(crate) fn print_summary(palette: &Palette, summary: &BatchSummary) {
    let line = format!(
        "{} games ({} failed), {} points, {} throws, {} errors, {} warnings",
        summary.games,
        summary.failed,
        summary.points,
        summary.throws,
        summary.errors,
        summary.warnings
    );
    if summary.failed > 0 || summary.errors > 0 {
        println!("{}", palette.failure(&line));
    } else {
        println!("{}", palette.ok(&line));
    }
}
