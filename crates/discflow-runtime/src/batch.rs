//! Parallel reconstruction of many games.
//!
//! Games share nothing, so each one runs start to finish on a single worker
//! with its own context. A game that cannot be decoded becomes a
//! [`GameFailure`] and the rest of the batch carries on.

use discflow_engine::{GameResult, parse_payload};
use discflow_feed::{FeedOptions, PayloadSource, collect_payload_files, game_id_from_path};
use discflow_types::{GameId, Severity};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;

/// A game whose payload could not be turned into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameFailure {
    pub game_id: GameId,
    pub cause: String,
}

/// Totals across a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub failed: usize,
    pub points: usize,
    pub throws: usize,
    pub pulls: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Parsed games, ordered by game id.
    pub results: Vec<GameResult>,
    pub failures: Vec<GameFailure>,
}

impl BatchOutcome {
    pub fn summary(&self) -> BatchSummary {
        self.results.iter().fold(
            BatchSummary {
                games: self.results.len() + self.failures.len(),
                failed: self.failures.len(),
                ..BatchSummary::default()
            },
            |mut summary, result| {
                summary.points += result.records.points.len();
                summary.throws += result.records.throws.len();
                summary.pulls += result.records.pulls.len();
                summary.errors += result.count(Severity::Error);
                summary.warnings += result.count(Severity::Warning);
                summary
            },
        )
    }

    /// True when any game failed outright or carries an error diagnostic.
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.results.iter().any(GameResult::has_errors)
    }

    fn collect(outcomes: Vec<std::result::Result<GameResult, GameFailure>>) -> Self {
        let mut batch = BatchOutcome::default();
        for outcome in outcomes {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(failure) => batch.failures.push(failure),
            }
        }
        batch.results.sort_by(|a, b| a.game_id.cmp(&b.game_id));
        batch.failures.sort_by(|a, b| a.game_id.cmp(&b.game_id));
        batch
    }
}

/// Runs many games over a worker pool.
#[derive(Debug, Clone)]
pub struct Batch {
    options: FeedOptions,
    workers: Option<usize>,
}

impl Batch {
    pub fn new(options: FeedOptions) -> Self {
        Self {
            options,
            workers: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.feed_options()).with_workers(config.workers)
    }

    /// Pool size; `None` uses the global pool (one thread per core).
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn options(&self) -> &FeedOptions {
        &self.options
    }

    /// Parse payload files; directories are searched for `*.json`.
    pub fn run_paths(&self, paths: &[PathBuf]) -> Result<BatchOutcome> {
        let files = collect_payload_files(paths)?;
        info!(files = files.len(), "starting batch");
        let outcomes = self.install(|| {
            files
                .par_iter()
                .map(|path| self.parse_file(path))
                .collect::<Vec<_>>()
        })?;
        Ok(self.finish(outcomes))
    }

    /// Parse every game a source lists.
    pub fn run_source(&self, source: &dyn PayloadSource) -> Result<BatchOutcome> {
        let game_ids = source.list()?;
        info!(games = game_ids.len(), "starting batch");
        let outcomes = self.install(|| {
            game_ids
                .par_iter()
                .map(|game_id| {
                    let text = source.load(game_id).map_err(|err| GameFailure {
                        game_id: game_id.clone(),
                        cause: err.to_string(),
                    })?;
                    self.parse_text(game_id, &text)
                })
                .collect::<Vec<_>>()
        })?;
        Ok(self.finish(outcomes))
    }

    fn install<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        match self.workers {
            Some(workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()?;
                Ok(pool.install(work))
            }
            None => Ok(work()),
        }
    }

    fn parse_file(&self, path: &Path) -> std::result::Result<GameResult, GameFailure> {
        let game_id = game_id_from_path(path).ok_or_else(|| GameFailure {
            game_id: GameId::new(path.display().to_string()),
            cause: "cannot derive a game id from the file name".to_string(),
        })?;
        let text = std::fs::read_to_string(path).map_err(|err| GameFailure {
            game_id: game_id.clone(),
            cause: format!("IO error: {}", err),
        })?;
        self.parse_text(&game_id, &text)
    }

    fn parse_text(
        &self,
        game_id: &GameId,
        text: &str,
    ) -> std::result::Result<GameResult, GameFailure> {
        parse_payload(game_id, text, &self.options).map_err(|err| GameFailure {
            game_id: game_id.clone(),
            cause: err.to_string(),
        })
    }

    fn finish(&self, outcomes: Vec<std::result::Result<GameResult, GameFailure>>) -> BatchOutcome {
        let outcome = BatchOutcome::collect(outcomes);
        for failure in &outcome.failures {
            warn!(game_id = %failure.game_id, cause = %failure.cause, "game failed");
        }
        let summary = outcome.summary();
        info!(
            games = summary.games,
            failed = summary.failed,
            points = summary.points,
            throws = summary.throws,
            errors = summary.errors,
            warnings = summary.warnings,
            "batch finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discflow_feed::DirectorySource;
    use discflow_testing::fixtures::{write_payload, write_raw};
    use discflow_testing::{GameBuilder, PointScript};
    use discflow_types::Side;
    use tempfile::TempDir;

    fn sample(game_id: &str) -> GameBuilder {
        GameBuilder::new(game_id)
            .home_players(&[1, 2])
            .away_players(&[10, 11])
            .point(
                PointScript::pulled(Side::Home, &[1, 2], &[10, 11], 10)
                    .pass(1, 0.0, 20.0)
                    .goal(2, 0.0, 105.0, 600),
            )
            .reported_score(1, 0)
    }

    #[test]
    fn test_run_paths_parses_each_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_payload(dir.path(), &sample("2023-05-06-ATL-CAR"))?;
        write_payload(dir.path(), &sample("2023-05-07-CAR-ATL"))?;

        let outcome = Batch::new(FeedOptions::default())
            .with_workers(Some(2))
            .run_paths(&[dir.path().to_path_buf()])?;

        assert!(outcome.failures.is_empty());
        let ids: Vec<&str> = outcome.results.iter().map(|r| r.game_id.as_str()).collect();
        assert_eq!(ids, vec!["2023-05-06-ATL-CAR", "2023-05-07-CAR-ATL"]);
        let summary = outcome.summary();
        assert_eq!(summary.games, 2);
        assert_eq!(summary.points, 2);
        assert_eq!(summary.throws, 2);
        assert!(!outcome.has_errors());
        Ok(())
    }

    #[test]
    fn test_bad_payload_does_not_stop_batch() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_payload(dir.path(), &sample("2023-05-06-ATL-CAR"))?;
        write_raw(dir.path(), "2023-05-08-DC-NY.json", "{ not json")?;

        let outcome = Batch::new(FeedOptions::default()).run_paths(&[dir.path().to_path_buf()])?;

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].game_id.as_str(), "2023-05-08-DC-NY");
        assert!(outcome.has_errors());
        assert_eq!(outcome.summary().failed, 1);
        Ok(())
    }

    #[test]
    fn test_run_source_uses_listing() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_payload(dir.path(), &sample("2023-05-06-ATL-CAR"))?;

        let source = DirectorySource::new(dir.path());
        let outcome = Batch::new(FeedOptions::default()).run_source(&source)?;

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].final_score.home, 1);
        Ok(())
    }

    #[test]
    fn test_from_config_carries_workers() {
        let config = Config {
            workers: Some(3),
            strict_rosters: false,
            ..Config::default()
        };
        let batch = Batch::from_config(&config);
        assert_eq!(batch.workers, Some(3));
        assert!(!batch.options().strict_rosters);
    }
}
