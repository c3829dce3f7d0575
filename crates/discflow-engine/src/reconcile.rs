use discflow_types::{
    Diagnostic, DiagnosticKind, GameId, GameRecords, PointRecord, Score, Severity, Side,
};
use serde::Serialize;

use crate::context::GameContext;

/// Everything produced for one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub game_id: GameId,
    pub records: GameRecords,
    pub diagnostics: Vec<Diagnostic>,
    /// Score tallied from the point records.
    pub final_score: Score,
}

impl GameResult {
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

/// Score implied by the points' scoring teams.
pub fn tally(points: &[PointRecord]) -> Score {
    points
        .iter()
        .filter_map(|point| point.scoring_team)
        .fold(Score::default(), |mut score, side| {
            match side {
                Side::Home => score.home += 1,
                Side::Away => score.away += 1,
            }
            score
        })
}

/// Close out a game: compare the tally against the reported final score.
///
/// A mismatch is reported; records are kept either way.
pub fn reconcile(mut ctx: GameContext<'_>, reported: Option<Score>) -> GameResult {
    let computed = tally(&ctx.records.points);
    if let Some(reported) = reported
        && reported != computed
    {
        ctx.report(DiagnosticKind::ScoreMismatch { computed, reported });
    }

    let game_id = ctx.game_id.clone();
    let (records, diagnostics) = ctx.into_parts();
    GameResult {
        game_id,
        records,
        diagnostics,
        final_score: computed,
    }
}
