use discflow_feed::{ClockCorrections, DecodedGame, FeedOptions, decode_payload};
use discflow_types::{DiagnosticKind, Event, GameId};
use tracing::{info, warn};

use crate::context::GameContext;
use crate::cursor::DualCursor;
use crate::error::{Error, Result};
use crate::point::PointMachine;
use crate::reconcile::{GameResult, reconcile};
use crate::segment::{break_marker, closing_boundary, segments};

/// Correct, decode and reconstruct one raw payload.
pub fn parse_payload(game_id: &GameId, text: &str, options: &FeedOptions) -> Result<GameResult> {
    let game = decode_payload(game_id, text, options)?;
    Ok(parse_game(&game, &options.clocks))
}

/// Reconstruct a decoded game. Defects inside the game become diagnostics.
pub fn parse_game(game: &DecodedGame, clocks: &ClockCorrections) -> GameResult {
    let mut ctx = GameContext::new(game.game_id.clone(), &game.roster, clocks);
    for kind in &game.diagnostics {
        ctx.report(kind.clone());
    }

    let home = segments(&game.streams.home);
    let away = segments(&game.streams.away);
    let (home_count, away_count) = (home.clone().count(), away.clone().count());
    if home_count != away_count {
        ctx.report(DiagnosticKind::SegmentCountMismatch {
            home: home_count,
            away: away_count,
        });
    }

    for (home_segment, away_segment) in home.zip(away) {
        play_segments(&mut ctx, home_segment, away_segment);
    }

    let result = reconcile(ctx, game.reported_score);
    info!(
        game_id = %result.game_id,
        points = result.records.points.len(),
        throws = result.records.throws.len(),
        pulls = result.records.pulls.len(),
        diagnostics = result.diagnostics.len(),
        score = %result.final_score,
        "parsed game"
    );
    result
}

fn play_segments(ctx: &mut GameContext<'_>, home: &[Event], away: &[Event]) {
    let cursor = DualCursor::new(home, away);
    match cursor.opening() {
        Ok(start) => PointMachine::new(ctx, cursor).run(start),
        Err(Error::AmbiguousPointStart {
            home: home_opener,
            away: away_opener,
        }) => {
            // Both sides only mark a period change: nothing was played.
            let is_break = break_marker(home).is_some() && break_marker(away).is_some();
            if !is_break {
                ctx.report(DiagnosticKind::AmbiguousPointStart {
                    home: home_opener,
                    away: away_opener,
                });
            }
            if let Some(transition) = closing_boundary(home)
                .or_else(|| closing_boundary(away))
                .and_then(|kind| kind.period_transition())
            {
                ctx.apply_transition(transition);
            }
        }
        Err(err) => warn!(game_id = %ctx.game_id, error = %err, "point skipped"),
    }
}
