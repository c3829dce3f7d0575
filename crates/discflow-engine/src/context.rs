use discflow_feed::{ClockCorrections, ClockReading, Resolved, RosterResolver};
use discflow_types::{
    Diagnostic, DiagnosticKind, GameId, GameRecords, InternalId, Motion, Period, PeriodTransition,
    PlayerId, QUARTER_SECONDS, Score, Severity, Side, Sides,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Mutable state for one game, owned by the worker parsing it.
///
/// Nothing here outlives the game: a fresh context is built per call.
#[derive(Debug)]
pub struct GameContext<'g> {
    pub game_id: GameId,
    pub score: Sides<u32>,
    pub period: Period,
    /// Seconds left in the period; None while unknown.
    pub clock: Option<u32>,
    /// Last known players on the field, per side.
    pub rosters: Sides<Vec<PlayerId>>,
    pub motion: Motion,
    pub records: GameRecords,
    /// Point being parsed, for diagnostics.
    pub current_point: Option<usize>,
    roster: &'g RosterResolver,
    clocks: &'g ClockCorrections,
    diagnostics: Vec<Diagnostic>,
    unresolved: HashSet<InternalId>,
}

impl<'g> GameContext<'g> {
    pub fn new(game_id: GameId, roster: &'g RosterResolver, clocks: &'g ClockCorrections) -> Self {
        Self {
            game_id,
            score: Sides::default(),
            period: Period::Q1,
            clock: Some(QUARTER_SECONDS),
            rosters: Sides::default(),
            motion: Motion::InPlay,
            records: GameRecords::default(),
            current_point: None,
            roster,
            clocks,
            diagnostics: Vec::new(),
            unresolved: HashSet::new(),
        }
    }

    pub fn current_score(&self) -> Score {
        Score::new(self.score.home, self.score.away)
    }

    /// Index the next emitted point will get.
    pub fn next_point_index(&self) -> usize {
        self.records.points.len()
    }

    /// Record a diagnostic at the current game position.
    pub fn report(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            game_id: self.game_id.clone(),
            severity: kind.severity(),
            kind,
            score: self.current_score(),
            period: self.period,
            point_index: self.current_point,
        };
        if diagnostic.severity >= Severity::Warning {
            warn!(
                game_id = %self.game_id,
                period = %self.period,
                point = ?self.current_point,
                "{}",
                diagnostic.kind
            );
        } else {
            debug!(game_id = %self.game_id, period = %self.period, "{}", diagnostic.kind);
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolve a referenced player, reporting each unknown id once per game.
    pub fn resolve(&mut self, id: Option<InternalId>) -> Option<PlayerId> {
        match self.roster.resolve(id?) {
            Resolved::Player(player) => Some(player),
            Resolved::NoneRecorded => None,
            Resolved::Unknown(id) => {
                if self.unresolved.insert(id) {
                    self.report(DiagnosticKind::UnresolvedPlayer { internal_id: id });
                }
                None
            }
        }
    }

    /// Replace a side's on-field roster from a line-set lineup.
    pub fn set_lineup(&mut self, side: Side, lineup: &[InternalId]) {
        let players = lineup
            .iter()
            .filter_map(|id| self.resolve(Some(*id)))
            .collect();
        *self.rosters.get_mut(side) = players;
    }

    /// Update the clock from an event's raw reading, if it carries one.
    pub fn observe_clock(&mut self, raw: Option<i64>) {
        let Some(observed) = raw else {
            return;
        };
        match self.clocks.resolve(observed) {
            ClockReading::Valid(seconds) => self.clock = Some(seconds),
            ClockReading::Corrected {
                observed,
                corrected,
            } => {
                self.clock = Some(corrected);
                self.report(DiagnosticKind::ClockCorrected {
                    observed,
                    corrected,
                });
            }
            ClockReading::Invalid(observed) => {
                self.clock = None;
                self.report(DiagnosticKind::InvalidClock { observed });
            }
        }
    }

    pub fn apply_transition(&mut self, transition: PeriodTransition) {
        debug!(
            game_id = %self.game_id,
            from = %self.period,
            to = %transition.next,
            final_whistle = transition.final_whistle,
            "period boundary"
        );
        self.period = transition.next;
        self.clock = transition.clock_seconds;
    }

    /// Current motion tag, reset to in-play for the next throw.
    pub fn take_motion(&mut self) -> Motion {
        std::mem::take(&mut self.motion)
    }

    pub fn credit(&mut self, side: Side) {
        *self.score.get_mut(side) += 1;
    }

    pub fn into_parts(self) -> (GameRecords, Vec<Diagnostic>) {
        (self.records, self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discflow_types::EventKind;

    fn roster() -> RosterResolver {
        RosterResolver::from_pairs([(1, "alice"), (2, "bo")])
    }

    #[test]
    fn test_unresolved_player_reported_once() {
        let roster = roster();
        let clocks = ClockCorrections::builtin();
        let mut ctx = GameContext::new(GameId::new("g"), &roster, &clocks);

        assert_eq!(ctx.resolve(Some(InternalId(1))), Some(PlayerId::new("alice")));
        assert_eq!(ctx.resolve(Some(InternalId(-1))), None);
        assert_eq!(ctx.resolve(Some(InternalId(7))), None);
        assert_eq!(ctx.resolve(Some(InternalId(7))), None);
        assert_eq!(ctx.resolve(None), None);

        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(
            ctx.diagnostics()[0].kind,
            DiagnosticKind::UnresolvedPlayer {
                internal_id: InternalId(7)
            }
        );
    }

    #[test]
    fn test_lineup_skips_unknown_ids() {
        let roster = roster();
        let clocks = ClockCorrections::builtin();
        let mut ctx = GameContext::new(GameId::new("g"), &roster, &clocks);

        ctx.set_lineup(Side::Away, &[InternalId(2), InternalId(9), InternalId(1)]);
        assert_eq!(
            ctx.rosters.away,
            vec![PlayerId::new("bo"), PlayerId::new("alice")]
        );
        assert!(ctx.rosters.home.is_empty());
    }

    #[test]
    fn test_clock_readings() {
        let roster = roster();
        let clocks = ClockCorrections::builtin();
        let mut ctx = GameContext::new(GameId::new("g"), &roster, &clocks);
        assert_eq!(ctx.clock, Some(720));

        ctx.observe_clock(None);
        assert_eq!(ctx.clock, Some(720));
        ctx.observe_clock(Some(600));
        assert_eq!(ctx.clock, Some(600));
        ctx.observe_clock(Some(-301));
        assert_eq!(ctx.clock, Some(529));
        ctx.observe_clock(Some(-2));
        assert_eq!(ctx.clock, None);

        let kinds: Vec<_> = ctx.diagnostics().iter().map(|d| d.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::ClockCorrected {
                    observed: -301,
                    corrected: 529
                },
                DiagnosticKind::InvalidClock { observed: -2 },
            ]
        );
    }

    #[test]
    fn test_transition_and_motion_reset() {
        let roster = roster();
        let clocks = ClockCorrections::builtin();
        let mut ctx = GameContext::new(GameId::new("g"), &roster, &clocks);

        ctx.motion = Motion::Penalty;
        assert_eq!(ctx.take_motion(), Motion::Penalty);
        assert_eq!(ctx.motion, Motion::InPlay);

        ctx.clock = Some(3);
        if let Some(transition) = EventKind::EndOfQ1.period_transition() {
            ctx.apply_transition(transition);
        }
        assert_eq!(ctx.period, Period::Q2);
        assert_eq!(ctx.clock, Some(720));
    }
}
