use discflow_types::{
    DiagnosticKind, Event, EventKind, InternalId, Motion, Period, PointRecord, PossessionResult,
    PossessionSummary, PullRecord, Side, ThrowFlags, ThrowRecord,
};
use tracing::{debug, trace};

use super::origin::{Origin, PENALTY_YARDS};
use crate::context::GameContext;
use crate::cursor::{DualCursor, PointStart};

/// What the last handler decided.
enum Flow {
    /// Keep reading from the given side.
    Continue(Side),
    End(PointEnd),
}

struct PointEnd {
    scoring: Option<Side>,
    /// Side whose next event should close the point on its own stream.
    check: Option<Side>,
    interrupted: bool,
    /// Callahan throw waiting for the defender named by the other stream.
    callahan_throw: Option<usize>,
}

impl PointEnd {
    fn scored(scoring: Side, check: Option<Side>) -> Self {
        Self {
            scoring: Some(scoring),
            check,
            interrupted: false,
            callahan_throw: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stoppage {
    /// Affects only the reading side's line (injury, between-point timeout).
    Local,
    /// Own mid-point timeout; the other side may re-set its line first.
    Timeout { caller: Side },
}

#[derive(Debug, Clone, Copy)]
struct OpenPossession {
    team: Side,
    first_throw: usize,
}

/// Replays one point's pair of segments into records.
///
/// The active side is never stored: every handler receives the side it was
/// read from and returns the side to read next.
pub struct PointMachine<'c, 'g, 'a> {
    ctx: &'c mut GameContext<'g>,
    cursor: DualCursor<'a>,
    point_index: usize,
    period: Period,
    origin: Option<Origin>,
    throws: Vec<ThrowRecord>,
    /// Most recently appended throw, target of block backfills.
    last_throw: Option<usize>,
    possession: Option<OpenPossession>,
    possessions: Vec<PossessionSummary>,
    pull: Option<PullRecord>,
    /// Set by a turnover; the next possession records the pickup.
    pending_turnover: bool,
    stoppage: Option<Stoppage>,
    timeouts: u32,
}

impl<'c, 'g, 'a> PointMachine<'c, 'g, 'a> {
    pub fn new(ctx: &'c mut GameContext<'g>, cursor: DualCursor<'a>) -> Self {
        let point_index = ctx.next_point_index();
        ctx.current_point = Some(point_index);
        let period = ctx.period;
        Self {
            ctx,
            cursor,
            point_index,
            period,
            origin: None,
            throws: Vec::new(),
            last_throw: None,
            possession: None,
            possessions: Vec::new(),
            pull: None,
            pending_turnover: false,
            stoppage: None,
            timeouts: 0,
        }
    }

    /// Play the point to its end and append its records to the game.
    pub fn run(mut self, start: PointStart) {
        self.open_side(start.offense);
        self.open_side(start.defense());

        let mut side = if start.with_pull {
            self.ctx.motion = Motion::Pull;
            start.defense()
        } else {
            start.offense
        };

        let end = loop {
            let event = match self.cursor.take(side) {
                Ok(event) => event,
                Err(_) => break self.interrupt(side),
            };
            trace!(
                game_id = %self.ctx.game_id,
                point = self.point_index,
                period = %self.ctx.period,
                side = %side,
                event = %event.kind,
                "dispatch"
            );
            match self.dispatch(side, event) {
                Flow::Continue(next) => side = next,
                Flow::End(end) => break end,
            }
        };

        self.finish(start, end);
    }

    /// Consume a side's leading stoppages and its opening line-set.
    fn open_side(&mut self, side: Side) {
        for event in self.cursor.take_while(side, |event| event.kind.is_stoppage()) {
            self.ctx.observe_clock(event.clock_seconds);
            if matches!(
                event.kind,
                EventKind::OurTimeoutOnOffense
                    | EventKind::OurTimeoutOnDefense
                    | EventKind::OurMidpointTimeout
            ) {
                self.timeouts += 1;
            }
        }
        if let Some(event) = self
            .cursor
            .take_if(side, |event| event.kind.line_set().is_some())
            && let Some(lineup) = &event.lineup
        {
            self.ctx.set_lineup(side, lineup);
        }
    }

    fn dispatch(&mut self, side: Side, event: &'a Event) -> Flow {
        if event.kind.line_set().is_none() && !event.kind.is_stoppage() {
            self.stoppage = None;
        }

        match event.kind {
            EventKind::SetOffenseLine
            | EventKind::SetOffenseLineNoPull
            | EventKind::SetDefenseLine
            | EventKind::SetDefenseLineNoPull => self.on_line_set(side, event),
            EventKind::PullInbounds
            | EventKind::PullOutOfBounds
            | EventKind::PullOurOffsides
            | EventKind::PullTheirOffsides => self.on_pull(side, event),
            EventKind::Possession => self.on_possession(side, event),
            EventKind::Goal => self.on_goal(side, event),
            EventKind::CallahanThrown => self.on_callahan_thrown(side, event),
            EventKind::Throwaway => self.on_turnover(side, event, PossessionResult::Throwaway),
            EventKind::Drop => self.on_turnover(side, event, PossessionResult::Drop),
            EventKind::Stall => self.on_stall(side),
            EventKind::Block => self.on_block(side, event),
            EventKind::Callahan => self.on_callahan(side, event),
            EventKind::ScoredOn => self.on_scored_on(side),
            EventKind::DefensePenaltyOnThem => self.on_penalty(side, PENALTY_YARDS),
            EventKind::OffensePenaltyOnUs => self.on_penalty(side, -PENALTY_YARDS),
            // Mirrors of events the other side records with the effect.
            EventKind::DefensePenaltyOnUs
            | EventKind::OffensePenaltyOnThem
            | EventKind::ThrowawayCaused
            | EventKind::StallCaused => {
                self.ctx.observe_clock(event.clock_seconds);
                Flow::Continue(side)
            }
            EventKind::OurMidpointTimeout => self.on_midpoint_timeout(side, event),
            EventKind::TheirMidpointTimeout => self.on_their_midpoint_timeout(side, event),
            EventKind::OurTimeoutOnOffense | EventKind::OurTimeoutOnDefense => {
                self.on_stoppage(side, event, true)
            }
            EventKind::TheirTimeoutOnOffense
            | EventKind::TheirTimeoutOnDefense
            | EventKind::InjuryOnOffense
            | EventKind::InjuryOnDefense => self.on_stoppage(side, event, false),
            EventKind::Unknown => {
                self.ctx.report(DiagnosticKind::UnsupportedEvent {
                    side,
                    event: event.kind,
                });
                Flow::Continue(side)
            }
            EventKind::EndOfQ1
            | EventKind::Halftime
            | EventKind::EndOfQ3
            | EventKind::GameOver
            | EventKind::EndOfOt1
            | EventKind::EndOfOt2 => self.on_boundary(side, event),
        }
    }

    fn on_line_set(&mut self, side: Side, event: &Event) -> Flow {
        if let Some(lineup) = &event.lineup {
            self.ctx.set_lineup(side, lineup);
        }
        match self.stoppage {
            // The other team re-set its line during our timeout; hand back.
            Some(Stoppage::Timeout { caller }) if caller != side => Flow::Continue(caller),
            Some(_) => {
                self.stoppage = None;
                Flow::Continue(side)
            }
            None => {
                self.ctx
                    .report(DiagnosticKind::UnattributedLineChange { side });
                Flow::Continue(side)
            }
        }
    }

    fn on_pull(&mut self, side: Side, event: &Event) -> Flow {
        if self.pull.is_some() {
            self.ctx.report(DiagnosticKind::RepeatedPull { side });
        } else {
            self.record_pull(side, event);
        }

        // A re-pull follows on the pulling team's own stream.
        let repull = self
            .cursor
            .current(side)
            .is_some_and(|next| next.kind.is_pull());
        if repull {
            Flow::Continue(side)
        } else {
            Flow::Continue(DualCursor::switch(side))
        }
    }

    fn record_pull(&mut self, side: Side, event: &Event) {
        let puller = self.ctx.resolve(event.player);
        let (pull_x, pull_y) = event
            .position()
            .map_or((None, None), |(x, y)| (Some(x), Some(y)));
        self.pull = Some(PullRecord {
            game_id: self.ctx.game_id.clone(),
            period: self.ctx.period,
            point_index: self.point_index,
            team: side,
            pull_type: event.kind,
            elapsed_ms: event.clock_millis,
            pull_x,
            pull_y,
            puller,
            home_score: self.ctx.score.home,
            away_score: self.ctx.score.away,
        });
        self.ctx.motion = Motion::Pull;
    }

    fn on_possession(&mut self, side: Side, event: &Event) -> Flow {
        self.ensure_possession(side);
        let holder = self.ctx.resolve(event.player);
        let next = Origin::at(event, holder);

        if let Some(previous) = self.origin.take() {
            self.append_throw(side, Some(previous), &next, ThrowFlags::default());
        } else if self.pending_turnover {
            self.append_throw(side, None, &next, ThrowFlags::default());
        }
        self.pending_turnover = false;
        self.origin = Some(next);
        Flow::Continue(side)
    }

    fn on_goal(&mut self, side: Side, event: &Event) -> Flow {
        self.ctx.observe_clock(event.clock_seconds);
        self.close_throw(
            side,
            event,
            ThrowFlags {
                goal: true,
                ..ThrowFlags::default()
            },
        );
        self.close_possession(PossessionResult::Goal);
        self.ctx.credit(side);
        Flow::End(PointEnd::scored(side, Some(DualCursor::switch(side))))
    }

    fn on_callahan_thrown(&mut self, side: Side, event: &Event) -> Flow {
        self.ctx.observe_clock(event.clock_seconds);
        let index = self.close_throw(
            side,
            event,
            ThrowFlags {
                callahan: true,
                ..ThrowFlags::default()
            },
        );
        self.close_possession(PossessionResult::Callahan);

        let defense = DualCursor::switch(side);
        self.ctx.credit(defense);
        Flow::End(PointEnd {
            callahan_throw: Some(index),
            ..PointEnd::scored(defense, Some(defense))
        })
    }

    fn on_turnover(&mut self, side: Side, event: &Event, result: PossessionResult) -> Flow {
        let flags = if result == PossessionResult::Drop {
            ThrowFlags {
                drop: true,
                ..ThrowFlags::default()
            }
        } else {
            ThrowFlags {
                throwaway: true,
                ..ThrowFlags::default()
            }
        };
        self.close_throw(side, event, flags);
        self.close_possession(result);
        self.pending_turnover = true;
        self.ctx.motion = Motion::Turnover;
        Flow::Continue(DualCursor::switch(side))
    }

    /// The disc was never released: no throw, only a change of possession.
    fn on_stall(&mut self, side: Side) -> Flow {
        self.ensure_possession(side);
        self.origin = None;
        self.close_possession(PossessionResult::Stall);
        self.pending_turnover = true;
        self.ctx.motion = Motion::Turnover;
        Flow::Continue(DualCursor::switch(side))
    }

    fn on_block(&mut self, side: Side, event: &Event) -> Flow {
        self.ctx.observe_clock(event.clock_seconds);
        match self.last_throw {
            Some(index) => self.backfill_blocker(index, event.player),
            None => self.ctx.report(DiagnosticKind::OrphanBlock { side }),
        }
        Flow::Continue(side)
    }

    /// A defender caught a throw in the attacking endzone.
    fn on_callahan(&mut self, side: Side, event: &Event) -> Flow {
        self.ctx.observe_clock(event.clock_seconds);
        match self.last_throw {
            Some(index) => {
                self.backfill_blocker(index, event.player);
                self.throws[index].flags.callahan = true;
            }
            None => self.ctx.report(DiagnosticKind::OrphanBlock { side }),
        }
        self.close_possession(PossessionResult::Callahan);
        self.ctx.credit(side);
        Flow::End(PointEnd::scored(side, Some(DualCursor::switch(side))))
    }

    /// The active side read the other team's goal before the goal itself.
    fn on_scored_on(&mut self, side: Side) -> Flow {
        self.ctx.report(DiagnosticKind::Desync {
            side,
            found: Some(EventKind::ScoredOn),
        });
        self.close_possession(PossessionResult::Interrupted);
        let scorer = DualCursor::switch(side);
        self.ctx.credit(scorer);
        Flow::End(PointEnd::scored(scorer, None))
    }

    fn on_penalty(&mut self, side: Side, yards: f64) -> Flow {
        match self.origin.as_mut() {
            Some(origin) => origin.shift(yards),
            None => self
                .ctx
                .report(DiagnosticKind::PenaltyWithoutOrigin { side }),
        }
        self.ctx.motion = Motion::Penalty;
        Flow::Continue(side)
    }

    fn on_midpoint_timeout(&mut self, side: Side, event: &Event) -> Flow {
        self.ctx.observe_clock(event.clock_seconds);
        self.ctx.motion = Motion::Timeout;
        self.timeouts += 1;

        let other = DualCursor::switch(side);
        self.skip_mirrors(other);
        let handoff = self.cursor.current(other).is_some_and(|next| {
            next.kind == EventKind::TheirMidpointTimeout
                || next.kind.line_set().is_some_and(|line| !line.with_pull)
        });
        if handoff {
            self.stoppage = Some(Stoppage::Timeout { caller: side });
            Flow::Continue(other)
        } else {
            self.stoppage = Some(Stoppage::Local);
            Flow::Continue(side)
        }
    }

    fn on_their_midpoint_timeout(&mut self, side: Side, event: &Event) -> Flow {
        self.ctx.observe_clock(event.clock_seconds);
        if let Some(Stoppage::Timeout { caller }) = self.stoppage
            && caller != side
        {
            let line_change_follows = self
                .cursor
                .current(side)
                .is_some_and(|next| next.kind.line_set().is_some());
            if !line_change_follows {
                return Flow::Continue(caller);
            }
        }
        Flow::Continue(side)
    }

    fn on_stoppage(&mut self, side: Side, event: &Event, own_timeout: bool) -> Flow {
        self.ctx.observe_clock(event.clock_seconds);
        if own_timeout {
            self.timeouts += 1;
        }
        self.stoppage = Some(Stoppage::Local);
        Flow::Continue(side)
    }

    fn on_boundary(&mut self, side: Side, event: &Event) -> Flow {
        self.close_possession(PossessionResult::EndOfPeriod);
        self.origin = None;
        self.pending_turnover = false;
        if let Some(transition) = event.kind.period_transition() {
            self.ctx.apply_transition(transition);
        }
        Flow::End(PointEnd {
            scoring: None,
            check: Some(DualCursor::switch(side)),
            interrupted: false,
            callahan_throw: None,
        })
    }

    fn interrupt(&mut self, side: Side) -> PointEnd {
        self.ctx.report(DiagnosticKind::InterruptedPoint { side });
        self.close_possession(PossessionResult::Interrupted);
        PointEnd {
            scoring: None,
            check: None,
            interrupted: true,
            callahan_throw: None,
        }
    }

    fn finish(mut self, start: PointStart, end: PointEnd) {
        if let Some(check) = end.check {
            self.skip_mirrors(check);
        }
        if let (Some(index), Some(check)) = (end.callahan_throw, end.check)
            && let Some(event) = self.cursor.current(check)
            && event.kind == EventKind::Callahan
        {
            self.backfill_blocker(index, event.player);
        }

        if let Some(check) = end.check {
            match self.cursor.current(check) {
                Some(event) if event.kind.is_terminal() => {}
                other => self.ctx.report(DiagnosticKind::Desync {
                    side: check,
                    found: other.map(|event| event.kind),
                }),
            }
        }

        let point = PointRecord {
            game_id: self.ctx.game_id.clone(),
            point_index: self.point_index,
            period: self.period,
            offense_start: start.offense,
            scoring_team: end.scoring,
            timeouts: self.timeouts,
            home_score: self.ctx.score.home,
            away_score: self.ctx.score.away,
            pulled: self.pull.is_some(),
            throw_count: self.throws.len(),
            possessions: self.possessions,
            interrupted: end.interrupted,
        };
        debug!(
            game_id = %self.ctx.game_id,
            point = self.point_index,
            period = %self.period,
            scoring = ?point.scoring_team,
            throws = point.throw_count,
            "point closed"
        );

        let records = &mut self.ctx.records;
        records.throws.extend(self.throws);
        records.pulls.extend(self.pull);
        records.points.push(point);
        self.ctx.current_point = None;
    }

    /// Consume mirrors `side` logged while the other team held the disc.
    ///
    /// A penalty keeps the reading side, so its mirror sits unread on the
    /// other stream until someone looks past it.
    fn skip_mirrors(&mut self, side: Side) {
        for event in self.cursor.take_while(side, |event| event.kind.is_mirror()) {
            self.ctx.observe_clock(event.clock_seconds);
        }
    }

    /// Build the throw ending at `event` from the pending origin.
    fn close_throw(&mut self, side: Side, event: &Event, flags: ThrowFlags) -> usize {
        self.ensure_possession(side);
        let holder = self.ctx.resolve(event.player);
        let target = Origin::at(event, holder);
        let from = self.origin.take();
        self.pending_turnover = false;
        self.append_throw(side, from, &target, flags)
    }

    fn append_throw(
        &mut self,
        team: Side,
        from: Option<Origin>,
        to: &Origin,
        flags: ThrowFlags,
    ) -> usize {
        let (thrower, origin_x, origin_y) = match from {
            Some(origin) => (origin.holder, origin.x, origin.y),
            None => (None, None, None),
        };
        let record = ThrowRecord {
            game_id: self.ctx.game_id.clone(),
            period: self.ctx.period,
            point_index: self.point_index,
            possession_index: self.possessions.len(),
            team,
            thrower,
            origin_x,
            origin_y,
            receiver: to.holder.clone(),
            destination_x: to.x,
            destination_y: to.y,
            blocker: None,
            flags,
            home_score: self.ctx.score.home,
            away_score: self.ctx.score.away,
            clock_seconds: self.ctx.clock,
            motion: self.ctx.take_motion(),
            home_players: self.ctx.rosters.home.clone(),
            away_players: self.ctx.rosters.away.clone(),
        };
        self.throws.push(record);
        let index = self.throws.len() - 1;
        self.last_throw = Some(index);
        index
    }

    fn backfill_blocker(&mut self, index: usize, player: Option<InternalId>) {
        let blocker = self.ctx.resolve(player);
        if let Some(throw) = self.throws.get_mut(index) {
            throw.blocker = blocker;
            throw.flags.block = true;
        }
    }

    fn ensure_possession(&mut self, team: Side) {
        match self.possession {
            Some(open) if open.team == team => {}
            Some(_) => {
                self.close_possession(PossessionResult::Interrupted);
                self.open_possession(team);
            }
            None => self.open_possession(team),
        }
    }

    fn open_possession(&mut self, team: Side) {
        self.possession = Some(OpenPossession {
            team,
            first_throw: self.throws.len(),
        });
    }

    fn close_possession(&mut self, result: PossessionResult) {
        if let Some(open) = self.possession.take() {
            self.possessions.push(PossessionSummary {
                team: open.team,
                result,
                throws: self.throws.len() - open.first_throw,
            });
        }
    }
}
