use discflow_types::{Event, EventKind, Side};

use crate::events;

/// One point written from both teams' point of view.
///
/// Events go to the team in possession (`offense`) or the team without it
/// (`defense`); the roles flip with [`PointScript::turnover`].
#[derive(Debug, Clone)]
pub struct PointScript {
    offense: Side,
    home: Vec<Event>,
    away: Vec<Event>,
}

impl PointScript {
    /// Empty point; `offense` holds the disc first.
    pub fn new(offense: Side) -> Self {
        Self {
            offense,
            home: Vec::new(),
            away: Vec::new(),
        }
    }

    /// Point opened by a pull from `puller` to the `offense` team.
    pub fn pulled(offense: Side, offense_line: &[i64], defense_line: &[i64], puller: i64) -> Self {
        Self::new(offense)
            .offense(events::o_line(offense_line))
            .defense(events::d_line(defense_line))
            .defense(events::pull(puller, 0.0, 80.0, 4200))
    }

    pub fn on(mut self, side: Side, event: Event) -> Self {
        match side {
            Side::Home => self.home.push(event),
            Side::Away => self.away.push(event),
        }
        self
    }

    pub fn offense(self, event: Event) -> Self {
        let side = self.offense;
        self.on(side, event)
    }

    pub fn defense(self, event: Event) -> Self {
        let side = self.offense.other();
        self.on(side, event)
    }

    pub fn both(self, event: Event) -> Self {
        self.on(Side::Home, event.clone()).on(Side::Away, event)
    }

    /// Swap possession roles for the events that follow.
    pub fn turnover(mut self) -> Self {
        self.offense = self.offense.other();
        self
    }

    pub fn pass(self, player: i64, x: f64, y: f64) -> Self {
        self.offense(events::possession(player, x, y))
    }

    /// Offense scores; the defense records being scored on.
    pub fn goal(self, player: i64, x: f64, y: f64, clock: i64) -> Self {
        self.offense(events::goal(player, x, y, clock))
            .defense(events::scored_on())
    }

    /// Defensive foul: the offense records the penalty, the defense its mirror.
    pub fn penalty_on_defense(self) -> Self {
        self.offense(events::kind(EventKind::DefensePenaltyOnThem))
            .defense(events::kind(EventKind::DefensePenaltyOnUs))
    }

    /// Offensive foul, written on both streams like [`PointScript::penalty_on_defense`].
    pub fn penalty_on_offense(self) -> Self {
        self.offense(events::kind(EventKind::OffensePenaltyOnUs))
            .defense(events::kind(EventKind::OffensePenaltyOnThem))
    }

    pub fn current_offense(&self) -> Side {
        self.offense
    }

    pub fn into_streams(self) -> (Vec<Event>, Vec<Event>) {
        (self.home, self.away)
    }
}
