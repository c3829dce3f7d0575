use serde::{Deserialize, Serialize};
use std::fmt;

use crate::period::{OVERTIME_SECONDS, Period, PeriodTransition, QUARTER_SECONDS};
use crate::{Error, Result};

/// Semantic tag of a stat-server event.
///
/// Codes are resolved through [`EVENT_CODES`]; nothing outside this module
/// looks at a raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    // Defense
    #[serde(rename = "SET_D_LINE")]
    SetDefenseLine,
    #[serde(rename = "SET_D_LINE_NO_PULL")]
    SetDefenseLineNoPull,
    #[serde(rename = "PULL_INBOUNDS")]
    PullInbounds,
    #[serde(rename = "PULL_OUT_OF_BOUNDS")]
    PullOutOfBounds,
    #[serde(rename = "PULL_OUR_OFFSIDES")]
    PullOurOffsides,
    #[serde(rename = "PULL_THEIR_OFFSIDES")]
    PullTheirOffsides,
    #[serde(rename = "BLOCK")]
    Block,
    #[serde(rename = "THROWAWAY_CAUSED")]
    ThrowawayCaused,
    #[serde(rename = "CALLAHAN")]
    Callahan,
    #[serde(rename = "SCORED_ON")]
    ScoredOn,
    #[serde(rename = "STALL_CAUSED")]
    StallCaused,
    #[serde(rename = "D_PENALTY_ON_US")]
    DefensePenaltyOnUs,
    #[serde(rename = "O_PENALTY_ON_THEM")]
    OffensePenaltyOnThem,
    #[serde(rename = "THEIR_MIDPOINT_TIMEOUT")]
    TheirMidpointTimeout,
    #[serde(rename = "THEIR_TIMEOUT_ON_O")]
    TheirTimeoutOnOffense,
    #[serde(rename = "OUR_TIMEOUT_ON_D")]
    OurTimeoutOnDefense,

    // Offense
    #[serde(rename = "SET_O_LINE")]
    SetOffenseLine,
    #[serde(rename = "SET_O_LINE_NO_PULL")]
    SetOffenseLineNoPull,
    #[serde(rename = "DROP")]
    Drop,
    #[serde(rename = "POSSESSION")]
    Possession,
    #[serde(rename = "CALLAHAN_THROWN")]
    CallahanThrown,
    #[serde(rename = "THROWAWAY")]
    Throwaway,
    #[serde(rename = "GOAL")]
    Goal,
    #[serde(rename = "STALL")]
    Stall,
    #[serde(rename = "O_PENALTY_ON_US")]
    OffensePenaltyOnUs,
    #[serde(rename = "D_PENALTY_ON_THEM")]
    DefensePenaltyOnThem,
    #[serde(rename = "OUR_MIDPOINT_TIMEOUT")]
    OurMidpointTimeout,
    #[serde(rename = "THEIR_TIMEOUT_ON_D")]
    TheirTimeoutOnDefense,
    #[serde(rename = "OUR_TIMEOUT_ON_O")]
    OurTimeoutOnOffense,

    // Either side
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[serde(rename = "INJURY_ON_O")]
    InjuryOnOffense,
    #[serde(rename = "INJURY_ON_D")]
    InjuryOnDefense,
    #[serde(rename = "END_OF_Q1")]
    EndOfQ1,
    #[serde(rename = "HALFTIME")]
    Halftime,
    #[serde(rename = "END_OF_Q3")]
    EndOfQ3,
    #[serde(rename = "GAME_OVER")]
    GameOver,
    #[serde(rename = "END_OF_OT1")]
    EndOfOt1,
    #[serde(rename = "END_OF_OT2")]
    EndOfOt2,
}

/// The Event Code Registry, as defined by the stat server.
pub const EVENT_CODES: [(i64, EventKind); 38] = [
    (2, EventKind::SetDefenseLine),
    (40, EventKind::SetDefenseLineNoPull),
    (3, EventKind::PullInbounds),
    (4, EventKind::PullOutOfBounds),
    (44, EventKind::PullOurOffsides),
    (45, EventKind::PullTheirOffsides),
    (5, EventKind::Block),
    (9, EventKind::ThrowawayCaused),
    (6, EventKind::Callahan),
    (21, EventKind::ScoredOn),
    (18, EventKind::StallCaused),
    (11, EventKind::DefensePenaltyOnUs),
    (13, EventKind::OffensePenaltyOnThem),
    (15, EventKind::TheirMidpointTimeout),
    (31, EventKind::TheirTimeoutOnOffense),
    (32, EventKind::OurTimeoutOnDefense),
    (1, EventKind::SetOffenseLine),
    (41, EventKind::SetOffenseLineNoPull),
    (19, EventKind::Drop),
    (20, EventKind::Possession),
    (7, EventKind::CallahanThrown),
    (8, EventKind::Throwaway),
    (22, EventKind::Goal),
    (17, EventKind::Stall),
    (10, EventKind::OffensePenaltyOnUs),
    (12, EventKind::DefensePenaltyOnThem),
    (14, EventKind::OurMidpointTimeout),
    (29, EventKind::TheirTimeoutOnDefense),
    (30, EventKind::OurTimeoutOnOffense),
    (0, EventKind::Unknown),
    (42, EventKind::InjuryOnOffense),
    (43, EventKind::InjuryOnDefense),
    (23, EventKind::EndOfQ1),
    (24, EventKind::Halftime),
    (25, EventKind::EndOfQ3),
    (26, EventKind::GameOver),
    (27, EventKind::EndOfOt1),
    (28, EventKind::EndOfOt2),
];

/// Shape of a line-set event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSet {
    /// The team lines up on offense (receives).
    pub offense: bool,
    /// The point opens with a pull.
    pub with_pull: bool,
}

impl EventKind {
    /// Resolve a raw code through the registry.
    pub fn from_code(code: i64) -> Result<EventKind> {
        EVENT_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, kind)| *kind)
            .ok_or(Error::UnknownEventCode(code))
    }

    pub fn code(self) -> i64 {
        EVENT_CODES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(code, _)| *code)
            .unwrap_or(0)
    }

    /// Stat-server tag name, e.g. `PULL_INBOUNDS`.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::SetDefenseLine => "SET_D_LINE",
            EventKind::SetDefenseLineNoPull => "SET_D_LINE_NO_PULL",
            EventKind::PullInbounds => "PULL_INBOUNDS",
            EventKind::PullOutOfBounds => "PULL_OUT_OF_BOUNDS",
            EventKind::PullOurOffsides => "PULL_OUR_OFFSIDES",
            EventKind::PullTheirOffsides => "PULL_THEIR_OFFSIDES",
            EventKind::Block => "BLOCK",
            EventKind::ThrowawayCaused => "THROWAWAY_CAUSED",
            EventKind::Callahan => "CALLAHAN",
            EventKind::ScoredOn => "SCORED_ON",
            EventKind::StallCaused => "STALL_CAUSED",
            EventKind::DefensePenaltyOnUs => "D_PENALTY_ON_US",
            EventKind::OffensePenaltyOnThem => "O_PENALTY_ON_THEM",
            EventKind::TheirMidpointTimeout => "THEIR_MIDPOINT_TIMEOUT",
            EventKind::TheirTimeoutOnOffense => "THEIR_TIMEOUT_ON_O",
            EventKind::OurTimeoutOnDefense => "OUR_TIMEOUT_ON_D",
            EventKind::SetOffenseLine => "SET_O_LINE",
            EventKind::SetOffenseLineNoPull => "SET_O_LINE_NO_PULL",
            EventKind::Drop => "DROP",
            EventKind::Possession => "POSSESSION",
            EventKind::CallahanThrown => "CALLAHAN_THROWN",
            EventKind::Throwaway => "THROWAWAY",
            EventKind::Goal => "GOAL",
            EventKind::Stall => "STALL",
            EventKind::OffensePenaltyOnUs => "O_PENALTY_ON_US",
            EventKind::DefensePenaltyOnThem => "D_PENALTY_ON_THEM",
            EventKind::OurMidpointTimeout => "OUR_MIDPOINT_TIMEOUT",
            EventKind::TheirTimeoutOnDefense => "THEIR_TIMEOUT_ON_D",
            EventKind::OurTimeoutOnOffense => "OUR_TIMEOUT_ON_O",
            EventKind::Unknown => "UNKNOWN",
            EventKind::InjuryOnOffense => "INJURY_ON_O",
            EventKind::InjuryOnDefense => "INJURY_ON_D",
            EventKind::EndOfQ1 => "END_OF_Q1",
            EventKind::Halftime => "HALFTIME",
            EventKind::EndOfQ3 => "END_OF_Q3",
            EventKind::GameOver => "GAME_OVER",
            EventKind::EndOfOt1 => "END_OF_OT1",
            EventKind::EndOfOt2 => "END_OF_OT2",
        }
    }

    pub fn line_set(self) -> Option<LineSet> {
        match self {
            EventKind::SetDefenseLine => Some(LineSet {
                offense: false,
                with_pull: true,
            }),
            EventKind::SetDefenseLineNoPull => Some(LineSet {
                offense: false,
                with_pull: false,
            }),
            EventKind::SetOffenseLine => Some(LineSet {
                offense: true,
                with_pull: true,
            }),
            EventKind::SetOffenseLineNoPull => Some(LineSet {
                offense: true,
                with_pull: false,
            }),
            _ => None,
        }
    }

    pub fn is_pull(self) -> bool {
        matches!(
            self,
            EventKind::PullInbounds
                | EventKind::PullOutOfBounds
                | EventKind::PullOurOffsides
                | EventKind::PullTheirOffsides
        )
    }

    /// Period and game boundary markers.
    pub fn is_boundary(self) -> bool {
        self.period_transition().is_some()
    }

    /// Events that close a point-scoped segment of one team's stream.
    pub fn is_terminal(self) -> bool {
        self.is_boundary()
            || matches!(
                self,
                EventKind::Callahan
                    | EventKind::ScoredOn
                    | EventKind::CallahanThrown
                    | EventKind::Goal
            )
    }

    /// Stoppage events that may precede a point's line-set.
    pub fn is_stoppage(self) -> bool {
        matches!(
            self,
            EventKind::OurMidpointTimeout
                | EventKind::TheirMidpointTimeout
                | EventKind::OurTimeoutOnOffense
                | EventKind::OurTimeoutOnDefense
                | EventKind::TheirTimeoutOnOffense
                | EventKind::TheirTimeoutOnDefense
                | EventKind::InjuryOnOffense
                | EventKind::InjuryOnDefense
        )
    }

    /// Events a team records for something the other team logs with the effect.
    pub fn is_mirror(self) -> bool {
        matches!(
            self,
            EventKind::DefensePenaltyOnUs
                | EventKind::OffensePenaltyOnThem
                | EventKind::ThrowawayCaused
                | EventKind::StallCaused
        )
    }

    /// The fixed boundary table: which period follows a marker and where its clock starts.
    pub fn period_transition(self) -> Option<PeriodTransition> {
        let (next, clock_seconds, final_whistle) = match self {
            EventKind::EndOfQ1 => (Period::Q2, Some(QUARTER_SECONDS), false),
            EventKind::Halftime => (Period::Q3, Some(QUARTER_SECONDS), false),
            EventKind::EndOfQ3 => (Period::Q4, Some(QUARTER_SECONDS), false),
            EventKind::GameOver => (Period::OT1, Some(OVERTIME_SECONDS), false),
            EventKind::EndOfOt1 => (Period::OT2, None, false),
            EventKind::EndOfOt2 => (Period::OT2, None, true),
            _ => return None,
        };
        Some(PeriodTransition {
            next,
            clock_seconds,
            final_whistle,
        })
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
