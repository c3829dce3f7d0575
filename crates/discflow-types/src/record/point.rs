use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::GameId;
use crate::period::Period;
use crate::side::Side;

/// How a possession ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessionResult {
    Goal,
    Throwaway,
    Drop,
    Stall,
    Callahan,
    /// Synthetic result for a possession cut off by a period boundary.
    EndOfPeriod,
    /// The stream ended (or desynchronized) before the possession resolved.
    Interrupted,
}

impl fmt::Display for PossessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PossessionResult::Goal => "goal",
            PossessionResult::Throwaway => "throwaway",
            PossessionResult::Drop => "drop",
            PossessionResult::Stall => "stall",
            PossessionResult::Callahan => "callahan",
            PossessionResult::EndOfPeriod => "end_of_period",
            PossessionResult::Interrupted => "interrupted",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossessionSummary {
    pub team: Side,
    pub result: PossessionResult,
    pub throws: usize,
}

/// A finished point, tagged once its outcome is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub game_id: GameId,
    pub point_index: usize,
    /// Period the point started in.
    pub period: Period,
    /// Team that received the pull (or held the disc when play resumed).
    pub offense_start: Side,
    /// None when the point ended without a score.
    pub scoring_team: Option<Side>,
    pub timeouts: u32,
    /// Score after the point.
    pub home_score: u32,
    pub away_score: u32,
    pub pulled: bool,
    pub throw_count: usize,
    pub possessions: Vec<PossessionSummary>,
    /// The active stream ran out before a terminal event; needs review.
    pub interrupted: bool,
}

impl PointRecord {
    /// True when the scoring team is the team that started on defense.
    pub fn is_break(&self) -> bool {
        self.scoring_team
            .is_some_and(|scorer| scorer != self.offense_start)
    }
}
