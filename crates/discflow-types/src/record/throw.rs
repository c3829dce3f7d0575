use serde::{Deserialize, Serialize};

use super::motion::Motion;
use crate::ids::{GameId, PlayerId};
use crate::period::Period;
use crate::side::Side;

/// Outcome flags of a throw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowFlags {
    pub throwaway: bool,
    pub callahan: bool,
    pub drop: bool,
    pub block: bool,
    pub goal: bool,
}

/// One throw (or turnover pickup) as a flat, table-ready row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowRecord {
    pub game_id: GameId,
    pub period: Period,
    pub point_index: usize,
    pub possession_index: usize,
    /// Team in possession when the disc was thrown.
    pub team: Side,

    pub thrower: Option<PlayerId>,
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
    pub receiver: Option<PlayerId>,
    pub destination_x: Option<f64>,
    pub destination_y: Option<f64>,
    /// Defender credited with the block; backfilled after the throw is appended.
    pub blocker: Option<PlayerId>,

    #[serde(flatten)]
    pub flags: ThrowFlags,

    /// Score before the throw's outcome is applied.
    pub home_score: u32,
    pub away_score: u32,
    pub clock_seconds: Option<u32>,
    pub motion: Motion,

    pub home_players: Vec<PlayerId>,
    pub away_players: Vec<PlayerId>,
}

impl ThrowRecord {
    pub fn origin(&self) -> Option<(f64, f64)> {
        Some((self.origin_x?, self.origin_y?))
    }

    pub fn destination(&self) -> Option<(f64, f64)> {
        Some((self.destination_x?, self.destination_y?))
    }

    /// Whether the throw ended its team's possession.
    pub fn is_turnover(&self) -> bool {
        self.flags.throwaway || self.flags.drop || self.flags.callahan
    }
}
