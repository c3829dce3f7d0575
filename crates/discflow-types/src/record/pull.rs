use serde::{Deserialize, Serialize};

use crate::event::EventKind;
use crate::ids::{GameId, PlayerId};
use crate::period::Period;
use crate::side::Side;

/// The pull that opened a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRecord {
    pub game_id: GameId,
    pub period: Period,
    pub point_index: usize,
    /// Team that pulled (the defense).
    pub team: Side,
    /// One of the `PULL_*` tags.
    pub pull_type: EventKind,
    /// Hang time in milliseconds.
    pub elapsed_ms: Option<i64>,
    pub pull_x: Option<f64>,
    pub pull_y: Option<f64>,
    pub puller: Option<PlayerId>,
    pub home_score: u32,
    pub away_score: u32,
}
