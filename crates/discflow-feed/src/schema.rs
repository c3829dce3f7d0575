//! Wire shape of a stats-page payload.
//!
//! Only the parts the parser reads are modeled; unknown keys are ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    #[serde(default)]
    pub game: Option<RawGameSummary>,
    #[serde(default)]
    pub rosters_home: Vec<RawRosterEntry>,
    #[serde(default)]
    pub rosters_away: Vec<RawRosterEntry>,
    pub tsg_home: Option<RawTeamStream>,
    pub tsg_away: Option<RawTeamStream>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGameSummary {
    #[serde(default, rename = "gameID")]
    pub game_id: Option<String>,
    #[serde(default, rename = "scoreHome")]
    pub score_home: Option<u32>,
    #[serde(default, rename = "scoreAway")]
    pub score_away: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRosterEntry {
    pub id: i64,
    pub player: RawPlayer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    pub ext_player_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeamStream {
    pub events: Option<RawEvents>,
    #[serde(default)]
    pub start_on_offense: Option<bool>,
}

/// The stat server embeds each event list as JSON text inside the payload.
/// Hand-made fixtures may inline the array instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEvents {
    Text(String),
    List(Vec<RawEvent>),
}

/// One event as written by the stat server: `t` tag, `x`/`y` field position,
/// `r` player, `l` lineup, `s` clock seconds, `ms` elapsed milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub t: i64,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub r: Option<i64>,
    #[serde(default)]
    pub l: Option<Vec<i64>>,
    #[serde(default)]
    pub s: Option<f64>,
    #[serde(default)]
    pub ms: Option<f64>,
}
