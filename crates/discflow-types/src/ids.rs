use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static GAME_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})-([A-Z]{2,4})-([A-Z]{2,4})$").expect("valid game id regex")
});

/// Stat-server game identifier, e.g. `2022-06-11-MAD-CHI` (away team first).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the id into date and matchup.
    ///
    /// Returns None for ids that do not follow the `YYYY-MM-DD-AWAY-HOME` layout
    /// (exhibition games and hand-made fixtures use free-form ids).
    pub fn key(&self) -> Option<GameKey> {
        let caps = GAME_ID_PATTERN.captures(&self.0)?;
        let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
        Some(GameKey {
            date,
            away: caps[2].to_string(),
            home: caps[3].to_string(),
        })
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Parsed components of a well-formed [`GameId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameKey {
    pub date: NaiveDate,
    pub away: String,
    pub home: String,
}

impl GameKey {
    pub fn season(&self) -> i32 {
        self.date.year()
    }
}

/// Per-appearance player id used inside a game's event streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalId(pub i64);

impl InternalId {
    /// Sentinel the stat server writes when no player was recorded.
    pub const NONE_RECORDED: InternalId = InternalId(-1);

    pub fn is_none_recorded(self) -> bool {
        self == Self::NONE_RECORDED
    }
}

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable external player id (the league's `ext_player_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
