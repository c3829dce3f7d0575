use serde::{Deserialize, Serialize};

use super::kind::EventKind;
use crate::ids::InternalId;

/// One decoded stat-server event.
///
/// Every field other than `kind` is optional on the wire; which ones are present
/// depends on the tag (line-sets carry `lineup`, possessions carry coordinates and
/// a player, scores carry the clock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    /// Referenced player. `InternalId::NONE_RECORDED` means the stat keeper
    /// left the player blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<InternalId>,

    /// Players on the field for this team, in stat-keeper order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineup: Option<Vec<InternalId>>,

    /// Seconds remaining in the period, as reported (may be a negative sentinel).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_millis: Option<i64>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            x: None,
            y: None,
            player: None,
            lineup: None,
            clock_seconds: None,
            clock_millis: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn by(mut self, player: i64) -> Self {
        self.player = Some(InternalId(player));
        self
    }

    pub fn with_lineup(mut self, lineup: &[i64]) -> Self {
        self.lineup = Some(lineup.iter().copied().map(InternalId).collect());
        self
    }

    pub fn with_clock(mut self, seconds: i64) -> Self {
        self.clock_seconds = Some(seconds);
        self
    }

    pub fn with_millis(mut self, millis: i64) -> Self {
        self.clock_millis = Some(millis);
        self
    }

    /// Coordinates when both axes were recorded.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let event = Event::new(EventKind::Possession).at(1.5, 40.0).by(9384);
        assert_eq!(event.position(), Some((1.5, 40.0)));
        assert_eq!(event.player, Some(InternalId(9384)));
        assert!(event.lineup.is_none());
    }

    #[test]
    fn test_position_requires_both_axes() {
        let mut event = Event::new(EventKind::Throwaway);
        event.x = Some(3.0);
        assert_eq!(event.position(), None);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let event = Event::new(EventKind::Goal).with_clock(600);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"kind":"GOAL","clock_seconds":600}"#);
    }
}
