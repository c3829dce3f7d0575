use discflow_types::{DiagnosticKind, Event, GameId, Score, Side, Sides};
use tracing::debug;

use crate::clock::ClockCorrections;
use crate::corrections::CorrectionTable;
use crate::decode::decode_events;
use crate::error::{Error, Result};
use crate::roster::RosterResolver;
use crate::schema::{RawPayload, RawTeamStream};

/// Knobs for turning payload text into streams.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub corrections: CorrectionTable,
    pub clocks: ClockCorrections,
    /// Divergent duplicate internal ids abort the game when set.
    pub strict_rosters: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            corrections: CorrectionTable::builtin(),
            clocks: ClockCorrections::builtin(),
            strict_rosters: true,
        }
    }
}

/// A payload after correction and decoding, ready for the engine.
#[derive(Debug, Clone)]
pub struct DecodedGame {
    pub game_id: GameId,
    pub streams: Sides<Vec<Event>>,
    pub roster: RosterResolver,
    /// Final score from the summary block, when the payload carries one.
    pub reported_score: Option<Score>,
    /// Upstream hint; starts are inferred from line-sets instead.
    pub home_starts_on_offense: Option<bool>,
    /// Correction outcomes, in the order they were found.
    pub diagnostics: Vec<DiagnosticKind>,
}

/// Correct, parse and decode one raw payload.
pub fn decode_payload(game_id: &GameId, text: &str, options: &FeedOptions) -> Result<DecodedGame> {
    let corrected = options.corrections.apply(game_id, text);
    let payload: RawPayload = serde_json::from_str(&corrected.text)?;

    if let Some(summary_id) = payload.game.as_ref().and_then(|g| g.game_id.as_deref())
        && summary_id != game_id.as_str()
    {
        debug!(game_id = %game_id, summary_id, "payload summary names a different game id");
    }

    let home = decode_stream(Side::Home, payload.tsg_home.as_ref())?;
    let away = decode_stream(Side::Away, payload.tsg_away.as_ref())?;

    let roster = RosterResolver::build(
        payload.rosters_home.iter().chain(payload.rosters_away.iter()),
        options.strict_rosters,
    )?;

    let reported_score = payload.game.as_ref().and_then(|g| match (g.score_home, g.score_away) {
        (Some(home), Some(away)) => Some(Score::new(home, away)),
        _ => None,
    });

    Ok(DecodedGame {
        game_id: game_id.clone(),
        streams: Sides::new(home, away),
        roster,
        reported_score,
        home_starts_on_offense: payload.tsg_home.as_ref().and_then(|t| t.start_on_offense),
        diagnostics: corrected.diagnostics,
    })
}

fn decode_stream(side: Side, stream: Option<&RawTeamStream>) -> Result<Vec<Event>> {
    let events = stream.and_then(|s| s.events.as_ref()).ok_or_else(|| {
        Error::Payload(match side {
            Side::Home => "missing tsgHome.events".to_string(),
            Side::Away => "missing tsgAway.events".to_string(),
        })
    })?;
    decode_events(side, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use discflow_types::{EventKind, InternalId};

    const PAYLOAD: &str = r#"{
        "game": {"gameID": "2022-06-18-DC-PHI", "scoreHome": 1, "scoreAway": 0},
        "rostersHome": [{"id": 8726, "player": {"ext_player_id": "hplayer"}}],
        "rostersAway": [{"id": 500, "player": {"ext_player_id": "aplayer"}}],
        "tsgHome": {"events": "[{\"t\":20,\"r\":8726,\"x\":17.19,\"y\":35.09}]", "startOnOffense": true},
        "tsgAway": {"events": "[{\"t\":2,\"l\":[500]}]"}
    }"#;

    #[test]
    fn test_decode_payload_applies_corrections_first() {
        let game_id = GameId::new("2022-06-18-DC-PHI");
        let game = decode_payload(&game_id, PAYLOAD, &FeedOptions::default()).unwrap();

        let home: Vec<EventKind> = game.streams.home.iter().map(|e| e.kind).collect();
        assert_eq!(home, vec![EventKind::SetOffenseLine, EventKind::Possession]);
        assert_eq!(game.streams.away[0].kind, EventKind::SetDefenseLine);
        assert_eq!(game.reported_score, Some(Score::new(1, 0)));
        assert_eq!(game.home_starts_on_offense, Some(true));
        assert_eq!(
            game.diagnostics,
            vec![DiagnosticKind::CorrectionApplied {
                name: "dc_phi".to_string()
            }]
        );
        assert!(game.roster.resolve(InternalId(500)).player().is_some());
    }

    #[test]
    fn test_corrections_can_be_disabled() {
        let options = FeedOptions {
            corrections: CorrectionTable::empty(),
            ..FeedOptions::default()
        };
        let game = decode_payload(&GameId::new("2022-06-18-DC-PHI"), PAYLOAD, &options).unwrap();
        assert_eq!(game.streams.home.len(), 1);
        assert!(game.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_stream_is_a_payload_error() {
        let text = r#"{"tsgHome": {"events": "[]"}}"#;
        let err = decode_payload(&GameId::new("g"), text, &FeedOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Malformed payload: missing tsgAway.events");
    }
}
