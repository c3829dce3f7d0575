use discflow_feed::{DecodedGame, FeedOptions, decode_payload};
use discflow_types::{Event, GameId};
use serde_json::{Map, Value, json};

use crate::script::PointScript;

/// Fluent builder for a whole game payload.
#[derive(Debug, Clone)]
pub struct GameBuilder {
    game_id: GameId,
    home_roster: Vec<(i64, String)>,
    away_roster: Vec<(i64, String)>,
    home: Vec<Event>,
    away: Vec<Event>,
    reported: Option<(u32, u32)>,
    home_starts_on_offense: bool,
}

impl GameBuilder {
    pub fn new(game_id: &str) -> Self {
        Self {
            game_id: GameId::new(game_id),
            home_roster: Vec::new(),
            away_roster: Vec::new(),
            home: Vec::new(),
            away: Vec::new(),
            reported: None,
            home_starts_on_offense: false,
        }
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Home players `id -> "h<id>"`.
    pub fn home_players(mut self, ids: &[i64]) -> Self {
        self.home_roster
            .extend(ids.iter().map(|id| (*id, format!("h{}", id))));
        self
    }

    /// Away players `id -> "a<id>"`.
    pub fn away_players(mut self, ids: &[i64]) -> Self {
        self.away_roster
            .extend(ids.iter().map(|id| (*id, format!("a{}", id))));
        self
    }

    pub fn home_player(mut self, id: i64, ext_player_id: &str) -> Self {
        self.home_roster.push((id, ext_player_id.to_string()));
        self
    }

    pub fn away_player(mut self, id: i64, ext_player_id: &str) -> Self {
        self.away_roster.push((id, ext_player_id.to_string()));
        self
    }

    pub fn point(mut self, script: PointScript) -> Self {
        let (home, away) = script.into_streams();
        self.home.extend(home);
        self.away.extend(away);
        self
    }

    pub fn home_event(mut self, event: Event) -> Self {
        self.home.push(event);
        self
    }

    pub fn away_event(mut self, event: Event) -> Self {
        self.away.push(event);
        self
    }

    /// Same event on both streams, e.g. a period boundary.
    pub fn both(self, event: Event) -> Self {
        self.home_event(event.clone()).away_event(event)
    }

    pub fn reported_score(mut self, home: u32, away: u32) -> Self {
        self.reported = Some((home, away));
        self
    }

    pub fn home_starts_on_offense(mut self, value: bool) -> Self {
        self.home_starts_on_offense = value;
        self
    }

    /// Render the stats-page payload, event lists embedded as JSON text.
    pub fn payload(&self) -> String {
        let mut game = Map::new();
        game.insert("gameID".to_string(), json!(self.game_id.as_str()));
        if let Some((home, away)) = self.reported {
            game.insert("scoreHome".to_string(), json!(home));
            game.insert("scoreAway".to_string(), json!(away));
        }

        json!({
            "game": game,
            "rostersHome": roster_json(&self.home_roster),
            "rostersAway": roster_json(&self.away_roster),
            "tsgHome": {
                "events": events_text(&self.home),
                "startOnOffense": self.home_starts_on_offense,
            },
            "tsgAway": {
                "events": events_text(&self.away),
                "startOnOffense": !self.home_starts_on_offense,
            },
        })
        .to_string()
    }

    /// Payload decoded with the default feed options.
    pub fn decode(&self) -> discflow_feed::Result<DecodedGame> {
        decode_payload(&self.game_id, &self.payload(), &FeedOptions::default())
    }
}

fn roster_json(roster: &[(i64, String)]) -> Value {
    Value::Array(
        roster
            .iter()
            .map(|(id, ext)| json!({ "id": id, "player": { "ext_player_id": ext } }))
            .collect(),
    )
}

/// Event list in the stat server's compact wire form.
pub fn events_text(events: &[Event]) -> String {
    Value::Array(events.iter().map(wire_event).collect()).to_string()
}

pub fn wire_event(event: &Event) -> Value {
    let mut wire = Map::new();
    wire.insert("t".to_string(), json!(event.kind.code()));
    if let Some(lineup) = &event.lineup {
        wire.insert(
            "l".to_string(),
            json!(lineup.iter().map(|id| id.0).collect::<Vec<_>>()),
        );
    }
    if let Some(player) = event.player {
        wire.insert("r".to_string(), json!(player.0));
    }
    if let Some(x) = event.x {
        wire.insert("x".to_string(), json!(x));
    }
    if let Some(y) = event.y {
        wire.insert("y".to_string(), json!(y));
    }
    if let Some(seconds) = event.clock_seconds {
        wire.insert("s".to_string(), json!(seconds));
    }
    if let Some(millis) = event.clock_millis {
        wire.insert("ms".to_string(), json!(millis));
    }
    Value::Object(wire)
}
