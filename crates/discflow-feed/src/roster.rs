use discflow_types::{InternalId, PlayerId};
use std::collections::HashMap;
use tracing::warn;

use crate::error::{Error, Result};
use crate::schema::RawRosterEntry;

/// Outcome of looking up an internal id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Player(PlayerId),
    /// The stat keeper recorded no player (`-1`).
    NoneRecorded,
    /// Id absent from both rosters.
    Unknown(InternalId),
}

impl Resolved {
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Resolved::Player(id) => Some(id),
            Resolved::NoneRecorded | Resolved::Unknown(_) => None,
        }
    }
}

/// Merged home and away roster keyed by internal id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterResolver {
    players: HashMap<InternalId, PlayerId>,
}

impl RosterResolver {
    /// Merge both rosters. With `strict`, an id mapped to two different players
    /// is an error; otherwise the later entry wins.
    pub fn build<'a>(
        entries: impl IntoIterator<Item = &'a RawRosterEntry>,
        strict: bool,
    ) -> Result<Self> {
        let mut players: HashMap<InternalId, PlayerId> = HashMap::new();

        for entry in entries {
            let id = InternalId(entry.id);
            let player = PlayerId::new(entry.player.ext_player_id.as_str());

            if let Some(existing) = players.get(&id)
                && existing != &player
            {
                if strict {
                    return Err(Error::DuplicateInternalId {
                        id,
                        first: existing.clone(),
                        second: player,
                    });
                }
                warn!(
                    internal_id = id.0,
                    first = %existing,
                    second = %player,
                    "duplicate internal id, keeping the later player"
                );
            }
            players.insert(id, player);
        }

        Ok(Self { players })
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (i64, S)>) -> Self {
        Self {
            players: pairs
                .into_iter()
                .map(|(id, player)| (InternalId(id), PlayerId::new(player)))
                .collect(),
        }
    }

    pub fn resolve(&self, id: InternalId) -> Resolved {
        if id.is_none_recorded() {
            return Resolved::NoneRecorded;
        }
        match self.players.get(&id) {
            Some(player) => Resolved::Player(player.clone()),
            None => Resolved::Unknown(id),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
