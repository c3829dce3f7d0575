use discflow_types::{Event, EventKind, Side, Sides};

use crate::error::{Error, Result};

/// Who holds the disc when a point opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointStart {
    /// Receiving team, or the team resuming possession when there is no pull.
    pub offense: Side,
    pub with_pull: bool,
}

impl PointStart {
    pub fn defense(&self) -> Side {
        self.offense.other()
    }
}

/// Two independent read positions, one per team, over a point's segments.
///
/// The cursor never tracks whose turn it is: callers thread the active
/// [`Side`] themselves and use [`DualCursor::switch`] to hand over.
#[derive(Debug, Clone)]
pub struct DualCursor<'a> {
    streams: Sides<&'a [Event]>,
    positions: Sides<usize>,
}

impl<'a> DualCursor<'a> {
    pub fn new(home: &'a [Event], away: &'a [Event]) -> Self {
        Self {
            streams: Sides::new(home, away),
            positions: Sides::default(),
        }
    }

    /// Event at `side`'s position, without advancing.
    pub fn current(&self, side: Side) -> Option<&'a Event> {
        let stream: &'a [Event] = *self.streams.get(side);
        stream.get(*self.positions.get(side))
    }

    pub fn advance(&mut self, side: Side) -> Result<()> {
        let position = self.positions.get_mut(side);
        if *position >= self.streams.get(side).len() {
            return Err(Error::StreamExhausted(side));
        }
        *position += 1;
        Ok(())
    }

    /// Read the current event and move past it.
    pub fn take(&mut self, side: Side) -> Result<&'a Event> {
        let event = self.current(side).ok_or(Error::StreamExhausted(side))?;
        self.advance(side)?;
        Ok(event)
    }

    /// Consume events from `side` while `keep` holds.
    pub fn take_while(&mut self, side: Side, keep: impl Fn(&Event) -> bool) -> Vec<&'a Event> {
        let mut taken = Vec::new();
        while let Some(event) = self.current(side).filter(|event| keep(event)) {
            taken.push(event);
            *self.positions.get_mut(side) += 1;
        }
        taken
    }

    /// Consume the current event of `side` only if it satisfies `accept`.
    pub fn take_if(&mut self, side: Side, accept: impl Fn(&Event) -> bool) -> Option<&'a Event> {
        let event = self.current(side).filter(|event| accept(event))?;
        *self.positions.get_mut(side) += 1;
        Some(event)
    }

    pub fn is_exhausted(&self, side: Side) -> bool {
        self.current(side).is_none()
    }

    /// The other side's tag. Pure; the cursor itself does not change.
    pub fn switch(side: Side) -> Side {
        side.other()
    }

    /// First event of `side` past any leading stoppages.
    pub fn opener(&self, side: Side) -> Option<&'a Event> {
        let stream: &'a [Event] = *self.streams.get(side);
        stream[*self.positions.get(side)..]
            .iter()
            .find(|event| !event.kind.is_stoppage())
    }

    /// Decide which side starts the point from the two opening line-sets.
    ///
    /// A side opening with an offense line-set starts; failing that, the side
    /// facing a defense line-set does. Anything else is ambiguous.
    pub fn opening(&self) -> Result<PointStart> {
        let home = self.opener(Side::Home).map(|event| event.kind);
        let away = self.opener(Side::Away).map(|event| event.kind);
        let home_line = home.and_then(EventKind::line_set);
        let away_line = away.and_then(EventKind::line_set);

        let offense = match (home_line, away_line) {
            (Some(h), Some(a)) if h.offense != a.offense => {
                if h.offense {
                    Side::Home
                } else {
                    Side::Away
                }
            }
            (Some(h), None) => {
                if h.offense {
                    Side::Home
                } else {
                    Side::Away
                }
            }
            (None, Some(a)) => {
                if a.offense {
                    Side::Away
                } else {
                    Side::Home
                }
            }
            _ => return Err(Error::AmbiguousPointStart { home, away }),
        };

        let with_pull = [home_line, away_line]
            .into_iter()
            .flatten()
            .any(|line| line.with_pull);

        Ok(PointStart { offense, with_pull })
    }
}
