use discflow_types::{Event, PlayerId};

/// Yards a possession-adjusting penalty moves the disc.
pub const PENALTY_YARDS: f64 = 10.0;

/// Goal line of the attacking endzone.
pub const GOAL_LINE_Y: f64 = 100.0;

/// Where the disc is and who holds it, between two possession events.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub holder: Option<PlayerId>,
}

impl Origin {
    pub fn at(event: &Event, holder: Option<PlayerId>) -> Self {
        Self {
            x: event.x,
            y: event.y,
            holder,
        }
    }

    /// Move the disc `yards` up (positive) or back (negative) the field.
    ///
    /// Moving past the goal line pins the disc to the centre of the line;
    /// moving back stops at the field edge.
    pub fn shift(&mut self, yards: f64) {
        let Some(y) = self.y else {
            return;
        };
        let moved = y + yards;
        if moved > GOAL_LINE_Y {
            self.y = Some(GOAL_LINE_Y);
            self.x = Some(0.0);
        } else {
            self.y = Some(moved.max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discflow_types::EventKind;

    fn origin(x: f64, y: f64) -> Origin {
        Origin::at(&Event::new(EventKind::Possession).at(x, y), None)
    }

    #[test]
    fn test_penalty_clamps_at_goal_line() {
        let mut disc = origin(-7.5, 95.0);
        disc.shift(PENALTY_YARDS);
        assert_eq!(disc.y, Some(100.0));
        assert_eq!(disc.x, Some(0.0));

        disc.shift(PENALTY_YARDS);
        assert_eq!(disc.y, Some(100.0));
        assert_eq!(disc.x, Some(0.0));
    }

    #[test]
    fn test_penalty_moves_without_clamp() {
        let mut disc = origin(4.0, 50.0);
        disc.shift(PENALTY_YARDS);
        assert_eq!((disc.x, disc.y), (Some(4.0), Some(60.0)));

        disc.shift(-PENALTY_YARDS);
        assert_eq!((disc.x, disc.y), (Some(4.0), Some(50.0)));
    }

    #[test]
    fn test_backward_penalty_stops_at_field_edge() {
        let mut disc = origin(3.0, 4.0);
        disc.shift(-PENALTY_YARDS);
        assert_eq!((disc.x, disc.y), (Some(3.0), Some(0.0)));
    }

    #[test]
    fn test_penalty_without_position_is_ignored() {
        let mut disc = Origin {
            x: None,
            y: None,
            holder: Some(PlayerId::new("alice")),
        };
        disc.shift(PENALTY_YARDS);
        assert_eq!(disc.y, None);
    }
}
