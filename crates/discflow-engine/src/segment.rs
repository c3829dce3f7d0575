use discflow_types::{Event, EventKind};
use std::iter::FusedIterator;

/// Point-scoped slices of one team's stream.
///
/// Each slice runs from just after the previous terminal event up to and
/// including the next one. Events after the last terminal form a final,
/// unterminated slice. Clone the series to walk the same stream again.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a [Event],
}

impl<'a> Segments<'a> {
    pub fn new(events: &'a [Event]) -> Self {
        Self { rest: events }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a [Event];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .iter()
            .position(|event| event.kind.is_terminal())
            .map_or(self.rest.len(), |index| index + 1);
        let (segment, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(segment)
    }
}

impl FusedIterator for Segments<'_> {}

pub fn segments(events: &[Event]) -> Segments<'_> {
    Segments::new(events)
}

/// The boundary marker of a segment that holds nothing but a period break
/// (optionally preceded by stoppages).
pub fn break_marker(segment: &[Event]) -> Option<EventKind> {
    segment
        .iter()
        .find(|event| !event.kind.is_stoppage())
        .map(|event| event.kind)
        .filter(|kind| kind.is_boundary())
}

/// The boundary marker closing a segment, if it was closed by one.
pub fn closing_boundary(segment: &[Event]) -> Option<EventKind> {
    segment
        .last()
        .map(|event| event.kind)
        .filter(|kind| kind.is_boundary())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(kinds: &[EventKind]) -> Vec<Event> {
        kinds.iter().copied().map(Event::new).collect()
    }

    fn kinds(segment: &[Event]) -> Vec<EventKind> {
        segment.iter().map(|event| event.kind).collect()
    }

    #[test]
    fn test_splits_after_each_terminal() {
        let events = stream(&[
            EventKind::SetOffenseLine,
            EventKind::Possession,
            EventKind::Goal,
            EventKind::SetDefenseLine,
            EventKind::PullInbounds,
            EventKind::ScoredOn,
            EventKind::EndOfQ1,
        ]);
        let parts: Vec<Vec<EventKind>> = segments(&events).map(kinds).collect();
        assert_eq!(
            parts,
            vec![
                vec![EventKind::SetOffenseLine, EventKind::Possession, EventKind::Goal],
                vec![EventKind::SetDefenseLine, EventKind::PullInbounds, EventKind::ScoredOn],
                vec![EventKind::EndOfQ1],
            ]
        );
    }

    #[test]
    fn test_trailing_events_form_last_segment() {
        let events = stream(&[
            EventKind::Goal,
            EventKind::SetOffenseLine,
            EventKind::Possession,
        ]);
        let parts: Vec<usize> = segments(&events).map(<[Event]>::len).collect();
        assert_eq!(parts, vec![1, 2]);
    }

    #[test]
    fn test_empty_stream_and_restart() {
        assert_eq!(segments(&[]).count(), 0);

        let events = stream(&[EventKind::Goal, EventKind::Callahan]);
        let series = segments(&events);
        assert_eq!(series.clone().count(), 2);
        assert_eq!(series.count(), 2);
    }

    #[test]
    fn test_break_marker_detection() {
        let pure = stream(&[EventKind::TheirTimeoutOnDefense, EventKind::Halftime]);
        assert_eq!(break_marker(&pure), Some(EventKind::Halftime));

        let played = stream(&[EventKind::SetOffenseLine, EventKind::EndOfQ3]);
        assert_eq!(break_marker(&played), None);
        assert_eq!(closing_boundary(&played), Some(EventKind::EndOfQ3));
    }
}
