use discflow_types::{Event, EventKind, InternalId, Side};

use crate::error::{Error, Result};
use crate::schema::{RawEvent, RawEvents};

/// Decode one team's event list into typed events, in stream order.
///
/// An unregistered tag aborts the whole stream: positions after it could not
/// be trusted.
pub fn decode_events(side: Side, raw: &RawEvents) -> Result<Vec<Event>> {
    match raw {
        RawEvents::Text(text) => {
            let events: Vec<RawEvent> = serde_json::from_str(text)?;
            decode_list(side, &events)
        }
        RawEvents::List(events) => decode_list(side, events),
    }
}

fn decode_list(side: Side, events: &[RawEvent]) -> Result<Vec<Event>> {
    events
        .iter()
        .enumerate()
        .map(|(index, raw)| decode_event(side, index, raw))
        .collect()
}

fn decode_event(side: Side, index: usize, raw: &RawEvent) -> Result<Event> {
    let kind = EventKind::from_code(raw.t).map_err(|_| Error::UnknownEventCode {
        side,
        index,
        code: raw.t,
    })?;

    Ok(Event {
        kind,
        x: raw.x,
        y: raw.y,
        player: raw.r.map(InternalId),
        lineup: raw
            .l
            .as_ref()
            .map(|ids| ids.iter().copied().map(InternalId).collect()),
        clock_seconds: raw.s.map(|s| s as i64),
        clock_millis: raw.ms.map(|ms| ms as i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_embedded_text() {
        let raw = RawEvents::Text(
            r#"[{"t":1,"l":[1,2,3]},{"t":20,"r":2,"x":0,"y":40},{"t":22,"r":3,"x":5.5,"y":105,"s":600}]"#
                .to_string(),
        );
        let events = decode_events(Side::Home, &raw).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::SetOffenseLine);
        assert_eq!(
            events[0].lineup,
            Some(vec![InternalId(1), InternalId(2), InternalId(3)])
        );
        assert_eq!(events[1].kind, EventKind::Possession);
        assert_eq!(events[1].position(), Some((0.0, 40.0)));
        assert_eq!(events[2].kind, EventKind::Goal);
        assert_eq!(events[2].clock_seconds, Some(600));
    }

    #[test]
    fn test_unknown_code_reports_position() {
        let raw = RawEvents::Text(r#"[{"t":1},{"t":20},{"t":77}]"#.to_string());
        match decode_events(Side::Away, &raw) {
            Err(Error::UnknownEventCode { side, index, code }) => {
                assert_eq!(side, Side::Away);
                assert_eq!(index, 2);
                assert_eq!(code, 77);
            }
            other => panic!("expected unknown code error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_event_text() {
        let raw = RawEvents::Text("[{\"t\":".to_string());
        assert!(matches!(decode_events(Side::Home, &raw), Err(Error::Json(_))));
    }
}
