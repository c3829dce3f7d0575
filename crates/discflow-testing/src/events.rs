//! One constructor per event shape used in tests.

use discflow_types::{Event, EventKind};

pub fn o_line(lineup: &[i64]) -> Event {
    Event::new(EventKind::SetOffenseLine).with_lineup(lineup)
}

pub fn d_line(lineup: &[i64]) -> Event {
    Event::new(EventKind::SetDefenseLine).with_lineup(lineup)
}

pub fn o_line_no_pull(lineup: &[i64]) -> Event {
    Event::new(EventKind::SetOffenseLineNoPull).with_lineup(lineup)
}

pub fn d_line_no_pull(lineup: &[i64]) -> Event {
    Event::new(EventKind::SetDefenseLineNoPull).with_lineup(lineup)
}

pub fn pull(puller: i64, x: f64, y: f64, hang_ms: i64) -> Event {
    Event::new(EventKind::PullInbounds)
        .by(puller)
        .at(x, y)
        .with_millis(hang_ms)
}

pub fn possession(player: i64, x: f64, y: f64) -> Event {
    Event::new(EventKind::Possession).by(player).at(x, y)
}

pub fn goal(player: i64, x: f64, y: f64, clock: i64) -> Event {
    Event::new(EventKind::Goal)
        .by(player)
        .at(x, y)
        .with_clock(clock)
}

pub fn throwaway(x: f64, y: f64) -> Event {
    Event::new(EventKind::Throwaway).at(x, y)
}

pub fn dropped(player: i64, x: f64, y: f64) -> Event {
    Event::new(EventKind::Drop).by(player).at(x, y)
}

pub fn block(player: i64) -> Event {
    Event::new(EventKind::Block).by(player)
}

pub fn callahan_thrown(x: f64, y: f64, clock: i64) -> Event {
    Event::new(EventKind::CallahanThrown)
        .at(x, y)
        .with_clock(clock)
}

pub fn callahan(player: i64) -> Event {
    Event::new(EventKind::Callahan).by(player)
}

pub fn scored_on() -> Event {
    Event::new(EventKind::ScoredOn)
}

pub fn kind(kind: EventKind) -> Event {
    Event::new(kind)
}
