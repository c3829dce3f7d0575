use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::EventKind;
use crate::ids::{GameId, InternalId};
use crate::period::Period;
use crate::side::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Home-away score pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Non-fatal defects found while reconstructing a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    CorrectionApplied { name: String },
    StaleCorrection { name: String },
    KnownDefectPresent { name: String },
    ClockCorrected { observed: i64, corrected: u32 },
    InvalidClock { observed: i64 },
    UnresolvedPlayer { internal_id: InternalId },
    SegmentCountMismatch { home: usize, away: usize },
    AmbiguousPointStart { home: Option<EventKind>, away: Option<EventKind> },
    UnattributedLineChange { side: Side },
    UnsupportedEvent { side: Side, event: EventKind },
    OrphanBlock { side: Side },
    RepeatedPull { side: Side },
    PenaltyWithoutOrigin { side: Side },
    InterruptedPoint { side: Side },
    Desync { side: Side, found: Option<EventKind> },
    ScoreMismatch { computed: Score, reported: Score },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::CorrectionApplied { .. }
            | DiagnosticKind::ClockCorrected { .. }
            | DiagnosticKind::PenaltyWithoutOrigin { .. } => Severity::Info,
            DiagnosticKind::SegmentCountMismatch { .. }
            | DiagnosticKind::AmbiguousPointStart { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::CorrectionApplied { name } => {
                write!(f, "applied payload correction '{}'", name)
            }
            DiagnosticKind::StaleCorrection { name } => {
                write!(f, "correction '{}' no longer matches the payload", name)
            }
            DiagnosticKind::KnownDefectPresent { name } => {
                write!(f, "payload still contains known defect '{}'", name)
            }
            DiagnosticKind::ClockCorrected {
                observed,
                corrected,
            } => write!(f, "clock {} rewritten to {}", observed, corrected),
            DiagnosticKind::InvalidClock { observed } => {
                write!(f, "invalid clock reading {}", observed)
            }
            DiagnosticKind::UnresolvedPlayer { internal_id } => {
                write!(f, "player {} missing from roster", internal_id)
            }
            DiagnosticKind::SegmentCountMismatch { home, away } => {
                write!(f, "home has {} point segments, away has {}", home, away)
            }
            DiagnosticKind::AmbiguousPointStart { home, away } => write!(
                f,
                "cannot tell who starts the point (home opens with {}, away with {})",
                describe(*home),
                describe(*away)
            ),
            DiagnosticKind::UnattributedLineChange { side } => {
                write!(f, "{} changed lines outside a stoppage", side)
            }
            DiagnosticKind::UnsupportedEvent { side, event } => {
                write!(f, "{} event {} not supported here", side, event)
            }
            DiagnosticKind::OrphanBlock { side } => {
                write!(f, "{} block with no throw to attribute", side)
            }
            DiagnosticKind::RepeatedPull { side } => write!(f, "{} pulled twice", side),
            DiagnosticKind::PenaltyWithoutOrigin { side } => {
                write!(f, "{} penalty with no disc position", side)
            }
            DiagnosticKind::InterruptedPoint { side } => {
                write!(f, "{} stream ended mid-point", side)
            }
            DiagnosticKind::Desync { side, found } => write!(
                f,
                "streams out of sync: expected {} to close the point, found {}",
                side,
                describe(*found)
            ),
            DiagnosticKind::ScoreMismatch { computed, reported } => write!(
                f,
                "computed score {} but summary reports {}",
                computed, reported
            ),
        }
    }
}

fn describe(kind: Option<EventKind>) -> &'static str {
    kind.map(EventKind::name).unwrap_or("nothing")
}

/// A defect located within a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub game_id: GameId,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub score: Score,
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_index: Option<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {} ({}", self.severity, self.game_id, self.kind, self.period)?;
        if let Some(point) = self.point_index {
            write!(f, ", point {}", point)?;
        }
        write!(f, ", score {})", self.score)
    }
}
