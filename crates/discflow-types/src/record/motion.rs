use serde::{Deserialize, Serialize};
use std::fmt;

/// Annotation describing how play arrived at a throw.
///
/// Set by stoppages and turnovers, consumed by the next throw record, then reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Ordinary live play.
    #[default]
    #[serde(rename = "motion")]
    InPlay,
    Pull,
    Turnover,
    Timeout,
    Penalty,
}

impl Motion {
    pub fn as_str(self) -> &'static str {
        match self {
            Motion::InPlay => "motion",
            Motion::Pull => "pull",
            Motion::Turnover => "turnover",
            Motion::Timeout => "timeout",
            Motion::Penalty => "penalty",
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
