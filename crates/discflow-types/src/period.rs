use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a regulation quarter in seconds.
pub const QUARTER_SECONDS: u32 = 720;

/// Length of the first overtime period in seconds.
pub const OVERTIME_SECONDS: u32 = 300;

/// Game period a record belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Period {
    #[default]
    Q1,
    Q2,
    Q3,
    Q4,
    OT1,
    OT2,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Q1 => "Q1",
            Period::Q2 => "Q2",
            Period::Q3 => "Q3",
            Period::Q4 => "Q4",
            Period::OT1 => "OT1",
            Period::OT2 => "OT2",
        }
    }

    pub fn is_overtime(self) -> bool {
        matches!(self, Period::OT1 | Period::OT2)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Period and clock that follow a boundary marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTransition {
    pub next: Period,
    /// Clock at the start of `next`. None when the period is untimed
    /// (second overtime) and the clock waits for the next clocked event.
    pub clock_seconds: Option<u32>,
    /// True once no further period can follow.
    pub final_whistle: bool,
}
