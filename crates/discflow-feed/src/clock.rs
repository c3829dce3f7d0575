use serde::{Deserialize, Serialize};

/// Rewrite for one negative clock sentinel the stat server is known to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockCorrection {
    pub observed: i64,
    pub corrected: u32,
}

/// How a raw clock reading was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockReading {
    Valid(u32),
    Corrected { observed: i64, corrected: u32 },
    Invalid(i64),
}

impl ClockReading {
    pub fn seconds(self) -> Option<u32> {
        match self {
            ClockReading::Valid(seconds) => Some(seconds),
            ClockReading::Corrected { corrected, .. } => Some(corrected),
            ClockReading::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockCorrections {
    entries: Vec<ClockCorrection>,
}

impl Default for ClockCorrections {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ClockCorrections {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ClockCorrection {
                    observed: -380,
                    corrected: 0,
                },
                ClockCorrection {
                    observed: -301,
                    corrected: 529,
                },
                ClockCorrection {
                    observed: -691,
                    corrected: 529,
                },
            ],
        }
    }

    pub fn push(&mut self, correction: ClockCorrection) {
        self.entries.push(correction);
    }

    pub fn entries(&self) -> &[ClockCorrection] {
        &self.entries
    }

    /// Later entries win, so configured sentinels override the built-in ones.
    pub fn resolve(&self, observed: i64) -> ClockReading {
        if let Some(entry) = self.entries.iter().rev().find(|e| e.observed == observed) {
            return ClockReading::Corrected {
                observed,
                corrected: entry.corrected,
            };
        }
        match u32::try_from(observed) {
            Ok(seconds) => ClockReading::Valid(seconds),
            Err(_) => ClockReading::Invalid(observed),
        }
    }
}
