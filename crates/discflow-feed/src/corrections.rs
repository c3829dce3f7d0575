//! Known upstream data defects and their textual fixes.
//!
//! Corrections operate on the raw payload text before JSON decoding, so
//! fragments are written exactly as the stat server escapes them inside the
//! embedded event strings.

use discflow_types::{DiagnosticKind, GameId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Which games a correction applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSelector {
    /// One game, by exact id.
    Exact(GameId),
    /// Any game of a season between two teams (away team first, as in game ids).
    Matchup {
        season: i32,
        away: String,
        home: String,
    },
}

impl GameSelector {
    pub fn matchup(season: i32, away: &str, home: &str) -> Self {
        GameSelector::Matchup {
            season,
            away: away.to_string(),
            home: home.to_string(),
        }
    }

    pub fn matches(&self, game_id: &GameId) -> bool {
        match self {
            GameSelector::Exact(id) => id == game_id,
            GameSelector::Matchup { season, away, home } => game_id
                .key()
                .is_some_and(|key| key.season() == *season && &key.away == away && &key.home == home),
        }
    }
}

impl fmt::Display for GameSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameSelector::Exact(id) => write!(f, "{}", id),
            GameSelector::Matchup { season, away, home } => {
                write!(f, "{} {}@{}", season, away, home)
            }
        }
    }
}

/// A named find/replace fix for one known defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub name: String,
    pub selector: GameSelector,
    pub find: String,
    pub replace: String,
}

impl Correction {
    pub fn new(
        name: impl Into<String>,
        selector: GameSelector,
        find: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            selector,
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Insertions keep the defective fragment inside their replacement.
    fn is_insertion(&self) -> bool {
        self.replace.contains(&self.find)
    }

    /// Whether `text` still carries the uncorrected fragment.
    pub fn defect_present(&self, text: &str) -> bool {
        if self.is_insertion() {
            text.split(self.replace.as_str())
                .any(|piece| piece.contains(&self.find))
        } else {
            text.contains(&self.find)
        }
    }

    /// Fix every defective copy of the fragment. For insertions, copies that
    /// already carry the inserted text are left as they are.
    pub fn rewrite(&self, text: &str) -> String {
        if self.is_insertion() {
            text.split(self.replace.as_str())
                .map(|piece| piece.replace(&self.find, &self.replace))
                .collect::<Vec<_>>()
                .join(&self.replace)
        } else {
            text.replace(&self.find, &self.replace)
        }
    }
}

/// Payload text after corrections, plus what happened along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corrected {
    pub text: String,
    pub diagnostics: Vec<DiagnosticKind>,
}

/// Ordered set of corrections. Entries apply in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionTable {
    entries: Vec<Correction>,
}

impl CorrectionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fixes for the defects observed in 2022 regular season payloads.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_corrections(),
        }
    }

    pub fn push(&mut self, correction: Correction) {
        self.entries.push(correction);
    }

    pub fn entries(&self) -> &[Correction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry selected by `game_id`, then scan for any known
    /// defect that survived.
    pub fn apply(&self, game_id: &GameId, text: &str) -> Corrected {
        let mut text = text.to_string();
        let mut diagnostics = Vec::new();

        for entry in self.entries.iter().filter(|e| e.selector.matches(game_id)) {
            if entry.defect_present(&text) {
                text = entry.rewrite(&text);
                info!(game_id = %game_id, correction = %entry.name, "applied payload correction");
                diagnostics.push(DiagnosticKind::CorrectionApplied {
                    name: entry.name.clone(),
                });
            } else {
                diagnostics.push(DiagnosticKind::StaleCorrection {
                    name: entry.name.clone(),
                });
            }
        }

        for entry in &self.entries {
            if entry.defect_present(&text) {
                diagnostics.push(DiagnosticKind::KnownDefectPresent {
                    name: entry.name.clone(),
                });
            }
        }

        Corrected { text, diagnostics }
    }
}

fn builtin_corrections() -> Vec<Correction> {
    vec![
        // Goal recorded ahead of the possessions that led to it.
        Correction::new(
            "mad_chi",
            GameSelector::matchup(2022, "MAD", "CHI"),
            r#"{\"t\":22,\"r\":9384,\"x\":14.59,\"y\":104.31,\"s\":192},{\"t\":20,\"r\":9384,\"x\":-17.19,\"y\":66.34},{\"t\":20,\"r\":9384,\"x\":-2.66,\"y\":25.22},{\"t\":20,\"r\":9373,\"x\":9.41,\"y\":41.72},{\"t\":20,\"r\":9382,\"x\":0.88,\"y\":38.79}"#,
            r#"{\"t\":20,\"r\":9384,\"x\":-17.19,\"y\":66.34},{\"t\":20,\"r\":9384,\"x\":-2.66,\"y\":25.22},{\"t\":20,\"r\":9373,\"x\":9.41,\"y\":41.72},{\"t\":20,\"r\":9382,\"x\":0.88,\"y\":38.79},{\"t\":22,\"r\":9384,\"x\":14.59,\"y\":104.31,\"s\":192}"#,
        ),
        // Duplicate goal.
        Correction::new(
            "ind_det",
            GameSelector::matchup(2022, "IND", "DET"),
            r#"{\"t\":20,\"r\":9624,\"x\":15.61,\"y\":88.63},{\"t\":22,\"r\":9477,\"x\":23.8,\"y\":100,\"s\":508}"#,
            r#"{\"t\":20,\"r\":9624,\"x\":15.61,\"y\":88.63}"#,
        ),
        // Missing O line ahead of a possession.
        Correction::new(
            "dc_phi",
            GameSelector::matchup(2022, "DC", "PHI"),
            r#"{\"t\":20,\"r\":8726,\"x\":17.19,\"y\":35.09}"#,
            r#"{\"t\":1,\"l\":[8712, 8727, 8726, 8703, 8723, 8704, 8701]},{\"t\":20,\"r\":8726,\"x\":17.19,\"y\":35.09}"#,
        ),
        // Missing D line ahead of a pull.
        Correction::new(
            "min_mad",
            GameSelector::matchup(2022, "MIN", "MAD"),
            r#"{\"t\":3,\"r\":8668,\"x\":-11.59,\"y\":86.72,\"ms\":3066}"#,
            r#"{\"t\":2,\"l\":[8667, 8673, 8668, 8674, 9312, 8663, 8694]},{\"t\":3,\"r\":8668,\"x\":-11.59,\"y\":86.72,\"ms\":3066}"#,
        ),
        Correction::new(
            "min_mad_2",
            GameSelector::matchup(2022, "MIN", "MAD"),
            r#"{\"t\":20,\"r\":8690,\"x\":-0.73,\"y\":27.52}"#,
            r#"{\"t\":1,\"l\":[8676, 8690, 8688, 8677, 8673, 8693, 8672]},{\"t\":20,\"r\":8690,\"x\":-0.73,\"y\":27.52}"#,
        ),
        // Possession logged inside a stoppage.
        Correction::new(
            "det_chi",
            GameSelector::matchup(2022, "DET", "CHI"),
            r#"{\"t\":23},{\"t\":1,\"l\":[9373,9374,9124,9128,9380,9139,9385]},{\"t\":20,\"r\":9124,\"x\":0,\"y\":40},{\"t\":19,\"r\":9380,\"x\":-0.76,\"y\":45.47},{\"t\":21,\"s\":683}"#,
            r#"{\"t\":23},{\"t\":1,\"l\":[9373,9374,9124,9128,9380,9139,9385]},{\"t\":19,\"r\":9380,\"x\":-0.76,\"y\":45.47},{\"t\":21,\"s\":683},{\"t\":1,\"l\":[9373,9374,9124,9128,9380,9139,9385]},{\"t\":20,\"r\":9124,\"x\":0,\"y\":40}"#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entry: Correction) -> CorrectionTable {
        let mut table = CorrectionTable::empty();
        table.push(entry);
        table
    }

    #[test]
    fn test_matchup_selector() {
        let selector = GameSelector::matchup(2022, "MAD", "CHI");
        assert!(selector.matches(&GameId::new("2022-06-11-MAD-CHI")));
        assert!(!selector.matches(&GameId::new("2023-06-11-MAD-CHI")));
        assert!(!selector.matches(&GameId::new("2022-06-11-CHI-MAD")));
        assert!(!selector.matches(&GameId::new("fixture")));
        assert_eq!(selector.to_string(), "2022 MAD@CHI");
    }

    #[test]
    fn test_applies_replacement_for_selected_game() {
        let table = table(Correction::new(
            "dup",
            GameSelector::Exact(GameId::new("g1")),
            "A,B,B",
            "A,B",
        ));
        let corrected = table.apply(&GameId::new("g1"), "[A,B,B,C]");
        assert_eq!(corrected.text, "[A,B,C]");
        assert_eq!(
            corrected.diagnostics,
            vec![DiagnosticKind::CorrectionApplied {
                name: "dup".to_string()
            }]
        );
    }

    #[test]
    fn test_stale_correction_leaves_text_alone() {
        let table = table(Correction::new(
            "dup",
            GameSelector::Exact(GameId::new("g1")),
            "A,B,B",
            "A,B",
        ));
        let corrected = table.apply(&GameId::new("g1"), "[A,C]");
        assert_eq!(corrected.text, "[A,C]");
        assert_eq!(
            corrected.diagnostics,
            vec![DiagnosticKind::StaleCorrection {
                name: "dup".to_string()
            }]
        );
    }

    #[test]
    fn test_insertion_is_not_repeated() {
        let table = table(Correction::new(
            "line",
            GameSelector::Exact(GameId::new("g1")),
            "P",
            "L,P",
        ));
        let once = table.apply(&GameId::new("g1"), "[P]");
        assert_eq!(once.text, "[L,P]");

        let twice = table.apply(&GameId::new("g1"), &once.text);
        assert_eq!(twice.text, "[L,P]");
        assert!(matches!(
            twice.diagnostics.as_slice(),
            [DiagnosticKind::StaleCorrection { .. }]
        ));
    }

    #[test]
    fn test_insertion_skips_already_fixed_copies() {
        let table = table(Correction::new(
            "line",
            GameSelector::Exact(GameId::new("g1")),
            "P",
            "L,P",
        ));
        let corrected = table.apply(&GameId::new("g1"), "[L,P,Q,P]");
        assert_eq!(corrected.text, "[L,P,Q,L,P]");
        assert_eq!(
            corrected.diagnostics,
            vec![DiagnosticKind::CorrectionApplied {
                name: "line".to_string()
            }]
        );
    }

    #[test]
    fn test_known_defect_in_unselected_game() {
        let table = table(Correction::new(
            "dup",
            GameSelector::Exact(GameId::new("g1")),
            "A,B,B",
            "A,B",
        ));
        let corrected = table.apply(&GameId::new("g2"), "[A,B,B]");
        assert_eq!(corrected.text, "[A,B,B]");
        assert_eq!(
            corrected.diagnostics,
            vec![DiagnosticKind::KnownDefectPresent {
                name: "dup".to_string()
            }]
        );
    }

    #[test]
    fn test_builtin_table_fixes_dc_phi_fragment() {
        let table = CorrectionTable::builtin();
        assert_eq!(table.len(), 6);

        let raw = r#"{"tsgHome":{"events":"[{\"t\":20,\"r\":8726,\"x\":17.19,\"y\":35.09}]"}}"#;
        let corrected = table.apply(&GameId::new("2022-05-07-DC-PHI"), raw);
        assert!(corrected.text.contains(r#"{\"t\":1,\"l\":[8712, 8727"#));
        assert_eq!(
            corrected.diagnostics,
            vec![DiagnosticKind::CorrectionApplied {
                name: "dc_phi".to_string()
            }]
        );
    }
}
