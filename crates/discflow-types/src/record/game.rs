use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::point::PointRecord;
use super::pull::PullRecord;
use super::throw::ThrowRecord;

/// The three record collections produced for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecords {
    pub throws: Vec<ThrowRecord>,
    pub pulls: Vec<PullRecord>,
    pub points: Vec<PointRecord>,
}

impl GameRecords {
    pub fn is_empty(&self) -> bool {
        self.throws.is_empty() && self.pulls.is_empty() && self.points.is_empty()
    }

    /// SHA-256 over the canonical JSON of all three collections.
    ///
    /// Two runs over the same corrected payload must produce the same digest.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(&self.throws)?);
        hasher.update(b"\n");
        hasher.update(serde_json::to_vec(&self.pulls)?);
        hasher.update(b"\n");
        hasher.update(serde_json::to_vec(&self.points)?);
        hasher.update(b"\n");
        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, Period, PossessionResult, PossessionSummary, Side};

    fn point(index: usize) -> PointRecord {
        PointRecord {
            game_id: GameId::new("2022-06-11-MAD-CHI"),
            point_index: index,
            period: Period::Q1,
            offense_start: Side::Home,
            scoring_team: Some(Side::Home),
            timeouts: 0,
            home_score: 1,
            away_score: 0,
            pulled: true,
            throw_count: 3,
            possessions: vec![PossessionSummary {
                team: Side::Home,
                result: PossessionResult::Goal,
                throws: 3,
            }],
            interrupted: false,
        }
    }

    #[test]
    fn test_fingerprint_is_stable() -> serde_json::Result<()> {
        let records = GameRecords {
            points: vec![point(0)],
            ..Default::default()
        };
        assert_eq!(records.fingerprint()?, records.clone().fingerprint()?);
        assert_eq!(records.fingerprint()?.len(), 64);
        Ok(())
    }

    #[test]
    fn test_fingerprint_changes_with_content() -> serde_json::Result<()> {
        let a = GameRecords {
            points: vec![point(0)],
            ..Default::default()
        };
        let b = GameRecords {
            points: vec![point(1)],
            ..Default::default()
        };
        assert_ne!(a.fingerprint()?, b.fingerprint()?);
        Ok(())
    }

    #[test]
    fn test_point_record_shape() {
        insta::assert_json_snapshot!(point(0), @r#"
        {
          "game_id": "2022-06-11-MAD-CHI",
          "point_index": 0,
          "period": "Q1",
          "offense_start": "home",
          "scoring_team": "home",
          "timeouts": 0,
          "home_score": 1,
          "away_score": 0,
          "pulled": true,
          "throw_count": 3,
          "possessions": [
            {
              "team": "home",
              "result": "goal",
              "throws": 3
            }
          ],
          "interrupted": false
        }
        "#);
    }
}
