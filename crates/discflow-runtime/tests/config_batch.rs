use anyhow::Result;
use discflow_runtime::{Batch, Config, CorrectionEntry};
use discflow_testing::fixtures::write_payload;
use discflow_testing::{GameBuilder, PointScript};
use discflow_types::{DiagnosticKind, GameId, Side};
use tempfile::TempDir;

const GAME_ID: &str = "2023-05-06-ATL-CAR";

/// One home goal, but the summary block claims 3-0.
fn misreported_game() -> GameBuilder {
    GameBuilder::new(GAME_ID)
        .home_players(&[1, 2])
        .away_players(&[10, 11])
        .point(
            PointScript::pulled(Side::Home, &[1, 2], &[10, 11], 10)
                .pass(1, 0.0, 20.0)
                .goal(2, 0.0, 105.0, 600),
        )
        .reported_score(3, 0)
}

fn kinds(outcome: &discflow_runtime::BatchOutcome) -> Vec<DiagnosticKind> {
    outcome.results[0]
        .diagnostics
        .iter()
        .map(|d| d.kind.clone())
        .collect()
}

#[test]
fn test_configured_correction_is_applied_to_its_game() -> Result<()> {
    let dir = TempDir::new()?;
    let payloads = dir.path().join("payloads");
    write_payload(&payloads, &misreported_game())?;

    let config_path = dir.path().join("config.toml");
    let config = Config {
        workers: Some(1),
        corrections: vec![CorrectionEntry {
            name: "atl_car_summary".to_string(),
            game_id: GameId::new(GAME_ID),
            find: "\"scoreHome\":3".to_string(),
            replace: "\"scoreHome\":1".to_string(),
        }],
        ..Config::default()
    };
    config.save_to(&config_path)?;

    let loaded = Config::load_from(&config_path)?;
    let outcome = Batch::from_config(&loaded).run_paths(&[payloads])?;

    assert_eq!(
        kinds(&outcome),
        vec![DiagnosticKind::CorrectionApplied {
            name: "atl_car_summary".to_string()
        }]
    );
    assert!(!outcome.has_errors());
    Ok(())
}

#[test]
fn test_without_correction_mismatch_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    write_payload(dir.path(), &misreported_game())?;

    let outcome = Batch::from_config(&Config::default()).run_paths(&[dir.path().to_path_buf()])?;

    assert!(matches!(
        kinds(&outcome).as_slice(),
        [DiagnosticKind::ScoreMismatch { .. }]
    ));
    assert_eq!(outcome.summary().warnings, 1);
    Ok(())
}

#[test]
fn test_missing_input_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let result = Batch::from_config(&Config::default()).run_paths(&[missing]);
    assert!(result.is_err());
}
