use assert_cmd::Command;
use discflow_testing::events::{kind, o_line};
use discflow_testing::fixtures::{write_payload, write_raw};
use discflow_testing::{GameBuilder, PointScript};
use discflow_types::{EventKind, Side};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp workspace with its own (absent) config file.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    fn payloads(&self) -> PathBuf {
        self.path().join("payloads")
    }

    fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("discflow");
        cmd.env("DISCFLOW_CONFIG", self.config_path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

fn clean_game(game_id: &str) -> GameBuilder {
    GameBuilder::new(game_id)
        .home_players(&[1, 2])
        .away_players(&[10, 11])
        .point(
            PointScript::pulled(Side::Home, &[1, 2], &[10, 11], 10)
                .pass(1, 0.0, 20.0)
                .pass(2, 0.0, 50.0)
                .goal(1, 0.0, 105.0, 600),
        )
        .reported_score(1, 0)
}

fn broken_game(game_id: &str) -> GameBuilder {
    clean_game(game_id)
        .home_event(o_line(&[1, 2]))
        .home_event(kind(EventKind::Goal))
}

#[test]
fn test_codes_lists_registry() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .arg("codes")
        .assert()
        .success()
        .stdout(predicate::str::contains("22  GOAL  (ends point)"))
        .stdout(predicate::str::contains(" 3  PULL_INBOUNDS"));
}

#[test]
fn test_parse_plain_summarizes_game() {
    let fixture = TestFixture::new();
    write_payload(&fixture.payloads(), &clean_game("2023-06-03-ATL-CAR")).unwrap();

    fixture
        .command()
        .arg("parse")
        .arg(fixture.payloads())
        .arg("--fingerprint")
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-06-03-ATL-CAR  1-0"))
        .stdout(predicate::str::contains("1 points, 2 throws, 1 pulls"))
        .stdout(predicate::str::contains("fingerprint "))
        .stdout(predicate::str::contains("1 games (0 failed)"));
}

#[test]
fn test_parse_json_emits_one_document_per_game() {
    let fixture = TestFixture::new();
    write_payload(&fixture.payloads(), &clean_game("2023-06-03-ATL-CAR")).unwrap();
    write_payload(&fixture.payloads(), &clean_game("2023-06-04-CAR-ATL")).unwrap();

    let output = fixture
        .command()
        .args(["parse", "--format", "json", "--workers", "2"])
        .arg(fixture.payloads())
        .output()
        .expect("Failed to run parse");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let documents: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["game_id"], "2023-06-03-ATL-CAR");
    assert_eq!(documents[0]["records"]["throws"].as_array().unwrap().len(), 2);
    assert_eq!(documents[0]["final_score"]["home"], 1);
    assert!(documents[0].get("fingerprint").is_none());
}

#[test]
fn test_fingerprint_is_stable_across_runs() {
    let fixture = TestFixture::new();
    write_payload(&fixture.payloads(), &clean_game("2023-06-03-ATL-CAR")).unwrap();

    let run = || {
        let output = fixture
            .command()
            .args(["parse", "--format", "json", "--fingerprint"])
            .arg(fixture.payloads())
            .output()
            .expect("Failed to run parse");
        let document: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("one JSON document");
        document["fingerprint"].as_str().unwrap().to_string()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_check_passes_clean_games() {
    let fixture = TestFixture::new();
    write_payload(&fixture.payloads(), &clean_game("2023-06-03-ATL-CAR")).unwrap();

    fixture
        .command()
        .arg("check")
        .arg(fixture.payloads())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 errors"));
}

#[test]
fn test_check_fails_on_error_diagnostics() {
    let fixture = TestFixture::new();
    write_payload(&fixture.payloads(), &broken_game("2023-06-03-ATL-CAR")).unwrap();

    fixture
        .command()
        .arg("check")
        .arg(fixture.payloads())
        .assert()
        .failure()
        .stdout(predicate::str::contains("home has 2 point segments, away has 1"))
        .stderr(predicate::str::contains("Error: 0 of 1 games failed, 1 error diagnostics"));
}

#[test]
fn test_check_reports_undecodable_payload() {
    let fixture = TestFixture::new();
    write_raw(&fixture.payloads(), "2023-06-05-DC-NY.json", "{ not json").unwrap();

    fixture
        .command()
        .arg("check")
        .arg(fixture.payloads())
        .assert()
        .failure()
        .stdout(predicate::str::contains("2023-06-05-DC-NY  failed:"));
}

#[test]
fn test_parse_missing_path_is_an_error() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .arg("parse")
        .arg(fixture.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("missing does not exist"));
}

#[test]
fn test_corrections_lists_builtin_table() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .arg("corrections")
        .assert()
        .success()
        .stdout(predicate::str::contains("mad_chi"))
        .stdout(predicate::str::contains("2022 MAD@CHI"))
        .stdout(predicate::str::contains(" -380 -> 0"));
}

#[test]
fn test_config_can_disable_builtin_corrections() {
    let fixture = TestFixture::new();
    std::fs::write(fixture.config_path(), "builtin_corrections = false\n").unwrap();

    fixture
        .command()
        .arg("corrections")
        .assert()
        .success()
        .stdout(predicate::str::contains("mad_chi").not())
        .stdout(predicate::str::contains("none"));
}

#[test]
fn test_explicit_config_flag_wins_over_env() {
    let fixture = TestFixture::new();
    let explicit = fixture.path().join("other.toml");
    std::fs::write(&explicit, "builtin_corrections = false\n").unwrap();

    fixture
        .command()
        .arg("--config")
        .arg(&explicit)
        .args(["corrections", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"corrections\": []"));
}
