//! Payload files for tests that go through the filesystem.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::GameBuilder;

/// Write `game` as `<dir>/<game id>.json`.
pub fn write_payload(dir: &Path, game: &GameBuilder) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", game.game_id()));
    fs::write(&path, game.payload())?;
    Ok(path)
}

/// Write raw payload text under an explicit file name.
pub fn write_raw(dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, text)?;
    Ok(path)
}
