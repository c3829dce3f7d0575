use discflow_types::GameId;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

const PAYLOAD_EXTENSION: &str = "json";

/// Where raw game payloads come from.
///
/// The fetch side stores one payload per game; parsing only needs the text back.
pub trait PayloadSource: Send + Sync {
    /// Raw payload text for one game
    fn load(&self, game_id: &GameId) -> Result<String>;

    /// Every game the source can load, sorted by id
    fn list(&self) -> Result<Vec<GameId>>;
}

/// Payload files stored as `<game id>.json` anywhere under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, game_id: &GameId) -> Result<PathBuf> {
        let id = game_id.as_str();
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(Error::InvalidGameId(id.to_string()));
        }

        let direct = self.root.join(format!("{}.{}", id, PAYLOAD_EXTENSION));
        if direct.is_file() {
            return Ok(direct);
        }

        for path in collect_payload_files(std::slice::from_ref(&self.root))? {
            if game_id_from_path(&path).as_ref() == Some(game_id) {
                return Ok(path);
            }
        }

        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no payload for {} under {}", id, self.root.display()),
        )))
    }
}

impl PayloadSource for DirectorySource {
    fn load(&self, game_id: &GameId) -> Result<String> {
        let path = self.locate(game_id)?;
        Ok(std::fs::read_to_string(path)?)
    }

    fn list(&self) -> Result<Vec<GameId>> {
        let mut ids: Vec<GameId> = collect_payload_files(std::slice::from_ref(&self.root))?
            .iter()
            .filter_map(|path| game_id_from_path(path))
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

/// Expand files and directories into payload files, sorted by path.
/// Files named explicitly are kept whatever their extension.
pub fn collect_payload_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = entry?;
                let candidate = entry.path();
                if entry.file_type().is_file()
                    && candidate.extension().and_then(|e| e.to_str()) == Some(PAYLOAD_EXTENSION)
                {
                    files.push(candidate.to_path_buf());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Game id implied by a payload file name.
pub fn game_id_from_path(path: &Path) -> Option<GameId> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(GameId::new)
}
