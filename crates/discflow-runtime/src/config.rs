use crate::{Error, Result};
use discflow_feed::{
    ClockCorrection, ClockCorrections, Correction, CorrectionTable, FeedOptions, GameSelector,
};
use discflow_types::GameId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the configuration file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. DISCFLOW_CONFIG environment variable (with tilde expansion)
/// 3. Platform config directory
/// 4. ~/.discflow/config.toml
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("DISCFLOW_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("discflow").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".discflow").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// A payload fix for one game, on top of the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    pub name: String,
    pub game_id: GameId,
    pub find: String,
    pub replace: String,
}

impl CorrectionEntry {
    fn to_correction(&self) -> Correction {
        Correction::new(
            self.name.clone(),
            GameSelector::Exact(self.game_id.clone()),
            self.find.clone(),
            self.replace.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Worker pool size; all cores when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    #[serde(default = "default_true")]
    pub builtin_corrections: bool,

    /// Divergent duplicate roster ids abort the game when set.
    #[serde(default = "default_true")]
    pub strict_rosters: bool,

    #[serde(default)]
    pub corrections: Vec<CorrectionEntry>,

    #[serde(default)]
    pub clock_corrections: Vec<ClockCorrection>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            builtin_corrections: true,
            strict_rosters: true,
            corrections: Vec::new(),
            clock_corrections: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path(None)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }
        if let Some(entry) = self.corrections.iter().find(|entry| entry.find.is_empty()) {
            return Err(Error::Config(format!(
                "correction '{}' has an empty find fragment",
                entry.name
            )));
        }
        Ok(())
    }

    /// The effective correction table: built-ins (unless disabled) then extras.
    pub fn correction_table(&self) -> CorrectionTable {
        let mut table = if self.builtin_corrections {
            CorrectionTable::builtin()
        } else {
            CorrectionTable::empty()
        };
        for entry in &self.corrections {
            table.push(entry.to_correction());
        }
        table
    }

    pub fn clock_table(&self) -> ClockCorrections {
        let mut clocks = ClockCorrections::builtin();
        for correction in &self.clock_corrections {
            clocks.push(*correction);
        }
        clocks
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            corrections: self.correction_table(),
            clocks: self.clock_table(),
            strict_rosters: self.strict_rosters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discflow_feed::ClockReading;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.builtin_corrections);
        assert!(config.strict_rosters);
        assert!(config.corrections.is_empty());
        assert_eq!(config.workers, None);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            workers: Some(4),
            corrections: vec![CorrectionEntry {
                name: "swap_clock".to_string(),
                game_id: GameId::new("2023-05-06-ATL-CAR"),
                find: "\\\"s\\\":-12".to_string(),
                replace: "\\\"s\\\":12".to_string(),
            }],
            clock_corrections: vec![ClockCorrection {
                observed: -5,
                corrected: 5,
            }],
            ..Config::default()
        };

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "strict_rosters = false\n")?;

        let config = Config::load_from(&config_path)?;
        assert!(!config.strict_rosters);
        assert!(config.builtin_corrections);

        Ok(())
    }

    #[test]
    fn test_zero_workers_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "workers = 0\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        Ok(())
    }

    #[test]
    fn test_correction_table_layers_extras() {
        let extra = CorrectionEntry {
            name: "extra".to_string(),
            game_id: GameId::new("2023-05-06-ATL-CAR"),
            find: "a".to_string(),
            replace: "b".to_string(),
        };
        let config = Config {
            corrections: vec![extra.clone()],
            ..Config::default()
        };
        let table = config.correction_table();
        assert_eq!(table.len(), CorrectionTable::builtin().len() + 1);
        assert_eq!(table.entries().last().map(|c| c.name.as_str()), Some("extra"));

        let only_extra = Config {
            builtin_corrections: false,
            corrections: vec![extra],
            ..Config::default()
        };
        assert_eq!(only_extra.correction_table().len(), 1);
    }

    #[test]
    fn test_clock_table_extends_builtin() {
        let config = Config {
            clock_corrections: vec![ClockCorrection {
                observed: -5,
                corrected: 5,
            }],
            ..Config::default()
        };
        let clocks = config.clock_table();
        assert_eq!(
            clocks.resolve(-5),
            ClockReading::Corrected {
                observed: -5,
                corrected: 5
            }
        );
        assert_eq!(clocks.resolve(-380).seconds(), Some(0));
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_config_path(Some("/tmp/discflow.toml"))?;
        assert_eq!(path, PathBuf::from("/tmp/discflow.toml"));
        Ok(())
    }
}
