//! Player asset consistency check
//!
//! Cross-checks the game's `config.json` against the files on disk:
//! every `player_*` sprite file must be referenced by the config, and every
//! configured `player_*` key must be used by at least one animation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by player sprite files and config keys
pub const PLAYER_PREFIX: &str = "player_";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid asset config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("player assets inconsistent: {0}")]
    Inconsistent(AssetReport),
}

/// The parts of the game config the checker cares about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetConfig {
    /// Asset key → relative file path
    #[serde(default)]
    pub assets: BTreeMap<String, String>,
    /// Animation name → frame asset keys
    #[serde(default)]
    pub player_animations: BTreeMap<String, Vec<String>>,
}

impl AssetConfig {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Findings from a consistency check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReport {
    /// Files on disk that no configured path points at
    pub missing_in_config: Vec<String>,
    /// Configured keys that no animation uses
    pub unused: Vec<String>,
}

impl AssetReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_in_config.is_empty() && self.unused.is_empty()
    }

    pub fn into_result(self) -> Result<Self, AssetError> {
        if self.is_consistent() {
            Ok(self)
        } else {
            Err(AssetError::Inconsistent(self))
        }
    }
}

impl std::fmt::Display for AssetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_consistent() {
            return write!(f, "all player assets referenced and used");
        }
        if !self.missing_in_config.is_empty() {
            write!(f, "missing in config: {}", self.missing_in_config.join(", "))?;
        }
        if !self.unused.is_empty() {
            if !self.missing_in_config.is_empty() {
                write!(f, "; ")?;
            }
            write!(f, "unused in animations: {}", self.unused.join(", "))?;
        }
        Ok(())
    }
}

/// Compare `config` with the file names found in the asset directory
pub fn check_player_assets<S: AsRef<str>>(config: &AssetConfig, files: &[S]) -> AssetReport {
    let entries: Vec<(&String, &String)> = config
        .assets
        .iter()
        .filter(|(key, _)| key.starts_with(PLAYER_PREFIX))
        .collect();

    let missing_in_config = files
        .iter()
        .map(AsRef::as_ref)
        .filter(|file| file.starts_with(PLAYER_PREFIX))
        .filter(|file| !entries.iter().any(|(_, path)| path.ends_with(file)))
        .map(str::to_owned)
        .collect();

    let frames: BTreeSet<&str> = config
        .player_animations
        .values()
        .flatten()
        .map(String::as_str)
        .collect();
    let unused = entries
        .iter()
        .filter(|(key, _)| !frames.contains(key.as_str()))
        .map(|(key, _)| (*key).clone())
        .collect();

    AssetReport {
        missing_in_config,
        unused,
    }
}

/// Run the check against a config file and an asset directory on disk
pub fn check_asset_dir(config_path: &Path, assets_dir: &Path) -> Result<AssetReport, AssetError> {
    let json = std::fs::read_to_string(config_path).map_err(|source| AssetError::Io {
        path: config_path.display().to_string(),
        source,
    })?;
    let config = AssetConfig::from_json(&json)?;

    let dir_err = |source: std::io::Error| AssetError::Io {
        path: assets_dir.display().to_string(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(assets_dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        files.push(entry.file_name().to_string_lossy().into_owned());
    }
    files.sort();
    log::debug!("Checking {} files in {}", files.len(), assets_dir.display());

    Ok(check_player_assets(&config, &files))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "assets": {
            "player_idle": "assets/player_idle.png",
            "player_walk": "assets/player_walk.png",
            "tree": "assets/tree.png"
        },
        "playerAnimations": {
            "idle": ["player_idle"],
            "walk": ["player_walk", "player_idle"]
        }
    }"#;

    #[test]
    fn test_consistent() {
        let config = AssetConfig::from_json(CONFIG).unwrap();
        let files = ["player_idle.png", "player_walk.png", "tree.png"];
        let report = check_player_assets(&config, &files);
        assert!(report.is_consistent());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_file_missing_from_config() {
        let config = AssetConfig::from_json(CONFIG).unwrap();
        let files = ["player_idle.png", "player_jump.png", "rock.png"];
        let report = check_player_assets(&config, &files);
        assert_eq!(report.missing_in_config, vec!["player_jump.png".to_string()]);
        assert!(report.unused.is_empty());
        assert!(matches!(report.into_result(), Err(AssetError::Inconsistent(_))));
    }

    #[test]
    fn test_unused_key() {
        let mut config = AssetConfig::from_json(CONFIG).unwrap();
        config
            .assets
            .insert("player_attack".into(), "assets/player_attack.png".into());
        let report = check_player_assets(&config, &["player_attack.png"]);
        assert_eq!(report.unused, vec!["player_attack".to_string()]);
        assert_eq!(report.to_string(), "unused in animations: player_attack");
    }

    #[test]
    fn test_missing_animations_section() {
        let json = r#"{"assets": {"player_idle": "a/player_idle.png"}}"#;
        let config = AssetConfig::from_json(json).unwrap();
        let report = check_player_assets::<&str>(&config, &[]);
        assert_eq!(report.unused, vec!["player_idle".to_string()]);
    }

    #[test]
    fn test_check_asset_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, CONFIG).unwrap();
        let assets = dir.path().join("assets");
        std::fs::create_dir(&assets).unwrap();
        for name in ["player_idle.png", "player_walk.png", "player_swim.png"] {
            std::fs::write(assets.join(name), b"png").unwrap();
        }

        let report = check_asset_dir(&config_path, &assets).unwrap();
        assert_eq!(report.missing_in_config, vec!["player_swim.png".to_string()]);
        assert!(report.unused.is_empty());
    }

    #[test]
    fn test_check_asset_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            check_asset_dir(&missing, dir.path()),
            Err(AssetError::Io { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(check_asset_dir(&bad, dir.path()), Err(AssetError::Json(_))));
    }
}
