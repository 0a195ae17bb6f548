//! Settings loaded from `.relocate.toml`.
//!
//! Lookup order: an explicit path, then `.relocate.toml` in the starting
//! directory or any ancestor, then `relocate/config.toml` under the user's
//! config directory. Missing keys fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::relocate::{ConflictPolicy, MoveOptions, ReexportPolicy};

pub const PROJECT_CONFIG_FILE: &str = ".relocate.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocateConfig {
    /// When the original file keeps forwarding a moved symbol
    #[serde(default)]
    pub reexport: ReexportPolicy,

    /// What to do when the destination already declares the name
    #[serde(default)]
    pub on_conflict: ConflictPolicy,

    /// File name offered when creating a new destination
    #[serde(default = "default_target")]
    pub default_target: String,

    /// Extensions listed as destination candidates
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
}

impl Default for RelocateConfig {
    fn default() -> Self {
        Self {
            reexport: ReexportPolicy::default(),
            on_conflict: ConflictPolicy::default(),
            default_target: default_target(),
            source_extensions: default_source_extensions(),
        }
    }
}

fn default_target() -> String {
    "types.ts".to_string()
}

fn default_source_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].iter().map(|s| s.to_string()).collect()
}

impl RelocateConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: RelocateConfig = toml::from_str(s)?;
        Ok(config)
    }

    /// Nearest `.relocate.toml` at or above `start_dir`
    pub fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("relocate").join("config.toml"))
    }

    /// Resolve settings for a run starting in `start_dir`.
    pub fn discover(explicit: Option<&Path>, start_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let found = Self::find_project_config(start_dir)
            .or_else(|| Self::user_config_path().filter(|p| p.is_file()));

        match found {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn move_options(&self) -> MoveOptions {
        MoveOptions {
            reexport: self.reexport,
            on_conflict: self.on_conflict,
        }
    }

    pub fn is_source_file(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.source_extensions.iter().any(|s| s == ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RelocateConfig::default();
        assert_eq!(config.reexport, ReexportPolicy::Exported);
        assert_eq!(config.on_conflict, ConflictPolicy::Abort);
        assert_eq!(config.default_target, "types.ts");
        assert_eq!(config.source_extensions, vec!["ts", "tsx", "js", "jsx"]);
    }

    #[test]
    fn test_parse_empty_toml() {
        assert_eq!(RelocateConfig::parse("").unwrap(), RelocateConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            reexport = "always"
            on_conflict = "annotate"
            default_target = "models.ts"
            source_extensions = ["ts", "mts"]
        "#;
        let config = RelocateConfig::parse(toml).unwrap();
        assert_eq!(config.reexport, ReexportPolicy::Always);
        assert_eq!(config.on_conflict, ConflictPolicy::Annotate);
        assert_eq!(config.default_target, "models.ts");
        assert!(config.is_source_file("a.mts"));
        assert!(!config.is_source_file("a.tsx"));
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let result = RelocateConfig::parse("on_conflict = \"merge\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = RelocateConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_discover_walks_up_to_project_config() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("components");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "reexport = \"never\"\n").unwrap();

        let config = RelocateConfig::discover(None, &nested).unwrap();
        assert_eq!(config.reexport, ReexportPolicy::Never);
        assert_eq!(
            RelocateConfig::find_project_config(&nested),
            Some(dir.path().join(PROJECT_CONFIG_FILE))
        );
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "reexport = \"never\"\n").unwrap();
        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "reexport = \"always\"\n").unwrap();

        let config = RelocateConfig::discover(Some(explicit.as_path()), dir.path()).unwrap();
        assert_eq!(config.reexport, ReexportPolicy::Always);
    }
}
