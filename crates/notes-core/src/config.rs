//! Application configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[derive(Serialize, Deserialize)]` generates the TOML mapping, and
//! `#[serde(default)]` fills any field missing from the file with its
//! `Default` value, so a config file only needs the keys it changes:
//!
//! ```toml
//! [editor]
//! input_mode = "line"
//!
//! [search]
//! tool = "grep"
//! ```

use notes_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the config inside the application directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where notes and templates are stored
    pub storage: StorageConfig,

    /// Editor behavior settings
    pub editor: EditorConfig,

    /// External search settings
    pub search: SearchConfig,
}

impl Config {
    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads `config.toml` from the application directory, falling back to
    /// defaults when the file does not exist.
    pub fn load_from_dir(app_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = Self::path_in(app_dir);
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the config file path inside `app_dir`.
    pub fn path_in(app_dir: impl AsRef<Path>) -> PathBuf {
        app_dir.as_ref().join(CONFIG_FILE)
    }
}

/// Storage locations. Relative paths are resolved against the
/// application directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Notes directory (default `<app dir>/notes`)
    pub notes_dir: Option<PathBuf>,

    /// Templates directory (default `<app dir>/templates`)
    pub templates_dir: Option<PathBuf>,
}

/// External search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Force a search program (`rg` or `grep`); auto-detected when unset
    pub tool: Option<String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_editor::InputMode;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.input_mode, InputMode::Auto);
        assert_eq!(config.editor.min_rows, 15);
        assert!(config.storage.notes_dir.is_none());
        assert!(config.search.tool.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            Config::path_in(dir.path()),
            "[editor]\ninput_mode = \"line\"\n\n[search]\ntool = \"grep\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.editor.input_mode, InputMode::Line);
        assert_eq!(config.editor.min_rows, 15);
        assert_eq!(config.search.tool.as_deref(), Some("grep"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(Config::path_in(dir.path()), "[editor\n").unwrap();
        assert!(matches!(
            Config::load_from_dir(dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
