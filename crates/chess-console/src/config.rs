//! Configuration file loading for the console front-end.
//!
//! Settings come from a TOML file, `chess.toml` in the current directory
//! unless another path is given on the command line. Every field has a
//! default, so a missing file or an empty one yields a usable config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How the board is drawn.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Draw pieces as Unicode chess glyphs instead of FEN letters.
    #[serde(default = "default_true")]
    pub unicode: bool,
    /// Draw shaded empty cells differently from unshaded ones.
    #[serde(default = "default_true")]
    pub shade_empty: bool,
    /// Print rank numbers and file letters around the board.
    #[serde(default = "default_true")]
    pub coordinates: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            unicode: true,
            shade_empty: true,
            coordinates: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Main console configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Maximum level of log lines written to stderr.
    /// Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Board drawing options.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Suggest a way out of check at the start of a turn.
    #[serde(default = "default_true")]
    pub hints: bool,
    /// Starting position as FEN. The standard layout when absent.
    #[serde(default)]
    pub start_fen: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            log_level: default_log_level(),
            display: DisplayConfig::default(),
            hints: true,
            start_fen: None,
        }
    }
}

impl ConsoleConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path, `chess.toml`.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
log_level = "debug"
hints = false
start_fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1"

[display]
unicode = false
shade_empty = false
coordinates = false
"#;

        let config: ConsoleConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(!config.hints);
        assert_eq!(
            config.start_fen.as_deref(),
            Some("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
        );
        assert!(!config.display.unicode);
        assert!(!config.display.shade_empty);
        assert!(!config.display.coordinates);
    }

    #[test]
    fn test_parse_config_with_missing_optional_fields() {
        let toml_content = r#"
[display]
unicode = false
"#;

        let config: ConsoleConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.log_level, "warn"); // default
        assert!(config.hints); // default
        assert!(config.start_fen.is_none());
        assert!(!config.display.unicode);
        assert!(config.display.shade_empty); // default
        assert!(config.display.coordinates); // default
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_default_path() {
        assert_eq!(ConsoleConfig::default_path(), PathBuf::from("chess.toml"));
    }

    #[test]
    fn test_load_returns_default_when_file_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hints = false").unwrap();

        let config = ConsoleConfig::load(file.path()).unwrap();
        assert!(!config.hints);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hints = maybe").unwrap();

        match ConsoleConfig::load(file.path()) {
            Err(ConfigError::ParseError(_)) => {}
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }
}
