//! Configuration handling
//!
//! Configuration lives in `corpus.toml` at the corpus root. A missing
//! file means defaults; a malformed file is an error the caller sees.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration file name at the corpus root
pub const CONFIG_FILE: &str = "corpus.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Content scanning settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the Markdown sources, relative to the corpus root
    pub dir: PathBuf,

    /// File extensions recognized as content
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

/// Diagnostics policy settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Treat rejections and conflicts as fatal in `corpus check`
    pub strict: bool,
}

/// Corpus-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Content scanning settings
    pub content: ContentConfig,

    /// Diagnostics policy
    pub check: CheckConfig,
}

impl Config {
    /// Loads configuration from `corpus.toml` under the given root.
    ///
    /// A missing file yields the defaults; read and parse failures are
    /// returned as [`ConfigError`].
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Absolute content directory for a corpus rooted at `root`
    pub fn content_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.content.dir)
    }

    /// True if the extension (without dot) is recognized as content
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.content.extensions.iter().any(|e| e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert!(config.matches_extension("md"));
        assert!(config.matches_extension("markdown"));
        assert!(!config.matches_extension("txt"));
        assert!(!config.check.strict);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[content]\ndir = \"posts\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.content.dir, PathBuf::from("posts"));
        assert!(config.matches_extension("md"));
    }

    #[test]
    fn full_file_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[content]\ndir = \"articles\"\nextensions = [\"md\"]\n\n[check]\nstrict = true\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.content.dir, PathBuf::from("articles"));
        assert!(!config.matches_extension("markdown"));
        assert!(config.check.strict);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "content = [broken\n").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn content_dir_joins_root() {
        let config = Config::default();
        assert_eq!(
            config.content_dir(Path::new("/corpus")),
            PathBuf::from("/corpus/content")
        );
    }
}
