//! Configuration structures for the cm-obfuscate tool.
//!
//! [`Config`] carries everything a run needs besides the file list: the
//! replacement token length, an optional seed for reproducible tokens, and
//! the extension tables used to classify and discover files.
//!
//! All fields implement [`Default`], so a partial JSON file only needs to name
//! the options it changes.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Length of generated replacement tokens when none is configured.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

/// Longest accepted replacement token.
pub const MAX_TOKEN_LENGTH: usize = 64;

/// Root configuration for the cm-obfuscate tool.
///
/// # Examples
///
/// ```
/// use cm_core::Config;
///
/// let config = Config::default();
/// assert_eq!(config.token_length, 8);
/// assert!(config.seed.is_none());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of alphanumeric characters in each replacement token.
    pub token_length: usize,

    /// Seed for the token generator.
    ///
    /// `None` draws tokens from OS entropy; `Some` makes runs reproducible.
    pub seed: Option<u64>,

    /// Extensions (without the leading dot) treated as stylesheets.
    ///
    /// Every other file is handled as markup/script.
    pub stylesheet_extensions: Vec<String>,

    /// Extensions collected when a directory is passed instead of a file.
    pub walk_extensions: Vec<String>,

    /// Directory names skipped during directory walks.
    pub skip_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_length: DEFAULT_TOKEN_LENGTH,
            seed: None,
            stylesheet_extensions: vec!["css".to_owned()],
            walk_extensions: ["html", "htm", "js", "mjs", "jsx", "css"]
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
            skip_dirs: vec![
                "node_modules".to_owned(),
                "dist".to_owned(),
                ".git".to_owned(),
            ],
        }
    }
}

impl Config {
    /// Loads a configuration from a JSON file and validates it.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, and
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for a token length outside
    /// `1..=MAX_TOKEN_LENGTH` or an empty stylesheet extension list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_LENGTH).contains(&self.token_length) {
            return Err(ConfigError::invalid_option(
                "token_length",
                format!("must be between 1 and {MAX_TOKEN_LENGTH}"),
            ));
        }
        if self.stylesheet_extensions.is_empty() {
            return Err(ConfigError::invalid_option(
                "stylesheet_extensions",
                "must name at least one extension",
            ));
        }
        Ok(())
    }

    /// Resolves the configuration file path, if one was given.
    ///
    /// Returns the default configuration when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_json_file`].
    pub fn load_or_default(path: Option<&Utf8PathBuf>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), |p| Self::from_json_file(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.token_length, DEFAULT_TOKEN_LENGTH);
        assert_eq!(config.stylesheet_extensions, vec!["css"]);
        assert!(config.walk_extensions.contains(&"html".to_owned()));
        assert!(config.skip_dirs.contains(&"node_modules".to_owned()));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            seed: Some(7),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"token_length": 12}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.token_length, 12);
        assert_eq!(config.stylesheet_extensions, vec!["css"]);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        let config = Config {
            token_length: 0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token_length"));
    }

    #[test]
    fn test_validate_token_length_bounds() {
        let at_limit = Config {
            token_length: MAX_TOKEN_LENGTH,
            ..Config::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = Config {
            token_length: usize::MAX,
            ..Config::default()
        };
        let err = huge.validate().unwrap_err();
        assert!(err.to_string().contains("token_length"));
    }

    #[test]
    fn test_validate_rejects_empty_stylesheet_extensions() {
        let config = Config {
            stylesheet_extensions: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("cm.json")).unwrap();
        std::fs::write(&path, r#"{"seed": 42, "token_length": 5}"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.token_length, 5);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = Config::from_json_file(Utf8Path::new("/nonexistent/cm.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_json_file_invalid_option() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("cm.json")).unwrap();
        std::fs::write(&path, r#"{"token_length": 0}"#).unwrap();

        let err = Config::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config, Config::default());
    }
}
