//! Runtime settings: defaults, then an optional JSON file, then command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default book file name
pub const DEFAULT_BOOKS_FILE: &str = "books.txt";

/// Default member file name
pub const DEFAULT_MEMBERS_FILE: &str = "members.txt";

/// Default tracing filter
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings as given by one source, every field optional
///
/// This is both the shape of the JSON config file and the set of flags the
/// binaries accept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    /// Directory holding the record files
    pub data_dir: Option<PathBuf>,
    /// Book file name inside `data_dir`
    pub books_file: Option<String>,
    /// Member file name inside `data_dir`
    pub members_file: Option<String>,
    /// Tracing filter directive
    pub log_level: Option<String>,
}

impl PartialConfig {
    /// Read a JSON config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, or
    /// `ConfigError::Parse` if it is not a valid config object.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&text, path)
    }

    /// Parse a JSON config document; `origin` is only used in errors
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not a valid config object.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text)
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })
    }

    /// Layer `over` on top of `self`; fields set in `over` win
    #[must_use]
    pub fn merge(self, over: Self) -> Self {
        Self {
            data_dir: over.data_dir.or(self.data_dir),
            books_file: over.books_file.or(self.books_file),
            members_file: over.members_file.or(self.members_file),
            log_level: over.log_level.or(self.log_level),
        }
    }
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the record files
    pub data_dir: PathBuf,
    /// Book file name
    pub books_file: String,
    /// Member file name
    pub members_file: String,
    /// Tracing filter directive
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(PartialConfig::default())
    }
}

impl From<PartialConfig> for Settings {
    fn from(partial: PartialConfig) -> Self {
        Self {
            data_dir: partial.data_dir.unwrap_or_else(|| PathBuf::from(".")),
            books_file: partial.books_file.unwrap_or_else(|| DEFAULT_BOOKS_FILE.to_string()),
            members_file: partial.members_file.unwrap_or_else(|| DEFAULT_MEMBERS_FILE.to_string()),
            log_level: partial.log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Settings {
    /// Resolve settings from an optional config file and the command-line flags
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config file cannot be read or parsed.
    pub fn resolve(config_file: Option<&Path>, flags: PartialConfig) -> Result<Self, ConfigError> {
        let from_file = match config_file {
            Some(path) => PartialConfig::from_file(path)?,
            None => PartialConfig::default(),
        };
        Ok(Self::from(from_file.merge(flags)))
    }

    /// Full path of the book file
    #[must_use]
    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    /// Full path of the member file
    #[must_use]
    pub fn members_path(&self) -> PathBuf {
        self.data_dir.join(&self.members_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.books_path(), Path::new(".").join("books.txt"));
        assert_eq!(settings.members_path(), Path::new(".").join("members.txt"));
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_flags_override_file_values() {
        let file = PartialConfig::from_json(
            r#"{ "data_dir": "/srv/library", "books_file": "catalog.txt", "log_level": "info" }"#,
            Path::new("campus.json"),
        );
        let Ok(file) = file else {
            panic!("config document is valid");
        };
        let flags = PartialConfig { log_level: Some("debug".to_string()), ..PartialConfig::default() };

        let settings = Settings::from(file.merge(flags));
        assert_eq!(settings.books_path(), Path::new("/srv/library").join("catalog.txt"));
        assert_eq!(settings.members_path(), Path::new("/srv/library").join("members.txt"));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = PartialConfig::from_json(r#"{ "colour": true }"#, Path::new("campus.json"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_resolve_reads_the_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir should be creatable");
        };
        let path = dir.path().join("campus.json");
        assert!(fs::write(&path, r#"{ "members_file": "people.txt" }"#).is_ok());

        let settings = Settings::resolve(Some(path.as_path()), PartialConfig::default());
        assert!(matches!(settings, Ok(ref s) if s.members_file == "people.txt"));

        let nope = dir.path().join("nope.json");
        let missing = Settings::resolve(Some(nope.as_path()), PartialConfig::default());
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
