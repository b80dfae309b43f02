use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

use crate::error::MenvError;

/// Overrides the editor used by `edit` and `editopts`
pub const EDITOR_ENV: &str = "MENV_EDITOR";
/// Enables debug logging when set to a true value
pub const VERBOSE_ENV: &str = "MENV_VERBOSE";
/// Disables the project-local `mvnw` preference when set to a true value
pub const DISABLE_WRAPPER_ENV: &str = "MENV_DISABLE_WRAPPER";
/// Option string handed to Maven
pub const MAVEN_OPTS_ENV: &str = "MAVEN_OPTS";

const DEFAULT_EDITOR: &str = "vi";

/// Process-wide configuration, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// ~/.config/menv, holds every settings and options file
    pub root: PathBuf,
    /// Editor command for `edit` and `editopts`
    pub editor: String,
    /// Whether debug logging was requested through the environment
    pub verbose: bool,
}

impl Config {
    /// Build the configuration from the home directory and environment
    pub fn load() -> Result<Self> {
        let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
        let root = base_dirs.home_dir().join(".config").join("menv");

        let editor = std::env::var(EDITOR_ENV).unwrap_or_else(|_| DEFAULT_EDITOR.to_string());
        let verbose = match std::env::var(VERBOSE_ENV) {
            Ok(value) => parse_bool(VERBOSE_ENV, &value)?,
            Err(_) => false,
        };

        Ok(Self {
            root,
            editor,
            verbose,
        })
    }

    /// Configuration over an explicit root directory with default settings
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            editor: DEFAULT_EDITOR.to_string(),
            verbose: false,
        }
    }

    /// Ensure the root directory exists
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Could not create config dir: {}", self.root.display()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Parse a boolean environment value.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
pub fn parse_bool(name: &str, value: &str) -> Result<bool, MenvError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(MenvError::InvalidConfig(format!(
            "{} is not a boolean value",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_bool() {
        for value in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(parse_bool("X", value).unwrap());
        }
        for value in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!parse_bool("X", value).unwrap());
        }
    }

    #[test]
    fn test_parse_bool_invalid() {
        let err = parse_bool(DISABLE_WRAPPER_ENV, "invalid").unwrap_err();
        assert!(matches!(err, MenvError::InvalidConfig(_)));
        assert_eq!(err.to_string(), "MENV_DISABLE_WRAPPER is not a boolean value");
        assert!(parse_bool("X", "").is_err());
        assert!(parse_bool("X", "yes").is_err());
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        unsafe {
            std::env::remove_var(EDITOR_ENV);
            std::env::remove_var(VERBOSE_ENV);
        }
        let config = Config::load().unwrap();
        assert!(config.root.ends_with(".config/menv"));
        assert_eq!(config.editor, "vi");
        assert!(!config.verbose);
    }

    #[test]
    #[serial]
    fn test_load_env_overrides() {
        unsafe {
            std::env::set_var(EDITOR_ENV, "nano");
            std::env::set_var(VERBOSE_ENV, "true");
        }
        let config = Config::load();
        unsafe {
            std::env::remove_var(EDITOR_ENV);
            std::env::remove_var(VERBOSE_ENV);
        }
        let config = config.unwrap();
        assert_eq!(config.editor, "nano");
        assert!(config.verbose);
    }

    #[test]
    #[serial]
    fn test_load_invalid_verbose() {
        unsafe { std::env::set_var(VERBOSE_ENV, "loud") };
        let result = Config::load();
        unsafe { std::env::remove_var(VERBOSE_ENV) };
        assert!(result.is_err());
    }

    #[test]
    fn test_ensure_root() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config::with_root(temp_dir.path().join(".config/menv"));
        config.ensure_root().unwrap();
        assert!(config.root().is_dir());
    }
}
