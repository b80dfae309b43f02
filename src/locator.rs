//! Finding the Maven executable to delegate to.
//!
//! Lookup order:
//! 1. `./mvnw` in the working directory, unless `MENV_DISABLE_WRAPPER` is true
//! 2. The first `mvn` launcher under `$(brew --cellar)/maven`, skipping any
//!    copy inside a `libexec` directory

use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{DISABLE_WRAPPER_ENV, parse_bool};
use crate::error::{MenvError, Result};
use crate::shell::Shell;

pub const WRAPPER: &str = "mvnw";
pub const EXECUTABLE: &str = "mvn";
const CELLAR_FORMULA: &str = "maven";
const LIBEXEC: &str = "libexec";

#[derive(Debug, Clone)]
pub struct ToolLocator {
    cwd: PathBuf,
    disable_wrapper: Option<String>,
}

impl ToolLocator {
    pub fn new(cwd: impl Into<PathBuf>, disable_wrapper: Option<String>) -> Self {
        Self {
            cwd: cwd.into(),
            disable_wrapper,
        }
    }

    /// Locator for `cwd` with the wrapper override read from the environment
    pub fn from_env(cwd: impl Into<PathBuf>) -> Self {
        Self::new(cwd, std::env::var(DISABLE_WRAPPER_ENV).ok())
    }

    pub fn locate(&self, shell: &dyn Shell) -> Result<PathBuf> {
        let wrapper_disabled = match &self.disable_wrapper {
            Some(value) => parse_bool(DISABLE_WRAPPER_ENV, value)?,
            None => false,
        };

        if !wrapper_disabled && self.cwd.join(WRAPPER).exists() {
            tracing::debug!("using project maven wrapper");
            return Ok(Path::new(".").join(WRAPPER));
        }

        let cellar = match shell.output("brew", &["--cellar".to_string()]) {
            Ok(out) => out.replace(['\n', '\r'], ""),
            Err(e) => {
                tracing::debug!(error = %e, "brew --cellar failed");
                String::new()
            }
        };
        let maven_dir = Path::new(&cellar).join(CELLAR_FORMULA);

        if cellar.is_empty() || !maven_dir.exists() {
            return Err(cellar_not_found());
        }

        find_executable(&maven_dir).ok_or_else(cellar_not_found)
    }
}

fn cellar_not_found() -> MenvError {
    MenvError::NotFound("maven in (home)brew cellar".to_string())
}

/// First regular file named `mvn` below `dir`, ignoring `libexec` subtrees
fn find_executable(dir: &Path) -> Option<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == EXECUTABLE)
        .find(|entry| {
            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            !relative
                .components()
                .any(|c| matches!(c, Component::Normal(name) if name == LIBEXEC))
        })
        .map(|entry| {
            tracing::debug!(path = %entry.path().display(), "found maven in cellar");
            entry.into_path()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeShell;
    use std::fs;
    use tempfile::TempDir;

    fn cellar_with_mvn(cellar: &TempDir) -> PathBuf {
        let bin = cellar.path().join("maven/3.9.6/bin");
        fs::create_dir_all(&bin).unwrap();
        let mvn = bin.join("mvn");
        fs::write(&mvn, "").unwrap();
        mvn
    }

    fn cellar_shell(cellar: &TempDir) -> FakeShell {
        FakeShell::with_output(format!("{}\n", cellar.path().display()))
    }

    #[test]
    fn test_find_mvn() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let expected = cellar_with_mvn(&cellar);
        let shell = cellar_shell(&cellar);

        let actual = ToolLocator::new(cwd.path(), None).locate(&shell).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(shell.calls(), vec!["brew --cellar".to_string()]);
    }

    #[test]
    fn test_find_mvn_no_cellar() {
        let cwd = TempDir::new().unwrap();
        let shell = FakeShell::failing();

        let err = ToolLocator::new(cwd.path(), None).locate(&shell).unwrap_err();
        assert!(matches!(err, MenvError::NotFound(_)));
        assert_eq!(err.to_string(), "could not find maven in (home)brew cellar");
    }

    #[test]
    fn test_find_mvn_cellar_without_maven() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        let err = ToolLocator::new(cwd.path(), None)
            .locate(&cellar_shell(&cellar))
            .unwrap_err();
        assert!(matches!(err, MenvError::NotFound(_)));
    }

    #[test]
    fn test_find_mvn_cellar_no_mvn() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        fs::create_dir_all(cellar.path().join("maven")).unwrap();

        let err = ToolLocator::new(cwd.path(), None)
            .locate(&cellar_shell(&cellar))
            .unwrap_err();
        assert!(matches!(err, MenvError::NotFound(_)));
    }

    #[test]
    fn test_find_mvn_skips_libexec() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let libexec = cellar.path().join("maven/3.9.6/libexec/bin");
        fs::create_dir_all(&libexec).unwrap();
        fs::write(libexec.join("mvn"), "").unwrap();

        let err = ToolLocator::new(cwd.path(), None)
            .locate(&cellar_shell(&cellar))
            .unwrap_err();
        assert!(matches!(err, MenvError::NotFound(_)));

        let expected = cellar_with_mvn(&cellar);
        let actual = ToolLocator::new(cwd.path(), None)
            .locate(&cellar_shell(&cellar))
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_find_mvn_ignores_directory_named_mvn() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        fs::create_dir_all(cellar.path().join("maven/3.9.5/mvn")).unwrap();
        let expected = cellar_with_mvn(&cellar);

        let actual = ToolLocator::new(cwd.path(), None)
            .locate(&cellar_shell(&cellar))
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_find_mvn_with_wrapper() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        cellar_with_mvn(&cellar);
        fs::write(cwd.path().join(WRAPPER), "").unwrap();
        let shell = cellar_shell(&cellar);

        let actual = ToolLocator::new(cwd.path(), None).locate(&shell).unwrap();
        assert_eq!(actual, PathBuf::from("./mvnw"));
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn test_find_mvn_wrapper_disabled() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let expected = cellar_with_mvn(&cellar);
        fs::write(cwd.path().join(WRAPPER), "").unwrap();

        let actual = ToolLocator::new(cwd.path(), Some("true".into()))
            .locate(&cellar_shell(&cellar))
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_find_mvn_wrapper_explicitly_enabled() {
        let cellar = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        fs::write(cwd.path().join(WRAPPER), "").unwrap();

        let actual = ToolLocator::new(cwd.path(), Some("false".into()))
            .locate(&cellar_shell(&cellar))
            .unwrap();
        assert_eq!(actual, PathBuf::from("./mvnw"));
    }

    #[test]
    fn test_find_maven_invalid_env() {
        let cwd = TempDir::new().unwrap();
        fs::write(cwd.path().join(WRAPPER), "").unwrap();
        let shell = FakeShell::failing();

        let err = ToolLocator::new(cwd.path(), Some("invalid".into()))
            .locate(&shell)
            .unwrap_err();
        assert!(matches!(err, MenvError::InvalidConfig(_)));
        assert_eq!(err.to_string(), "MENV_DISABLE_WRAPPER is not a boolean value");
        assert!(shell.calls().is_empty());
    }
}
