//! Test utilities shared across test modules
//!
//! This module provides common helper functions for testing, avoiding duplication
//! across multiple test suites.

use std::cell::RefCell;
use std::io;
use std::process::ExitStatus;
use tempfile::TempDir;

use crate::config::Config;
use crate::shell::{EnvOverlay, Shell};

/// Create a Config rooted at `<temp>/.config/menv`, with the root already created
pub fn setup_test_config(temp_dir: &TempDir) -> Config {
    let config = Config::with_root(temp_dir.path().join(".config/menv"));
    config.ensure_root().unwrap();
    config
}

/// A command the fake shell was asked to run attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedRun {
    pub program: String,
    pub args: Vec<String>,
    pub env: EnvOverlay,
}

/// Shell double that answers `output` with a canned string and records calls
#[derive(Debug, Default)]
pub struct FakeShell {
    output: Option<String>,
    exit_code: i32,
    calls: RefCell<Vec<String>>,
    runs: RefCell<Vec<AttachedRun>>,
}

impl FakeShell {
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::default()
        }
    }

    /// Every `output` call fails
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn exiting_with(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn runs(&self) -> Vec<AttachedRun> {
        self.runs.borrow().clone()
    }
}

impl Shell for FakeShell {
    fn output(&self, program: &str, args: &[String]) -> io::Result<String> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.borrow_mut().push(call.join(" "));

        self.output
            .clone()
            .ok_or_else(|| io::Error::other(format!("{program} not available")))
    }

    fn run_attached(
        &self,
        program: &str,
        args: &[String],
        env: &EnvOverlay,
    ) -> io::Result<ExitStatus> {
        self.runs.borrow_mut().push(AttachedRun {
            program: program.to_string(),
            args: args.to_vec(),
            env: env.clone(),
        });
        Ok(exit_status(self.exit_code))
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    // Raw wait status: the exit code lives in the high byte
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}
