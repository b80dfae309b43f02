//! Maven passthrough.
//!
//! Builds the command line for the active profile and hands the terminal over to
//! the located Maven executable.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use crate::error::Result;
use crate::locator::ToolLocator;
use crate::options::{EffectiveOptions, effective_options};
use crate::profiles::ProfileStore;
use crate::shell::Shell;

/// A fully resolved Maven invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenRun {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub options: EffectiveOptions,
}

impl MavenRun {
    pub fn execute(&self, shell: &dyn Shell) -> io::Result<ExitStatus> {
        shell.run_attached(
            &self.program.to_string_lossy(),
            &self.args,
            &self.options.env,
        )
    }
}

/// Prepend `--settings` and `--global-settings` when the profile has a settings file
pub fn maven_args(store: &ProfileStore, profile: &str, user_args: &[String]) -> Vec<String> {
    if profile.is_empty() || !store.exists(profile) {
        return user_args.to_vec();
    }

    let settings = store.settings_path(profile).to_string_lossy().into_owned();
    let mut args = vec![
        "--settings".to_string(),
        settings.clone(),
        "--global-settings".to_string(),
        settings,
    ];
    args.extend(user_args.iter().cloned());
    args
}

pub fn prepare(
    store: &ProfileStore,
    profile: &str,
    user_args: &[String],
    locator: &ToolLocator,
    shell: &dyn Shell,
    ambient_opts: Option<&str>,
) -> Result<MavenRun> {
    let options = effective_options(store, profile, ambient_opts);
    let args = maven_args(store, profile, user_args);
    let program = locator.locate(shell)?;

    Ok(MavenRun {
        program,
        args,
        options,
    })
}
