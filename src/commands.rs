//! High-level command orchestration for the CLI.
//!
//! This module contains the handler functions for each CLI command (`new`, `ls`, `set`, etc.).
//! It serves as the coordination layer, interacting with:
//! - `crate::ui` for user interaction (output, prompts).
//! - `crate::config` for the menv root and editor.
//! - `crate::profiles` for profile management logic.
//! - `crate::resolver` for the directory-scoped active profile.
//! - `crate::delegate` for handing off to Maven.
//!
//! Expected failures (unknown profile, not a Maven project, ...) are printed and
//! the handler returns `Ok`, so the process exits 0. Only `new` reports its
//! failures as errors, which makes the process exit 1.

use anyhow::{Context, Result};
use comfy_table::Table;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::{Config, MAVEN_OPTS_ENV};
use crate::delegate;
use crate::idea::{IdeaUpdate, Workspace, apply_profile};
use crate::locator::ToolLocator;
use crate::picker::pick_profile;
use crate::profiles::ProfileStore;
use crate::project::{is_maven_project, write_local_config};
use crate::resolver::{Activation, resolve};
use crate::shell::{EnvOverlay, Shell};
use crate::ui::Ui;

const NOT_MAVEN_PROJECT: &str = "Not a maven project or maven project root";
const NOT_INTELLIJ_PROJECT: &str = "Not an IntelliJ project";
const NO_ACTIVE_PROFILE: &str = "No active profile";

/// Create a new profile
pub fn new(config: &Config, name: &str, ui: &Ui) -> Result<()> {
    let store = ProfileStore::new(config);
    store
        .create(name)
        .with_context(|| format!("Could not create profile '{}'", name))?;

    ui.ok(format!("Created profile {}", name));
    ui.println(format!("  {}", ui.dim(store.settings_path(name).display().to_string())));
    Ok(())
}

/// List all available profiles, marking the one active for `cwd`
pub fn list(config: &Config, cwd: &Path, ui: &Ui) -> Result<()> {
    let store = ProfileStore::new(config);
    let mut profiles = store.list().context("Failed to list profiles")?;

    if profiles.is_empty() {
        ui.warn("No profiles found");
        ui.newline();
        ui.println("Create one with:");
        ui.println(format!("  {} new <name>", ui.bold("menv")));
        return Ok(());
    }
    profiles.sort();

    let table = profile_table(&store, &profiles, &resolve(cwd), ui);
    ui.section("Available profiles:");
    ui.println(table.to_string());
    Ok(())
}

/// One row per profile, the active one marked and its MAVEN_OPTS alongside
fn profile_table(store: &ProfileStore, profiles: &[String], active: &Activation, ui: &Ui) -> Table {
    let mut table = ui.simple_table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("Profile"),
        ui.header_cell("MAVEN_OPTS"),
    ]);

    for name in profiles {
        let is_active = *name == active.profile;
        let icon = if is_active { ui.active_marker() } else { " " };
        let name_cell = if is_active {
            ui.active_cell(name)
        } else {
            ui.cell(name)
        };
        let opts_cell = if store.options_exist(name) {
            ui.cell(store.options(name))
        } else {
            ui.cell("-")
        };
        table.add_row(vec![ui.cell(icon), name_cell, opts_cell]);
    }
    table
}

/// Show the active profile and the marker that set it
pub fn ps(cwd: &Path, ui: &Ui) -> Result<()> {
    ui.section("Active profile:");
    ui.println(activation_line(&resolve(cwd), ui));
    Ok(())
}

fn activation_line(activation: &Activation, ui: &Ui) -> String {
    match (&activation.marker, activation.is_set()) {
        (Some(marker), true) => format!(
            "  {} {}",
            activation.profile,
            ui.dim(format!("(set by {})", marker.display()))
        ),
        _ => "none".to_string(),
    }
}

/// Activate a profile for `cwd` and its children
pub fn set(config: &Config, cwd: &Path, name: &str, ui: &Ui) -> Result<()> {
    let store = ProfileStore::new(config);
    match store.set_in(cwd, name) {
        Ok(_) => ui.ok(format!("Set profile {}", name)),
        Err(e) => ui.err(e.to_string()),
    }
    Ok(())
}

/// Remove the activation marker in `cwd`
pub fn clear(config: &Config, cwd: &Path, ui: &Ui) -> Result<()> {
    ProfileStore::new(config).clear_in(cwd);
    ui.ok("Cleared profile for this directory");
    Ok(())
}

/// Remove a profile and its MAVEN_OPTS
pub fn remove(config: &Config, name: &str, ui: &Ui) -> Result<()> {
    match ProfileStore::new(config).remove(name) {
        Ok(()) => ui.ok(format!("Removed profile {}", name)),
        Err(e) => ui.err(e.to_string()),
    }
    Ok(())
}

/// Ask for a profile on the terminal
pub fn prompt_for_profile(config: &Config, input: impl BufRead, out: impl Write) -> Result<Option<String>> {
    let store = ProfileStore::new(config);
    let profiles = store.list().context("Failed to list profiles")?;
    Ok(pick_profile(&profiles, input, out))
}

/// Open a profile's settings.xml in the configured editor
pub fn edit(config: &Config, name: &str, ui: &Ui, shell: &dyn Shell) -> Result<()> {
    let store = ProfileStore::new(config);
    if !store.exists(name) {
        ui.err(format!("profile {} does not exist", name));
        return Ok(());
    }
    open_in_editor(config, &store.settings_path(name), shell)
}

/// Open a profile's MAVEN_OPTS file in the configured editor
pub fn edit_opts(config: &Config, name: &str, ui: &Ui, shell: &dyn Shell) -> Result<()> {
    let store = ProfileStore::new(config);
    if !store.exists(name) {
        ui.err(format!("profile {} does not exist", name));
        return Ok(());
    }
    open_in_editor(config, &store.options_path(name), shell)
}

/// Profile for `editopts`: the argument, else the active profile
pub fn editopts_target(name: Option<String>, cwd: &Path) -> Option<String> {
    name.or_else(|| {
        let active = resolve(cwd);
        active.is_set().then_some(active.profile)
    })
}

/// Open a file in the user's editor.
///
/// The editor string may carry arguments (`code -w`); the editor's own exit
/// status is not treated as a failure.
fn open_in_editor(config: &Config, path: &Path, shell: &dyn Shell) -> Result<()> {
    let mut parts = config.editor.split_whitespace();
    let Some(program) = parts.next() else {
        anyhow::bail!("No editor configured");
    };
    let mut args: Vec<String> = parts.map(String::from).collect();
    args.push(path.to_string_lossy().into_owned());

    let status = shell
        .run_attached(program, &args, &EnvOverlay::Inherit)
        .with_context(|| format!("Failed to run editor: {}", config.editor))?;
    if !status.success() {
        tracing::warn!(editor = %config.editor, %status, "editor exited with non-zero status");
    }
    Ok(())
}

/// Run Maven with the active profile's settings and options.
///
/// Returns the exit code of the Maven process, or 0 when Maven could not be found.
pub fn mvn(
    config: &Config,
    cwd: &Path,
    args: &[String],
    ui: &Ui,
    shell: &dyn Shell,
    locator: &ToolLocator,
) -> Result<i32> {
    let store = ProfileStore::new(config);
    let active = resolve(cwd);
    let ambient = std::env::var(MAVEN_OPTS_ENV).ok();

    let run = match delegate::prepare(&store, &active.profile, args, locator, shell, ambient.as_deref()) {
        Ok(run) => run,
        Err(e) => {
            ui.println(e.to_string());
            return Ok(0);
        }
    };

    ui.println(format!("[INFO] {}: {}", MAVEN_OPTS_ENV, run.options.value));
    let status = run
        .execute(shell)
        .with_context(|| format!("Failed to run {}", run.program.display()))?;

    // Killed by a signal: mirror the shell convention
    Ok(status.code().unwrap_or(1))
}

/// Point the project's `.mvn/` configuration at the active profile
pub fn mvnlocal(config: &Config, cwd: &Path, ui: &Ui) -> Result<()> {
    if !is_maven_project(cwd) {
        ui.warn(NOT_MAVEN_PROJECT);
        return Ok(());
    }

    let active = resolve(cwd);
    if !active.is_set() {
        ui.warn(NO_ACTIVE_PROFILE);
        return Ok(());
    }

    let store = ProfileStore::new(config);
    write_local_config(&store, cwd, &active.profile).context("Failed to write .mvn config")?;
    ui.ok(format!(
        "Maven project .mvn folder set to profile {} settings",
        active.profile
    ));
    Ok(())
}

/// Point IntelliJ IDEA's Maven user settings at the active profile
pub fn idea(config: &Config, cwd: &Path, ui: &Ui) -> Result<()> {
    let Some((workspace, profile)) = idea_preconditions(cwd, ui) else {
        return Ok(());
    };

    let store = ProfileStore::new(config);
    let settings = store.settings_path(&profile);
    let update = apply_profile(&workspace, store.root(), &profile, &settings)
        .with_context(|| format!("Failed to update {}", workspace.path().display()))?;

    match update {
        IdeaUpdate::Created | IdeaUpdate::Replaced | IdeaUpdate::Inserted => {
            ui.ok(format!("Maven settings set to profile {}", profile));
        }
        IdeaUpdate::AlreadySet => ui.info("Profile already set"),
        IdeaUpdate::ManualRequired => {
            ui.warn("The IntelliJ workspace already has some custom settings.");
            ui.println("Please override the maven 'User settings file:' property manually");
            ui.println("in IntelliJ to the following value:");
            ui.newline();
            ui.println(format!("    {}", settings.display()));
            ui.newline();
        }
    }
    Ok(())
}

/// Remove the active profile from IntelliJ IDEA's Maven user settings
pub fn rmidea(config: &Config, cwd: &Path, ui: &Ui) -> Result<()> {
    let Some((workspace, profile)) = idea_preconditions(cwd, ui) else {
        return Ok(());
    };

    if !workspace.exists() {
        ui.warn("No .idea/workspace.xml found");
        return Ok(());
    }

    let settings = ProfileStore::new(config).settings_path(&profile);
    if !workspace.uses_settings(&settings) {
        ui.warn("Active profile is not used in workspace.xml");
        return Ok(());
    }

    match workspace.remove_settings(&settings) {
        Ok(true) => ui.ok("Active profile removed from .idea/workspace.xml"),
        Ok(false) => ui.warn("Active profile is not used in workspace.xml"),
        Err(e) => ui.err(e.to_string()),
    }
    Ok(())
}

fn idea_preconditions(cwd: &Path, ui: &Ui) -> Option<(Workspace, String)> {
    if !is_maven_project(cwd) {
        ui.warn(NOT_MAVEN_PROJECT);
        return None;
    }

    let workspace = Workspace::new(cwd);
    if !workspace.is_intellij_project() {
        ui.warn(NOT_INTELLIJ_PROJECT);
        return None;
    }

    let active = resolve(cwd);
    if !active.is_set() {
        ui.warn(NO_ACTIVE_PROFILE);
        return None;
    }
    Some((workspace, active.profile))
}
