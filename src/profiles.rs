//! Core profile management logic.
//!
//! This module handles the "data model" of profiles:
//! - Creating and removing profiles
//! - Listing available profiles
//! - Validating profile names
//! - Activating a profile for a directory
//! - Reading a profile's MAVEN_OPTS
//!
//! A profile is a `settings.xml.<name>` file in the menv root, optionally paired
//! with a `<name>.maven_opts` file. The settings file alone decides whether the
//! profile exists.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{MenvError, Result};
use crate::fs_utils::{read_optional, strip_newlines};
use crate::resolver::MARKER_FILE;

const SETTINGS_PREFIX: &str = "settings.xml.";
const OPTIONS_SUFFIX: &str = ".maven_opts";

const SETTINGS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<settings xmlns="http://maven.apache.org/SETTINGS/1.0.0"
          xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
          xsi:schemaLocation="http://maven.apache.org/SETTINGS/1.0.0 http://maven.apache.org/xsd/settings-1.0.0.xsd">
</settings>
"#;

/// Validate profile name
///
/// Only allows alphanumeric characters, underscores, and hyphens.
pub fn validate_profile_name(name: &str) -> Result<()> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MenvError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Profile files rooted at the configured menv directory
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.root.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a profile's settings file. Does not check existence.
    pub fn settings_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{SETTINGS_PREFIX}{name}"))
    }

    /// Path of a profile's options file. Does not check existence.
    pub fn options_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}{OPTIONS_SUFFIX}"))
    }

    /// Check if a profile exists
    pub fn exists(&self, name: &str) -> bool {
        self.settings_path(name).exists()
    }

    /// Create a profile with a templated settings file
    pub fn create(&self, name: &str) -> Result<()> {
        validate_profile_name(name)?;
        if self.exists(name) {
            return Err(MenvError::AlreadyExists(name.to_string()));
        }

        let path = self.settings_path(name);
        fs::write(&path, SETTINGS_TEMPLATE)?;
        tracing::debug!(profile = name, path = %path.display(), "created profile");
        Ok(())
    }

    /// List available profiles in directory-listing order
    pub fn list(&self) -> Result<Vec<String>> {
        let mut profiles = Vec::new();
        if !self.root.exists() {
            return Ok(profiles);
        }

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_prefix(SETTINGS_PREFIX) {
                if !name.is_empty() {
                    profiles.push(name.to_string());
                }
            }
        }
        Ok(profiles)
    }

    /// Remove a profile's settings and options files
    pub fn remove(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(MenvError::NotFound(format!("profile {}", name)));
        }

        fs::remove_file(self.settings_path(name))?;
        match fs::remove_file(self.options_path(name)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::debug!(profile = name, "removed profile");
        Ok(())
    }

    /// Activate a profile for `dir` and its children
    pub fn set_in(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        if !self.exists(name) {
            return Err(MenvError::NotFound(format!("profile {}", name)));
        }

        let marker = dir.join(MARKER_FILE);
        fs::write(&marker, format!("{name}\n"))?;
        tracing::debug!(profile = name, marker = %marker.display(), "activated profile");
        Ok(marker)
    }

    /// Remove the activation marker in `dir`, if there is one
    pub fn clear_in(&self, dir: &Path) {
        let marker = dir.join(MARKER_FILE);
        if fs::remove_file(&marker).is_ok() {
            tracing::debug!(marker = %marker.display(), "cleared activation");
        }
    }

    pub fn options_exist(&self, name: &str) -> bool {
        self.options_path(name).exists()
    }

    /// A profile's option string with newlines removed.
    ///
    /// A missing or unreadable options file reads as an empty string; callers
    /// check `options_exist` first.
    pub fn options(&self, name: &str) -> String {
        read_optional(&self.options_path(name))
            .map(|content| strip_newlines(&content))
            .unwrap_or_default()
    }
}
