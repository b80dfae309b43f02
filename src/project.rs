//! Project-level Maven overrides written to `.mvn/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::profiles::ProfileStore;

/// Whether `dir` is a Maven project root
pub fn is_maven_project(dir: &Path) -> bool {
    dir.join("pom.xml").exists()
}

/// Point the project's `.mvn/` configuration at a profile.
///
/// Writes `.mvn/maven.config` with the profile's settings file and copies the
/// profile's options, if any, into `.mvn/jvm.config`. Returns the files written.
pub fn write_local_config(store: &ProfileStore, dir: &Path, profile: &str) -> Result<Vec<PathBuf>> {
    let mvn_dir = dir.join(".mvn");
    fs::create_dir_all(&mvn_dir)?;

    let mut written = Vec::new();

    let maven_config = mvn_dir.join("maven.config");
    let settings = store.settings_path(profile);
    fs::write(&maven_config, format!("--settings\n{}", settings.display()))?;
    written.push(maven_config);

    if store.options_exist(profile) {
        let jvm_config = mvn_dir.join("jvm.config");
        fs::copy(store.options_path(profile), &jvm_config)?;
        written.push(jvm_config);
    }

    tracing::debug!(profile, files = ?written, "wrote project maven config");
    Ok(written)
}
