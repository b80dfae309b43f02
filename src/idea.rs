//! IntelliJ IDEA workspace integration.
//!
//! Points the IDE's Maven "User settings file" at a profile by patching
//! `.idea/workspace.xml` as text. Only the `MavenImportPreferences` component is
//! touched; everything else in the workspace file is preserved byte for byte.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::Result;
use crate::fs_utils::read_optional;

const MAVEN_PREFERENCES: &str = "MavenImportPreferences";

static SETTINGS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"settings\.xml\.[a-zA-Z0-9_-]+").expect("valid settings reference pattern")
});

const WORKSPACE_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project version="4">
  <component name="MavenImportPreferences">
    <option name="generalSettings">
      <MavenGeneralSettings>
        <option name="userSettingsFile" value="{{settings}}" />
      </MavenGeneralSettings>
    </option>
    <option name="enabledProfiles">
      <list>
        <option value="release" />
      </list>
    </option>
  </component>
</project>
"#;

const COMPONENT_TEMPLATE: &str = r#"  <component name="MavenImportPreferences">
    <option name="generalSettings">
      <MavenGeneralSettings>
        <option name="userSettingsFile" value="{{settings}}" />
      </MavenGeneralSettings>
    </option>
    <option name="enabledProfiles">
      <list>
        <option value="release" />
      </list>
    </option>
  </component>
</project>"#;

/// What `apply_profile` did to the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaUpdate {
    /// No workspace file existed; a fresh one was written
    Created,
    /// The workspace already points at this profile
    AlreadySet,
    /// A previous menv profile reference was swapped for this one
    Replaced,
    /// A Maven component was appended to the workspace
    Inserted,
    /// The workspace has foreign Maven settings that must be changed by hand
    ManualRequired,
}

/// The `.idea` directory of a project
#[derive(Debug, Clone)]
pub struct Workspace {
    idea_dir: PathBuf,
    file: PathBuf,
}

impl Workspace {
    pub fn new(project_dir: &Path) -> Self {
        let idea_dir = project_dir.join(".idea");
        let file = idea_dir.join("workspace.xml");
        Self { idea_dir, file }
    }

    pub fn is_intellij_project(&self) -> bool {
        self.idea_dir.exists()
    }

    pub fn exists(&self) -> bool {
        self.file.exists()
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    fn content(&self) -> String {
        read_optional(&self.file).unwrap_or_default()
    }

    /// Write a new workspace file pointing at `settings`
    pub fn write_template(&self, settings: &Path) -> Result<()> {
        let content = WORKSPACE_TEMPLATE.replace("{{settings}}", &settings.to_string_lossy());
        fs::write(&self.file, content)?;
        Ok(())
    }

    /// Whether the workspace mentions `settings` anywhere
    pub fn references(&self, settings: &Path) -> bool {
        self.content().contains(settings.to_string_lossy().as_ref())
    }

    pub fn has_maven_preferences(&self) -> bool {
        self.content().contains(MAVEN_PREFERENCES)
    }

    /// Whether the Maven preferences were written by menv for settings under `root`
    pub fn is_managed(&self, root: &Path) -> bool {
        let content = self.content();
        content.contains(MAVEN_PREFERENCES) && content.contains(root.to_string_lossy().as_ref())
    }

    /// Swap every `settings.xml.<name>` reference for `profile`
    pub fn replace_profile(&self, profile: &str) -> Result<()> {
        let content = self.content();
        let replacement = format!("settings.xml.{profile}");
        let updated = SETTINGS_REFERENCE.replace_all(&content, regex::NoExpand(&replacement));
        fs::write(&self.file, updated.as_bytes())?;
        Ok(())
    }

    /// Append a Maven preferences component before `</project>`
    pub fn insert_component(&self, settings: &Path) -> Result<()> {
        let content = self.content();
        let component = COMPONENT_TEMPLATE.replace("{{settings}}", &settings.to_string_lossy());
        fs::write(&self.file, content.replace("</project>", &component))?;
        Ok(())
    }

    fn settings_option(settings: &Path) -> String {
        format!(
            r#"<option name="userSettingsFile" value="{}" />"#,
            settings.to_string_lossy()
        )
    }

    /// Whether the user settings option points at `settings`
    pub fn uses_settings(&self, settings: &Path) -> bool {
        self.content().contains(&Self::settings_option(settings))
    }

    /// Remove every user settings option pointing at `settings`.
    ///
    /// A line left holding only whitespace is dropped with the option. Returns
    /// whether anything was removed.
    pub fn remove_settings(&self, settings: &Path) -> Result<bool> {
        let mut content = self.content();
        let option = Self::settings_option(settings);
        let mut removed = false;

        while let Some(start) = content.find(&option) {
            let end = start + option.len();
            let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
            let line_end = content[end..]
                .find('\n')
                .map_or(content.len(), |i| end + i + 1);

            let alone = content[line_start..start].trim().is_empty()
                && content[end..line_end].trim().is_empty();
            if alone {
                content.replace_range(line_start..line_end, "");
            } else {
                content.replace_range(start..end, "");
            }
            removed = true;
        }

        if removed {
            fs::write(&self.file, content)?;
        }
        Ok(removed)
    }
}

/// Point the workspace at `profile`'s settings file.
///
/// `root` is the menv root directory, used to recognise references menv wrote.
pub fn apply_profile(
    workspace: &Workspace,
    root: &Path,
    profile: &str,
    settings: &Path,
) -> Result<IdeaUpdate> {
    if !workspace.exists() {
        workspace.write_template(settings)?;
        return Ok(IdeaUpdate::Created);
    }

    if workspace.references(settings) {
        return Ok(IdeaUpdate::AlreadySet);
    }

    if workspace.has_maven_preferences() {
        if workspace.is_managed(root) {
            workspace.replace_profile(profile)?;
            return Ok(IdeaUpdate::Replaced);
        }
        return Ok(IdeaUpdate::ManualRequired);
    }

    workspace.insert_component(settings)?;
    Ok(IdeaUpdate::Inserted)
}
