//! Directory-scoped active profile resolution.
//!
//! A profile is activated for a directory by a `.menv_profile` marker file. The
//! marker nearest to the working directory wins; an empty marker clears any
//! activation inherited from a parent.

use std::path::{Path, PathBuf};

use crate::fs_utils::{first_line, read_optional};

/// Reserved name of the activation marker file
pub const MARKER_FILE: &str = ".menv_profile";

/// Result of resolving the active profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    /// Profile name from the nearest marker; empty if none or cleared
    pub profile: String,
    /// Marker that decided the result, `None` when no marker was found
    pub marker: Option<PathBuf>,
}

impl Activation {
    /// Whether a non-empty profile name is active
    pub fn is_set(&self) -> bool {
        !self.profile.is_empty()
    }
}

/// Walk from `start` up to the filesystem root and return the nearest activation.
///
/// Traversal follows the literal parent chain of `start`; symlinks are not resolved.
pub fn resolve(start: &Path) -> Activation {
    let mut dir = Some(start);

    while let Some(current) = dir {
        let marker = current.join(MARKER_FILE);
        tracing::trace!(dir = %current.display(), "looking for activation marker");

        if marker.exists() {
            let profile = read_optional(&marker)
                .map(|content| first_line(&content).to_string())
                .unwrap_or_default();
            tracing::debug!(profile = %profile, marker = %marker.display(), "found activation marker");
            return Activation {
                profile,
                marker: Some(marker),
            };
        }

        dir = current.parent();
    }

    Activation::default()
}
