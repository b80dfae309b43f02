//! MAVEN_OPTS resolution for a delegated Maven run.
//!
//! A profile's options file wins over the ambient `MAVEN_OPTS`, and an empty
//! options file explicitly removes it. Without an options file the ambient value
//! passes through unchanged. The result carries an [`EnvOverlay`] for the child
//! process instead of touching this process's environment.

use crate::config::MAVEN_OPTS_ENV;
use crate::profiles::ProfileStore;
use crate::shell::EnvOverlay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveOptions {
    /// Option string Maven will see
    pub value: String,
    /// Change to apply to the child's environment
    pub env: EnvOverlay,
}

pub fn effective_options(
    store: &ProfileStore,
    profile: &str,
    ambient: Option<&str>,
) -> EffectiveOptions {
    if !profile.is_empty() && store.exists(profile) && store.options_exist(profile) {
        let value = store.options(profile);
        let env = if value.is_empty() {
            EnvOverlay::Unset {
                key: MAVEN_OPTS_ENV.to_string(),
            }
        } else {
            EnvOverlay::Set {
                key: MAVEN_OPTS_ENV.to_string(),
                value: value.clone(),
            }
        };
        tracing::debug!(profile, value = %value, "using profile MAVEN_OPTS");
        return EffectiveOptions { value, env };
    }

    EffectiveOptions {
        value: ambient.unwrap_or_default().to_string(),
        env: EnvOverlay::Inherit,
    }
}
