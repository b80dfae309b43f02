//! Process execution behind a trait so commands can be tested without spawning.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

/// Environment change applied to a delegated child process only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvOverlay {
    /// Leave the child's environment as inherited
    #[default]
    Inherit,
    /// Set a variable for the child
    Set { key: String, value: String },
    /// Remove a variable from the child's environment
    Unset { key: String },
}

impl EnvOverlay {
    pub fn apply(&self, command: &mut Command) {
        match self {
            EnvOverlay::Inherit => {}
            EnvOverlay::Set { key, value } => {
                command.env(key, value);
            }
            EnvOverlay::Unset { key } => {
                command.env_remove(key);
            }
        }
    }
}

pub trait Shell {
    /// Run a program and capture its standard output
    fn output(&self, program: &str, args: &[String]) -> io::Result<String>;

    /// Run a program attached to this process's standard streams and wait for it
    fn run_attached(&self, program: &str, args: &[String], env: &EnvOverlay)
    -> io::Result<ExitStatus>;
}

/// `Shell` backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn output(&self, program: &str, args: &[String]) -> io::Result<String> {
        tracing::debug!(program, ?args, "capturing command output");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()?;

        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{} exited with {}",
                program, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_attached(
        &self,
        program: &str,
        args: &[String],
        env: &EnvOverlay,
    ) -> io::Result<ExitStatus> {
        tracing::debug!(program, ?args, ?env, "running attached command");
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        env.apply(&mut command);
        command.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envs(command: &Command) -> Vec<(String, Option<String>)> {
        command
            .get_envs()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.map(|v| v.to_string_lossy().into_owned()),
                )
            })
            .collect()
    }

    #[test]
    fn test_overlay_inherit_leaves_command_untouched() {
        let mut command = Command::new("true");
        EnvOverlay::Inherit.apply(&mut command);
        assert!(envs(&command).is_empty());
    }

    #[test]
    fn test_overlay_set() {
        let mut command = Command::new("true");
        EnvOverlay::Set {
            key: "MAVEN_OPTS".into(),
            value: "-Xmx2g".into(),
        }
        .apply(&mut command);
        assert_eq!(
            envs(&command),
            vec![("MAVEN_OPTS".to_string(), Some("-Xmx2g".to_string()))]
        );
    }

    #[test]
    fn test_overlay_unset() {
        let mut command = Command::new("true");
        EnvOverlay::Unset {
            key: "MAVEN_OPTS".into(),
        }
        .apply(&mut command);
        assert_eq!(envs(&command), vec![("MAVEN_OPTS".to_string(), None)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_shell_output() {
        let out = SystemShell.output("echo", &["hello".to_string()]).unwrap();
        assert_eq!(out, "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_shell_output_failure() {
        assert!(SystemShell.output("false", &[]).is_err());
    }
}
