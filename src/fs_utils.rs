//! Filesystem utility functions
//!
//! Best-effort reads used by the resolver and the options merger. A file that is
//! missing and a file that cannot be read are both reported as absent.

use std::fs;
use std::path::Path;

/// Read a file to a string, returning `None` if it is missing or unreadable
pub fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "best-effort read skipped");
            None
        }
    }
}

/// Remove every newline and carriage return from a string
pub fn strip_newlines(input: &str) -> String {
    input.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Content up to the first newline, without a trailing carriage return
pub fn first_line(input: &str) -> &str {
    let line = input.split('\n').next().unwrap_or("");
    line.strip_suffix('\r').unwrap_or(line)
}
