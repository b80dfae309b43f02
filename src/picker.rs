//! Numbered profile prompt used when a command needs a profile and none was given.

use std::io::{BufRead, Write};

/// Print `profiles` as a numbered list and read a 1-based choice.
///
/// Returns `None` when there is nothing to choose from or the answer is not a
/// valid index. Write failures on `out` are ignored.
pub fn pick_profile<R: BufRead, W: Write>(
    profiles: &[String],
    mut input: R,
    mut out: W,
) -> Option<String> {
    if profiles.is_empty() {
        let _ = writeln!(out, "No profiles found");
        return None;
    }

    for (i, profile) in profiles.iter().enumerate() {
        let _ = writeln!(out, "{}) {}", i + 1, profile);
    }
    let _ = write!(out, "Select profile: ");
    let _ = out.flush();

    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        line.clear();
    }

    match line.trim().parse::<usize>() {
        Ok(choice) if (1..=profiles.len()).contains(&choice) => Some(profiles[choice - 1].clone()),
        _ => {
            let _ = writeln!(out, "Invalid choice");
            None
        }
    }
}
