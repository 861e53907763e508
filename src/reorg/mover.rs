//! Single file relocation.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::log;

/// What to do when the destination of a move already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the destination, as a plain rename does.
    #[default]
    Overwrite,
    /// Leave both files where they are.
    Skip,
}

/// Result of one [`move_file`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Source does not exist. Not an error.
    Missing,
    /// Destination exists and the policy is [`ConflictPolicy::Skip`].
    Skipped,
    /// An I/O error was logged; the source stays in place.
    Failed,
}

/// Move `src` to `dst`, creating `dst`'s parent directories.
pub fn move_file(src: &Path, dst: &Path, policy: ConflictPolicy) -> MoveOutcome {
    if !src.exists() {
        return MoveOutcome::Missing;
    }

    if dst.exists() {
        match policy {
            ConflictPolicy::Skip => {
                log!("warn"; "skipping {}: {} already exists", src.display(), dst.display());
                return MoveOutcome::Skipped;
            }
            ConflictPolicy::Overwrite => {
                log!("warn"; "overwriting {}", dst.display());
            }
        }
    }

    match relocate(src, dst) {
        Ok(()) => MoveOutcome::Moved,
        Err(e) => {
            log!("error"; "failed to move {} to {}: {}", src.display(), dst.display(), e);
            MoveOutcome::Failed
        }
    }
}

fn relocate(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::rename(src, dst) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(src, dst)?;
            fs::remove_file(src)
        }
        other => other,
    }
}
