//! Versioned project-directory allocation.
//! Finds the first non-colliding sibling of a desired path by appending a
//! numeric suffix. The allocator only probes; creating the directory is
//! the caller's next step.

use crate::constants::MAX_DIR_SUFFIXES;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Returns the desired path if it does not exist, otherwise the first
/// absent sibling among `desired-1`, `desired-2`, ...
///
/// The returned path is guaranteed absent at the moment of return but is
/// not created here, so a narrow race window exists under concurrent
/// invocations.
///
/// # Errors
/// * `Error::AllocationExhausted` after `MAX_DIR_SUFFIXES` occupied
///   candidates, which bounds disk probing when every stat reports
///   "exists" (e.g. a permissions problem)
pub fn allocate<P: AsRef<Path>>(desired: P) -> Result<PathBuf> {
    let desired = desired.as_ref();
    if !desired.exists() {
        return Ok(desired.to_path_buf());
    }

    for suffix in 1..=MAX_DIR_SUFFIXES {
        let candidate = numbered_sibling(desired, suffix);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::AllocationExhausted {
        base: desired.display().to_string(),
        limit: MAX_DIR_SUFFIXES,
    })
}

fn numbered_sibling(desired: &Path, suffix: u32) -> PathBuf {
    let mut name = desired.as_os_str().to_os_string();
    name.push(format!("-{}", suffix));
    PathBuf::from(name)
}
