//! External editor handoff.

use crate::constants::EDITOR_COMMAND;
use crate::error::Result;
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens the new project directory (and entry file, if any) in the
/// external editor.
///
/// Fire-and-forget: the child is spawned, never waited on, and its exit
/// status is not surfaced. A launch failure is the caller's to report;
/// it must not unwind any completed work.
pub fn open_project(root: &Path, entry_file: Option<&Path>) -> Result<()> {
    let mut command = Command::new(EDITOR_COMMAND);
    command.arg("--disable-workspace-trust").arg("-n").arg(root);
    if let Some(entry) = entry_file {
        command.arg(entry);
    }
    command.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
    Ok(())
}
