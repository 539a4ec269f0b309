//! Running a command's code as a standalone script.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use std::process::Command as ProcessCommand;

use log::info;

use crate::error::RunError;

/// Interpreter directive used when the code does not bring its own.
pub const DEFAULT_INTERPRETER: &str = "#!/usr/bin/env bash";

/// How scripts are materialised on disk.
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    /// Prepended (with a newline) to code that lacks a `#!` line.
    pub interpreter: String,
    /// Temp file name prefix; a random part and `.sh` follow it.
    pub prefix: String,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        ScriptOptions {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            prefix: "qwer-".to_string(),
        }
    }
}

/// The script text for `code`, with an interpreter directive guaranteed.
pub fn prepare<'a>(code: &'a str, options: &ScriptOptions) -> Cow<'a, str> {
    if code.starts_with("#!") {
        Cow::Borrowed(code)
    } else {
        Cow::Owned(format!("{}\n{}", options.interpreter, code))
    }
}

/// Write `code` to a temporary executable, run it with `args` on the current
/// stdin/stdout/stderr and wait for it. The temp file is removed afterwards,
/// whatever the outcome.
///
/// # Errors
///
/// Returns a `RunError` if the script cannot be written or started, or
/// `RunError::Failed` if it exits unsuccessfully.
pub fn run(code: &str, args: &[String], options: &ScriptOptions) -> Result<(), RunError> {
    let mut file = tempfile::Builder::new()
        .prefix(&options.prefix)
        .suffix(".sh")
        .tempfile()
        .map_err(RunError::TempFile)?;

    file.write_all(prepare(code, options).as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| RunError::Write {
            path: file.path().to_path_buf(),
            source,
        })?;

    // Close the handle so the kernel does not refuse to execute a file open
    // for writing; the path guard still deletes it on drop.
    let script = file.into_temp_path();
    make_executable(&script)?;

    if args.is_empty() {
        info!("Running: {}", script.display());
    } else {
        info!("Running: {} {}", script.display(), args.join(" "));
    }

    let status = ProcessCommand::new(&*script)
        .args(args)
        .status()
        .map_err(|source| RunError::Spawn {
            path: script.to_path_buf(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(RunError::Failed { status })
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), RunError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|source| {
        RunError::Permissions {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), RunError> {
    Ok(())
}
