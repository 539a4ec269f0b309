//! Locating the command files that apply to a directory.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::DiscoveryError;

/// Command file names, in order of preference within one directory.
pub const FILENAMES: [&str; 2] = ["QWER.md", "qwer.md"];

/// Entry whose presence marks a repository root.
pub const REPOSITORY_MARKER: &str = ".git";

/// The preferred command file in `dir`, if any.
pub fn command_file_in(dir: &Path) -> Option<PathBuf> {
    FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Collect command files from `start` upwards, most general first.
///
/// The walk stops at the first directory containing [`REPOSITORY_MARKER`],
/// after also checking that directory's parent once so a repository nested
/// directly inside another still picks up the outer file.
///
/// Note that this reads one directory above the repository root: a
/// `QWER.md` in the directory that holds the repository applies to every
/// command run inside it, and sorts before the repository's own file.
///
/// # Errors
///
/// Returns `DiscoveryError::NotFound` when no directory holds a command file.
pub fn find_sources(start: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    debug!("Searching for command files from {}", start.display());
    let mut sources = Vec::new();
    let mut dir = Some(start);

    while let Some(current) = dir {
        sources.extend(command_file_in(current));

        if current.join(REPOSITORY_MARKER).exists() {
            debug!("Repository root at {}", current.display());
            if let Some(parent) = current.parent() {
                sources.extend(command_file_in(parent));
            }
            break;
        }
        dir = current.parent();
    }

    if sources.is_empty() {
        return Err(DiscoveryError::NotFound(start.to_path_buf()));
    }

    sources.reverse();
    for source in &sources {
        info!("Found command file: {}", source.display());
    }
    Ok(sources)
}

/// [`find_sources`] starting at the process's working directory.
///
/// # Errors
///
/// Returns `DiscoveryError::UnknownWorkingDirectory` if the cwd cannot be
/// determined, or `DiscoveryError::NotFound` if no command file is found.
pub fn find_sources_from_cwd() -> Result<Vec<PathBuf>, DiscoveryError> {
    let cwd = std::env::current_dir().map_err(DiscoveryError::UnknownWorkingDirectory)?;
    find_sources(&cwd)
}
