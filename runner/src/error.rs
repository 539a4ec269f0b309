use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while locating command files
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("unable to determine the current directory: {0}")]
    UnknownWorkingDirectory(#[source] std::io::Error),
    #[error(
        "no command file found (QWER.md or qwer.md) in {} or its parent directories",
        .0.display()
    )]
    NotFound(PathBuf),
}

/// Errors that can occur while running a command's script
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to create temp file: {0}")]
    TempFile(#[source] std::io::Error),
    #[error("failed to write to temp file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to make temp file executable {}: {source}", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{status}")]
    Failed { status: ExitStatus },
}
