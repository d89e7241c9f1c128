//! Error types for environment loading.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading an env file.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// The working directory could not be determined.
    #[error("Failed to determine the working directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// The env file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EnvError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
