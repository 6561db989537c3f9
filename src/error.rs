//! Failures that end the program before or outside the interactive session.

use std::path::PathBuf;

use crate::library::LibraryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("can't resolve the music path {}: {source}", path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] LibraryError),
    #[error("couldn't find any songs to play in {}", .0.display())]
    NoSongs(PathBuf),
    #[error("can't initialize the terminal: {0}")]
    Terminal(#[source] std::io::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
