//! Song catalog: scanning a directory (or a single file) for playable audio.
//!
//! The catalog is built once at startup and is read-only afterwards.

use std::path::PathBuf;

mod display;
mod model;
mod scan;

pub use model::{Catalog, Track, TrackMetadata};
pub use scan::scan;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("can't open your music directory/file {}: {source}", path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("can't get song list: {0}")]
    Walk(#[from] walkdir::Error),
}
