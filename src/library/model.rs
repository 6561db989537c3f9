use std::path::{Path, PathBuf};

/// Tag fields read from an audio file. Each field is present or absent on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<u32>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub lyrics: Option<String>,
}

impl TrackMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    /// `None` when the file carries no readable tag.
    pub metadata: Option<TrackMetadata>,
    /// Playlist label, e.g. `[3] Artist - Title`.
    pub display: String,
}

/// The ordered, read-only list of playable tracks for one session.
///
/// Indices are 0-based and stable for the lifetime of the catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(root: PathBuf, tracks: Vec<Track>) -> Self {
        Self { root, tracks }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
