use std::fs::File;
use std::path::Path;

use lofty::prelude::{ItemKey, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::LibraryError;
use super::display::{display_from_fields, numbered};
use super::model::{Catalog, Track, TrackMetadata};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

fn tag_string(tag: &lofty::tag::Tag, key: ItemKey) -> Option<String> {
    tag.get_string(&key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse the leading number of a tag value ("3/12" -> 3, "1999-04-01" -> 1999).
fn leading_number(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Read the tag fields of `path`. Missing or unparseable tags yield `None`.
pub(crate) fn read_metadata(path: &Path) -> Option<TrackMetadata> {
    let tagged = lofty::read_from_path(path).ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;

    let meta = TrackMetadata {
        artist: tag_string(tag, ItemKey::TrackArtist),
        title: tag_string(tag, ItemKey::TrackTitle),
        album: tag_string(tag, ItemKey::AlbumTitle),
        track_number: tag_string(tag, ItemKey::TrackNumber).and_then(|v| leading_number(&v)),
        genre: tag_string(tag, ItemKey::Genre),
        year: tag_string(tag, ItemKey::Year)
            .or_else(|| tag_string(tag, ItemKey::RecordingDate))
            .and_then(|v| leading_number(&v)),
        lyrics: tag_string(tag, ItemKey::Lyrics),
    };

    if meta.is_empty() { None } else { Some(meta) }
}

/// Walk `root` (a directory or a single file) and collect every supported
/// audio file in path order.
///
/// Unreadable entries are skipped; only an unusable `root` is an error.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Result<Catalog, LibraryError> {
    std::fs::metadata(root).map_err(|source| LibraryError::InvalidPath {
        path: root.to_path_buf(),
        source,
    })?;

    let mut tracks: Vec<Track> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(LibraryError::Walk(err)),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }
        if File::open(path).is_err() {
            tracing::debug!(path = %path.display(), "skipping unreadable file");
            continue;
        }

        let metadata = read_metadata(path);
        let text = display_from_fields(
            path,
            root,
            metadata.as_ref(),
            &settings.display_fields,
            &settings.display_separator,
        );

        tracks.push(Track {
            path: path.to_path_buf(),
            metadata,
            display: numbered(tracks.len(), &text),
        });
    }

    tracing::info!(root = %root.display(), count = tracks.len(), "library scanned");
    Ok(Catalog::new(root.to_path_buf(), tracks))
}
