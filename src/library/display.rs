use std::path::Path;

use crate::config::TrackDisplayField;

use super::model::TrackMetadata;

/// Path of `path` relative to the scanned `root`, or its file name when the
/// root is the file itself.
pub fn relative_name(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    }
}

/// Build the text part of a playlist label from the configured `fields`.
///
/// Tag fields are only used when `meta` is present; when no part could be
/// produced the path relative to `root` is used instead.
pub fn display_from_fields(
    path: &Path,
    root: &Path,
    meta: Option<&TrackMetadata>,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    let tag = |value: Option<&String>| {
        value
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => meta.and_then(|m| tag(m.title.as_ref())),
            TrackDisplayField::Artist => meta.and_then(|m| tag(m.artist.as_ref())),
            TrackDisplayField::Album => meta.and_then(|m| tag(m.album.as_ref())),
            TrackDisplayField::Filename => path
                .file_stem()
                .and_then(|s| s.to_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            TrackDisplayField::Path => Some(relative_name(path, root)),
        };
        if let Some(part) = part {
            parts.push(part);
        }
    }

    if parts.is_empty() {
        relative_name(path, root)
    } else {
        parts.join(sep)
    }
}

/// Prefix a label with its 1-based playlist position.
pub fn numbered(index: usize, text: &str) -> String {
    format!("[{}] {}", index + 1, text)
}
