//! Render-ready projection of the session, rebuilt every loop iteration.

use crate::audio::PlaybackEngine;
use crate::library::TrackMetadata;

use super::model::PlaybackState;
use super::session::Session;

/// One row of the info panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InfoLine {
    Field { label: &'static str, value: String },
    Text(String),
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressView {
    pub state: PlaybackState,
    /// 0..=100
    pub percent: u16,
    /// `m:ss / m:ss`
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct SessionView<'a> {
    pub info: Vec<InfoLine>,
    pub progress: ProgressView,
    pub volume: u8,
    pub playlist: Vec<&'a str>,
    /// Highlighted playlist row.
    pub cursor: usize,
    pub now_playing: Option<usize>,
}

/// Format whole seconds as `m:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn field(label: &'static str, value: impl Into<String>) -> InfoLine {
    InfoLine::Field {
        label,
        value: value.into(),
    }
}

fn metadata_lines(meta: &TrackMetadata) -> Vec<InfoLine> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let number = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
    vec![
        field("Artist", text(&meta.artist)),
        field("Title", text(&meta.title)),
        field("Album", text(&meta.album)),
        field("Track", number(meta.track_number)),
        field("Genre", text(&meta.genre)),
        field("Year", number(meta.year)),
    ]
}

impl<'a, E: PlaybackEngine> Session<'a, E> {
    pub fn view(&self) -> SessionView<'a> {
        let model = self.model();
        let catalog = self.catalog();

        let mut info = Vec::new();
        if let Some(track) = model.current.filter(|_| self.is_loaded()).and_then(|i| catalog.get(i)) {
            match &track.metadata {
                Some(meta) => info.extend(metadata_lines(meta)),
                None => info.push(InfoLine::Text("No song info".to_string())),
            }
            let rate = self
                .engine()
                .sample_rate()
                .map(|r| r.to_string())
                .unwrap_or_default();
            info.push(field("SampleRate", rate));
            info.push(field("Next Order", model.policy.label()));
            if let Some(lyrics) = track.metadata.as_ref().and_then(|m| m.lyrics.as_deref()) {
                info.push(field("Lyrics", lyrics));
            }
        }
        info.extend(self.errors().iter().cloned().map(InfoLine::Error));

        SessionView {
            info,
            progress: ProgressView {
                state: model.state,
                percent: model.progress().min(100) as u16,
                label: format!(
                    "{} / {}",
                    format_clock(model.position),
                    format_clock(model.duration)
                ),
            },
            volume: model.volume,
            playlist: catalog.tracks().iter().map(|t| t.display.as_str()).collect(),
            cursor: self.cursor(),
            now_playing: model.current,
        }
    }
}
