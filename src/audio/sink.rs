//! Utilities for opening a `Track` as a decoded `rodio` source and
//! connecting it to the output mixer.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::Track;

use super::types::{AudioFormat, EngineError};

pub(super) type TrackSource = Decoder<BufReader<File>>;

/// A decoded track that has not been connected to the output yet.
pub(super) struct OpenedTrack {
    pub source: TrackSource,
    pub sample_rate: u32,
    pub length: Option<Duration>,
}

/// Open and probe `track`, choosing the decoder from its extension.
pub(super) fn open_track(track: &Track) -> Result<OpenedTrack, EngineError> {
    let format = AudioFormat::from_path(&track.path)?;

    let file = File::open(&track.path).map_err(|source| EngineError::Io {
        path: track.path.clone(),
        source,
    })?;
    let byte_len = file.metadata().map(|m| m.len()).ok();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_hint(format.hint())
        .with_seekable(true);
    if let Some(len) = byte_len {
        builder = builder.with_byte_len(len);
    }

    let source = builder.build().map_err(|e| EngineError::Decode {
        path: track.path.clone(),
        reason: e.to_string(),
    })?;

    Ok(OpenedTrack {
        sample_rate: source.sample_rate(),
        length: source.total_duration(),
        source,
    })
}

/// Create a playing `Sink` for `source` at the given amplitude.
pub(super) fn connect_sink(output: &OutputStream, source: TrackSource, amplitude: f32) -> Sink {
    let sink = Sink::connect_new(output.mixer());
    sink.set_volume(amplitude);
    sink.append(source);
    sink.play();
    sink
}
