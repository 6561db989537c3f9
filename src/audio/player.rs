use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::library::Track;

use super::engine::PlaybackEngine;
use super::sink::{connect_sink, open_track};
use super::types::{EngineError, VolumeLevel};

struct ActiveStream {
    sink: Sink,
    sample_rate: u32,
    length: Option<Duration>,
}

impl ActiveStream {
    /// Stream length in frames at the native rate.
    fn length_frames(&self) -> Option<u64> {
        self.length
            .map(|len| (len.as_secs_f64() * f64::from(self.sample_rate)).floor() as u64)
    }
}

/// `PlaybackEngine` backed by a `rodio` output stream.
///
/// The output device is opened on the first successful `play` at that
/// track's native sample rate and reused for the rest of the session; the
/// mixer converts later tracks with a different rate to it.
///
/// Pause, seek and volume changes go through the sink's controls, which the
/// mixer applies from its own callback under the sink's lock.
pub struct RodioEngine {
    // Dropped before `output`.
    active: Option<ActiveStream>,
    output: Option<OutputStream>,
    volume: VolumeLevel,
}

impl RodioEngine {
    pub fn new() -> Self {
        Self {
            active: None,
            output: None,
            volume: VolumeLevel::default(),
        }
    }

    fn release(&mut self) {
        if let Some(active) = self.active.take() {
            active.sink.stop();
        }
    }

    fn ensure_output(&mut self, sample_rate: u32) -> Result<&OutputStream, EngineError> {
        if self.output.is_none() {
            let mut stream = OutputStreamBuilder::from_default_device()
                .map_err(|e| EngineError::Output(e.to_string()))?
                .with_sample_rate(sample_rate)
                .open_stream_or_fallback()
                .map_err(|e| EngineError::Output(e.to_string()))?;
            // rodio logs to stderr when the stream is dropped, which would land on the TUI.
            stream.log_on_drop(false);
            tracing::info!(sample_rate, "audio output initialized");
            self.output = Some(stream);
        }
        self.output
            .as_ref()
            .ok_or_else(|| EngineError::Output("output stream missing".to_string()))
    }
}

impl Default for RodioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEngine for RodioEngine {
    fn play(&mut self, track: &Track) -> Result<u64, EngineError> {
        self.release();

        let opened = open_track(track)?;
        let amplitude = self.volume.amplitude();
        let output = self.ensure_output(opened.sample_rate)?;
        let sink = connect_sink(output, opened.source, amplitude);

        let seconds = opened.length.map_or(0, |len| len.as_secs());
        tracing::debug!(
            path = %track.path.display(),
            sample_rate = opened.sample_rate,
            seconds,
            "stream started"
        );
        self.active = Some(ActiveStream {
            sink,
            sample_rate: opened.sample_rate,
            length: opened.length,
        });
        Ok(seconds)
    }

    fn pause(&mut self, paused: bool) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if paused {
            active.sink.pause();
        } else {
            active.sink.play();
        }
    }

    fn seek(&mut self, position: u64) -> Result<(), EngineError> {
        let active = self.active.as_ref().ok_or(EngineError::NoActiveStream)?;

        let target = position.saturating_mul(u64::from(active.sample_rate));
        if let Some(len) = active.length_frames() {
            if target > len {
                return Err(EngineError::SeekOutOfRange {
                    requested: position,
                    length: len / u64::from(active.sample_rate.max(1)),
                });
            }
        }

        active
            .sink
            .try_seek(Duration::from_secs(position))
            .map_err(|e| EngineError::Seek(e.to_string()))
    }

    fn set_volume(&mut self, percent: u8) {
        self.volume = VolumeLevel::from_percent(percent);
        if let Some(active) = self.active.as_ref() {
            active.sink.set_volume(self.volume.amplitude());
        }
    }

    fn sample_rate(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.sample_rate)
    }

    fn stop(&mut self) {
        self.release();
    }
}
