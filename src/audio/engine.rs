use crate::library::Track;

use super::types::EngineError;

/// The single point of contact with the audio backend.
///
/// Implementations own at most one active stream at a time. Every method is
/// called from the control loop; none of them may terminate the process.
pub trait PlaybackEngine {
    /// Release any active stream, then start `track` from the beginning.
    ///
    /// Returns the track length in whole seconds (0 when unknown). On error
    /// no stream is active.
    fn play(&mut self, track: &Track) -> Result<u64, EngineError>;

    /// Suspend or resume the active stream. A no-op when nothing is loaded.
    fn pause(&mut self, paused: bool);

    /// Move the active stream to `position` seconds.
    fn seek(&mut self, position: u64) -> Result<(), EngineError>;

    /// Apply a 0..=100 volume to the active stream and every later one.
    fn set_volume(&mut self, percent: u8);

    /// Native sample rate of the active stream.
    fn sample_rate(&self) -> Option<u32>;

    /// Release the active stream, if any.
    fn stop(&mut self);
}
