//! Playback engine adapter.
//!
//! `PlaybackEngine` is the seam the session drives; `RodioEngine` is the
//! implementation used at runtime.

mod engine;
mod player;
mod sink;
mod types;

pub use engine::PlaybackEngine;
pub use player::RodioEngine;
pub use types::{AudioFormat, EngineError, VolumeLevel};
