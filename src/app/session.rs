//! The session controller: owns the `SessionModel` and drives the playback
//! engine from dispatched commands.

use crate::audio::{EngineError, PlaybackEngine};
use crate::config::{PolicySetting, Settings};
use crate::library::Catalog;

use super::model::{NextPolicy, PlaybackState, SessionModel, next_index};

/// One input to the controller. The event loop turns key presses and the
/// one-second timer into these.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play the track under the playlist cursor.
    SelectHighlighted,
    /// Play the track at the given catalog index.
    SelectTrack(usize),
    TogglePlayPause,
    Stop,
    CursorUp,
    CursorDown,
    /// Seek relative to the current position, in seconds.
    SeekBy(i64),
    TogglePolicy(NextPolicy),
    VolumeUp,
    VolumeDown,
    /// One second of wall time has passed.
    Tick,
}

/// Start-up values for a `Session`.
#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub volume: u8,
    pub volume_step: u8,
    pub policy: NextPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            volume: 100,
            volume_step: 5,
            policy: NextPolicy::Sequential,
        }
    }
}

impl From<&Settings> for SessionOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            volume: settings.audio.initial_volume,
            volume_step: settings.audio.volume_step,
            policy: match settings.playback.policy {
                PolicySetting::Sequential => NextPolicy::Sequential,
                PolicySetting::Single => NextPolicy::Single,
                PolicySetting::Random => NextPolicy::Random,
            },
        }
    }
}

/// Error lines kept for the info panel; older ones are dropped first.
const MAX_ERRORS: usize = 5;

type RandomPick = Box<dyn FnMut(usize) -> usize>;

/// Session controller.
///
/// All mutation happens through [`Session::dispatch`], one command at a time,
/// from the control loop.
pub struct Session<'a, E: PlaybackEngine> {
    catalog: &'a Catalog,
    engine: E,
    model: SessionModel,
    cursor: usize,
    /// Whether the current track opened successfully; its details are only
    /// shown in that case.
    loaded: bool,
    errors: Vec<String>,
    volume_step: u8,
    pick: RandomPick,
}

impl<'a, E: PlaybackEngine> Session<'a, E> {
    pub fn new(catalog: &'a Catalog, mut engine: E, options: SessionOptions) -> Self {
        let model = SessionModel::new(options.volume, options.policy);
        engine.set_volume(model.volume);
        Self {
            catalog,
            engine,
            model,
            cursor: 0,
            loaded: false,
            errors: Vec::new(),
            volume_step: options.volume_step.max(1),
            pick: Box::new(|len: usize| -> usize { rand::random_range(0..len) }),
        }
    }

    /// Replace the source of random picks used by the random policy.
    pub fn with_random_pick(mut self, pick: impl FnMut(usize) -> usize + 'static) -> Self {
        self.pick = Box::new(pick);
        self
    }

    pub fn model(&self) -> &SessionModel {
        &self.model
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn dispatch(&mut self, cmd: Command) {
        match cmd {
            Command::SelectHighlighted => self.select(self.cursor),
            Command::SelectTrack(i) => self.select(i),
            Command::TogglePlayPause => self.toggle_play_pause(),
            Command::Stop => self.stop(),
            Command::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Command::CursorDown => {
                if self.cursor + 1 < self.catalog.len() {
                    self.cursor += 1;
                }
            }
            Command::SeekBy(delta) => self.seek_by(delta),
            Command::TogglePolicy(chosen) => {
                self.model.policy = self.model.policy.toggled(chosen);
                tracing::info!(policy = self.model.policy.label(), "next-track policy changed");
            }
            Command::VolumeUp => self.change_volume(i16::from(self.volume_step)),
            Command::VolumeDown => self.change_volume(-i16::from(self.volume_step)),
            Command::Tick => self.tick(),
        }
    }

    /// Release the active stream. Called once before the terminal is restored.
    pub fn shutdown(&mut self) {
        self.engine.stop();
        tracing::info!("playback stopped for shutdown");
    }

    fn select(&mut self, index: usize) {
        let Some(track) = self.catalog.get(index) else {
            tracing::warn!(index, "ignoring selection outside the catalog");
            return;
        };

        self.model.position = 0;
        self.model.current = Some(index);

        match self.engine.play(track) {
            Ok(duration) => {
                self.model.duration = duration;
                self.model.state = PlaybackState::Playing;
                self.loaded = true;
                self.errors.clear();
                tracing::info!(index, path = %track.path.display(), duration, "playing");
            }
            Err(err) => {
                // Leaves the state alone; with an unknown length the tick never advances.
                self.model.duration = 0;
                self.loaded = false;
                tracing::warn!(index, path = %track.path.display(), error = %err, "can't play track");
                self.errors = vec![err.to_string()];
            }
        }
    }

    fn toggle_play_pause(&mut self) {
        // Without a successfully started track there is no stream to resume.
        if self.model.current.is_none() || !self.loaded {
            return;
        }
        match self.model.state {
            PlaybackState::Playing => {
                self.engine.pause(true);
                self.model.state = PlaybackState::Paused;
            }
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.engine.pause(false);
                self.model.state = PlaybackState::Playing;
            }
        }
    }

    fn stop(&mut self) {
        self.engine.pause(true);
        self.model.position = 0;
        self.model.state = PlaybackState::Stopped;

        // Rewind so a later play/pause resumes from the position shown.
        if self.model.current.is_some() {
            match self.engine.seek(0) {
                Ok(()) | Err(EngineError::NoActiveStream) => {}
                Err(err) => self.report(err),
            }
        }
    }

    fn seek_by(&mut self, delta: i64) {
        if self.model.current.is_none() {
            return;
        }

        let target = self.model.position.saturating_add_signed(delta);
        self.model.position = if self.model.duration > 0 {
            target.min(self.model.duration)
        } else {
            target
        };

        if let Err(err) = self.engine.seek(self.model.position) {
            self.report(err);
        }
    }

    fn change_volume(&mut self, delta: i16) {
        let volume = (i16::from(self.model.volume) + delta).clamp(0, 100);
        self.model.volume = volume as u8;
        self.engine.set_volume(self.model.volume);
        tracing::debug!(volume = self.model.volume, "volume changed");
    }

    fn tick(&mut self) {
        match self.model.state {
            PlaybackState::Playing if !self.loaded => {}
            PlaybackState::Playing => {
                self.model.position += 1;
                if self.model.duration > 0 && self.model.progress() >= 100 {
                    self.advance();
                }
            }
            PlaybackState::Stopped => self.model.position = 0,
            PlaybackState::Paused => {}
        }
    }

    /// Move on to the next track per the active policy.
    fn advance(&mut self) {
        let Some(last) = self.model.current else {
            return;
        };
        let len = self.catalog.len();
        if len == 0 {
            return;
        }

        let next = next_index(self.model.policy, last, len, &mut *self.pick);
        // The cursor moves by the same offset as the playing index.
        let shifted = self.cursor as i64 + next as i64 - last as i64;
        self.cursor = shifted.clamp(0, len as i64 - 1) as usize;

        tracing::debug!(from = last, to = next, policy = self.model.policy.label(), "advancing");
        self.select(next);
    }

    fn report(&mut self, err: EngineError) {
        tracing::warn!(error = %err, "playback error");
        if self.errors.len() >= MAX_ERRORS {
            self.errors.remove(0);
        }
        self.errors.push(err.to_string());
    }
}
