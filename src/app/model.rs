//! Session model types: `PlaybackState`, `NextPolicy` and `SessionModel`.

/// The playback state of the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

/// How the next track is chosen when the current one ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NextPolicy {
    #[default]
    Sequential,
    /// Repeat the current track.
    Single,
    /// Uniform pick over the whole catalog; may pick the current track again.
    Random,
}

impl NextPolicy {
    /// Toggle towards `chosen`: selecting the active policy again falls back
    /// to `Sequential`.
    pub fn toggled(self, chosen: NextPolicy) -> NextPolicy {
        if self == chosen {
            NextPolicy::Sequential
        } else {
            chosen
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Single => "Single",
            Self::Random => "Random",
        }
    }
}

/// Index of the track that follows `current` in a catalog of `len` tracks.
///
/// `pick` draws a uniform index in `0..len` for the random policy.
/// `len` must be non-zero.
pub fn next_index(
    policy: NextPolicy,
    current: usize,
    len: usize,
    pick: &mut dyn FnMut(usize) -> usize,
) -> usize {
    debug_assert!(len > 0);
    match policy {
        NextPolicy::Sequential => (current + 1) % len,
        NextPolicy::Single => current.min(len - 1),
        NextPolicy::Random => pick(len).min(len - 1),
    }
}

/// Everything the controller knows about the running session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionModel {
    pub state: PlaybackState,
    /// Index of the selected track; `None` until the first selection.
    pub current: Option<usize>,
    /// Elapsed seconds.
    pub position: u64,
    /// Track length in seconds, 0 when unknown.
    pub duration: u64,
    /// Volume in percent, 0..=100.
    pub volume: u8,
    pub policy: NextPolicy,
}

impl SessionModel {
    pub fn new(volume: u8, policy: NextPolicy) -> Self {
        Self {
            state: PlaybackState::Stopped,
            current: None,
            position: 0,
            duration: 0,
            volume: volume.min(100),
            policy,
        }
    }

    /// Elapsed share of the track in percent, unclamped. 0 when the length is unknown.
    pub fn progress(&self) -> u64 {
        if self.duration == 0 {
            0
        } else {
            self.position.saturating_mul(100) / self.duration
        }
    }
}

impl Default for SessionModel {
    fn default() -> Self {
        Self::new(100, NextPolicy::Sequential)
    }
}
