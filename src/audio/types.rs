//! Audio-related small types: errors, the container format tag and the
//! volume curve.

use std::path::{Path, PathBuf};

/// Failures the playback engine hands back to the session.
///
/// None of them are fatal; the session shows the message and carries on.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("can't open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("song format not supported: {0}")]
    UnsupportedFormat(String),
    #[error("can't decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("seek to {requested}s is beyond the end of the song ({length}s)")]
    SeekOutOfRange { requested: u64, length: u64 },
    #[error("seek failed: {0}")]
    Seek(String),
    #[error("audio output unavailable: {0}")]
    Output(String),
    #[error("no song is loaded")]
    NoActiveStream,
}

/// Decoder family selected from a file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    /// Vorbis in an Ogg or WebM container (`.ogg`, `.weba`, `.webm`).
    Vorbis { webm: bool },
    Flac,
}

impl AudioFormat {
    /// Pick the decoder family for `path`. The match on the extension is exact.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            "ogg" => Ok(Self::Vorbis { webm: false }),
            "weba" | "webm" => Ok(Self::Vorbis { webm: true }),
            "flac" => Ok(Self::Flac),
            other => Err(EngineError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    /// Container hint passed to the decoder probe.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Vorbis { webm: false } => "ogg",
            Self::Vorbis { webm: true } => "webm",
            Self::Flac => "flac",
        }
    }
}

/// Gain is an exponent applied to this base: 0 leaves samples untouched,
/// -5 divides the amplitude by 32.
pub const GAIN_BASE: f32 = 2.0;

/// Volume as applied to the output: a mute flag plus a gain exponent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolumeLevel {
    pub silent: bool,
    pub gain: f64,
}

impl VolumeLevel {
    /// Map a 0..=100 percentage onto the gain curve.
    ///
    /// `gain = -(100 - percent) / 100 * 5`, so 100% is 0 and 1% is -4.95.
    /// 0% mutes through `silent`, whatever the gain says.
    pub fn from_percent(percent: u8) -> Self {
        let percent = percent.min(100);
        Self {
            silent: percent == 0,
            gain: -f64::from(100 - percent) / 100.0 * 5.0,
        }
    }

    /// Linear amplitude factor handed to the sink.
    pub fn amplitude(self) -> f32 {
        if self.silent {
            0.0
        } else {
            GAIN_BASE.powf(self.gain as f32)
        }
    }
}

impl Default for VolumeLevel {
    fn default() -> Self {
        Self::from_percent(100)
    }
}
