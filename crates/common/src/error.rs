//! Error types shared across MatchReel crates.

use std::path::PathBuf;

/// Top-level error type for MatchReel operations.
#[derive(Debug, thiserror::Error)]
pub enum MatchreelError {
    #[error("Playlist error: {message}")]
    Playlist { message: String },

    #[error("Sequence error: {message}")]
    Sequence { message: String },

    #[error("Trim error: {message}")]
    Trim { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MatchreelError.
pub type MatchreelResult<T> = Result<T, MatchreelError>;

impl MatchreelError {
    pub fn playlist(msg: impl Into<String>) -> Self {
        Self::Playlist {
            message: msg.into(),
        }
    }

    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence {
            message: msg.into(),
        }
    }

    pub fn trim(msg: impl Into<String>) -> Self {
        Self::Trim {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

/// Returned by a media backend when the environment refuses to start
/// playback (e.g. a browser autoplay policy). Callers swallow this and
/// keep their current state; it never aborts a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("playback start rejected by media backend")]
pub struct PlaybackRejected;
