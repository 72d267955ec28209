//! Playlist: the ordered clip list handed to the playback sequencer.
//!
//! Stored as a single `playlist.json` document. The file is the boundary
//! with the curation UI; everything in it is caller-owned data that the
//! playback core reads but never mutates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bounds::MediaBounds;
use crate::clip::{ClipRef, SourceKind};
use crate::trim::MIN_CLIP_DURATION_SECS;

/// Current playlist schema version.
pub const PLAYLIST_SCHEMA_VERSION: &str = "1.0";

/// An ordered list of clips plus the default bounds they play against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Schema version for forward compatibility.
    pub version: String,

    /// Human-readable playlist name.
    pub name: String,

    /// Bounds used for clips that do not carry their own.
    #[serde(default)]
    pub default_bounds: MediaBounds,

    /// The clips, in playback order.
    pub clips: Vec<ClipRef>,
}

impl Playlist {
    /// Create an empty playlist.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: PLAYLIST_SCHEMA_VERSION.to_string(),
            name: name.into(),
            default_bounds: MediaBounds::default(),
            clips: Vec::new(),
        }
    }

    /// Parse a playlist from JSON.
    pub fn from_json(json: &str) -> Result<Self, PlaylistError> {
        serde_json::from_str(json).map_err(|e| PlaylistError::Parse {
            path: PathBuf::from("<inline>"),
            source: e,
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PlaylistError> {
        serde_json::to_string_pretty(self).map_err(|e| PlaylistError::Parse {
            path: PathBuf::from("<inline>"),
            source: e,
        })
    }

    /// Load a playlist from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlaylistError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| PlaylistError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| PlaylistError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the playlist to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlaylistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PlaylistError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| PlaylistError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Bounds a given clip plays against: its own, or the playlist default.
    pub fn effective_bounds(&self, clip: &ClipRef) -> MediaBounds {
        clip.bounds.unwrap_or(self.default_bounds)
    }

    /// Structural validation. Returns one message per problem found;
    /// empty means the playlist is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];

        let mut seen = std::collections::HashSet::new();
        for clip in &self.clips {
            if !seen.insert(clip.id.as_str()) {
                errors.push(format!("Duplicate clip id: {}", clip.id));
            }

            match clip.source_kind {
                SourceKind::PreExtracted | SourceKind::FullMatchVideo => {
                    if clip.media_url.is_none() {
                        errors.push(format!("Clip {} has no media URL", clip.id));
                    }
                }
                SourceKind::ThumbnailOnly => {
                    if clip.thumbnail_url.is_none() {
                        errors.push(format!("Thumbnail-only clip {} has no thumbnail", clip.id));
                    }
                }
            }

            let bounds = self.effective_bounds(clip);
            if let Some(d) = bounds.duration_secs {
                if d <= 0.0 {
                    errors.push(format!("Clip {} has non-positive duration bounds", clip.id));
                }
            }

            if let Some(trim) = clip.trim {
                if trim.duration() < MIN_CLIP_DURATION_SECS - 1e-9 {
                    errors.push(format!(
                        "Clip {} trim window is shorter than {MIN_CLIP_DURATION_SECS}s",
                        clip.id
                    ));
                }
                if !trim.is_valid(bounds.effective_duration_secs()) {
                    errors.push(format!("Clip {} trim window is out of bounds", clip.id));
                }
            }
        }

        errors
    }
}

/// Errors that can occur when working with playlist files.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::EventTiming;
    use crate::trim::{TrimMode, TrimWindow};

    fn sample_playlist() -> Playlist {
        let mut playlist = Playlist::new("Derby highlights");
        playlist.default_bounds = MediaBounds::known(5400.0);
        playlist.clips = vec![
            ClipRef::pre_extracted(
                "goal-37",
                "Goal — 37'",
                "https://cdn/goal-37.mp4",
                EventTiming::from_match_clock(37, Some(12)),
            ),
            ClipRef::full_match(
                "chance-64",
                "Big chance — 64'",
                "https://cdn/full-match.mp4",
                EventTiming::from_match_clock(64, None),
            ),
            ClipRef::thumbnail_only(
                "card-71",
                "Yellow card — 71'",
                "https://cdn/card-71.jpg",
                EventTiming::from_match_clock(71, None),
            ),
        ];
        playlist
    }

    #[test]
    fn json_roundtrip() {
        let playlist = sample_playlist();
        let json = playlist.to_json().unwrap();
        let back = Playlist::from_json(&json).unwrap();
        assert_eq!(playlist, back);
    }

    #[test]
    fn valid_playlist_has_no_errors() {
        assert!(sample_playlist().validate().is_empty());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut playlist = sample_playlist();
        let duplicate = playlist.clips[0].clone();
        playlist.clips.push(duplicate);
        let errors = playlist.validate();
        assert!(errors.iter().any(|e| e.contains("Duplicate clip id")));
    }

    #[test]
    fn missing_media_url_is_reported() {
        let mut playlist = sample_playlist();
        playlist.clips[1].media_url = None;
        let errors = playlist.validate();
        assert!(errors.iter().any(|e| e.contains("no media URL")));
    }

    #[test]
    fn short_trim_window_is_reported() {
        let mut playlist = sample_playlist();
        playlist.clips[0].trim = Some(TrimWindow {
            mode: TrimMode::Relative,
            start_secs: -1.0,
            end_secs: 1.0,
        });
        let errors = playlist.validate();
        assert!(errors.iter().any(|e| e.contains("shorter than")));
    }

    #[test]
    fn per_clip_bounds_override_default() {
        let mut playlist = sample_playlist();
        playlist.clips[1].bounds = Some(MediaBounds::with_coverage(2700.0, 45, 90));
        let bounds = playlist.effective_bounds(&playlist.clips[1]);
        assert_eq!(bounds.coverage_minutes(), (45, 90));

        let default = playlist.effective_bounds(&playlist.clips[0]);
        assert_eq!(default.coverage_minutes(), (0, 90));
    }

    #[test]
    fn load_and_save_roundtrip() {
        let playlist = sample_playlist();
        let dir = std::env::temp_dir().join("matchreel-playlist-test");
        let path = dir.join("playlist.json");
        playlist.save(&path).unwrap();
        let back = Playlist::load(&path).unwrap();
        assert_eq!(playlist, back);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Playlist::load("/nonexistent/playlist.json");
        assert!(matches!(result.unwrap_err(), PlaylistError::Io { .. }));
    }
}
