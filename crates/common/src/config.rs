//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::MatchreelResult;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Timing defaults for sequenced playback.
    pub sequencing: SequencingDefaults,

    /// Defaults for the trim editor.
    pub trim: TrimDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Timing defaults applied when a playlist does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencingDefaults {
    /// Seconds subtracted from a resolved event time so playback starts
    /// slightly before the moment.
    pub pre_roll_secs: f64,

    /// Fixed extraction length when no trim window is saved.
    pub fixed_clip_secs: f64,

    /// Optional post-roll added after the event point instead of the fixed
    /// clip length.
    pub post_roll_secs: Option<f64>,

    /// How long a thumbnail-only clip stays on screen.
    pub thumbnail_hold_secs: f64,

    /// Hold duration for clips with no playable media and no thumbnail.
    pub missing_media_fallback_secs: f64,

    /// Whether generated overlays (opening, transitions, closing) are shown.
    pub include_overlays: bool,

    /// Whether a finished sequence restarts from the top.
    pub loop_enabled: bool,

    /// Start playback muted (required by most autoplay policies).
    pub muted: bool,
}

/// Defaults for interactive trim editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrimDefaults {
    /// Ruler scale: how many pixels represent one second.
    pub pixels_per_second: f64,

    /// Half-width of the default trim window around the event.
    pub default_offset_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "matchreel=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sequencing: SequencingDefaults::default(),
            trim: TrimDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SequencingDefaults {
    fn default() -> Self {
        Self {
            pre_roll_secs: 3.0,
            fixed_clip_secs: 8.0,
            post_roll_secs: None,
            thumbnail_hold_secs: 6.0,
            missing_media_fallback_secs: 4.0,
            include_overlays: true,
            loop_enabled: false,
            muted: true,
        }
    }
}

impl Default for TrimDefaults {
    fn default() -> Self {
        Self {
            pixels_per_second: 12.0,
            default_offset_secs: 15.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> MatchreelResult<()> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("matchreel").join("config.json")
}
