//! Trim windows: the user-adjustable extraction range around an event.
//!
//! A window is expressed either as offsets relative to the event time
//! (`Relative`, e.g. `[-15, +15]`) or as two absolute media timestamps
//! (`Absolute`). Conversions between the two pivot on the event time and
//! are lossless.

use serde::{Deserialize, Serialize};

/// Shortest extraction a trim window may describe.
pub const MIN_CLIP_DURATION_SECS: f64 = 5.0;

/// Largest offset from the event allowed in relative mode.
pub const MAX_OFFSET_SECS: f64 = 30.0;

/// Half-width of the default window around the event.
pub const DEFAULT_OFFSET_SECS: f64 = 15.0;

/// Coordinate mode of a trim window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimMode {
    /// Start/end are second offsets around the event time.
    Relative,
    /// Start/end are absolute media timestamps.
    Absolute,
}

/// A user-adjustable extraction window for one clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimWindow {
    pub mode: TrimMode,
    pub start_secs: f64,
    pub end_secs: f64,
}

impl TrimWindow {
    /// The default relative window: `[-15, +15]` around the event.
    pub fn default_relative() -> Self {
        Self {
            mode: TrimMode::Relative,
            start_secs: -DEFAULT_OFFSET_SECS,
            end_secs: DEFAULT_OFFSET_SECS,
        }
    }

    /// The default window in absolute coordinates: `[event-15, event+15]`
    /// clamped into the asset.
    pub fn default_absolute(event_secs: f64, duration_secs: f64) -> Self {
        let start = (event_secs - DEFAULT_OFFSET_SECS).max(0.0);
        let end = (event_secs + DEFAULT_OFFSET_SECS)
            .min(duration_secs)
            .max(start + MIN_CLIP_DURATION_SECS);
        Self {
            mode: TrimMode::Absolute,
            start_secs: start,
            end_secs: end,
        }
    }

    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    /// Convert to absolute coordinates, pivoting on the event time.
    /// Already-absolute windows are returned unchanged.
    pub fn to_absolute(&self, event_secs: f64) -> Self {
        match self.mode {
            TrimMode::Absolute => *self,
            TrimMode::Relative => Self {
                mode: TrimMode::Absolute,
                start_secs: event_secs + self.start_secs,
                end_secs: event_secs + self.end_secs,
            },
        }
    }

    /// Convert to relative coordinates, pivoting on the event time.
    /// Already-relative windows are returned unchanged.
    pub fn to_relative(&self, event_secs: f64) -> Self {
        match self.mode {
            TrimMode::Relative => *self,
            TrimMode::Absolute => Self {
                mode: TrimMode::Relative,
                start_secs: self.start_secs - event_secs,
                end_secs: self.end_secs - event_secs,
            },
        }
    }

    /// Absolute `(start, end)` media timestamps regardless of mode.
    pub fn resolved(&self, event_secs: f64) -> (f64, f64) {
        let absolute = self.to_absolute(event_secs);
        (absolute.start_secs, absolute.end_secs)
    }

    /// Whether the window satisfies its invariants against the given asset
    /// duration: minimum length, mode-specific bounds.
    pub fn is_valid(&self, duration_secs: f64) -> bool {
        if self.duration() < MIN_CLIP_DURATION_SECS - 1e-9 {
            return false;
        }
        match self.mode {
            TrimMode::Relative => {
                self.start_secs >= -MAX_OFFSET_SECS - 1e-9
                    && self.end_secs <= MAX_OFFSET_SECS + 1e-9
            }
            TrimMode::Absolute => {
                self.start_secs >= -1e-9 && self.end_secs <= duration_secs + 1e-9
            }
        }
    }
}

impl Default for TrimWindow {
    fn default() -> Self {
        Self::default_relative()
    }
}
