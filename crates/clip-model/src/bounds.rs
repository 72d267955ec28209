//! Media bounds: duration and match-clock coverage of a video asset.

use serde::{Deserialize, Serialize};

/// Regulation match length assumed when an asset carries no coverage data.
pub const FULL_MATCH_MINUTES: u32 = 90;

/// Fallback asset duration when the real duration is unknown.
pub const FULL_MATCH_FALLBACK_SECS: f64 = FULL_MATCH_MINUTES as f64 * 60.0;

/// Describes the asset a clip plays against: how long it is and which part
/// of the match clock it actually contains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaBounds {
    /// Total asset length in seconds, when known.
    pub duration_secs: Option<f64>,

    /// First match minute present in the asset. Absent means the asset is
    /// assumed to start at kickoff.
    pub coverage_start_minute: Option<u32>,

    /// Last match minute present in the asset. Absent means a full
    /// 90-minute match is assumed.
    pub coverage_end_minute: Option<u32>,
}

impl MediaBounds {
    /// Bounds for an asset whose duration is known but whose coverage is not.
    pub fn known(duration_secs: f64) -> Self {
        Self {
            duration_secs: Some(duration_secs),
            coverage_start_minute: None,
            coverage_end_minute: None,
        }
    }

    /// Bounds with an explicit match-clock coverage range.
    pub fn with_coverage(duration_secs: f64, start_minute: u32, end_minute: u32) -> Self {
        Self {
            duration_secs: Some(duration_secs),
            coverage_start_minute: Some(start_minute),
            coverage_end_minute: Some(end_minute),
        }
    }

    /// Duration to resolve against. Unknown or non-positive durations fall
    /// back to a full regulation match so downstream arithmetic never sees
    /// zero or NaN.
    pub fn effective_duration_secs(&self) -> f64 {
        match self.duration_secs {
            Some(d) if d > 0.0 => d,
            _ => FULL_MATCH_FALLBACK_SECS,
        }
    }

    /// The covered match-clock range in minutes, with defaults applied.
    pub fn coverage_minutes(&self) -> (u32, u32) {
        (
            self.coverage_start_minute.unwrap_or(0),
            self.coverage_end_minute.unwrap_or(FULL_MATCH_MINUTES),
        )
    }

    /// Whether a match minute falls inside the covered range.
    pub fn covers_minute(&self, minute: u32) -> bool {
        let (start, end) = self.coverage_minutes();
        minute >= start && minute <= end
    }
}
