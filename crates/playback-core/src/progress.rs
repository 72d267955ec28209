//! Aggregate sequence progress.
//!
//! One percentage for the whole run: a fixed small share for the opening,
//! a fixed small share for the closing, and the remainder split evenly
//! across clips, each clip's slice interpolated by its own local
//! progress. Without overlays the clips span the full bar.
//!
//! The blend itself is a pure function; monotonicity under forward
//! playback is enforced by the sequencer's high-water mark.

/// A point in the sequence to express as a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressPoint {
    Idle,
    Opening,
    /// Inside clip `index` of `count`, `local` in `[0, 1]`.
    Clip {
        index: usize,
        count: usize,
        local: f64,
    },
    /// Between clips, about to enter `next_index`.
    Between { next_index: usize, count: usize },
    Closing,
    Complete,
}

/// Weighted progress blend.
#[derive(Debug, Clone, Copy)]
pub struct ProgressBlend {
    overlays_enabled: bool,
    opening_share: f64,
    closing_share: f64,
}

impl ProgressBlend {
    pub fn new(overlays_enabled: bool) -> Self {
        Self {
            overlays_enabled,
            opening_share: 2.0,
            closing_share: 5.0,
        }
    }

    /// Percentage for a sequence point. Forward-ordered: later points in a
    /// normal run never map below earlier ones.
    pub fn percent(&self, point: ProgressPoint) -> f64 {
        let span_start = if self.overlays_enabled {
            self.opening_share
        } else {
            0.0
        };
        let span_end = if self.overlays_enabled {
            100.0 - self.closing_share
        } else {
            100.0
        };

        match point {
            ProgressPoint::Idle => 0.0,
            ProgressPoint::Opening => self.opening_share * 0.5,
            ProgressPoint::Clip {
                index,
                count,
                local,
            } => {
                let per_clip = (span_end - span_start) / count.max(1) as f64;
                span_start + per_clip * (index as f64 + local.clamp(0.0, 1.0))
            }
            ProgressPoint::Between { next_index, count } => {
                let per_clip = (span_end - span_start) / count.max(1) as f64;
                span_start + per_clip * next_index as f64
            }
            ProgressPoint::Closing => span_end + self.closing_share * 0.5,
            ProgressPoint::Complete => 100.0,
        }
    }
}
