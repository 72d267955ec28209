//! Clip references: one playable highlight and its event timing.
//!
//! Upstream feeds disagree about when an event happened. A clip carries
//! every representation it was ingested with; `EventTiming::best_estimate_secs`
//! collapses them by a fixed precision order so all screens agree on a
//! single number. Resolution against a concrete video asset (with bounds
//! checking per candidate) lives in `matchreel-playback-core`.

use serde::{Deserialize, Serialize};

use crate::bounds::MediaBounds;
use crate::trim::TrimWindow;

/// Opaque clip identifier, unique within a playlist.
pub type ClipId = String;

/// How playback for a clip is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A short pre-cut media resource; plays from its own start.
    PreExtracted,
    /// A seek into a long recording of the whole match.
    FullMatchVideo,
    /// A static image shown for a fixed hold; no media at all.
    ThumbnailOnly,
}

/// Every time representation a clip was ingested with.
///
/// Precision order, most precise first: video-relative seconds,
/// millisecond timestamp, precomputed total seconds, then the raw
/// match clock. Consumers must not reorder this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventTiming {
    /// Match-clock minute the event occurred at.
    pub match_minute: u32,

    /// Match-clock second within the minute, when the feed supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_second: Option<u32>,

    /// Offset into the video asset in seconds, when precomputed upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_offset_secs: Option<f64>,

    /// Millisecond-precision timestamp relative to kickoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_timestamp_ms: Option<u64>,

    /// Total seconds since kickoff, when precomputed upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_secs: Option<f64>,
}

impl EventTiming {
    /// Timing known only from the match clock.
    pub fn from_match_clock(minute: u32, second: Option<u32>) -> Self {
        Self {
            match_minute: minute,
            match_second: second,
            video_offset_secs: None,
            event_timestamp_ms: None,
            total_secs: None,
        }
    }

    /// The match clock expressed in seconds since kickoff.
    pub fn match_clock_secs(&self) -> f64 {
        self.match_minute as f64 * 60.0 + self.match_second.unwrap_or(0) as f64
    }

    /// Best single estimate of the event time in seconds, by the fixed
    /// precision order. Never negative.
    pub fn best_estimate_secs(&self) -> f64 {
        let estimate = if let Some(v) = self.video_offset_secs {
            v
        } else if let Some(ms) = self.event_timestamp_ms {
            ms as f64 / 1000.0
        } else if let Some(total) = self.total_secs {
            total
        } else {
            self.match_clock_secs()
        };
        estimate.max(0.0)
    }
}

/// One playable unit in a playlist.
///
/// Constructed by the caller before sequencing begins; the playback core
/// never mutates a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRef {
    /// Unique identifier within the playlist.
    pub id: ClipId,

    /// Display title, e.g. "Goal — 37'".
    pub title: String,

    /// Event classification, e.g. "goal", "red_card".
    pub event_type: String,

    /// When the event happened, in every representation we were given.
    pub timing: EventTiming,

    /// How playback is obtained.
    pub source_kind: SourceKind,

    /// Playable media URL. Present for pre-extracted and full-match clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,

    /// Cover image, used for the pre-roll overlay and as fallback visual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Per-clip media bounds, overriding the playlist default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<MediaBounds>,

    /// Saved trim window, when the user has adjusted this clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<TrimWindow>,
}

impl ClipRef {
    /// A clip backed by a short pre-cut media file.
    pub fn pre_extracted(
        id: impl Into<ClipId>,
        title: impl Into<String>,
        media_url: impl Into<String>,
        timing: EventTiming,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            event_type: String::new(),
            timing,
            source_kind: SourceKind::PreExtracted,
            media_url: Some(media_url.into()),
            thumbnail_url: None,
            bounds: None,
            trim: None,
        }
    }

    /// A clip played by seeking into a full-match recording.
    pub fn full_match(
        id: impl Into<ClipId>,
        title: impl Into<String>,
        media_url: impl Into<String>,
        timing: EventTiming,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            event_type: String::new(),
            timing,
            source_kind: SourceKind::FullMatchVideo,
            media_url: Some(media_url.into()),
            thumbnail_url: None,
            bounds: None,
            trim: None,
        }
    }

    /// A clip with only a still image.
    pub fn thumbnail_only(
        id: impl Into<ClipId>,
        title: impl Into<String>,
        thumbnail_url: impl Into<String>,
        timing: EventTiming,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            event_type: String::new(),
            timing,
            source_kind: SourceKind::ThumbnailOnly,
            media_url: None,
            thumbnail_url: Some(thumbnail_url.into()),
            bounds: None,
            trim: None,
        }
    }

    /// Best estimate of the event time in seconds. Never negative.
    pub fn raw_event_seconds(&self) -> f64 {
        self.timing.best_estimate_secs()
    }

    /// Whether the clip has media the sequencer can actually play.
    pub fn has_playable_media(&self) -> bool {
        matches!(
            self.source_kind,
            SourceKind::PreExtracted | SourceKind::FullMatchVideo
        ) && self.media_url.is_some()
    }
}
