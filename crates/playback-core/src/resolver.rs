//! Event-time resolution: where in a video asset does an event live.
//!
//! Upstream feeds describe the same moment several ways — a precomputed
//! video offset, a millisecond timestamp, a total-seconds value, or just
//! the match clock — and any of them can be missing or out of range for
//! the asset at hand. The resolver collapses them with one canonical
//! priority order, applies the pre-roll buffer, and clamps, so every
//! caller gets the same seek window for the same inputs.
//!
//! # Priority order
//!
//! 1. Video-relative seconds, when present and inside the asset
//! 2. Millisecond timestamp (converted to seconds), when inside
//! 3. Precomputed total seconds, when inside
//! 4. Match clock (`minute * 60 + second`), when inside
//! 5. Coverage-relative recomputation, when every candidate missed
//!
//! "Inside the asset" is the half-open `[0, duration)`: an event at
//! exactly `duration` is out of bounds.
//!
//! Pure functions of their inputs; safe to call on every render.

use matchreel_clip_model::{ClipRef, MediaBounds, SourceKind, TrimWindow};

/// Timing knobs for resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Seconds subtracted from the resolved event point so playback starts
    /// slightly before the moment.
    pub pre_roll_secs: f64,

    /// Extraction length when no post-roll and no trim is configured.
    pub fixed_clip_secs: f64,

    /// When set, the window ends this many seconds after the event point
    /// instead of `fixed_clip_secs` after the start.
    pub post_roll_secs: Option<f64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            pre_roll_secs: 3.0,
            fixed_clip_secs: 8.0,
            post_roll_secs: None,
        }
    }
}

/// The playable window resolved for one `(clip, bounds)` pair.
///
/// Invariant: `0 <= seek_start_secs < seek_end_secs <= duration`.
/// Recomputed on demand; never cache one across a bounds change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWindow {
    /// Where to seek before playing, in seconds.
    pub seek_start_secs: f64,

    /// Where playback of this clip stops, in seconds.
    pub seek_end_secs: f64,

    /// The event's raw time fell outside the asset's known coverage. The
    /// window is still playable (a clamped estimate); hosts should prefer
    /// a pre-extracted clip when one exists.
    pub out_of_coverage: bool,
}

impl ResolvedWindow {
    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.seek_end_secs - self.seek_start_secs
    }
}

/// Resolves clips against media bounds.
#[derive(Debug, Clone)]
pub struct TimeResolver {
    config: ResolverConfig,
}

impl TimeResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ResolverConfig::default())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the seek window for a clip.
    pub fn resolve(&self, clip: &ClipRef, bounds: &MediaBounds) -> ResolvedWindow {
        if clip.source_kind == SourceKind::PreExtracted {
            // Short pre-cut resource: plays whole, nothing to resolve.
            return ResolvedWindow {
                seek_start_secs: 0.0,
                seek_end_secs: bounds.effective_duration_secs(),
                out_of_coverage: false,
            };
        }

        let duration = bounds.effective_duration_secs();
        let (event_point, out_of_coverage) = self.resolve_event_point(clip, bounds, duration);

        let seek_start = (event_point - self.config.pre_roll_secs).clamp(0.0, duration - 1.0);
        let seek_end = match self.config.post_roll_secs {
            Some(post_roll) => event_point + post_roll,
            None => seek_start + self.config.fixed_clip_secs,
        };

        let (seek_start, seek_end) = clamp_window(seek_start, seek_end, duration);
        ResolvedWindow {
            seek_start_secs: seek_start,
            seek_end_secs: seek_end,
            out_of_coverage,
        }
    }

    /// Resolve using a saved trim window as the extraction range. The trim
    /// pivots on the event point; pre/post-roll do not apply on top of an
    /// explicit user window.
    pub fn resolve_with_trim(
        &self,
        clip: &ClipRef,
        bounds: &MediaBounds,
        trim: &TrimWindow,
    ) -> ResolvedWindow {
        if clip.source_kind == SourceKind::PreExtracted {
            return self.resolve(clip, bounds);
        }

        let duration = bounds.effective_duration_secs();
        let (event_point, out_of_coverage) = self.resolve_event_point(clip, bounds, duration);
        let event_point = event_point.clamp(0.0, duration - 1.0);

        let (start, end) = trim.resolved(event_point);
        let (seek_start, seek_end) = clamp_window(start.max(0.0), end, duration);
        ResolvedWindow {
            seek_start_secs: seek_start,
            seek_end_secs: seek_end,
            out_of_coverage,
        }
    }

    /// The event's position inside the asset, before pre-roll and final
    /// clamping, plus the out-of-coverage classification.
    fn resolve_event_point(
        &self,
        clip: &ClipRef,
        bounds: &MediaBounds,
        duration: f64,
    ) -> (f64, bool) {
        let timing = &clip.timing;
        let in_bounds = |t: f64| t >= 0.0 && t < duration;

        // Candidates in canonical priority order.
        let candidates = [
            timing.video_offset_secs,
            timing.event_timestamp_ms.map(|ms| ms as f64 / 1000.0),
            timing.total_secs,
            Some(timing.match_clock_secs()),
        ];
        let direct_hit = candidates
            .into_iter()
            .flatten()
            .find(|&t| in_bounds(t));

        let covered = bounds.covers_minute(timing.match_minute);
        let out_of_coverage = direct_hit.is_none() || !covered;

        let event_point = match direct_hit {
            Some(point) => point,
            None if covered => {
                // Every representation missed the asset, but the match
                // minute is plausibly inside it: recompute relative to the
                // coverage start, estimating one when none is declared.
                let start_minute = match bounds.coverage_start_minute {
                    Some(m) if m > 0 => m,
                    _ => timing.match_minute.saturating_sub(5),
                };
                (timing.match_clock_secs() - start_minute as f64 * 60.0).max(0.0)
            }
            // Outside coverage entirely: let the final clamp pin the raw
            // clock to the asset edge.
            None => timing.match_clock_secs(),
        };

        (event_point, out_of_coverage)
    }
}

/// Force `0 <= start < end <= duration`.
fn clamp_window(start: f64, end: f64, duration: f64) -> (f64, f64) {
    let start = start.clamp(0.0, (duration - 1.0).max(0.0));
    let end = end.min(duration);
    let end = if end > start {
        end
    } else {
        duration.min(start + 1.0)
    };
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchreel_clip_model::{ClipRef, EventTiming, MediaBounds, TrimMode};

    fn full_match_clip(timing: EventTiming) -> ClipRef {
        ClipRef::full_match("clip", "Event", "https://cdn/match.mp4", timing)
    }

    #[test]
    fn pre_extracted_plays_whole() {
        let timing = EventTiming::from_match_clock(37, None);
        let clip = ClipRef::pre_extracted("c", "Goal", "https://cdn/goal.mp4", timing);
        let window = TimeResolver::with_defaults().resolve(&clip, &MediaBounds::known(24.0));

        assert_eq!(window.seek_start_secs, 0.0);
        assert!((window.seek_end_secs - 24.0).abs() < 1e-9);
        assert!(!window.out_of_coverage);
    }

    #[test]
    fn video_offset_wins_over_everything() {
        let timing = EventTiming {
            match_minute: 37,
            match_second: Some(0),
            video_offset_secs: Some(1000.0),
            event_timestamp_ms: Some(2_000_000),
            total_secs: Some(2220.0),
        };
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::known(5400.0));

        // 1000 - 3s pre-roll.
        assert!((window.seek_start_secs - 997.0).abs() < 1e-9);
        assert!(!window.out_of_coverage);
    }

    #[test]
    fn out_of_range_offset_falls_through_to_timestamp() {
        let timing = EventTiming {
            match_minute: 37,
            match_second: Some(0),
            video_offset_secs: Some(9999.0),
            event_timestamp_ms: Some(2_000_000),
            total_secs: None,
        };
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::known(5400.0));

        assert!((window.seek_start_secs - 1997.0).abs() < 1e-9);
        assert!(!window.out_of_coverage);
    }

    #[test]
    fn match_clock_is_the_last_direct_candidate() {
        let timing = EventTiming::from_match_clock(37, Some(12));
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::known(5400.0));

        // 37*60 + 12 - 3 = 2229.
        assert!((window.seek_start_secs - 2229.0).abs() < 1e-9);
        assert!(!window.out_of_coverage);
    }

    #[test]
    fn fixed_clip_length_sets_the_end() {
        let timing = EventTiming::from_match_clock(10, None);
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::known(5400.0));
        assert!((window.duration() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn post_roll_overrides_fixed_length() {
        let resolver = TimeResolver::new(ResolverConfig {
            pre_roll_secs: 3.0,
            fixed_clip_secs: 8.0,
            post_roll_secs: Some(5.0),
        });
        let timing = EventTiming::from_match_clock(10, None);
        let window = resolver.resolve(&full_match_clip(timing), &MediaBounds::known(5400.0));

        // [event-3, event+5] => 8 seconds around the moment.
        assert!((window.seek_start_secs - 597.0).abs() < 1e-9);
        assert!((window.seek_end_secs - 605.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_duration_falls_back_before_resolving() {
        let timing = EventTiming::from_match_clock(37, None);
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::default());

        assert!(window.seek_start_secs >= 0.0);
        assert!(window.seek_end_secs <= 5400.0);
        assert!(window.seek_start_secs < window.seek_end_secs);
        assert!(!window.out_of_coverage);
    }

    #[test]
    fn zero_duration_never_produces_negative_seeks() {
        let timing = EventTiming::from_match_clock(0, Some(1));
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::known(0.0));

        assert!(window.seek_start_secs >= 0.0);
        assert!(window.seek_start_secs < window.seek_end_secs);
    }

    #[test]
    fn event_at_exactly_duration_is_out_of_bounds() {
        let timing = EventTiming {
            match_minute: 10,
            match_second: None,
            video_offset_secs: Some(600.0),
            event_timestamp_ms: None,
            total_secs: None,
        };
        // Offset equals the duration: must not be taken as a direct hit.
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::known(600.0));
        assert!(window.out_of_coverage);
    }

    #[test]
    fn estimate_recomputes_against_guessed_coverage_start() {
        // A 10-minute reel with no declared coverage; minute 37 misses it.
        let timing = EventTiming::from_match_clock(37, None);
        let window =
            TimeResolver::with_defaults().resolve(&full_match_clip(timing), &MediaBounds::known(600.0));

        // Estimated coverage start = 32' => position 5*60, minus pre-roll.
        assert!((window.seek_start_secs - 297.0).abs() < 1e-9);
        assert!(window.out_of_coverage);
    }

    #[test]
    fn declared_coverage_start_anchors_the_recompute() {
        // Second-half recording: coverage 45'..90', 45 minutes long.
        let bounds = MediaBounds::with_coverage(2700.0, 45, 90);
        let timing = EventTiming::from_match_clock(64, None);
        let window = TimeResolver::with_defaults().resolve(&full_match_clip(timing), &bounds);

        // (64-45)*60 = 1140, minus pre-roll.
        assert!((window.seek_start_secs - 1137.0).abs() < 1e-9);
    }

    #[test]
    fn event_past_coverage_end_clamps_to_final_second() {
        // Stoppage-time goal at 95' against a 90-minute asset.
        let bounds = MediaBounds {
            duration_secs: Some(5400.0),
            coverage_start_minute: None,
            coverage_end_minute: Some(90),
        };
        let timing = EventTiming::from_match_clock(95, None);
        let window = TimeResolver::with_defaults().resolve(&full_match_clip(timing), &bounds);

        assert!(window.out_of_coverage);
        assert!((window.seek_start_secs - 5399.0).abs() < 1e-9);
        assert!(window.seek_end_secs <= 5400.0);
        assert!(window.seek_start_secs < window.seek_end_secs);
    }

    #[test]
    fn trim_window_defines_the_extraction_range() {
        let timing = EventTiming::from_match_clock(37, None);
        let trim = TrimWindow {
            mode: TrimMode::Relative,
            start_secs: -10.0,
            end_secs: 20.0,
        };
        let window = TimeResolver::with_defaults().resolve_with_trim(
            &full_match_clip(timing),
            &MediaBounds::known(5400.0),
            &trim,
        );

        assert!((window.seek_start_secs - 2210.0).abs() < 1e-9);
        assert!((window.seek_end_secs - 2240.0).abs() < 1e-9);
    }

    #[test]
    fn trim_window_is_clamped_into_the_asset() {
        let timing = EventTiming::from_match_clock(0, Some(2));
        let trim = TrimWindow {
            mode: TrimMode::Relative,
            start_secs: -15.0,
            end_secs: 15.0,
        };
        let window = TimeResolver::with_defaults().resolve_with_trim(
            &full_match_clip(timing),
            &MediaBounds::known(5400.0),
            &trim,
        );

        assert_eq!(window.seek_start_secs, 0.0);
        assert!((window.seek_end_secs - 17.0).abs() < 1e-9);
    }

    proptest::proptest! {
        #[test]
        fn resolved_windows_always_satisfy_ordering(
            minute in 0u32..130,
            second in proptest::option::of(0u32..60),
            video_offset in proptest::option::of(-100.0f64..10_000.0),
            timestamp_ms in proptest::option::of(0u64..8_000_000),
            total in proptest::option::of(0.0f64..8000.0),
            duration in proptest::option::of(0.0f64..7200.0),
        ) {
            let timing = EventTiming {
                match_minute: minute,
                match_second: second,
                video_offset_secs: video_offset,
                event_timestamp_ms: timestamp_ms,
                total_secs: total,
            };
            let bounds = MediaBounds {
                duration_secs: duration,
                coverage_start_minute: None,
                coverage_end_minute: None,
            };
            let window =
                TimeResolver::with_defaults().resolve(&full_match_clip(timing), &bounds);

            let limit = bounds.effective_duration_secs();
            proptest::prop_assert!(window.seek_start_secs >= 0.0);
            proptest::prop_assert!(window.seek_start_secs < window.seek_end_secs);
            proptest::prop_assert!(window.seek_end_secs <= limit + 1e-9);
        }
    }
}
