//! The playback sequencer: an unattended, timed run through a playlist,
//! interleaving generated overlays with real clip playback.
//!
//! One state machine drives one visible media slot. The host renders
//! whatever the current state calls for (an overlay, the media element, a
//! held still) and feeds events back in: overlay completions, media
//! `ended`/`timeupdate`, and fired timers. All transitions happen
//! synchronously inside those calls; there is no internal clock.
//!
//! Every wait goes through a single [`TimerSlot`], cancelled on every
//! state exit, so a stale timer can never fire a transition out of a
//! state the machine has already left. Events that arrive for a state
//! that is no longer current are no-ops.

use std::fmt;

use matchreel_clip_model::{ClipRef, Playlist, SourceKind};
use matchreel_common::config::SequencingDefaults;
use matchreel_common::timer::{TimerRequest, TimerSlot, TimerToken};

use crate::media::MediaSurface;
use crate::progress::{ProgressBlend, ProgressPoint};
use crate::resolver::{ResolvedWindow, ResolverConfig, TimeResolver};

/// Where the sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Not started, or torn down.
    Idle,
    /// Opening overlay is on screen.
    Opening,
    /// Clip `i` owns the media slot.
    PlayingClip(usize),
    /// Transition overlay before clip `i`.
    Transitioning(usize),
    /// Closing overlay is on screen.
    Closing,
    /// The run finished.
    Complete,
}

impl fmt::Display for SequencerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Opening => write!(f, "Opening"),
            Self::PlayingClip(i) => write!(f, "PlayingClip({i})"),
            Self::Transitioning(i) => write!(f, "Transitioning({i})"),
            Self::Closing => write!(f, "Closing"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// What a `PlayingClip` state is doing with its clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPhase {
    /// Pre-roll overlay on screen; media held.
    PreRoll,
    /// Media element is seeking/playing the resolved window.
    Rolling,
    /// Thumbnail-only clip held on screen for a fixed duration.
    ThumbnailHold,
    /// No media, no thumbnail: timed placeholder so the run never stalls.
    MissingMediaHold,
}

/// What an armed timer is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    ThumbnailHold,
    MissingMediaHold,
}

/// Configuration for one sequencer instance. Screen variants are
/// configuration here, never separate copies of the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// Show generated overlays (opening, per-clip intro, transitions,
    /// closing).
    pub include_overlays: bool,

    /// Restart from the top after the last clip.
    pub loop_enabled: bool,

    /// On-screen hold for thumbnail-only clips.
    pub thumbnail_hold_secs: f64,

    /// Hold for clips with nothing to show at all.
    pub missing_media_fallback_secs: f64,

    /// Start playback muted.
    pub muted: bool,

    /// Seek-window resolution knobs.
    pub resolver: ResolverConfig,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            include_overlays: true,
            loop_enabled: false,
            thumbnail_hold_secs: 6.0,
            missing_media_fallback_secs: 4.0,
            muted: true,
            resolver: ResolverConfig::default(),
        }
    }
}

impl From<&SequencingDefaults> for SequencerConfig {
    fn from(defaults: &SequencingDefaults) -> Self {
        Self {
            include_overlays: defaults.include_overlays,
            loop_enabled: defaults.loop_enabled,
            thumbnail_hold_secs: defaults.thumbnail_hold_secs,
            missing_media_fallback_secs: defaults.missing_media_fallback_secs,
            muted: defaults.muted,
            resolver: ResolverConfig {
                pre_roll_secs: defaults.pre_roll_secs,
                fixed_clip_secs: defaults.fixed_clip_secs,
                post_roll_secs: defaults.post_roll_secs,
            },
        }
    }
}

/// Drives a playlist through `Idle → Opening → (overlay → clip)* →
/// Closing → Complete`, owning the media surface and the one timer slot.
pub struct PlaybackSequencer {
    config: SequencerConfig,
    playlist: Playlist,
    surface: Box<dyn MediaSurface>,
    resolver: TimeResolver,
    blend: ProgressBlend,

    state: SequencerState,
    phase: Option<ClipPhase>,
    window: Option<ResolvedWindow>,
    clip_local: f64,
    percent: f64,
    paused: bool,
    timer: TimerSlot<TimerPurpose>,
}

impl PlaybackSequencer {
    pub fn new(playlist: Playlist, config: SequencerConfig, surface: Box<dyn MediaSurface>) -> Self {
        Self {
            resolver: TimeResolver::new(config.resolver),
            blend: ProgressBlend::new(config.include_overlays),
            config,
            playlist,
            surface,
            state: SequencerState::Idle,
            phase: None,
            window: None,
            clip_local: 0.0,
            percent: 0.0,
            paused: false,
            timer: TimerSlot::new(),
        }
    }

    // --- read-only view -------------------------------------------------

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Sub-phase of the current `PlayingClip` state, for rendering.
    pub fn clip_phase(&self) -> Option<ClipPhase> {
        self.phase
    }

    /// The seek window of the clip currently owning the media slot.
    pub fn current_window(&self) -> Option<&ResolvedWindow> {
        self.window.as_ref()
    }

    /// Clip currently owning the media slot.
    pub fn current_clip(&self) -> Option<&ClipRef> {
        match self.state {
            SequencerState::PlayingClip(i) => self.playlist.clips.get(i),
            _ => None,
        }
    }

    /// Aggregate progress, 0–100, non-decreasing under forward playback.
    pub fn progress_percent(&self) -> f64 {
        self.percent
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn loop_enabled(&self) -> bool {
        self.config.loop_enabled
    }

    /// Drain the timer the host still needs to schedule, if any.
    pub fn take_timer_request(&mut self) -> Option<TimerRequest<TimerPurpose>> {
        self.timer.take_request()
    }

    // --- operations -----------------------------------------------------

    /// Begin the sequence. Only valid from `Idle`.
    pub fn start(&mut self) {
        if self.state != SequencerState::Idle {
            tracing::warn!(state = %self.state, "start() ignored: sequence already running");
            return;
        }

        self.percent = 0.0;
        self.paused = false;
        tracing::info!(
            clips = self.playlist.clips.len(),
            overlays = self.config.include_overlays,
            "Starting playback sequence"
        );

        if self.config.include_overlays {
            self.state = SequencerState::Opening;
        } else if self.playlist.clips.is_empty() {
            self.finish();
        } else {
            self.enter_clip(0, false);
        }
        self.refresh_progress();
    }

    /// Tear down: cancel the pending timer, halt media, return to `Idle`.
    /// No event or timer callback has any effect afterward.
    pub fn stop(&mut self) {
        self.timer.cancel();
        self.surface.pause();
        self.state = SequencerState::Idle;
        self.phase = None;
        self.window = None;
        self.clip_local = 0.0;
        self.percent = 0.0;
        self.paused = false;
        tracing::info!("Playback sequence stopped");
    }

    /// Jump to a clip. Permitted only while a clip is playing; bypasses
    /// overlays. Out-of-range indices are no-ops.
    pub fn go_to(&mut self, index: usize) {
        if !matches!(self.state, SequencerState::PlayingClip(_)) {
            tracing::debug!(state = %self.state, index, "go_to ignored outside clip playback");
            return;
        }
        if index >= self.playlist.clips.len() {
            tracing::debug!(index, "go_to ignored: index out of range");
            return;
        }
        self.percent = 0.0;
        self.enter_clip(index, true);
        self.refresh_progress();
    }

    pub fn next(&mut self) {
        if let SequencerState::PlayingClip(i) = self.state {
            self.go_to(i + 1);
        }
    }

    pub fn previous(&mut self) {
        match self.state {
            SequencerState::PlayingClip(i) if i > 0 => self.go_to(i - 1),
            _ => {}
        }
    }

    pub fn toggle_loop(&mut self) {
        self.config.loop_enabled = !self.config.loop_enabled;
    }

    /// Pause or resume. Rolling media is paused in place; hold timers are
    /// cancelled and re-armed for their full duration on resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        match self.phase {
            Some(ClipPhase::Rolling) => {
                if self.paused {
                    self.surface.pause();
                } else if self.surface.play().is_err() {
                    tracing::warn!("Playback resume rejected; awaiting user gesture");
                }
            }
            Some(ClipPhase::ThumbnailHold) => {
                if self.paused {
                    self.timer.cancel();
                } else {
                    self.timer
                        .arm(self.config.thumbnail_hold_secs, TimerPurpose::ThumbnailHold);
                }
            }
            Some(ClipPhase::MissingMediaHold) => {
                if self.paused {
                    self.timer.cancel();
                } else {
                    self.timer.arm(
                        self.config.missing_media_fallback_secs,
                        TimerPurpose::MissingMediaHold,
                    );
                }
            }
            _ => {}
        }
    }

    /// Force the current overlay to complete immediately. Equivalent to
    /// its completion callback firing early; a no-op in non-overlay
    /// states.
    pub fn skip_overlay(&mut self) {
        tracing::debug!(state = %self.state, "Overlay skip requested");
        self.overlay_completed();
    }

    // --- event feed -----------------------------------------------------

    /// An overlay reported completion. Overlays call this exactly once;
    /// duplicate or late calls are no-ops.
    pub fn overlay_completed(&mut self) {
        match self.state {
            SequencerState::Opening => {
                if self.playlist.clips.is_empty() {
                    self.finish();
                } else {
                    self.enter_clip(0, false);
                }
            }
            SequencerState::Transitioning(next) => self.enter_clip(next, false),
            SequencerState::Closing => {
                if self.config.loop_enabled {
                    self.percent = 0.0;
                    self.state = SequencerState::Opening;
                    self.phase = None;
                } else {
                    self.finish();
                }
            }
            SequencerState::PlayingClip(i) if self.phase == Some(ClipPhase::PreRoll) => {
                self.begin_media(i);
            }
            _ => {
                tracing::debug!(state = %self.state, "Ignoring overlay completion");
            }
        }
        self.refresh_progress();
    }

    /// The media element fired `loadedmetadata`. Pre-cut clips get their
    /// real end position here; until then their window carries the
    /// bounds-derived estimate.
    pub fn media_loaded(&mut self) {
        let (SequencerState::PlayingClip(i), Some(ClipPhase::Rolling)) = (self.state, self.phase)
        else {
            return;
        };
        if self.playlist.clips[i].source_kind != SourceKind::PreExtracted {
            return;
        }
        if let (Some(window), Some(duration)) = (&mut self.window, self.surface.duration_secs()) {
            if duration > 0.0 {
                window.seek_end_secs = duration;
            }
        }
    }

    /// The media element fired `ended`.
    pub fn media_ended(&mut self) {
        match (self.state, self.phase) {
            (SequencerState::PlayingClip(i), Some(ClipPhase::Rolling)) => {
                self.clip_local = 1.0;
                self.refresh_progress();
                self.advance_from(i);
            }
            _ => {
                tracing::debug!(state = %self.state, "Ignoring media ended");
            }
        }
    }

    /// The media element fired `timeupdate`. Recomputes clip-local
    /// progress and enforces the window end for seeks into long assets,
    /// which never receive a natural `ended`.
    pub fn media_time_update(&mut self) {
        let (SequencerState::PlayingClip(i), Some(ClipPhase::Rolling)) = (self.state, self.phase)
        else {
            return;
        };
        let Some(window) = self.window else {
            return;
        };

        let position = self.surface.current_time_secs();
        let kind = self.playlist.clips[i].source_kind;
        // Prefer the element's own duration for pre-cut clips; the
        // resolved window is authoritative for long assets.
        let (start, end) = if kind == SourceKind::PreExtracted {
            (
                0.0,
                self.surface.duration_secs().unwrap_or(window.seek_end_secs),
            )
        } else {
            (window.seek_start_secs, window.seek_end_secs)
        };

        let span = (end - start).max(1e-6);
        self.clip_local = ((position - start) / span).clamp(0.0, 1.0);
        self.refresh_progress();

        if kind == SourceKind::FullMatchVideo && position >= window.seek_end_secs {
            self.surface.pause();
            self.advance_from(i);
        }
    }

    /// A host-scheduled timer elapsed. Stale tokens are no-ops.
    pub fn timer_fired(&mut self, token: TimerToken) {
        let Some(purpose) = self.timer.accept(token) else {
            return;
        };
        match (self.state, purpose) {
            (SequencerState::PlayingClip(i), TimerPurpose::ThumbnailHold)
            | (SequencerState::PlayingClip(i), TimerPurpose::MissingMediaHold) => {
                self.clip_local = 1.0;
                self.refresh_progress();
                self.advance_from(i);
            }
            (state, purpose) => {
                tracing::debug!(%state, ?purpose, "Timer fired outside clip playback");
            }
        }
    }

    // --- internals ------------------------------------------------------

    /// Enter `PlayingClip(index)`. `via_navigation` bypasses the pre-roll
    /// overlay.
    fn enter_clip(&mut self, index: usize, via_navigation: bool) {
        self.timer.cancel();
        self.state = SequencerState::PlayingClip(index);
        self.clip_local = 0.0;
        self.window = None;

        let clip = &self.playlist.clips[index];
        let show_pre_roll =
            !via_navigation && self.config.include_overlays && clip.thumbnail_url.is_some();

        if show_pre_roll {
            // Hold media while the intro overlay runs.
            self.surface.pause();
            self.phase = Some(ClipPhase::PreRoll);
        } else {
            self.begin_media(index);
        }
    }

    /// Resolve, seek, and play clip `index` (or start its hold timer).
    fn begin_media(&mut self, index: usize) {
        let clip = self.playlist.clips[index].clone();

        if clip.has_playable_media() {
            let bounds = self.playlist.effective_bounds(&clip);
            let window = match clip.trim {
                Some(trim) => self.resolver.resolve_with_trim(&clip, &bounds, &trim),
                None => self.resolver.resolve(&clip, &bounds),
            };
            if window.out_of_coverage {
                tracing::warn!(
                    clip = %clip.id,
                    minute = clip.timing.match_minute,
                    "Event resolved outside video coverage; playing clamped estimate"
                );
            }

            self.surface.load(clip.media_url.as_deref().unwrap_or_default());
            self.surface.set_muted(self.config.muted);
            self.surface.seek(window.seek_start_secs);
            self.window = Some(window);
            self.phase = Some(ClipPhase::Rolling);

            if !self.paused && self.surface.play().is_err() {
                // Autoplay denied: stay in place, the host may expose a
                // manual play affordance.
                tracing::warn!(clip = %clip.id, "Playback rejected; state unchanged");
            }
        } else if clip.thumbnail_url.is_some() {
            self.phase = Some(ClipPhase::ThumbnailHold);
            if !self.paused {
                self.timer
                    .arm(self.config.thumbnail_hold_secs, TimerPurpose::ThumbnailHold);
            }
        } else {
            tracing::warn!(clip = %clip.id, "Clip has no media and no thumbnail; holding placeholder");
            self.phase = Some(ClipPhase::MissingMediaHold);
            if !self.paused {
                self.timer.arm(
                    self.config.missing_media_fallback_secs,
                    TimerPurpose::MissingMediaHold,
                );
            }
        }
    }

    /// Leave clip `index` forward: next clip, closing, loop, or complete.
    fn advance_from(&mut self, index: usize) {
        self.timer.cancel();
        let next = index + 1;
        let count = self.playlist.clips.len();

        if next < count {
            if self.config.include_overlays {
                self.state = SequencerState::Transitioning(next);
                self.phase = None;
                self.window = None;
            } else {
                self.enter_clip(next, false);
            }
        } else if self.config.include_overlays {
            self.state = SequencerState::Closing;
            self.phase = None;
            self.window = None;
        } else if self.config.loop_enabled {
            self.percent = 0.0;
            self.enter_clip(0, false);
        } else {
            self.finish();
        }
        self.refresh_progress();
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.state = SequencerState::Complete;
        self.phase = None;
        self.window = None;
        self.percent = 100.0;
        tracing::info!("Playback sequence complete");
    }

    /// Recompute the aggregate percentage, never letting it regress
    /// within a run.
    fn refresh_progress(&mut self) {
        let count = self.playlist.clips.len();
        let point = match self.state {
            SequencerState::Idle => ProgressPoint::Idle,
            SequencerState::Opening => ProgressPoint::Opening,
            SequencerState::PlayingClip(index) => ProgressPoint::Clip {
                index,
                count,
                local: self.clip_local,
            },
            SequencerState::Transitioning(next_index) => ProgressPoint::Between {
                next_index,
                count,
            },
            SequencerState::Closing => ProgressPoint::Closing,
            SequencerState::Complete => ProgressPoint::Complete,
        };
        let raw = self.blend.percent(point);
        self.percent = if self.state == SequencerState::Idle {
            0.0
        } else {
            raw.max(self.percent).min(100.0)
        };
    }
}
