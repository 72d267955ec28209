//! Media surface abstraction.
//!
//! The one mutable external resource the playback core touches. A surface
//! wraps whatever actually renders video (a browser media element, a test
//! double) behind setter/getter calls that never block.
//!
//! Single-writer discipline: a surface has exactly one driver at a time.
//! The sequencer owns its surface outright; a trim editor previewing seeks
//! must be given its own surface, never the sequencer's.

use matchreel_common::error::PlaybackRejected;

/// Handle to a playable media slot.
///
/// `play` may be refused by the environment (autoplay policies); callers
/// swallow [`PlaybackRejected`] and keep their state unchanged.
pub trait MediaSurface {
    /// Point the slot at a new source. Resets position to zero.
    fn load(&mut self, url: &str);

    /// Move the playhead, in seconds.
    fn seek(&mut self, position_secs: f64);

    /// Begin playback.
    fn play(&mut self) -> Result<(), PlaybackRejected>;

    /// Halt playback, keeping the current position.
    fn pause(&mut self);

    fn set_muted(&mut self, muted: bool);

    /// Asset duration, once metadata is available.
    fn duration_secs(&self) -> Option<f64>;

    /// Current playhead position in seconds.
    fn current_time_secs(&self) -> f64;
}

/// A surface that renders nothing. Used by the clock-free simulation
/// driver, where the event feed is synthesized rather than observed.
#[derive(Debug, Default)]
pub struct NullSurface {
    loaded: Option<String>,
    position_secs: f64,
}

impl NullSurface {
    /// URL of the most recently loaded source, if any.
    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded.as_deref()
    }
}

impl MediaSurface for NullSurface {
    fn load(&mut self, url: &str) {
        self.loaded = Some(url.to_string());
        self.position_secs = 0.0;
    }

    fn seek(&mut self, position_secs: f64) {
        self.position_secs = position_secs;
    }

    fn play(&mut self) -> Result<(), PlaybackRejected> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn duration_secs(&self) -> Option<f64> {
        None
    }

    fn current_time_secs(&self) -> f64 {
        self.position_secs
    }
}
