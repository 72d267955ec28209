//! Interactive trim editing: pointer drags over a fixed-scale ruler.
//!
//! The model owns one [`TrimWindow`] anchored to an event inside a media
//! asset. Pixel offsets are measured from the event marker on a ruler of
//! `pixels_per_second`. Every mutation clamps so the window never drops
//! below the minimum clip length and never leaves its mode's bounds —
//! invalid drags are absorbed, not rejected.
//!
//! Drag operations report the resulting preview time through a
//! [`TrimSink`] so the host can seek a live media element for visual
//! feedback. The preview is a notification only; nothing in the model
//! depends on it, and the visual playhead derived from the media's
//! current time never feeds back into the window.

use matchreel_clip_model::{TrimMode, TrimWindow, MAX_OFFSET_SECS, MIN_CLIP_DURATION_SECS};
use matchreel_common::config::TrimDefaults;

/// Receives trim-editing side effects.
pub trait TrimSink {
    /// The host should seek its preview element here, in media seconds.
    fn preview(&mut self, media_time_secs: f64);

    /// The user committed the window; persist it.
    fn save(&mut self, window: TrimWindow);
}

/// Knobs for the trim editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimConfig {
    /// Ruler scale: pixels per second.
    pub pixels_per_second: f64,

    /// Half-width of the default window around the event.
    pub default_offset_secs: f64,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            pixels_per_second: 12.0,
            default_offset_secs: 15.0,
        }
    }
}

impl From<&TrimDefaults> for TrimConfig {
    fn from(defaults: &TrimDefaults) -> Self {
        Self {
            pixels_per_second: defaults.pixels_per_second,
            default_offset_secs: defaults.default_offset_secs,
        }
    }
}

/// Which part of the window a pointer drag grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    StartHandle,
    EndHandle,
    /// The whole window: both edges shift together.
    Window,
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    target: DragTarget,
    last_px: f64,
}

/// Stateful editor for one clip's extraction window.
#[derive(Debug, Clone)]
pub struct TrimModel {
    config: TrimConfig,
    event_secs: f64,
    duration_secs: f64,
    window: TrimWindow,
    active_drag: Option<ActiveDrag>,
}

impl TrimModel {
    /// Editor with the default window around the given event.
    pub fn new(event_secs: f64, duration_secs: f64, config: TrimConfig) -> Self {
        let event_secs = event_secs.clamp(0.0, duration_secs.max(0.0));
        let window = TrimWindow {
            mode: TrimMode::Relative,
            start_secs: -config.default_offset_secs,
            end_secs: config.default_offset_secs,
        };
        Self {
            config,
            event_secs,
            duration_secs,
            window,
            active_drag: None,
        }
    }

    /// Editor resuming from a previously saved window.
    pub fn with_window(
        event_secs: f64,
        duration_secs: f64,
        config: TrimConfig,
        window: TrimWindow,
    ) -> Self {
        let mut model = Self::new(event_secs, duration_secs, config);
        model.window = window;
        model
    }

    pub fn window(&self) -> TrimWindow {
        self.window
    }

    pub fn event_secs(&self) -> f64 {
        self.event_secs
    }

    /// The window as absolute `(start, end)` media timestamps.
    pub fn absolute_window(&self) -> (f64, f64) {
        self.window.resolved(self.event_secs)
    }

    /// Drag the start handle to a pixel offset from the event marker.
    pub fn set_start_by_pixel(&mut self, pixel_x: f64, sink: &mut dyn TrimSink) {
        let desired = self.event_secs + pixel_x / self.config.pixels_per_second;
        let (_, abs_end) = self.absolute_window();
        // Applied last so the minimum length wins over the mode bound.
        let new_start = desired
            .max(self.lower_start_bound())
            .min(abs_end - MIN_CLIP_DURATION_SECS);
        self.write_absolute(new_start, abs_end);
        sink.preview(new_start.max(0.0));
    }

    /// Drag the end handle to a pixel offset from the event marker.
    pub fn set_end_by_pixel(&mut self, pixel_x: f64, sink: &mut dyn TrimSink) {
        let desired = self.event_secs + pixel_x / self.config.pixels_per_second;
        let (abs_start, _) = self.absolute_window();
        let new_end = desired
            .min(self.upper_end_bound())
            .max(abs_start + MIN_CLIP_DURATION_SECS);
        self.write_absolute(abs_start, new_end);
        sink.preview(new_end.min(self.duration_secs));
    }

    /// Begin a pointer drag on a handle or the whole window.
    pub fn drag_start(&mut self, target: DragTarget, pixel_x: f64) {
        self.active_drag = Some(ActiveDrag {
            target,
            last_px: pixel_x,
        });
    }

    /// Route a pointer move to whatever the active drag grabbed. A move
    /// with no active drag is ignored.
    pub fn drag_move(&mut self, pixel_x: f64, sink: &mut dyn TrimSink) {
        let Some(drag) = self.active_drag else {
            return;
        };
        match drag.target {
            DragTarget::StartHandle => self.set_start_by_pixel(pixel_x, sink),
            DragTarget::EndHandle => self.set_end_by_pixel(pixel_x, sink),
            DragTarget::Window => self.drag_window_by_pixel(pixel_x - drag.last_px, sink),
        }
        if let Some(drag) = &mut self.active_drag {
            drag.last_px = pixel_x;
        }
    }

    /// Finish the drag. The window keeps its last dragged value.
    pub fn drag_end(&mut self) {
        self.active_drag = None;
    }

    /// Drag the whole window by a pixel delta: both edges shift by the
    /// same amount, so the length is preserved. Distinct from handle
    /// drags, which change the length.
    pub fn drag_window_by_pixel(&mut self, delta_px: f64, sink: &mut dyn TrimSink) {
        let desired_shift = delta_px / self.config.pixels_per_second;
        let (abs_start, abs_end) = self.absolute_window();
        let shift = desired_shift
            .max(self.lower_start_bound() - abs_start)
            .min(self.upper_end_bound() - abs_end);
        self.write_absolute(abs_start + shift, abs_end + shift);
        sink.preview((abs_start + shift).max(0.0));
    }

    /// Restore the default window, keeping the current coordinate mode.
    pub fn reset(&mut self) {
        self.window = match self.window.mode {
            TrimMode::Relative => TrimWindow {
                mode: TrimMode::Relative,
                start_secs: -self.config.default_offset_secs,
                end_secs: self.config.default_offset_secs,
            },
            TrimMode::Absolute => {
                TrimWindow::default_absolute(self.event_secs, self.duration_secs)
            }
        };
    }

    /// Switch between relative offsets and absolute timestamps. Lossless:
    /// toggling twice reproduces the original values.
    pub fn toggle_mode(&mut self) {
        self.window = match self.window.mode {
            TrimMode::Relative => self.window.to_absolute(self.event_secs),
            TrimMode::Absolute => self.window.to_relative(self.event_secs),
        };
    }

    /// Commit the current window. State is unchanged afterward.
    pub fn save(&self, sink: &mut dyn TrimSink) {
        sink.save(self.window);
    }

    /// Position of the visual playhead relative to the event. Derived
    /// only; never written back into the window.
    pub fn playhead_offset(&self, current_media_time_secs: f64) -> f64 {
        current_media_time_secs - self.event_secs
    }

    fn lower_start_bound(&self) -> f64 {
        match self.window.mode {
            TrimMode::Relative => (self.event_secs - MAX_OFFSET_SECS).max(0.0),
            TrimMode::Absolute => 0.0,
        }
    }

    fn upper_end_bound(&self) -> f64 {
        match self.window.mode {
            TrimMode::Relative => (self.event_secs + MAX_OFFSET_SECS).min(self.duration_secs),
            TrimMode::Absolute => self.duration_secs,
        }
    }

    /// Store an absolute window back in the current coordinate mode.
    fn write_absolute(&mut self, abs_start: f64, abs_end: f64) {
        match self.window.mode {
            TrimMode::Relative => {
                self.window.start_secs = abs_start - self.event_secs;
                self.window.end_secs = abs_end - self.event_secs;
            }
            TrimMode::Absolute => {
                self.window.start_secs = abs_start;
                self.window.end_secs = abs_end;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingSink {
        previews: Vec<f64>,
        saved: Vec<TrimWindow>,
    }

    impl TrimSink for RecordingSink {
        fn preview(&mut self, media_time_secs: f64) {
            self.previews.push(media_time_secs);
        }

        fn save(&mut self, window: TrimWindow) {
            self.saved.push(window);
        }
    }

    fn model_at(event_secs: f64) -> TrimModel {
        TrimModel::new(event_secs, 5400.0, TrimConfig::default())
    }

    #[test]
    fn starts_with_default_window() {
        let model = model_at(2220.0);
        let window = model.window();
        assert_eq!(window.mode, TrimMode::Relative);
        assert!((window.start_secs + 15.0).abs() < 1e-9);
        assert!((window.end_secs - 15.0).abs() < 1e-9);
    }

    #[test]
    fn start_drag_converts_pixels_at_ruler_scale() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();

        // 12 px/s: -120 px is 10 seconds before the event.
        model.set_start_by_pixel(-120.0, &mut sink);

        assert!((model.window().start_secs + 10.0).abs() < 1e-9);
        assert_eq!(sink.previews.len(), 1);
        assert!((sink.previews[0] - 2210.0).abs() < 1e-9);
    }

    #[test]
    fn start_cannot_cross_end_minus_minimum() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();

        // +300 px is +25 s, which would leave end-start < 5 s.
        model.set_start_by_pixel(300.0, &mut sink);

        let window = model.window();
        assert!((window.end_secs - window.start_secs - MIN_CLIP_DURATION_SECS).abs() < 1e-9);
        assert!((window.start_secs - 10.0).abs() < 1e-9);
    }

    #[test]
    fn end_cannot_cross_start_plus_minimum() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();

        model.set_end_by_pixel(-600.0, &mut sink);

        let window = model.window();
        assert!((window.end_secs - window.start_secs - MIN_CLIP_DURATION_SECS).abs() < 1e-9);
        assert!((window.end_secs + 10.0).abs() < 1e-9);
    }

    #[test]
    fn relative_drags_respect_max_offset() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();

        model.set_start_by_pixel(-10_000.0, &mut sink);
        assert!((model.window().start_secs + MAX_OFFSET_SECS).abs() < 1e-9);

        model.set_end_by_pixel(10_000.0, &mut sink);
        assert!((model.window().end_secs - MAX_OFFSET_SECS).abs() < 1e-9);
    }

    #[test]
    fn start_drag_near_media_start_stops_at_zero() {
        let mut model = model_at(10.0);
        let mut sink = RecordingSink::default();

        model.set_start_by_pixel(-10_000.0, &mut sink);

        let (abs_start, _) = model.absolute_window();
        assert!(abs_start >= 0.0);
        assert!(sink.previews[0] >= 0.0);
    }

    #[test]
    fn window_drag_preserves_length() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();
        let before = model.window().duration();

        model.drag_window_by_pixel(60.0, &mut sink);

        let window = model.window();
        assert!((window.duration() - before).abs() < 1e-9);
        assert!((window.start_secs + 10.0).abs() < 1e-9);
        assert!((window.end_secs - 20.0).abs() < 1e-9);
    }

    #[test]
    fn window_drag_clamps_at_bounds_without_shrinking() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();
        let before = model.window().duration();

        model.drag_window_by_pixel(1_000_000.0, &mut sink);

        let window = model.window();
        assert!((window.duration() - before).abs() < 1e-9);
        assert!(window.end_secs <= MAX_OFFSET_SECS + 1e-9);
    }

    #[test]
    fn toggle_mode_round_trips() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();
        model.set_start_by_pixel(-87.0, &mut sink);
        let original = model.window();

        model.toggle_mode();
        assert_eq!(model.window().mode, TrimMode::Absolute);
        assert!((model.window().start_secs - (2220.0 + original.start_secs)).abs() < 1e-9);

        model.toggle_mode();
        let back = model.window();
        assert_eq!(back.mode, TrimMode::Relative);
        assert!((back.start_secs - original.start_secs).abs() < 1e-9);
        assert!((back.end_secs - original.end_secs).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_default_in_current_mode() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();
        model.set_start_by_pixel(-300.0, &mut sink);
        model.reset();
        assert!((model.window().start_secs + 15.0).abs() < 1e-9);

        model.toggle_mode();
        model.set_end_by_pixel(250.0, &mut sink);
        model.reset();
        let window = model.window();
        assert_eq!(window.mode, TrimMode::Absolute);
        assert!((window.start_secs - 2205.0).abs() < 1e-9);
        assert!((window.end_secs - 2235.0).abs() < 1e-9);
    }

    #[test]
    fn save_emits_without_mutating() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();
        model.set_end_by_pixel(240.0, &mut sink);
        let before = model.window();

        model.save(&mut sink);

        assert_eq!(sink.saved, vec![before]);
        assert_eq!(model.window(), before);
    }

    #[test]
    fn drag_session_routes_moves_to_its_target() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();

        // Grab the whole window at x=0 and pull it 24 px (2 s) right in
        // two moves; edges follow the pointer deltas.
        model.drag_start(DragTarget::Window, 0.0);
        model.drag_move(12.0, &mut sink);
        model.drag_move(24.0, &mut sink);
        model.drag_end();

        let window = model.window();
        assert!((window.start_secs + 13.0).abs() < 1e-9);
        assert!((window.end_secs - 17.0).abs() < 1e-9);

        // Handle grabs track the absolute pointer position instead.
        model.drag_start(DragTarget::EndHandle, 0.0);
        model.drag_move(240.0, &mut sink);
        model.drag_end();
        assert!((model.window().end_secs - 20.0).abs() < 1e-9);
    }

    #[test]
    fn moves_without_an_active_drag_are_ignored() {
        let mut model = model_at(2220.0);
        let mut sink = RecordingSink::default();
        let before = model.window();

        model.drag_move(120.0, &mut sink);

        assert_eq!(model.window(), before);
        assert!(sink.previews.is_empty());
    }

    #[test]
    fn config_follows_app_defaults() {
        let defaults = matchreel_common::config::TrimDefaults {
            pixels_per_second: 24.0,
            default_offset_secs: 10.0,
        };
        let mut model = TrimModel::new(2220.0, 5400.0, TrimConfig::from(&defaults));
        assert!((model.window().start_secs + 10.0).abs() < 1e-9);

        // Doubled ruler scale: -120 px is only 5 seconds.
        let mut sink = RecordingSink::default();
        model.set_start_by_pixel(-120.0, &mut sink);
        assert!((model.window().start_secs + 5.0).abs() < 1e-9);
    }

    #[test]
    fn playhead_is_derived_only() {
        let model = model_at(2220.0);
        let before = model.window();
        let offset = model.playhead_offset(2227.5);
        assert!((offset - 7.5).abs() < 1e-9);
        assert_eq!(model.window(), before);
    }

    #[derive(Debug, Clone, Copy)]
    enum DragOp {
        Start(f64),
        End(f64),
        Window(f64),
        Toggle,
        Reset,
    }

    fn arbitrary_op() -> impl proptest::strategy::Strategy<Value = DragOp> {
        use proptest::prelude::*;
        prop_oneof![
            (-2000.0f64..2000.0).prop_map(DragOp::Start),
            (-2000.0f64..2000.0).prop_map(DragOp::End),
            (-2000.0f64..2000.0).prop_map(DragOp::Window),
            proptest::strategy::Just(DragOp::Toggle),
            proptest::strategy::Just(DragOp::Reset),
        ]
    }

    proptest::proptest! {
        #[test]
        fn invariants_hold_after_every_operation(
            event in 0.0f64..5400.0,
            ops in proptest::collection::vec(arbitrary_op(), 1..40),
        ) {
            let mut model = TrimModel::new(event, 5400.0, TrimConfig::default());
            let mut sink = RecordingSink::default();

            for op in ops {
                match op {
                    DragOp::Start(px) => model.set_start_by_pixel(px, &mut sink),
                    DragOp::End(px) => model.set_end_by_pixel(px, &mut sink),
                    DragOp::Window(px) => model.drag_window_by_pixel(px, &mut sink),
                    DragOp::Toggle => model.toggle_mode(),
                    DragOp::Reset => model.reset(),
                }

                // The load-bearing invariant: never a sub-minimum window,
                // no matter the drag sequence. Mode bounds are covered by
                // the deterministic tests above; toggling preserves values
                // losslessly, so a wide absolute window may legitimately
                // exceed the relative offsets until the next relative drag.
                let window = model.window();
                proptest::prop_assert!(
                    window.duration() >= MIN_CLIP_DURATION_SECS - 1e-6,
                    "window shrank below minimum: {window:?}"
                );
            }
        }
    }
}
