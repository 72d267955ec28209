//! MatchReel Playback Core — clip timing and sequencing.
//!
//! Three cooperating components, none of which owns a network or storage
//! resource:
//! - **Resolver:** maps a clip's heterogeneous event-time inputs to a
//!   clamped, video-relative seek window
//! - **Trim:** interactive extraction-window editing with dual coordinate
//!   modes and drag clamping
//! - **Sequencer:** the state machine driving unattended playback of a
//!   playlist, interleaving generated overlays with real clips
//!
//! This crate is pure computation — no I/O, no platform dependencies, no
//! clocks. Waiting is expressed as timer requests the host schedules and
//! fires back; media is driven through the [`media::MediaSurface`] trait.

pub mod media;
pub mod progress;
pub mod resolver;
pub mod sequencer;
pub mod simulate;
pub mod trim_model;

pub use media::MediaSurface;
pub use resolver::{ResolvedWindow, ResolverConfig, TimeResolver};
pub use sequencer::{PlaybackSequencer, SequencerConfig, SequencerState};
pub use trim_model::{DragTarget, TrimModel, TrimSink};
