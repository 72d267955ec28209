//! Clock-free sequence simulation.
//!
//! Runs a [`PlaybackSequencer`] to completion by synthesizing the
//! forward-only event feed a live host would deliver: every overlay
//! completes, every clip ends, every hold timer fires. No real time
//! passes, so the full state trace of an unattended run can be inspected
//! by tests and the CLI without rendering anything.

use matchreel_clip_model::{ClipId, Playlist};

use crate::media::NullSurface;
use crate::resolver::{ResolvedWindow, TimeResolver};
use crate::sequencer::{ClipPhase, PlaybackSequencer, SequencerConfig, SequencerState};

/// Injection cap so a loop-enabled sequence still terminates.
pub const MAX_SIMULATION_STEPS: usize = 256;

/// One observed machine state, after one synthetic event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedStep {
    pub state: SequencerState,
    pub phase: Option<ClipPhase>,
    pub progress_percent: f64,
}

/// Outcome of a simulated run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Visited states in order, starting at `Idle`.
    pub steps: Vec<SimulatedStep>,

    /// Whether the machine reached `Complete` (a looping sequence never
    /// does; its trace is truncated at [`MAX_SIMULATION_STEPS`]).
    pub completed: bool,

    /// Resolved seek window per playable clip.
    pub windows: Vec<(ClipId, ResolvedWindow)>,
}

impl SimulationReport {
    /// The distinct states visited, for trace assertions and display.
    pub fn state_trace(&self) -> Vec<SequencerState> {
        let mut trace: Vec<SequencerState> = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            if trace.last() != Some(&step.state) {
                trace.push(step.state);
            }
        }
        trace
    }
}

/// Drive a playlist through a full unattended run.
pub fn simulate_sequence(playlist: &Playlist, config: SequencerConfig) -> SimulationReport {
    let resolver = TimeResolver::new(config.resolver);
    let windows = playlist
        .clips
        .iter()
        .filter(|clip| clip.has_playable_media())
        .map(|clip| {
            let bounds = playlist.effective_bounds(clip);
            let window = match clip.trim {
                Some(trim) => resolver.resolve_with_trim(clip, &bounds, &trim),
                None => resolver.resolve(clip, &bounds),
            };
            (clip.id.clone(), window)
        })
        .collect();

    let mut sequencer =
        PlaybackSequencer::new(playlist.clone(), config, Box::<NullSurface>::default());

    let mut steps = vec![observe(&sequencer)];
    sequencer.start();
    steps.push(observe(&sequencer));

    let mut injections = 0;
    loop {
        match sequencer.state() {
            SequencerState::Idle | SequencerState::Complete => break,
            _ if injections >= MAX_SIMULATION_STEPS => {
                tracing::warn!(
                    steps = injections,
                    "Simulation truncated before completion (looping sequence?)"
                );
                break;
            }
            SequencerState::Opening
            | SequencerState::Transitioning(_)
            | SequencerState::Closing => sequencer.overlay_completed(),
            SequencerState::PlayingClip(_) => match sequencer.clip_phase() {
                Some(ClipPhase::PreRoll) => sequencer.overlay_completed(),
                Some(ClipPhase::Rolling) => sequencer.media_ended(),
                Some(ClipPhase::ThumbnailHold) | Some(ClipPhase::MissingMediaHold) => {
                    match sequencer.take_timer_request() {
                        Some(request) => sequencer.timer_fired(request.token),
                        None => break,
                    }
                }
                None => break,
            },
        }
        injections += 1;
        steps.push(observe(&sequencer));
    }

    SimulationReport {
        completed: sequencer.state() == SequencerState::Complete,
        steps,
        windows,
    }
}

fn observe(sequencer: &PlaybackSequencer) -> SimulatedStep {
    SimulatedStep {
        state: sequencer.state(),
        phase: sequencer.clip_phase(),
        progress_percent: sequencer.progress_percent(),
    }
}
