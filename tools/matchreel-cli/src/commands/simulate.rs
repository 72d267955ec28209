//! Dry-run the playback sequence and print the state trace.

use std::path::PathBuf;

use matchreel_clip_model::Playlist;
use matchreel_common::config::AppConfig;
use matchreel_playback_core::sequencer::SequencerConfig;
use matchreel_playback_core::simulate::simulate_sequence;

pub fn run(path: PathBuf, include_overlays: bool, loop_enabled: bool) -> anyhow::Result<()> {
    let playlist =
        Playlist::load(&path).map_err(|e| anyhow::anyhow!("Failed to load playlist: {e}"))?;

    // Timing knobs come from the user's config; the flags only select the
    // sequence shape.
    let defaults = AppConfig::load();
    let config = SequencerConfig {
        include_overlays,
        loop_enabled,
        ..SequencerConfig::from(&defaults.sequencing)
    };
    let report = simulate_sequence(&playlist, config);

    println!(
        "Simulated sequence for '{}' ({} clip(s), overlays {}):",
        playlist.name,
        playlist.clips.len(),
        if include_overlays { "on" } else { "off" }
    );
    for state in report.state_trace() {
        println!("  {state}");
    }

    if report.completed {
        let final_progress = report
            .steps
            .last()
            .map(|step| step.progress_percent)
            .unwrap_or(0.0);
        println!("\nCompleted at {final_progress:.0}% progress.");
    } else {
        println!("\nSequence did not complete (loop mode trace is truncated).");
    }

    Ok(())
}
