//! Compute the resolved seek window for every clip in a playlist.

use std::path::PathBuf;

use matchreel_clip_model::Playlist;
use matchreel_playback_core::resolver::{ResolverConfig, TimeResolver};

pub fn run(
    path: PathBuf,
    pre_roll: f64,
    clip_secs: f64,
    post_roll: Option<f64>,
) -> anyhow::Result<()> {
    let playlist =
        Playlist::load(&path).map_err(|e| anyhow::anyhow!("Failed to load playlist: {e}"))?;

    let resolver = TimeResolver::new(ResolverConfig {
        pre_roll_secs: pre_roll,
        fixed_clip_secs: clip_secs,
        post_roll_secs: post_roll,
    });

    println!("Resolved windows for {} clip(s):", playlist.clips.len());
    for clip in &playlist.clips {
        if !clip.has_playable_media() {
            println!("  {} — no playable media (timed hold)", clip.id);
            continue;
        }

        let bounds = playlist.effective_bounds(clip);
        let window = match clip.trim {
            Some(trim) => resolver.resolve_with_trim(clip, &bounds, &trim),
            None => resolver.resolve(clip, &bounds),
        };

        println!(
            "  {} — seek {:.1}s .. {:.1}s ({:.1}s)",
            clip.id,
            window.seek_start_secs,
            window.seek_end_secs,
            window.duration()
        );
        if window.out_of_coverage {
            tracing::warn!(
                clip = %clip.id,
                minute = clip.timing.match_minute,
                "Event falls outside video coverage; window is a clamped estimate"
            );
        }
    }

    Ok(())
}
