//! Show playlist information.

use std::path::PathBuf;

use matchreel_clip_model::{Playlist, SourceKind};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let playlist =
        Playlist::load(&path).map_err(|e| anyhow::anyhow!("Failed to load playlist: {e}"))?;

    println!("Playlist: {}", playlist.name);
    println!("  Version: {}", playlist.version);
    println!(
        "  Default bounds: {}",
        match playlist.default_bounds.duration_secs {
            Some(d) => format!(
                "{d:.1}s, coverage {}'..{}'",
                playlist.default_bounds.coverage_minutes().0,
                playlist.default_bounds.coverage_minutes().1
            ),
            None => "unknown (90-minute fallback)".to_string(),
        }
    );
    println!();

    println!("Clips ({}):", playlist.clips.len());
    for clip in &playlist.clips {
        let kind = match clip.source_kind {
            SourceKind::PreExtracted => "pre-extracted",
            SourceKind::FullMatchVideo => "full-match seek",
            SourceKind::ThumbnailOnly => "thumbnail only",
        };
        let second = clip.timing.match_second.unwrap_or(0);
        println!(
            "  {} — {} ({kind}, {}'{:02}\", event ~{:.1}s)",
            clip.id,
            clip.title,
            clip.timing.match_minute,
            second,
            clip.raw_event_seconds()
        );
        if let Some(ref url) = clip.media_url {
            println!("      media: {url}");
        }
        if let Some(ref url) = clip.thumbnail_url {
            println!("      thumbnail: {url}");
        }
        if let Some(trim) = clip.trim {
            println!(
                "      trim: [{:+.1}s, {:+.1}s] ({:?})",
                trim.start_secs, trim.end_secs, trim.mode
            );
        }
    }

    Ok(())
}
