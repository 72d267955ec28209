//! Create a sample playlist to start from.

use std::path::PathBuf;

use matchreel_clip_model::{ClipRef, EventTiming, MediaBounds, Playlist};

pub fn run(name: String, output: PathBuf) -> anyhow::Result<()> {
    let mut playlist = Playlist::new(&name);
    playlist.default_bounds = MediaBounds::known(5400.0);
    playlist.clips = vec![
        ClipRef::pre_extracted(
            "goal-37",
            "Goal — 37'",
            "https://example.com/clips/goal-37.mp4",
            EventTiming::from_match_clock(37, Some(12)),
        ),
        ClipRef::full_match(
            "chance-64",
            "Big chance — 64'",
            "https://example.com/match/full.mp4",
            EventTiming::from_match_clock(64, None),
        ),
        ClipRef::thumbnail_only(
            "card-71",
            "Yellow card — 71'",
            "https://example.com/stills/card-71.jpg",
            EventTiming::from_match_clock(71, None),
        ),
    ];

    let file_name = format!("{}.playlist.json", name.replace(' ', "-").to_lowercase());
    let path = output.join(file_name);
    playlist
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write playlist: {e}"))?;

    println!("Created sample playlist: {}", path.display());
    Ok(())
}
