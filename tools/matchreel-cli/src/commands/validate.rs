//! Validate a MatchReel playlist file.

use std::path::PathBuf;

use matchreel_clip_model::Playlist;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating playlist at: {}", path.display());

    let playlist =
        Playlist::load(&path).map_err(|e| anyhow::anyhow!("Failed to load playlist: {e}"))?;

    println!("  Name: {}", playlist.name);
    println!("  Version: {}", playlist.version);
    println!("  Clips: {}", playlist.clips.len());

    let errors = playlist.validate();
    if errors.is_empty() {
        println!("\nPlaylist is valid.");
    } else {
        println!("\nValidation issues:");
        for error in &errors {
            println!("  - {error}");
        }
        println!(
            "\n{} issue(s) found. Playlist may not be fully usable.",
            errors.len()
        );
    }

    Ok(())
}
