//! MatchReel Clip Model
//!
//! Defines the core data contracts for MatchReel playlists:
//! - **Clips:** A playable highlight with its heterogeneous event timing
//! - **Bounds:** What slice of the match a video asset actually covers
//! - **Trim:** The user-adjustable extraction window around an event
//! - **Playlist:** The ordered clip list handed to the playback sequencer
//!
//! All times are fractional seconds relative to the owning media asset,
//! except match-clock values which are whole minutes/seconds as read off
//! the scoreboard.

pub mod bounds;
pub mod clip;
pub mod playlist;
pub mod trim;

pub use bounds::*;
pub use clip::*;
pub use playlist::*;
pub use trim::*;
