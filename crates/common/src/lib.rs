//! MatchReel Common Utilities
//!
//! Shared infrastructure for all MatchReel crates:
//! - Error types and result aliases
//! - Single-slot timer primitive for the playback state machine
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod timer;

pub use config::*;
pub use error::*;
pub use timer::*;
