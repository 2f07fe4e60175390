//! Simple dice engine for exercising the episode controller.
//!
//! Not the board game's rules, just enough to drive full episodes:
//! - Each step rolls `dice_count` dice
//! - A move's cells advance pending markers on their tracks
//! - Stopping commits pending progress; a malformed move forfeits it
//! - The episode ends once `tracks_to_win` tracks reach `track_length`
//!
//! Deterministic for a given seed. `snapshot`/`restore` checkpoint a session.

mod engine;

pub use engine::{SimpleDiceEngine, SimpleDiceEngineBuilder, SimpleDiceSnapshot};
