//! Environment configuration.
//!
//! `EnvConfig` fixes the shape of the action and observation spaces:
//! - `track_count`: number of tracks a move can advance (`T`)
//! - `dice_count` / `sides`: bounds of the roll prefix of an observation
//! - `state_len` / `state_high`: shape and bound of the state suffix
//!
//! Defaults reproduce the classic board: 12 tracks, four six-sided dice and
//! a single packed state index.

use serde::{Deserialize, Serialize};

use super::error::{EnvError, EnvResult};

/// Smallest supported track count (one pair needs two tracks).
pub const MIN_TRACKS: usize = 2;

/// Largest supported track count.
pub const MAX_TRACKS: usize = 64;

/// Environment configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Number of tracks (`T`). Determines the action count `T(T+1)`.
    pub track_count: usize,

    /// Maximum number of dice in a roll.
    pub dice_count: usize,

    /// Faces per die. Roll values lie in `1..=sides`.
    pub sides: u32,

    /// Length of the engine's state vector.
    pub state_len: usize,

    /// Exclusive upper bound of every state-vector entry.
    pub state_high: i64,

    /// Record every transition of the current episode.
    pub record_trajectory: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            track_count: 12,
            dice_count: 4,
            sides: 6,
            state_len: 1,
            state_high: i64::from(i32::MAX),
            record_trajectory: false,
        }
    }
}

impl EnvConfig {
    /// Set the track count.
    #[must_use]
    pub fn with_tracks(mut self, track_count: usize) -> Self {
        self.track_count = track_count;
        self
    }

    /// Set dice count and faces per die.
    #[must_use]
    pub fn with_dice(mut self, dice_count: usize, sides: u32) -> Self {
        self.dice_count = dice_count;
        self.sides = sides;
        self
    }

    /// Set state vector length and its exclusive upper bound.
    #[must_use]
    pub fn with_state(mut self, state_len: usize, state_high: i64) -> Self {
        self.state_len = state_len;
        self.state_high = state_high;
        self
    }

    /// Enable or disable trajectory recording.
    #[must_use]
    pub fn with_trajectory(mut self, record: bool) -> Self {
        self.record_trajectory = record;
        self
    }

    /// Number of non-stop moves `M = T(T+1)/2`.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.track_count * (self.track_count + 1) / 2
    }

    /// Size of the flat action space, `2M`.
    #[must_use]
    pub fn action_count(&self) -> usize {
        2 * self.move_count()
    }

    /// Check that the configuration describes a usable environment.
    pub fn validate(&self) -> EnvResult<()> {
        if !(MIN_TRACKS..=MAX_TRACKS).contains(&self.track_count) {
            return Err(EnvError::InvalidConfig(format!(
                "track_count must be in {}..={}, got {}",
                MIN_TRACKS, MAX_TRACKS, self.track_count
            )));
        }
        if self.dice_count == 0 {
            return Err(EnvError::InvalidConfig("dice_count must be positive".into()));
        }
        if self.sides == 0 {
            return Err(EnvError::InvalidConfig("sides must be positive".into()));
        }
        if self.state_len == 0 {
            return Err(EnvError::InvalidConfig("state_len must be positive".into()));
        }
        if self.state_high <= 0 {
            return Err(EnvError::InvalidConfig("state_high must be positive".into()));
        }
        Ok(())
    }
}
