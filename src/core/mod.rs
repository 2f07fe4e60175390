//! Core types: moves, configuration, errors, dice RNG.
//!
//! Everything here is independent of any particular engine. The codec and
//! the episode controller build on these.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;

use smallvec::SmallVec;

pub use action::{Cells, Move, MoveShape};
pub use config::{EnvConfig, MAX_TRACKS, MIN_TRACKS};
pub use error::{EngineError, EnvError, EnvResult};
pub use rng::{DiceRng, DiceRngState};

/// Most recent dice draw. Length depends on the game phase.
pub type Roll = SmallVec<[i64; 4]>;

/// Fixed-size engine state vector.
pub type StateVector = Vec<i64>;
