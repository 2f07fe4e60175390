//! # cantstop-gym
//!
//! A flat action/observation interface between a reinforcement-learning
//! agent and a Can't Stop style dice engine.
//!
//! ## Design Principles
//!
//! 1. **Pure Codec**: An action index maps to a (move, stop) pair through a
//!    stateless bijection. Same index, same move, every time.
//!
//! 2. **Injected Engine**: The game engine sits behind the `Engine` trait.
//!    The controller never interprets rules, scoring or dice.
//!
//! 3. **No Recovery**: Engine faults propagate as-is. A faulted session is
//!    discarded with a fresh `reset`.
//!
//! ## Action Layout
//!
//! For `T` tracks there are `M = T(T+1)/2` moves: `T` doubles, then every
//! unordered pair of tracks grouped by the lower track. Indices `[0, M)`
//! continue the turn, `[M, 2M)` are the same moves with a stop request.
//!
//! ## Modules
//!
//! - `core`: Moves, configuration, errors, dice RNG
//! - `codec`: Action codec and space descriptors
//! - `engine`: Engine trait (the external boundary)
//! - `env`: Episode controller, observations, trajectories
//! - `games`: Reference engine for exercising the controller
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod codec;
pub mod engine;
pub mod env;
pub mod games;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Move, MoveShape, Roll, StateVector,
    EnvConfig, EngineError, EnvError, EnvResult,
    DiceRng, DiceRngState,
};

pub use crate::codec::{ActionCodec, DecodedAction, ActionSpace, ObservationSpace};

pub use crate::engine::Engine;

pub use crate::env::{
    EpisodeController, EpisodePhase, StepInfo, StepResult, STEP_REWARD,
    Observation, EpisodeTrajectory, Transition,
};

pub use crate::games::simple::{SimpleDiceEngine, SimpleDiceEngineBuilder, SimpleDiceSnapshot};
