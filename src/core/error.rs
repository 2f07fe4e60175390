//! Error types for the environment and the engine boundary.
//!
//! Two layers:
//! - `EngineError`: faults raised by an `Engine` implementation (transport,
//!   malformed responses, rejected moves).
//! - `EnvError`: everything the caller of the codec or the controller can see.
//!   Engine faults are carried through unchanged in `EnvError::Engine`.

use thiserror::Error;

/// Faults raised by an engine implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The channel to the engine failed (process gone, bridge error).
    #[error("engine transport failed: {0}")]
    Transport(String),

    /// The engine answered with something that could not be interpreted.
    #[error("malformed engine response: {0}")]
    MalformedResponse(String),

    /// The engine refused the request.
    #[error("engine rejected request: {0}")]
    Rejected(String),

    /// A session call arrived before `initialize`/`reset`.
    #[error("engine session not initialized")]
    NotInitialized,
}

/// Errors surfaced by the codec and the episode controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// Action index outside `[0, action_count)`.
    ///
    /// `i128` holds every `usize` and `i64` index exactly.
    #[error("invalid action index {index}: expected 0..{action_count}")]
    InvalidAction { index: i128, action_count: usize },

    /// A move that no action index encodes.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// `step` was called before any `reset`.
    #[error("session not ready: call reset() before step()")]
    SessionNotReady,

    /// Configuration rejected by `EnvConfig::validate`.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Fault propagated from the engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Trajectory could not be encoded or decoded.
    #[error("trajectory serialization failed: {0}")]
    Trajectory(String),
}

impl EngineError {
    /// Fault for a failed call to engine method `method`.
    ///
    /// A `refused` call means the engine itself declined the request;
    /// anything else is treated as a broken channel.
    #[must_use]
    pub fn call_failed(method: &str, refused: bool, detail: impl std::fmt::Display) -> Self {
        let message = format!("{}(): {}", method, detail);
        if refused {
            EngineError::Rejected(message)
        } else {
            EngineError::Transport(message)
        }
    }
}

impl EnvError {
    /// True for errors caused by the caller (bad index, bad move, usage order).
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EnvError::InvalidAction { .. }
                | EnvError::InvalidMove(_)
                | EnvError::SessionNotReady
                | EnvError::InvalidConfig(_)
        )
    }
}

/// Result alias used across the crate.
pub type EnvResult<T> = Result<T, EnvError>;
