//! The operations the episode controller requires of a game engine.

use crate::core::{EngineError, Roll, StateVector};

/// A game engine session.
///
/// Call order, as driven by `EpisodeController`:
/// 1. `initialize` once per controller lifetime
/// 2. `reset` to start an episode, then `roll`
/// 3. per step: `apply_move`, then `state`, `roll`, `is_done`
///
/// ## Implementation Notes
///
/// - `reset` must work repeatedly and discard any in-progress episode.
/// - `apply_move` receives exactly `T` cells with values 0, 1 or 2, in
///   track order. Implementations must not reorder or rescale them.
/// - Faults are reported as `EngineError`; the controller never retries.
pub trait Engine {
    /// One-time process-level setup.
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Start a new session and return its initial state vector.
    fn reset(&mut self) -> Result<StateVector, EngineError>;

    /// Submit a decoded move and the stop decision.
    fn apply_move(&mut self, cells: &[u8], stop: bool) -> Result<(), EngineError>;

    /// Current state vector (fixed length).
    fn state(&self) -> Result<StateVector, EngineError>;

    /// Most recent roll (length varies with the game phase).
    fn roll(&self) -> Result<Roll, EngineError>;

    /// True once the session has finished.
    fn is_done(&self) -> Result<bool, EngineError>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn initialize(&mut self) -> Result<(), EngineError> {
        (**self).initialize()
    }

    fn reset(&mut self) -> Result<StateVector, EngineError> {
        (**self).reset()
    }

    fn apply_move(&mut self, cells: &[u8], stop: bool) -> Result<(), EngineError> {
        (**self).apply_move(cells, stop)
    }

    fn state(&self) -> Result<StateVector, EngineError> {
        (**self).state()
    }

    fn roll(&self) -> Result<Roll, EngineError> {
        (**self).roll()
    }

    fn is_done(&self) -> Result<bool, EngineError> {
        (**self).is_done()
    }
}
