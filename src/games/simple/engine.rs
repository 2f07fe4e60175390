//! Simple dice engine implementation.

use serde::{Deserialize, Serialize};

use crate::core::{DiceRng, DiceRngState, EngineError, EnvConfig, Move, Roll, StateVector};
use crate::engine::Engine;

/// Serializable checkpoint of a running session.
///
/// Restoring it replays the same dice from that point on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleDiceSnapshot {
    pub rng: DiceRngState,
    pub progress: Vec<i64>,
    pub pending: Vec<i64>,
    pub roll: Vec<i64>,
    pub done: bool,
}

/// Rule-light engine: markers per track, dice rolled every step.
#[derive(Clone, Debug)]
pub struct SimpleDiceEngine {
    track_count: usize,
    dice_count: usize,
    sides: u32,
    track_length: i64,
    tracks_to_win: usize,
    rng: DiceRng,
    /// Committed progress per track.
    progress: Vec<i64>,
    /// Progress made this turn, lost on a malformed move.
    pending: Vec<i64>,
    roll: Roll,
    initialized: bool,
    active: bool,
    done: bool,
}

/// Builder for creating a SimpleDiceEngine.
pub struct SimpleDiceEngineBuilder {
    track_count: usize,
    dice_count: usize,
    sides: u32,
    track_length: i64,
    tracks_to_win: usize,
}

impl Default for SimpleDiceEngineBuilder {
    fn default() -> Self {
        Self {
            track_count: 12,
            dice_count: 4,
            sides: 6,
            track_length: 8,
            tracks_to_win: 3,
        }
    }
}

impl SimpleDiceEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_count(mut self, count: usize) -> Self {
        assert!(count >= 2, "Track count must be at least 2");
        self.track_count = count;
        self
    }

    pub fn dice(mut self, count: usize, sides: u32) -> Self {
        assert!(sides > 0, "Dice need at least one side");
        self.dice_count = count;
        self.sides = sides;
        self
    }

    pub fn track_length(mut self, length: i64) -> Self {
        assert!(length > 0, "Track length must be positive");
        self.track_length = length;
        self
    }

    pub fn tracks_to_win(mut self, count: usize) -> Self {
        self.tracks_to_win = count;
        self
    }

    /// Environment configuration matching this engine's roll and state shape.
    pub fn env_config(&self) -> EnvConfig {
        EnvConfig::default()
            .with_tracks(self.track_count)
            .with_dice(self.dice_count, self.sides)
            .with_state(self.track_count, self.track_length + 1)
    }

    /// Build the engine.
    pub fn build(self, seed: u64) -> SimpleDiceEngine {
        SimpleDiceEngine {
            track_count: self.track_count,
            dice_count: self.dice_count,
            sides: self.sides,
            track_length: self.track_length,
            tracks_to_win: self.tracks_to_win.clamp(1, self.track_count),
            rng: DiceRng::new(seed),
            progress: vec![0; self.track_count],
            pending: vec![0; self.track_count],
            roll: Roll::new(),
            initialized: false,
            active: false,
            done: false,
        }
    }
}

impl SimpleDiceEngine {
    /// Tracks whose committed progress reached the end.
    pub fn completed_tracks(&self) -> usize {
        self.progress
            .iter()
            .filter(|&&p| p >= self.track_length)
            .count()
    }

    /// Committed progress per track.
    pub fn progress(&self) -> &[i64] {
        &self.progress
    }

    /// Uncommitted progress per track.
    pub fn pending(&self) -> &[i64] {
        &self.pending
    }

    /// Capture the current session.
    pub fn snapshot(&self) -> Result<SimpleDiceSnapshot, EngineError> {
        self.ensure_active()?;
        Ok(SimpleDiceSnapshot {
            rng: self.rng.state(),
            progress: self.progress.clone(),
            pending: self.pending.clone(),
            roll: self.roll.to_vec(),
            done: self.done,
        })
    }

    /// Rewind the session to a snapshot taken from an engine of the same shape.
    pub fn restore(&mut self, snapshot: &SimpleDiceSnapshot) -> Result<(), EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        if snapshot.progress.len() != self.track_count
            || snapshot.pending.len() != self.track_count
        {
            return Err(EngineError::Rejected(format!(
                "snapshot has {} tracks, engine has {}",
                snapshot.progress.len(),
                self.track_count
            )));
        }
        if snapshot.roll.len() > self.dice_count {
            return Err(EngineError::Rejected(format!(
                "snapshot roll has {} dice, engine rolls {}",
                snapshot.roll.len(),
                self.dice_count
            )));
        }

        self.rng = DiceRng::from_state(&snapshot.rng);
        self.progress.clone_from(&snapshot.progress);
        self.pending.clone_from(&snapshot.pending);
        self.roll = Roll::from_slice(&snapshot.roll);
        self.done = snapshot.done;
        self.active = true;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), EngineError> {
        if self.active {
            Ok(())
        } else {
            Err(EngineError::NotInitialized)
        }
    }

    fn commit(&mut self) {
        for (progress, pending) in self.progress.iter_mut().zip(self.pending.iter_mut()) {
            *progress += std::mem::take(pending);
        }
    }

    fn forfeit(&mut self) {
        self.pending.iter_mut().for_each(|p| *p = 0);
    }
}

impl Engine for SimpleDiceEngine {
    fn initialize(&mut self) -> Result<(), EngineError> {
        self.initialized = true;
        Ok(())
    }

    fn reset(&mut self) -> Result<StateVector, EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }

        self.rng.next_episode();
        self.progress.iter_mut().for_each(|p| *p = 0);
        self.forfeit();
        self.roll = self.rng.roll(self.dice_count, self.sides);
        self.active = true;
        self.done = false;

        self.state()
    }

    fn apply_move(&mut self, cells: &[u8], stop: bool) -> Result<(), EngineError> {
        self.ensure_active()?;
        if cells.len() != self.track_count {
            return Err(EngineError::Rejected(format!(
                "expected {} cells, got {}",
                self.track_count,
                cells.len()
            )));
        }
        if self.done {
            return Ok(());
        }

        if Move::from_cells(cells).is_well_formed() {
            for (track, &cell) in cells.iter().enumerate() {
                let room = self.track_length - self.progress[track] - self.pending[track];
                self.pending[track] += i64::from(cell).min(room.max(0));
            }
            if stop {
                self.commit();
            }
        } else {
            self.forfeit();
        }

        self.done = self.completed_tracks() >= self.tracks_to_win;
        if !self.done {
            self.roll = self.rng.roll(self.dice_count, self.sides);
        }
        Ok(())
    }

    fn state(&self) -> Result<StateVector, EngineError> {
        self.ensure_active()?;
        Ok(self
            .progress
            .iter()
            .zip(&self.pending)
            .map(|(p, q)| p + q)
            .collect())
    }

    fn roll(&self) -> Result<Roll, EngineError> {
        self.ensure_active()?;
        Ok(self.roll.clone())
    }

    fn is_done(&self) -> Result<bool, EngineError> {
        self.ensure_active()?;
        Ok(self.done)
    }
}
