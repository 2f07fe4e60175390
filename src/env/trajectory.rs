//! Episode trajectory recording.
//!
//! When `EnvConfig::record_trajectory` is set, the controller records the
//! initial observation of each episode and every successful step after it.
//! Trajectories serialize with serde and pack into bytes with bincode.

use serde::{Deserialize, Serialize};

use crate::codec::DecodedAction;
use crate::core::{EnvError, EnvResult};

use super::observation::Observation;

/// A single step of an episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Flat action index submitted by the agent.
    pub index: usize,

    /// The move and stop flag the index decoded to.
    pub action: DecodedAction,

    /// Observation returned by the step.
    pub observation: Observation,

    /// Reward returned by the step.
    pub reward: f64,

    /// Engine completion flag after the step.
    pub done: bool,
}

/// Everything observed during one episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeTrajectory {
    /// 1-based episode number within the controller's lifetime.
    pub episode: u64,

    /// Observation returned by `reset`.
    pub initial: Observation,

    /// Steps in order.
    pub transitions: Vec<Transition>,
}

impl EpisodeTrajectory {
    /// Start a trajectory from the reset observation.
    pub fn new(episode: u64, initial: Observation) -> Self {
        Self {
            episode,
            initial,
            transitions: Vec::new(),
        }
    }

    /// Append a step.
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// True if no step has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of step rewards.
    pub fn total_reward(&self) -> f64 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// True once a step reported `done`.
    pub fn is_complete(&self) -> bool {
        self.transitions.iter().any(|t| t.done)
    }

    /// Action indices in step order.
    pub fn actions(&self) -> impl Iterator<Item = usize> + '_ {
        self.transitions.iter().map(|t| t.index)
    }

    /// Encode to bytes.
    pub fn to_bytes(&self) -> EnvResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EnvError::Trajectory(e.to_string()))
    }

    /// Decode from bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> EnvResult<Self> {
        bincode::deserialize(bytes).map_err(|e| EnvError::Trajectory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    fn transition(index: usize, done: bool) -> Transition {
        Transition {
            index,
            action: DecodedAction {
                mv: Move::double(12, index % 12),
                stop: false,
            },
            observation: Observation::assemble(&[1, 2, 3, 4], &[index as i64]),
            reward: 1.0,
            done,
        }
    }

    #[test]
    fn test_push_and_totals() {
        let mut trajectory = EpisodeTrajectory::new(1, Observation::assemble(&[1, 1, 1, 1], &[0]));
        assert!(trajectory.is_empty());

        trajectory.push(transition(3, false));
        trajectory.push(transition(5, true));

        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.total_reward(), 2.0);
        assert!(trajectory.is_complete());
        assert_eq!(trajectory.actions().collect::<Vec<_>>(), vec![3, 5]);
    }

    #[test]
    fn test_bytes() {
        let mut trajectory = EpisodeTrajectory::new(4, Observation::assemble(&[6, 6], &[10]));
        trajectory.push(transition(7, false));

        let bytes = trajectory.to_bytes().unwrap();
        let back = EpisodeTrajectory::from_bytes(&bytes).unwrap();
        assert_eq!(trajectory, back);
    }

    #[test]
    fn test_from_bad_bytes() {
        assert!(matches!(
            EpisodeTrajectory::from_bytes(&[0xff, 0x01]),
            Err(EnvError::Trajectory(_))
        ));
    }

    #[test]
    fn test_from_bytes_rejects_corrupt_roll_len() {
        let trajectory = EpisodeTrajectory::new(2, Observation::assemble(&[6, 6], &[10]));
        let mut bytes = trajectory.to_bytes().unwrap();

        // episode (8) + values length (8) + three values (24)
        let roll_len_at = 8 + 8 + 3 * 8;
        assert_eq!(bytes[roll_len_at], 2);
        bytes[roll_len_at] = 9;

        assert!(matches!(
            EpisodeTrajectory::from_bytes(&bytes),
            Err(EnvError::Trajectory(_))
        ));
    }

    #[test]
    fn test_json() {
        let trajectory = EpisodeTrajectory::new(1, Observation::assemble(&[], &[0]));
        let json = serde_json::to_string(&trajectory).unwrap();
        let back: EpisodeTrajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(trajectory, back);
    }
}
