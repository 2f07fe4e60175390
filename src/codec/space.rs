//! Gym-style space descriptors for the flat interface.
//!
//! The action space is `Discrete(2M)`. The observation space is
//! `MultiDiscrete`: one bound per die (`sides + 1`, exclusive) followed by one
//! bound per state entry. Observations may carry fewer dice than
//! `dice_count` (the roll length depends on the game phase), so membership
//! only requires the roll prefix to fit.

use serde::{Deserialize, Serialize};

use crate::core::EnvConfig;

/// Flat action space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSpace {
    /// Integers in `[0, n)`.
    Discrete { n: usize },
}

impl ActionSpace {
    /// Action space for a configuration.
    #[must_use]
    pub fn from_config(config: &EnvConfig) -> Self {
        ActionSpace::Discrete {
            n: config.action_count(),
        }
    }

    /// Number of actions.
    #[must_use]
    pub fn n(&self) -> usize {
        match self {
            ActionSpace::Discrete { n } => *n,
        }
    }

    /// Check whether `index` is a valid action.
    #[must_use]
    pub fn contains(&self, index: i64) -> bool {
        usize::try_from(index).map_or(false, |i| i < self.n())
    }
}

/// Observation space: roll prefix then state suffix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationSpace {
    /// Entry `i` lies in `[0, nvec[i])`. The first `dice_count` entries
    /// bound the roll.
    MultiDiscrete { nvec: Vec<i64>, dice_count: usize },
}

impl ObservationSpace {
    /// Observation space for a configuration.
    #[must_use]
    pub fn from_config(config: &EnvConfig) -> Self {
        let die_high = i64::from(config.sides) + 1;
        let mut nvec = vec![die_high; config.dice_count];
        nvec.extend(std::iter::repeat(config.state_high).take(config.state_len));
        ObservationSpace::MultiDiscrete {
            nvec,
            dice_count: config.dice_count,
        }
    }

    /// Exclusive upper bounds, dice first.
    #[must_use]
    pub fn nvec(&self) -> &[i64] {
        match self {
            ObservationSpace::MultiDiscrete { nvec, .. } => nvec,
        }
    }

    /// Maximum roll length.
    #[must_use]
    pub fn dice_count(&self) -> usize {
        match self {
            ObservationSpace::MultiDiscrete { dice_count, .. } => *dice_count,
        }
    }

    /// Check a `(roll, state)` pair against the bounds.
    ///
    /// Rolls shorter than `dice_count` are accepted.
    #[must_use]
    pub fn contains(&self, roll: &[i64], state: &[i64]) -> bool {
        let nvec = self.nvec();
        let dice_count = self.dice_count();
        if roll.len() > dice_count || nvec.len() != dice_count + state.len() {
            return false;
        }

        let in_bounds = |value: i64, high: i64| (0..high).contains(&value);
        roll.iter().zip(&nvec[..dice_count]).all(|(&v, &h)| in_bounds(v, h))
            && state.iter().zip(&nvec[dice_count..]).all(|(&v, &h)| in_bounds(v, h))
    }
}
