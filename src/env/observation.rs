//! Observation assembly: roll prefix followed by the state suffix.

use serde::{Deserialize, Serialize};

/// Flat observation handed to the agent.
///
/// The roll length varies with the game phase, so the total length is not
/// fixed. `roll()` and `state()` split it back into its two parts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawObservation")]
pub struct Observation {
    values: Vec<i64>,
    roll_len: usize,
}

/// Unchecked wire form of `Observation`.
#[derive(Deserialize)]
struct RawObservation {
    values: Vec<i64>,
    roll_len: usize,
}

impl TryFrom<RawObservation> for Observation {
    type Error = String;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        if raw.roll_len > raw.values.len() {
            return Err(format!(
                "roll length {} exceeds observation length {}",
                raw.roll_len,
                raw.values.len()
            ));
        }
        Ok(Self {
            values: raw.values,
            roll_len: raw.roll_len,
        })
    }
}

impl Observation {
    /// Concatenate a roll and a state vector.
    #[must_use]
    pub fn assemble(roll: &[i64], state: &[i64]) -> Self {
        let mut values = Vec::with_capacity(roll.len() + state.len());
        values.extend_from_slice(roll);
        values.extend_from_slice(state);
        Self {
            values,
            roll_len: roll.len(),
        }
    }

    /// The roll prefix.
    #[must_use]
    pub fn roll(&self) -> &[i64] {
        &self.values[..self.roll_len]
    }

    /// The state suffix.
    #[must_use]
    pub fn state(&self) -> &[i64] {
        &self.values[self.roll_len..]
    }

    /// Number of roll entries at the front.
    #[must_use]
    pub fn roll_len(&self) -> usize {
        self.roll_len
    }

    /// The whole observation.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Total length: roll length plus state length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if both roll and state are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the flat values.
    #[must_use]
    pub fn into_vec(self) -> Vec<i64> {
        self.values
    }
}
