//! Flat action index <-> structured move codec.
//!
//! The action space is `[0, 2M)` with `M = T(T+1)/2` for `T` tracks. The low
//! half means "continue", the high half is the same move plus "stop".
//!
//! Non-stop indices are grouped into `T` contiguous levels:
//! - level 0 (size `T`): index `o` doubles track `o`
//! - level `k >= 1` (size `T - k`): pairs track `k - 1` with every higher
//!   track, in increasing order
//!
//! For the classic 12-track board this gives 78 moves and 156 actions.
//!
//! ```
//! use cantstop_gym::codec::ActionCodec;
//! use cantstop_gym::core::Move;
//!
//! let codec = ActionCodec::new(12).unwrap();
//! let decoded = codec.decode(23).unwrap();
//! assert_eq!(decoded.mv, Move::pair(12, 1, 2));
//! assert!(!decoded.stop);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{EnvConfig, EnvError, EnvResult, Move, MoveShape, MAX_TRACKS, MIN_TRACKS};

/// A decoded action: the move plus the stop decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodedAction {
    /// Tracks to advance.
    pub mv: Move,
    /// End the turn after this move.
    pub stop: bool,
}

/// Stateless codec for a fixed track count.
///
/// Level boundaries are precomputed once; decoding is a binary search over
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionCodec {
    track_count: usize,
    move_count: usize,
    /// Exclusive cumulative end index of each level.
    level_ends: Vec<usize>,
}

impl ActionCodec {
    /// Build a codec for `track_count` tracks.
    pub fn new(track_count: usize) -> EnvResult<Self> {
        if !(MIN_TRACKS..=MAX_TRACKS).contains(&track_count) {
            return Err(EnvError::InvalidConfig(format!(
                "track_count must be in {}..={}, got {}",
                MIN_TRACKS, MAX_TRACKS, track_count
            )));
        }

        let mut level_ends = Vec::with_capacity(track_count);
        let mut end = track_count;
        level_ends.push(end);
        for level in 1..track_count {
            end += track_count - level;
            level_ends.push(end);
        }

        Ok(Self {
            track_count,
            move_count: end,
            level_ends,
        })
    }

    /// Build a codec for the configured track count.
    pub fn from_config(config: &EnvConfig) -> EnvResult<Self> {
        Self::new(config.track_count)
    }

    /// Number of tracks `T`.
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// Number of distinct non-stop moves `M`.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Size of the action space, `2M`.
    #[must_use]
    pub fn action_count(&self) -> usize {
        2 * self.move_count
    }

    /// Exclusive end index of every level, in level order.
    #[must_use]
    pub fn level_ends(&self) -> &[usize] {
        &self.level_ends
    }

    /// Level and intra-level offset of a non-stop index in `[0, M)`.
    #[must_use]
    pub fn level_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.move_count).then(|| self.locate(index))
    }

    /// Decode an action index.
    ///
    /// Fails with `InvalidAction` when `index >= 2M`.
    pub fn decode(&self, index: usize) -> EnvResult<DecodedAction> {
        if index >= self.action_count() {
            return Err(self.invalid(i128::try_from(index).unwrap_or(i128::MAX)));
        }
        Ok(self.decode_in_range(index))
    }

    /// Decode a signed action index; negatives are invalid.
    pub fn decode_signed(&self, index: i64) -> EnvResult<DecodedAction> {
        let index = usize::try_from(index).map_err(|_| self.invalid(i128::from(index)))?;
        self.decode(index)
    }

    /// Encode a move and stop flag back into its action index.
    ///
    /// Fails with `InvalidMove` for a wrong track count or a cell pattern
    /// that is neither a double nor a pair.
    pub fn encode(&self, mv: &Move, stop: bool) -> EnvResult<usize> {
        if mv.track_count() != self.track_count {
            return Err(EnvError::InvalidMove(format!(
                "expected {} cells, got {}",
                self.track_count,
                mv.track_count()
            )));
        }

        let base = match mv.shape() {
            Some(MoveShape::Double(track)) => track,
            Some(MoveShape::Pair(low, high)) => self.level_ends[low] + (high - low - 1),
            None => return Err(EnvError::InvalidMove(format!("{} is not a double or a pair", mv))),
        };

        Ok(if stop { base + self.move_count } else { base })
    }

    /// Iterate over every action index with its decoded action.
    pub fn iter(&self) -> impl Iterator<Item = (usize, DecodedAction)> + '_ {
        (0..self.action_count()).map(move |index| (index, self.decode_in_range(index)))
    }

    fn decode_in_range(&self, index: usize) -> DecodedAction {
        let (stop, base) = if index >= self.move_count {
            (true, index - self.move_count)
        } else {
            (false, index)
        };

        let (level, offset) = self.locate(base);
        let mv = if level == 0 {
            Move::double(self.track_count, offset)
        } else {
            let low = level - 1;
            Move::pair(self.track_count, low, low + offset + 1)
        };

        DecodedAction { mv, stop }
    }

    /// First level whose end exceeds `index`. Caller guarantees `index < M`.
    fn locate(&self, index: usize) -> (usize, usize) {
        let level = self.level_ends.partition_point(|&end| end <= index);
        let start = if level == 0 { 0 } else { self.level_ends[level - 1] };
        (level, index - start)
    }

    fn invalid(&self, index: i128) -> EnvError {
        EnvError::InvalidAction {
            index,
            action_count: self.action_count(),
        }
    }
}
