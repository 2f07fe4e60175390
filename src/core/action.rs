//! Structured move representation: one cell per track.
//!
//! A move advances tracks by writing small counts into a fixed-length cell
//! vector. Exactly two shapes are legal:
//! - "Double": one cell is 2, every other cell is 0 (advance one track twice)
//! - "Pair": two distinct cells are 1, every other cell is 0
//!
//! The cell vector is also the wire format sent to the engine, so order and
//! values are preserved as-is.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Cell storage. Covers the classic 12-track board without heap allocation.
pub type Cells = SmallVec<[u8; 16]>;

/// Which tracks a well-formed move advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveShape {
    /// Advance a single track twice.
    Double(usize),
    /// Advance two distinct tracks once each (`first < second`).
    Pair(usize, usize),
}

/// A move over `T` tracks.
///
/// ## Example
///
/// ```
/// use cantstop_gym::core::{Move, MoveShape};
///
/// let double = Move::double(12, 3);
/// assert_eq!(double.cells()[3], 2);
///
/// let pair = Move::pair(12, 1, 4);
/// assert_eq!(pair.shape(), Some(MoveShape::Pair(1, 4)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    cells: Cells,
}

impl Move {
    /// All-zero move over `track_count` tracks.
    #[must_use]
    pub fn empty(track_count: usize) -> Self {
        Self {
            cells: SmallVec::from_elem(0, track_count),
        }
    }

    /// Move that advances `track` twice.
    ///
    /// Panics if `track >= track_count`.
    #[must_use]
    pub fn double(track_count: usize, track: usize) -> Self {
        let mut mv = Self::empty(track_count);
        mv.cells[track] = 2;
        mv
    }

    /// Move that advances tracks `a` and `b` once each.
    ///
    /// Panics if either track is out of range. `a == b` yields a double.
    #[must_use]
    pub fn pair(track_count: usize, a: usize, b: usize) -> Self {
        let mut mv = Self::empty(track_count);
        mv.cells[a] += 1;
        mv.cells[b] += 1;
        mv
    }

    /// Build a move from raw cells without checking its shape.
    #[must_use]
    pub fn from_cells(cells: &[u8]) -> Self {
        Self {
            cells: SmallVec::from_slice(cells),
        }
    }

    /// Raw cells, one per track.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of tracks.
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.cells.len()
    }

    /// Classify the move, or `None` if it is not one of the two legal shapes.
    #[must_use]
    pub fn shape(&self) -> Option<MoveShape> {
        let mut twos = SmallVec::<[usize; 2]>::new();
        let mut ones = SmallVec::<[usize; 2]>::new();

        for (track, &cell) in self.cells.iter().enumerate() {
            match cell {
                0 => {}
                1 if ones.len() < 2 => ones.push(track),
                2 if twos.is_empty() => twos.push(track),
                _ => return None,
            }
        }

        match (twos.as_slice(), ones.as_slice()) {
            ([t], []) => Some(MoveShape::Double(*t)),
            ([], [a, b]) => Some(MoveShape::Pair(*a, *b)),
            _ => None,
        }
    }

    /// True if the move is a double or a pair.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.shape().is_some()
    }

    /// Tracks with a non-zero cell, in track order.
    pub fn advanced_tracks(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(t, _)| t)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.shape() {
            Some(MoveShape::Double(t)) => write!(f, "Double({})", t),
            Some(MoveShape::Pair(a, b)) => write!(f, "Pair({}, {})", a, b),
            None => write!(f, "Move({:?})", self.cells.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double() {
        let mv = Move::double(12, 5);
        assert_eq!(mv.track_count(), 12);
        assert_eq!(mv.cells()[5], 2);
        assert_eq!(mv.cells().iter().map(|&c| c as u32).sum::<u32>(), 2);
        assert_eq!(mv.shape(), Some(MoveShape::Double(5)));
    }

    #[test]
    fn test_pair() {
        let mv = Move::pair(12, 2, 9);
        assert_eq!(mv.cells()[2], 1);
        assert_eq!(mv.cells()[9], 1);
        assert_eq!(mv.shape(), Some(MoveShape::Pair(2, 9)));
        assert_eq!(mv.advanced_tracks().collect::<Vec<_>>(), vec![2, 9]);
    }

    #[test]
    fn test_pair_same_track_is_double() {
        assert_eq!(Move::pair(4, 3, 3), Move::double(4, 3));
    }

    #[test]
    fn test_malformed_shapes() {
        assert_eq!(Move::empty(4).shape(), None);
        assert_eq!(Move::from_cells(&[1, 0, 0, 0]).shape(), None);
        assert_eq!(Move::from_cells(&[1, 1, 1, 0]).shape(), None);
        assert_eq!(Move::from_cells(&[2, 1, 0, 0]).shape(), None);
        assert_eq!(Move::from_cells(&[2, 0, 2, 0]).shape(), None);
        assert_eq!(Move::from_cells(&[3, 0, 0, 0]).shape(), None);
        assert!(!Move::from_cells(&[0, 1, 1, 1]).is_well_formed());
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::double(4, 1).to_string(), "Double(1)");
        assert_eq!(Move::pair(4, 0, 3).to_string(), "Pair(0, 3)");
        assert_eq!(Move::from_cells(&[1, 0]).to_string(), "Move([1, 0])");
    }

    #[test]
    fn test_serialization() {
        let mv = Move::pair(12, 0, 11);
        let json = serde_json::to_string(&mv).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, back);
    }
}
