//! Action codec and space descriptors.
//!
//! - `ActionCodec`: bijection between `[0, 2M)` and (move, stop) pairs
//! - `ActionSpace` / `ObservationSpace`: gym-style shape descriptors

pub mod action;
pub mod space;

pub use action::{ActionCodec, DecodedAction};
pub use space::{ActionSpace, ObservationSpace};
