//! Engine boundary.
//!
//! The game engine (rules, dice, opponents) lives outside this crate. The
//! controller reaches it only through the `Engine` trait, so any engine can
//! be plugged in: a bridged external process, a Python object, or the
//! reference engine in `games::simple`.

pub mod traits;

pub use traits::Engine;
