//! Engines shipped with the crate.
//!
//! - `simple`: rule-light dice engine for exercising the controller

pub mod simple;
