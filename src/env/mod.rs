//! Episode protocol: the flat `reset`/`step` interface an agent sees.
//!
//! ## Overview
//!
//! - **Controller**: `EpisodeController` owns an `Engine` and sequences calls
//! - **Observation**: roll prefix plus state suffix
//! - **Trajectory**: optional per-episode recording
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut env = EpisodeController::new(engine, EnvConfig::default())?;
//! let obs = env.reset()?;
//! loop {
//!     let result = env.step(agent.act(&obs))?;
//!     if result.done {
//!         break;
//!     }
//! }
//! ```

pub mod controller;
pub mod observation;
pub mod trajectory;

pub use controller::{EpisodeController, EpisodePhase, StepInfo, StepResult, STEP_REWARD};
pub use observation::Observation;
pub use trajectory::{EpisodeTrajectory, Transition};
