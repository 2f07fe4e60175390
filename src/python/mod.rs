//! Python bindings for the cantstop-gym environment.
//!
//! # Quick Start
//!
//! ```python
//! import cantstop_gym as cs
//!
//! # Built-in dice engine
//! env = cs.CantStopEnv(seed=42)
//! obs = env.reset()
//! obs, reward, done, info = env.step(12)
//!
//! # Any object with initialize/reset/apply_move/get_state/get_roll/is_done
//! env = cs.CantStopEnv(engine=MyEngine())
//!
//! # Codec on its own
//! codec = cs.ActionCodec(12)
//! cells, stop = codec.decode(90)
//! ```

use pyo3::prelude::*;

mod py_codec;
mod py_env;

pub use py_codec::*;
pub use py_env::*;

/// cantstop_gym: flat RL interface to a Can't Stop dice engine.
///
/// This module provides:
/// - `ActionCodec`: action index <-> (cells, stop)
/// - `CantStopEnv`: gym-style reset/step environment
#[pymodule]
fn cantstop_gym(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyActionCodec>()?;
    m.add_class::<PyCantStopEnv>()?;
    Ok(())
}
