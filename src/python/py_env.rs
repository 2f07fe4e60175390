//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use crate::core::{EngineError, EnvConfig, Roll, StateVector};
use crate::engine::Engine;
use crate::env::EpisodeController;
use crate::games::simple::SimpleDiceEngineBuilder;

use super::py_codec::to_py_err;

/// Engine backed by a Python object.
///
/// The object must provide `initialize()`, `reset()`, `apply_move(cells, stop)`,
/// `get_state()`, `get_roll()` and `is_done()`. `reset`/`get_state` may return
/// either a single integer or a sequence of integers. A `ValueError` raised by
/// the object is a rejected request; any other exception is a transport fault.
pub struct PyEngine {
    target: PyObject,
}

impl PyEngine {
    /// Wrap a Python engine object.
    pub fn new(target: PyObject) -> Self {
        Self { target }
    }

    fn call0(&self, py: Python<'_>, name: &str) -> Result<PyObject, EngineError> {
        self.target
            .call_method0(py, name)
            .map_err(|e| call_error(py, name, &e))
    }
}

/// PyErr's display carries the exception type, e.g. `ValueError: ...`.
fn call_error(py: Python<'_>, name: &str, err: &PyErr) -> EngineError {
    EngineError::call_failed(name, err.is_instance_of::<PyValueError>(py), err)
}

fn extract_state(py: Python<'_>, value: &PyObject, name: &str) -> Result<StateVector, EngineError> {
    if let Ok(values) = value.extract::<Vec<i64>>(py) {
        return Ok(values);
    }
    value
        .extract::<i64>(py)
        .map(|v| vec![v])
        .map_err(|e| EngineError::MalformedResponse(format!("{}(): {}", name, e)))
}

impl Engine for PyEngine {
    fn initialize(&mut self) -> Result<(), EngineError> {
        Python::with_gil(|py| self.call0(py, "initialize").map(|_| ()))
    }

    fn reset(&mut self) -> Result<StateVector, EngineError> {
        Python::with_gil(|py| {
            let value = self.call0(py, "reset")?;
            extract_state(py, &value, "reset")
        })
    }

    fn apply_move(&mut self, cells: &[u8], stop: bool) -> Result<(), EngineError> {
        Python::with_gil(|py| {
            self.target
                .call_method1(py, "apply_move", (cells.to_vec(), stop))
                .map(|_| ())
                .map_err(|e| call_error(py, "apply_move", &e))
        })
    }

    fn state(&self) -> Result<StateVector, EngineError> {
        Python::with_gil(|py| {
            let value = self.call0(py, "get_state")?;
            extract_state(py, &value, "get_state")
        })
    }

    fn roll(&self) -> Result<Roll, EngineError> {
        Python::with_gil(|py| {
            self.call0(py, "get_roll")?
                .extract::<Vec<i64>>(py)
                .map(Roll::from_vec)
                .map_err(|e| EngineError::MalformedResponse(format!("get_roll(): {}", e)))
        })
    }

    fn is_done(&self) -> Result<bool, EngineError> {
        Python::with_gil(|py| {
            self.call0(py, "is_done")?
                .extract::<bool>(py)
                .map_err(|e| EngineError::MalformedResponse(format!("is_done(): {}", e)))
        })
    }
}

/// Gym-style environment.
///
/// Runs the built-in simple dice engine unless a Python engine object is
/// given.
#[pyclass(name = "CantStopEnv")]
pub struct PyCantStopEnv {
    inner: EpisodeController<Box<dyn Engine + Send>>,
}

#[pymethods]
impl PyCantStopEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - engine: Python engine object, or None for the built-in engine
    /// - track_count: Number of tracks
    /// - dice_count: Dice per roll
    /// - sides: Faces per die
    /// - state_len: State vector length of a Python engine (built-in: track_count)
    /// - seed: RNG seed of the built-in engine
    /// - record_trajectory: Keep a trajectory of the current episode
    #[new]
    #[pyo3(signature = (
        engine = None,
        track_count = 12,
        dice_count = 4,
        sides = 6,
        state_len = 1,
        seed = 42,
        record_trajectory = false
    ))]
    fn new(
        engine: Option<PyObject>,
        track_count: usize,
        dice_count: usize,
        sides: u32,
        state_len: usize,
        seed: u64,
        record_trajectory: bool,
    ) -> PyResult<Self> {
        let (engine, config): (Box<dyn Engine + Send>, EnvConfig) = match engine {
            Some(target) => (
                Box::new(PyEngine::new(target)) as Box<dyn Engine + Send>,
                EnvConfig::default()
                    .with_tracks(track_count)
                    .with_dice(dice_count, sides)
                    .with_state(state_len, i64::from(i32::MAX)),
            ),
            None => {
                // Builder asserts on shapes the config check reports as errors.
                EnvConfig::default()
                    .with_tracks(track_count)
                    .with_dice(dice_count, sides)
                    .validate()
                    .map_err(to_py_err)?;
                let builder = SimpleDiceEngineBuilder::new()
                    .track_count(track_count)
                    .dice(dice_count, sides);
                let config = builder.env_config();
                (Box::new(builder.build(seed)) as Box<dyn Engine + Send>, config)
            }
        };

        let config = config.with_trajectory(record_trajectory);
        let inner = EpisodeController::new(engine, config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Start a new episode and return the initial observation.
    fn reset<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<i64>>> {
        let observation = self.inner.reset().map_err(to_py_err)?;
        Ok(PyArray1::from_vec_bound(py, observation.into_vec()))
    }

    /// Take a step. Returns `(observation, reward, done, info)`.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: i64,
    ) -> PyResult<(Bound<'py, PyArray1<i64>>, f64, bool, Bound<'py, PyDict>)> {
        let result = self.inner.step_signed(action).map_err(to_py_err)?;

        let info = PyDict::new_bound(py);
        for (key, value) in &result.info {
            info.set_item(key, value)?;
        }

        Ok((
            PyArray1::from_vec_bound(py, result.observation.into_vec()),
            result.reward,
            result.done,
            info,
        ))
    }

    /// Status line with the current step count.
    fn render(&self) -> String {
        self.inner.render()
    }

    /// Bincode-encoded trajectory of the current episode, if recording.
    fn trajectory_bytes<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyBytes>>> {
        match self.inner.trajectory() {
            Some(trajectory) => {
                let bytes = trajectory.to_bytes().map_err(to_py_err)?;
                Ok(Some(PyBytes::new_bound(py, &bytes)))
            }
            None => Ok(None),
        }
    }

    /// Size of the discrete action space.
    #[getter]
    fn action_count(&self) -> usize {
        self.inner.action_space().n()
    }

    /// Exclusive upper bounds of the observation entries (dice first).
    #[getter]
    fn observation_nvec(&self) -> Vec<i64> {
        self.inner.observation_space().nvec().to_vec()
    }

    /// Steps taken in the current episode.
    #[getter]
    fn steps(&self) -> u64 {
        self.inner.steps()
    }

    /// Lifecycle phase name.
    #[getter]
    fn phase(&self) -> String {
        format!("{:?}", self.inner.phase())
    }

    fn __repr__(&self) -> String {
        format!(
            "CantStopEnv(action_count={}, phase={:?}, steps={})",
            self.inner.action_space().n(),
            self.inner.phase(),
            self.inner.steps()
        )
    }
}
