//! Action codec bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::codec::ActionCodec;
use crate::core::{EnvError, Move};

/// Map crate errors onto Python exceptions.
///
/// Caller mistakes become `ValueError`; engine and serialization faults
/// become `RuntimeError`.
pub(crate) fn to_py_err(err: EnvError) -> PyErr {
    if err.is_caller_error() {
        PyValueError::new_err(err.to_string())
    } else {
        PyRuntimeError::new_err(err.to_string())
    }
}

/// Python wrapper for ActionCodec.
#[pyclass(name = "ActionCodec")]
#[derive(Clone, Debug)]
pub struct PyActionCodec(pub ActionCodec);

#[pymethods]
impl PyActionCodec {
    /// Create a codec for `track_count` tracks.
    #[new]
    #[pyo3(signature = (track_count = 12))]
    fn new(track_count: usize) -> PyResult<Self> {
        ActionCodec::new(track_count).map(Self).map_err(to_py_err)
    }

    /// Decode an action index into `(cells, stop)`.
    fn decode(&self, index: i64) -> PyResult<(Vec<u8>, bool)> {
        let decoded = self.0.decode_signed(index).map_err(to_py_err)?;
        Ok((decoded.mv.cells().to_vec(), decoded.stop))
    }

    /// Encode `(cells, stop)` back into an action index.
    #[pyo3(signature = (cells, stop = false))]
    fn encode(&self, cells: Vec<u8>, stop: bool) -> PyResult<usize> {
        self.0.encode(&Move::from_cells(&cells), stop).map_err(to_py_err)
    }

    /// Level and offset of a non-stop index, or None.
    fn level_of(&self, index: usize) -> Option<(usize, usize)> {
        self.0.level_of(index)
    }

    #[getter]
    fn track_count(&self) -> usize {
        self.0.track_count()
    }

    #[getter]
    fn move_count(&self) -> usize {
        self.0.move_count()
    }

    #[getter]
    fn action_count(&self) -> usize {
        self.0.action_count()
    }

    fn __len__(&self) -> usize {
        self.0.action_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "ActionCodec(track_count={}, action_count={})",
            self.0.track_count(),
            self.0.action_count()
        )
    }
}
