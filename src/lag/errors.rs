//! Errors for delayed-response lag estimation (candidate validation,
//! overlap sufficiency, fit state, and prediction range).
//!
//! ## Conventions
//! - A fit that cannot gather enough overlapping samples at ANY candidate
//!   lag fails with [`LagError::InsufficientOverlap`] rather than returning
//!   an unreliable profile.
//! - Prediction outside the exposure series' observed range is an error,
//!   never an extrapolation.

use crate::series::SeriesError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for lag-estimation operations that may produce [`LagError`].
pub type LagResult<T> = Result<T, LagError>;

/// Unified error type for delayed-response modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum LagError {
    /// Propagated series-level failure (construction or interpolation).
    Series(SeriesError),

    // ---- Candidate validation ----
    /// The candidate-lag list is empty.
    NoCandidates,

    /// A candidate lag is NaN or infinite.
    NonFiniteLag { value: f64 },

    // ---- Fit sufficiency and state ----
    /// No candidate lag reached the required overlapping sample count.
    InsufficientOverlap { required: usize, observed: usize },

    /// Prediction was requested before a successful `fit`.
    ModelNotFitted,

    /// The lag-shifted prediction time falls outside the exposure range.
    PredictionOutOfRange { at_time: f64, shifted: f64 },

    // ---- Configuration ----
    /// Minimum overlapping sample count must be at least 3.
    InvalidMinOverlap { value: usize },

    /// Confidence-interval tolerance must lie in (0, 1].
    InvalidCiTolerance { value: f64 },
}

impl std::error::Error for LagError {}

impl std::fmt::Display for LagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LagError::Series(err) => write!(f, "{err}"),
            LagError::NoCandidates => {
                write!(f, "Lag fitting needs at least one candidate lag.")
            }
            LagError::NonFiniteLag { value } => {
                write!(f, "Candidate lag {value} is not finite.")
            }
            LagError::InsufficientOverlap { required, observed } => {
                write!(
                    f,
                    "No candidate lag yielded {required} overlapping samples \
                     (best candidate had {observed})."
                )
            }
            LagError::ModelNotFitted => {
                write!(f, "predict_response called before a successful fit.")
            }
            LagError::PredictionOutOfRange { at_time, shifted } => {
                write!(
                    f,
                    "Prediction at t = {at_time} needs exposure at t = {shifted}, \
                     outside the observed exposure range."
                )
            }
            LagError::InvalidMinOverlap { value } => {
                write!(f, "Invalid minimum overlap: {value}. Must be at least 3.")
            }
            LagError::InvalidCiTolerance { value } => {
                write!(f, "Invalid CI tolerance: {value}. Must lie in (0, 1].")
            }
        }
    }
}

impl From<SeriesError> for LagError {
    fn from(err: SeriesError) -> LagError {
        LagError::Series(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<LagError> for PyErr {
    fn from(err: LagError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
