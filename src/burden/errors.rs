//! Errors for the cumulative-effect model (compartment configuration,
//! transfer-matrix validity, event ordering, and query bounds).
//!
//! ## Conventions
//! - Configuration errors surface at model construction, before any event
//!   is applied.
//! - Event-time regressions are errors, never reordered or dropped: the
//!   model's determinism rests on strict chronological application.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for cumulative-effect operations that may produce
/// [`BurdenError`].
pub type BurdenResult<T> = Result<T, BurdenError>;

/// Unified error type for cumulative-burden modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum BurdenError {
    // ---- Compartment configuration ----
    /// The model was constructed with no compartments.
    NoCompartments,

    /// Two compartment specs share a name.
    DuplicateCompartment { name: String },

    /// An event or query names a compartment the model does not declare.
    UnknownCompartment { name: String },

    /// Decay rate must be finite and ≥ 0.
    InvalidDecayRate { name: String, value: f64 },

    /// Input scaling must be finite and > 0.
    InvalidInputScaling { name: String, value: f64 },

    /// A declared threshold must be finite and > 0.
    InvalidThreshold { name: String, value: f64 },

    // ---- Transfer matrix ----
    /// A transfer routes a compartment to itself.
    SelfTransfer { name: String },

    /// A transfer rate lies outside [0, 1] or is non-finite.
    InvalidTransferRate { from: String, to: String, value: f64 },

    /// Outgoing transfer rates from one compartment sum above 1.
    TransferMassExceeded { from: String, total: f64 },

    // ---- Events and queries ----
    /// Event magnitude must be finite and ≥ 0.
    InvalidMagnitude { value: f64 },

    /// A supplied time is NaN or infinite.
    NonFiniteTime { value: f64 },

    /// An event or advance targets a time before the model's clock.
    TemporalOrder { event_time: f64, last_update: f64 },

    /// Projection/prediction horizon must be finite and > 0.
    InvalidHorizon { value: f64 },
}

impl std::error::Error for BurdenError {}

impl std::fmt::Display for BurdenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BurdenError::NoCompartments => {
                write!(f, "Cumulative-effect model needs at least one compartment.")
            }
            BurdenError::DuplicateCompartment { name } => {
                write!(f, "Compartment '{name}' is declared more than once.")
            }
            BurdenError::UnknownCompartment { name } => {
                write!(f, "Unknown compartment '{name}'.")
            }
            BurdenError::InvalidDecayRate { name, value } => {
                write!(
                    f,
                    "Invalid decay rate {value} for compartment '{name}'. \
                     Must be finite and >= 0."
                )
            }
            BurdenError::InvalidInputScaling { name, value } => {
                write!(
                    f,
                    "Invalid input scaling {value} for compartment '{name}'. \
                     Must be finite and > 0."
                )
            }
            BurdenError::InvalidThreshold { name, value } => {
                write!(
                    f,
                    "Invalid threshold {value} for compartment '{name}'. \
                     Must be finite and > 0."
                )
            }
            BurdenError::SelfTransfer { name } => {
                write!(f, "Transfer from compartment '{name}' to itself is not allowed.")
            }
            BurdenError::InvalidTransferRate { from, to, value } => {
                write!(
                    f,
                    "Invalid transfer rate {value} from '{from}' to '{to}'. \
                     Must lie in [0, 1]."
                )
            }
            BurdenError::TransferMassExceeded { from, total } => {
                write!(
                    f,
                    "Outgoing transfer rates from '{from}' sum to {total} > 1 \
                     (mass would be created)."
                )
            }
            BurdenError::InvalidMagnitude { value } => {
                write!(f, "Invalid exposure magnitude: {value}. Must be finite and >= 0.")
            }
            BurdenError::NonFiniteTime { value } => {
                write!(f, "Time value {value} is not finite.")
            }
            BurdenError::TemporalOrder { event_time, last_update } => {
                write!(
                    f,
                    "Event at t = {event_time} precedes the model clock at \
                     t = {last_update}; events must arrive in chronological order."
                )
            }
            BurdenError::InvalidHorizon { value } => {
                write!(f, "Invalid horizon: {value}. Must be finite and > 0.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<BurdenError> for PyErr {
    fn from(err: BurdenError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
