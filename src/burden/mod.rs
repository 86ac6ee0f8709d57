//! burden — stateful cumulative-effect simulation.
//!
//! Purpose
//! -------
//! House the one stateful component of the engine: compartment
//! specifications and phases, the [`CumulativeEffectModel`] with its
//! explicit clock, exposure events, the transfer matrix, and
//! threshold-crossing prediction.
//!
//! Conventions
//! -----------
//! - All mutation goes through `advance_time` / `apply_exposure_event` in
//!   chronological order; what-if projection clones the model instead of
//!   mutating it.
//! - Burdens are clipped at zero; outgoing transfer rates per compartment
//!   sum to at most 1 (no mass creation).

pub mod compartment;
pub mod errors;
pub mod model;

pub use self::compartment::{Compartment, CompartmentPhase, CompartmentSpec};
pub use self::errors::{BurdenError, BurdenResult};
pub use self::model::{CumulativeEffectModel, ExposureEvent, Transfer};
