//! lag — delayed-response latency estimation.
//!
//! Purpose
//! -------
//! House the lag grid search between an exposure and a response signal:
//! the [`DelayedResponseModel`] with its interpolated shifting and
//! non-parametric confidence interval, and the [`LatencyProfile`] it
//! produces.
//!
//! Conventions
//! -----------
//! - Positive lags mean the response trails the exposure.
//! - A fit replaces the cached profile wholesale; prediction refuses to
//!   extrapolate outside the observed exposure range.

pub mod errors;
pub mod model;
pub mod profile;

pub use self::errors::{LagError, LagResult};
pub use self::model::DelayedResponseModel;
pub use self::profile::LatencyProfile;
