//! series — the validated time-series primitive shared by the whole engine.
//!
//! Purpose
//! -------
//! House the `(timestamp, value)` sequence type and its error surface. Every
//! other module consumes [`TimeSeries`] by reference and returns fresh
//! instances; no component mutates caller data.
//!
//! Downstream usage
//! ----------------
//! - Construct [`TimeSeries`] where raw simulator or loader output enters the
//!   engine, then feed it to the aligners ([`crate::alignment`]), windowed
//!   analyzers ([`crate::window`]), and lag estimation ([`crate::lag`]).
//! - Errors are surfaced as [`SeriesError`] and wrapped by higher layers.

pub mod errors;
pub mod series;

pub use self::errors::{SeriesError, SeriesResult};
pub use self::series::TimeSeries;
