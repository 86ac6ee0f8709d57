//! stats — shared descriptive statistics for the correlation engine.
//!
//! Purpose
//! -------
//! Centralize the small numeric kernels (mean, variance, Pearson correlation,
//! z-normalization) used by the alignment, windowed-analysis, and lag
//! modules, so degenerate-input policy (zero variance) is decided in exactly
//! one place.
//!
//! Conventions
//! -----------
//! - Variance uses the population denominator `n`; every consumer compares
//!   variances against each other or against zero, so the choice of
//!   denominator cancels.
//! - Zero-variance inputs yield sentinels (`None` correlation, all-zero
//!   z-scores) rather than errors — a constant window or constant series is
//!   a valid, if boundary, observation.

pub mod descriptive;

pub use self::descriptive::{mean, pearson, variance, z_normalize};
