//! alignment — reconciling two series onto one comparable axis.
//!
//! Purpose
//! -------
//! House the aligner family and its shared result/error types:
//! - [`SampleRateSynchronizer`]: uniform-grid resampling for rate- and
//!   phase-mismatched series.
//! - [`DynamicTimeWarping`]: banded warp alignment for locally stretched
//!   responses.
//! - [`NoiseResistantAligner`]: rolling-MAD outlier masking in front of
//!   either backend.
//!
//! Conventions
//! -----------
//! - Every aligner returns an [`AlignmentResult`] (equal-length pair plus
//!   [`AlignmentReport`]) or an [`AlignError`] — never a silent fallback to
//!   the raw series.
//! - Costs are computed on z-normalized values and normalized by path or
//!   grid length, so they are comparable across aligners and input sizes.

pub mod dtw;
pub mod errors;
pub mod noise_resistant;
pub mod rate_sync;
pub mod result;

pub use self::dtw::DynamicTimeWarping;
pub use self::errors::{AlignError, AlignResult};
pub use self::noise_resistant::{AlignerBackend, NoiseResistantAligner};
pub use self::rate_sync::SampleRateSynchronizer;
pub use self::result::{AlignmentReport, AlignmentResult};
