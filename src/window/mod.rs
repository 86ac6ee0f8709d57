//! window — time-resolved correlation profiling.
//!
//! Purpose
//! -------
//! House the moving-window analysis family:
//! - [`AdaptiveWindowSizer`]: variance-stability window sizing.
//! - [`WindowOverlapManager`]: stride and partial-tail placement policy.
//! - [`SignificanceTester`]: two-tailed t-test on windowed Pearson r.
//! - [`MovingWindowAnalyzer`]: the composed profiling workflow.
//!
//! Conventions
//! -----------
//! - Analysis presumes an already-aligned pair; only the equal-length part
//!   of that contract is re-checked here.
//! - Flat windows are annotated with the `(0.0, 1.0, false)` sentinel, so
//!   profile positions always match the overlap manager's placement.

pub mod analyzer;
pub mod errors;
pub mod overlap;
pub mod significance;
pub mod sizer;

pub use self::analyzer::{MovingWindowAnalyzer, WindowAnalysisResult, WindowStatistic};
pub use self::errors::{WindowError, WindowResult};
pub use self::overlap::WindowOverlapManager;
pub use self::significance::SignificanceTester;
pub use self::sizer::AdaptiveWindowSizer;
