//! temporal_correlation — temporal correlation engine with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the correlation engine to Python via the `_temporal_correlation`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing classes and submodules used by the
//! `temporal_correlation` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`series`, `alignment`, `window`,
//!   `lag`, `burden`, `stats`) as the public crate surface, with the
//!   everyday types bundled in [`prelude`].
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_temporal_correlation` Python extension.
//! - Create and register Python submodules (`alignment`, `analysis`,
//!   `models`) under `temporal_correlation` so that dot-notation imports
//!   work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts (e.g.
//!   `CumulativeEffectModel`, `DelayedResponseModel`).
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_temporal_correlation.<submodule>`
//!   and are typically wrapped by thin pure-Python facades in the top-level
//!   `temporal_correlation` package.
//! - Series cross the boundary as parallel timestamp/value float64 arrays;
//!   every series is re-validated on entry.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules
//!   and can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_temporal_correlation` module
//!   defined here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the Rust integration suite; binding smoke tests live on the
//!   Python side.

pub mod alignment;
pub mod burden;
pub mod lag;
pub mod series;
pub mod stats;
pub mod utils;
pub mod window;

/// Convenience re-exports of the everyday engine types.
///
/// Purpose
/// -------
/// Let orchestration code pull the full working set with a single
/// `use temporal_correlation::prelude::*;` instead of six module paths.
pub mod prelude {
    pub use crate::alignment::{
        AlignerBackend, AlignmentReport, AlignmentResult, DynamicTimeWarping,
        NoiseResistantAligner, SampleRateSynchronizer,
    };
    pub use crate::burden::{
        CompartmentPhase, CompartmentSpec, CumulativeEffectModel, ExposureEvent, Transfer,
    };
    pub use crate::lag::{DelayedResponseModel, LatencyProfile};
    pub use crate::series::TimeSeries;
    pub use crate::window::{
        AdaptiveWindowSizer, MovingWindowAnalyzer, SignificanceTester, WindowAnalysisResult,
        WindowOverlapManager, WindowStatistic,
    };
}

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    alignment::AlignmentResult,
    burden::{CompartmentPhase, CumulativeEffectModel, ExposureEvent},
    lag::{DelayedResponseModel, LatencyProfile},
    utils::{AlignerChoice, build_aligner, build_burden_model, extract_series},
    window::{
        AdaptiveWindowSizer, MovingWindowAnalyzer, SignificanceTester, WindowOverlapManager,
        WindowStatistic,
    },
};

/// AlignmentOutcome — Python-facing view of an [`AlignmentResult`].
///
/// Purpose
/// -------
/// Hold one finished alignment (the equal-length aligned pair plus its
/// diagnostic report) for inspection from Python.
///
/// Fields
/// ------
/// - `inner`: [`AlignmentResult`]
///   The Rust-side result all accessors read from.
///
/// Notes
/// -----
/// - Instances are produced by `Aligner.align`; user code never constructs
///   them directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "temporal_correlation.alignment")]
pub struct AlignmentOutcome {
    inner: AlignmentResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl AlignmentOutcome {
    /// Shared timestamp (or synthetic index) axis of the aligned pair.
    #[getter]
    pub fn timestamps(&self) -> Vec<f64> {
        self.inner.aligned_reference.timestamps().to_vec()
    }

    #[getter]
    pub fn reference_values(&self) -> Vec<f64> {
        self.inner.aligned_reference.values().to_vec()
    }

    #[getter]
    pub fn target_values(&self) -> Vec<f64> {
        self.inner.aligned_target.values().to_vec()
    }

    /// Normalized alignment distance on z-normalized values.
    #[getter]
    pub fn cost(&self) -> f64 {
        self.inner.report.cost
    }

    #[getter]
    pub fn warp_path(&self) -> Option<Vec<(usize, usize)>> {
        self.inner.report.warp_path.clone()
    }

    #[getter]
    pub fn warp_timestamps(&self) -> Option<Vec<(f64, f64)>> {
        self.inner.report.warp_timestamps.clone()
    }

    #[getter]
    pub fn resample_ratio(&self) -> Option<f64> {
        self.inner.report.resample_ratio
    }

    #[getter]
    pub fn reference_outliers(&self) -> Option<Vec<bool>> {
        self.inner.report.reference_outliers.clone()
    }

    #[getter]
    pub fn target_outliers(&self) -> Option<Vec<bool>> {
        self.inner.report.target_outliers.clone()
    }
}

/// Aligner — Python-facing entry point for the aligner family.
///
/// Purpose
/// -------
/// Select and configure one of the three aligners from Python and run it on
/// timestamp/value array pairs.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Aligner(method, target_rate=None, band_width=None,
/// outlier_threshold=None, backend=None)`:
/// - `method`: `'rate_sync'`, `'dtw'`, or `'noise_resistant'`.
/// - `target_rate`: `Option<f64>`
///   Grid spacing for `'rate_sync'` (and the `'rate_sync'` backend).
/// - `band_width`: `Option<usize>`
///   Sakoe–Chiba half-width for `'dtw'` (and the `'dtw'` backend).
/// - `outlier_threshold`: `Option<f64>`
///   Rolling-MAD flagging distance for `'noise_resistant'`; defaults to 3.
/// - `backend`: `Option<&str>`
///   Delegation target for `'noise_resistant'`; defaults to `'dtw'`.
///
/// Notes
/// -----
/// - Configuration is validated here, at construction, so a bad knob fails
///   before any data is supplied.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "temporal_correlation.alignment")]
pub struct Aligner {
    inner: AlignerChoice,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Aligner {
    #[new]
    #[pyo3(
        signature = (method, target_rate = None, band_width = None, outlier_threshold = None, backend = None),
        text_signature = "(method, /, target_rate=None, band_width=None, \
                          outlier_threshold=None, backend=None)"
    )]
    pub fn new(
        method: &str, target_rate: Option<f64>, band_width: Option<usize>,
        outlier_threshold: Option<f64>, backend: Option<&str>,
    ) -> PyResult<Self> {
        let inner = build_aligner(method, target_rate, band_width, outlier_threshold, backend)?;
        Ok(Aligner { inner })
    }

    /// Align two series supplied as parallel timestamp/value arrays.
    #[pyo3(
        text_signature = "(self, reference_timestamps, reference_values, \
                          target_timestamps, target_values)"
    )]
    pub fn align<'py>(
        &self, py: Python<'py>, reference_timestamps: &Bound<'py, PyAny>,
        reference_values: &Bound<'py, PyAny>, target_timestamps: &Bound<'py, PyAny>,
        target_values: &Bound<'py, PyAny>,
    ) -> PyResult<AlignmentOutcome> {
        let reference = extract_series(py, reference_timestamps, reference_values)?;
        let target = extract_series(py, target_timestamps, target_values)?;

        let result = match &self.inner {
            AlignerChoice::RateSync(sync) => sync.align(&reference, &target)?,
            AlignerChoice::Warp(dtw) => dtw.align(&reference, &target)?,
            AlignerChoice::NoiseResistant(masked) => masked.align(&reference, &target)?,
        };
        Ok(AlignmentOutcome { inner: result })
    }
}

/// WindowRecord — one window's correlation statistics exposed to Python.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "temporal_correlation.analysis")]
pub struct WindowRecord {
    inner: WindowStatistic,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl WindowRecord {
    #[getter]
    pub fn window_start(&self) -> f64 {
        self.inner.window_start
    }

    #[getter]
    pub fn window_end(&self) -> f64 {
        self.inner.window_end
    }

    #[getter]
    pub fn n_samples(&self) -> usize {
        self.inner.n_samples
    }

    #[getter]
    pub fn correlation(&self) -> f64 {
        self.inner.correlation
    }

    #[getter]
    pub fn p_value(&self) -> f64 {
        self.inner.p_value
    }

    #[getter]
    pub fn is_significant(&self) -> bool {
        self.inner.is_significant
    }

    #[getter]
    pub fn window_size_used(&self) -> usize {
        self.inner.window_size_used
    }
}

/// WindowAnalysis — Python-facing wrapper for [`MovingWindowAnalyzer`].
///
/// Purpose
/// -------
/// Expose windowed correlation profiling with significance annotation to
/// Python callers, with the sizer/overlap/tester knobs validated at
/// construction.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `WindowAnalysis(min_window=5, max_window_fraction=0.5,
/// variance_target=0.1, overlap_fraction=0.0, min_tail=5, alpha=0.05)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "temporal_correlation.analysis")]
pub struct WindowAnalysis {
    inner: MovingWindowAnalyzer,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl WindowAnalysis {
    #[new]
    #[pyo3(
        signature = (
            min_window = None,
            max_window_fraction = None,
            variance_target = None,
            overlap_fraction = None,
            min_tail = None,
            alpha = None,
        ),
        text_signature = "(min_window=5, max_window_fraction=0.5, variance_target=0.1, \
                          overlap_fraction=0.0, min_tail=5, alpha=0.05)"
    )]
    pub fn new(
        min_window: Option<usize>, max_window_fraction: Option<f64>,
        variance_target: Option<f64>, overlap_fraction: Option<f64>, min_tail: Option<usize>,
        alpha: Option<f64>,
    ) -> PyResult<Self> {
        use crate::window::significance::DEFAULT_ALPHA;
        use crate::window::sizer::{
            DEFAULT_MAX_WINDOW_FRACTION, DEFAULT_MIN_WINDOW, DEFAULT_VARIANCE_TARGET,
        };

        let sizer = AdaptiveWindowSizer::new(
            min_window.unwrap_or(DEFAULT_MIN_WINDOW),
            max_window_fraction.unwrap_or(DEFAULT_MAX_WINDOW_FRACTION),
            variance_target.unwrap_or(DEFAULT_VARIANCE_TARGET),
        )?;
        let overlap = WindowOverlapManager::new(
            overlap_fraction.unwrap_or(0.0),
            min_tail.unwrap_or(crate::window::overlap::DEFAULT_MIN_TAIL),
        )?;
        let tester = SignificanceTester::new(alpha.unwrap_or(DEFAULT_ALPHA))?;
        Ok(WindowAnalysis { inner: MovingWindowAnalyzer::new(sizer, overlap, tester) })
    }

    /// Profile the local correlation of an aligned pair.
    #[pyo3(
        signature = (first_timestamps, first_values, second_timestamps, second_values, window_size = None, overlap_fraction = None),
        text_signature = "(self, first_timestamps, first_values, second_timestamps, \
                          second_values, /, window_size=None, overlap_fraction=None)"
    )]
    pub fn analyze<'py>(
        &self, py: Python<'py>, first_timestamps: &Bound<'py, PyAny>,
        first_values: &Bound<'py, PyAny>, second_timestamps: &Bound<'py, PyAny>,
        second_values: &Bound<'py, PyAny>, window_size: Option<usize>,
        overlap_fraction: Option<f64>,
    ) -> PyResult<Vec<WindowRecord>> {
        let first = extract_series(py, first_timestamps, first_values)?;
        let second = extract_series(py, second_timestamps, second_values)?;

        let profile = self.inner.analyze(&first, &second, window_size, overlap_fraction)?;
        Ok(profile.into_records().into_iter().map(|stat| WindowRecord { inner: stat }).collect())
    }
}

/// DelayedResponse — Python-facing wrapper for [`DelayedResponseModel`].
///
/// Purpose
/// -------
/// Run the lag grid search from Python and answer delayed-response
/// predictions against the cached fit.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `DelayedResponse(signal_id, min_overlap=10, ci_tolerance=0.95)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "temporal_correlation.models")]
pub struct DelayedResponse {
    inner: DelayedResponseModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl DelayedResponse {
    #[new]
    #[pyo3(
        signature = (signal_id, min_overlap = None, ci_tolerance = None),
        text_signature = "(signal_id, /, min_overlap=10, ci_tolerance=0.95)"
    )]
    pub fn new(
        signal_id: &str, min_overlap: Option<usize>, ci_tolerance: Option<f64>,
    ) -> PyResult<Self> {
        use crate::lag::model::{DEFAULT_CI_TOLERANCE, DEFAULT_MIN_OVERLAP};

        let inner = DelayedResponseModel::new(
            signal_id,
            min_overlap.unwrap_or(DEFAULT_MIN_OVERLAP),
            ci_tolerance.unwrap_or(DEFAULT_CI_TOLERANCE),
        )?;
        Ok(DelayedResponse { inner })
    }

    /// Grid-search the candidate lags; returns the fitted profile summary.
    #[pyo3(
        text_signature = "(self, exposure_timestamps, exposure_values, \
                          response_timestamps, response_values, candidate_lags)"
    )]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, exposure_timestamps: &Bound<'py, PyAny>,
        exposure_values: &Bound<'py, PyAny>, response_timestamps: &Bound<'py, PyAny>,
        response_values: &Bound<'py, PyAny>, candidate_lags: Vec<f64>,
    ) -> PyResult<FittedLatency> {
        let exposure = extract_series(py, exposure_timestamps, exposure_values)?;
        let response = extract_series(py, response_timestamps, response_values)?;

        let profile = self.inner.fit(&exposure, &response, &candidate_lags)?;
        Ok(FittedLatency { inner: profile })
    }

    /// Predict the response at `at_time` from the lag-shifted exposure.
    #[pyo3(text_signature = "(self, exposure_timestamps, exposure_values, at_time)")]
    pub fn predict_response<'py>(
        &self, py: Python<'py>, exposure_timestamps: &Bound<'py, PyAny>,
        exposure_values: &Bound<'py, PyAny>, at_time: f64,
    ) -> PyResult<f64> {
        let exposure = extract_series(py, exposure_timestamps, exposure_values)?;
        let predicted = self.inner.predict_response(&exposure, at_time)?;
        Ok(predicted)
    }
}

/// FittedLatency — read-only view of a [`LatencyProfile`] for Python.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "temporal_correlation.models")]
pub struct FittedLatency {
    inner: LatencyProfile,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl FittedLatency {
    #[getter]
    pub fn signal_id(&self) -> String {
        self.inner.signal_id.clone()
    }

    #[getter]
    pub fn candidate_lags(&self) -> Vec<f64> {
        self.inner.candidate_lags.clone()
    }

    #[getter]
    pub fn best_lag(&self) -> f64 {
        self.inner.best_lag
    }

    #[getter]
    pub fn confidence_interval(&self) -> (f64, f64) {
        self.inner.confidence_interval
    }

    #[getter]
    pub fn correlation_at_best_lag(&self) -> f64 {
        self.inner.correlation_at_best_lag
    }
}

/// BurdenSimulator — Python-facing wrapper for [`CumulativeEffectModel`].
///
/// Purpose
/// -------
/// Expose the stateful cumulative-effect simulation to Python: event
/// application, clock advancement, burden queries, threshold-crossing
/// prediction, and clone-isolated what-if projection.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `BurdenSimulator(compartments, transfers=[], start_time=0.0)`:
/// - `compartments`: sequence of
///   `(name, decay_rate, input_scaling, threshold_or_None)` tuples.
/// - `transfers`: sequence of `(from, to, rate)` tuples.
/// - `start_time`: initial model clock.
///
/// Notes
/// -----
/// - The wrapper inherits the core's single-writer discipline: Python
///   callers must serialize mutations per instance.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "temporal_correlation.models", unsendable)]
pub struct BurdenSimulator {
    inner: CumulativeEffectModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BurdenSimulator {
    #[new]
    #[pyo3(
        signature = (compartments, transfers = Vec::new(), start_time = 0.0),
        text_signature = "(compartments, /, transfers=[], start_time=0.0)"
    )]
    pub fn new(
        compartments: Vec<(String, f64, f64, Option<f64>)>,
        transfers: Vec<(String, String, f64)>, start_time: f64,
    ) -> PyResult<Self> {
        let inner = build_burden_model(compartments, transfers, start_time)?;
        Ok(BurdenSimulator { inner })
    }

    #[pyo3(text_signature = "(self, compartment, magnitude, timestamp)")]
    pub fn apply_exposure_event(
        &mut self, compartment: &str, magnitude: f64, timestamp: f64,
    ) -> PyResult<()> {
        self.inner.apply_exposure_event(&ExposureEvent::new(compartment, magnitude, timestamp))?;
        Ok(())
    }

    #[pyo3(text_signature = "(self, to_time)")]
    pub fn advance_time(&mut self, to_time: f64) -> PyResult<()> {
        self.inner.advance_time(to_time)?;
        Ok(())
    }

    #[pyo3(text_signature = "(self, compartment)")]
    pub fn burden(&self, compartment: &str) -> PyResult<f64> {
        Ok(self.inner.burden(compartment)?)
    }

    /// Phase name: 'idle', 'accumulating', 'decaying', or
    /// 'threshold_crossed'.
    #[pyo3(text_signature = "(self, compartment)")]
    pub fn phase(&self, compartment: &str) -> PyResult<String> {
        let phase = match self.inner.phase(compartment)? {
            CompartmentPhase::Idle => "idle",
            CompartmentPhase::Accumulating => "accumulating",
            CompartmentPhase::Decaying => "decaying",
            CompartmentPhase::ThresholdCrossed => "threshold_crossed",
        };
        Ok(phase.to_owned())
    }

    #[getter]
    pub fn total_burden(&self) -> f64 {
        self.inner.total_burden()
    }

    #[getter]
    pub fn last_update_time(&self) -> f64 {
        self.inner.last_update_time()
    }

    #[pyo3(text_signature = "(self, compartment, max_horizon)")]
    pub fn predict_threshold_crossing(
        &self, compartment: &str, max_horizon: f64,
    ) -> PyResult<Option<f64>> {
        Ok(self.inner.predict_threshold_crossing(compartment, max_horizon)?)
    }

    /// Replay a hypothetical event list on a clone; the live state is
    /// untouched.
    #[pyo3(text_signature = "(self, scenario, max_horizon)")]
    pub fn project_future_exposure(
        &self, scenario: Vec<(String, f64, f64)>, max_horizon: f64,
    ) -> PyResult<Vec<(f64, Vec<(String, f64)>)>> {
        let events: Vec<ExposureEvent> = scenario
            .into_iter()
            .map(|(compartment, magnitude, timestamp)| {
                ExposureEvent::new(compartment, magnitude, timestamp)
            })
            .collect();

        let trajectory = self.inner.project_future_exposure(&events, max_horizon)?;
        Ok(trajectory
            .into_iter()
            .map(|(time, snapshot)| (time, snapshot.into_iter().collect()))
            .collect())
    }
}

/// _temporal_correlation — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_temporal_correlation` Python module and register its
/// submodules used by the public `temporal_correlation` package.
///
/// Key behaviors
/// -------------
/// - Create `alignment`, `analysis`, and `models` submodules.
/// - Attach those submodules to the parent `_temporal_correlation` module.
/// - Register the submodules in `sys.modules` so they are importable via
///   dotted paths from Python.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _temporal_correlation<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let alignment_mod = PyModule::new(_py, "alignment")?;
    let analysis_mod = PyModule::new(_py, "analysis")?;
    let models_mod = PyModule::new(_py, "models")?;
    alignment_submodule(_py, m, &alignment_mod)?;
    analysis_submodule(_py, m, &analysis_mod)?;
    models_submodule(_py, m, &models_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("temporal_correlation.alignment", alignment_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("temporal_correlation.analysis", analysis_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("temporal_correlation.models", models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn alignment_submodule<'py>(
    _py: Python, temporal_correlation: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Aligner>()?;
    m.add_class::<AlignmentOutcome>()?;
    temporal_correlation.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn analysis_submodule<'py>(
    _py: Python, temporal_correlation: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<WindowAnalysis>()?;
    m.add_class::<WindowRecord>()?;
    temporal_correlation.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn models_submodule<'py>(
    _py: Python, temporal_correlation: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<DelayedResponse>()?;
    m.add_class::<FittedLatency>()?;
    m.add_class::<BurdenSimulator>()?;
    temporal_correlation.add_submodule(m)?;
    Ok(())
}
