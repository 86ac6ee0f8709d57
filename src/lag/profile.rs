//! Latency-profile value object produced by a delayed-response fit.

/// `LatencyProfile` — fitted lag estimate with non-parametric confidence
/// bounds.
///
/// Purpose
/// -------
/// Record which candidate lag best explains the exposure → response delay,
/// how strong the correlation is there, and how wide the plateau of
/// near-peak candidates is. Immutable once produced; a new `fit` call
/// replaces the whole profile rather than updating it.
///
/// Fields
/// ------
/// - `signal_id`: `String`
///   Caller-supplied identifier of the exposure signal being profiled.
/// - `candidate_lags`: `Vec<f64>`
///   The evaluated lags, in the caller's order (skipped candidates that
///   lacked overlap or variance are excluded).
/// - `best_lag`: `f64`
///   The candidate maximizing |correlation|.
/// - `confidence_interval`: `(f64, f64)`
///   Min/max of the candidates whose |correlation| reaches the configured
///   tolerance fraction of the peak. Degenerates to `(best_lag, best_lag)`
///   when the peak stands alone.
/// - `correlation_at_best_lag`: `f64`
///   Pearson r (signed) at `best_lag`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyProfile {
    pub signal_id: String,
    pub candidate_lags: Vec<f64>,
    pub best_lag: f64,
    pub confidence_interval: (f64, f64),
    pub correlation_at_best_lag: f64,
}
