//! Compartment specification, live state, and phase tracking.
//!
//! Purpose
//! -------
//! Define one accumulation pool: its validated configuration
//! ([`CompartmentSpec`]), its mutable burden and phase ([`Compartment`]),
//! and the phase machine (Idle ↔ Accumulating ↔ Decaying →
//! ThresholdCrossed, re-enterable once burden drops back below threshold).
//!
//! Key behaviors
//! -------------
//! - Deposits move the phase to `Accumulating`, or straight to
//!   `ThresholdCrossed` when the deposit pushes burden to or past the
//!   threshold.
//! - After decay/transfer the phase settles: zero burden is `Idle`, burden
//!   at or above threshold stays `ThresholdCrossed`, anything else is
//!   `Decaying` — which re-arms a crossed compartment for the next
//!   crossing.
//!
//! Invariants & assumptions
//! ------------------------
//! - `current_burden ≥ 0` always; decay and transfers clip at zero.
//! - Compartments are mutated exclusively by their owning model.

use crate::burden::errors::{BurdenError, BurdenResult};

/// Phase of a compartment's accumulation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompartmentPhase {
    /// No burden (or none yet deposited).
    Idle,
    /// The most recent state change was a deposit below threshold.
    Accumulating,
    /// Burden is positive and decaying, below any threshold.
    Decaying,
    /// Burden sits at or above the declared threshold.
    ThresholdCrossed,
}

/// `CompartmentSpec` — validated configuration for one compartment.
///
/// Parameters
/// ----------
/// Constructed via [`CompartmentSpec::new`] with:
/// - `name`: compartment identifier, unique within a model.
/// - `decay_rate`: `f64`
///   Exponential decay constant (per time unit); finite and ≥ 0. Zero
///   models a non-eliminating pool.
/// - `input_scaling`: `f64`
///   Multiplier applied to event magnitudes on deposit; finite and > 0.
/// - `threshold`: `Option<f64>`
///   Burden level marking a crossing; finite and > 0 when given.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentSpec {
    pub(crate) name: String,
    pub(crate) decay_rate: f64,
    pub(crate) input_scaling: f64,
    pub(crate) threshold: Option<f64>,
}

impl CompartmentSpec {
    /// Construct a spec, validating every numeric bound.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::InvalidDecayRate`, `InvalidInputScaling`, or
    ///   `InvalidThreshold` on out-of-bound values.
    pub fn new(
        name: impl Into<String>, decay_rate: f64, input_scaling: f64, threshold: Option<f64>,
    ) -> BurdenResult<Self> {
        let name = name.into();
        if !decay_rate.is_finite() || decay_rate < 0.0 {
            return Err(BurdenError::InvalidDecayRate { name, value: decay_rate });
        }
        if !input_scaling.is_finite() || input_scaling <= 0.0 {
            return Err(BurdenError::InvalidInputScaling { name, value: input_scaling });
        }
        if let Some(threshold) = threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(BurdenError::InvalidThreshold { name, value: threshold });
            }
        }
        Ok(CompartmentSpec { name, decay_rate, input_scaling, threshold })
    }

    /// Compartment identifier.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Live state of one compartment inside a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Compartment {
    pub(crate) spec: CompartmentSpec,
    pub(crate) current_burden: f64,
    pub(crate) phase: CompartmentPhase,
}

impl Compartment {
    pub(crate) fn from_spec(spec: CompartmentSpec) -> Self {
        Compartment { spec, current_burden: 0.0, phase: CompartmentPhase::Idle }
    }

    /// Current accumulated burden.
    pub fn current_burden(&self) -> f64 {
        self.current_burden
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CompartmentPhase {
        self.phase
    }

    /// The spec this compartment was declared with.
    pub fn spec(&self) -> &CompartmentSpec {
        &self.spec
    }

    /// Add an already-scaled amount and update the phase.
    pub(crate) fn deposit(&mut self, amount: f64) {
        self.current_burden += amount;
        self.phase = match self.spec.threshold {
            Some(threshold) if self.current_burden >= threshold => {
                CompartmentPhase::ThresholdCrossed
            }
            _ => CompartmentPhase::Accumulating,
        };
    }

    /// Exponential decay over `dt` time units.
    pub(crate) fn decay(&mut self, dt: f64) {
        self.current_burden *= (-self.spec.decay_rate * dt).exp();
    }

    /// Settle the phase after decay and transfers have moved the burden.
    pub(crate) fn settle_phase(&mut self) {
        self.current_burden = self.current_burden.max(0.0);
        self.phase = if self.current_burden == 0.0 {
            CompartmentPhase::Idle
        } else {
            match self.spec.threshold {
                Some(threshold) if self.current_burden >= threshold => {
                    CompartmentPhase::ThresholdCrossed
                }
                _ => CompartmentPhase::Decaying,
            }
        };
    }
}
