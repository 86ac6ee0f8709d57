//! Multi-compartment cumulative-effect model with decay, transfer, and
//! threshold-crossing prediction.
//!
//! Purpose
//! -------
//! Simulate how discrete exposure events accumulate into per-compartment
//! burden that decays exponentially, leaks between compartments through a
//! validated transfer matrix, and crosses declared thresholds. This is the
//! one stateful component of the engine: a model instance owns its
//! compartments, carries an explicit clock, and is mutated only through
//! `advance_time` / `apply_exposure_event` in chronological order.
//!
//! Key behaviors
//! -------------
//! - `advance_time` decays every compartment over the elapsed interval,
//!   then applies one round of transfers computed from the post-decay
//!   snapshot (so transfer order between compartments cannot matter), then
//!   settles phases and moves the clock. With outgoing rates summing to at
//!   most 1, total burden never increases without a deposit.
//! - `predict_threshold_crossing` answers the no-further-exposure question
//!   in closed form from the decay law; it never step-simulates.
//! - `project_future_exposure` evaluates a hypothetical event list on a
//!   private clone, so what-if scenarios can never corrupt the live state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Burdens are ≥ 0 always; outgoing transfer rates per compartment sum
//!   to ≤ 1 (validated at construction).
//! - Mutations must be serialized per instance by the caller; read-only
//!   queries may run concurrently with each other.
//!
//! Testing notes
//! -------------
//! - Mass non-creation and the crossing/projection consistency property
//!   are covered both here and in the integration suite.

use crate::burden::compartment::{Compartment, CompartmentPhase, CompartmentSpec};
use crate::burden::errors::{BurdenError, BurdenResult};
use std::collections::BTreeMap;

/// One discrete exposure hitting a named compartment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureEvent {
    /// Target compartment name.
    pub compartment: String,
    /// Raw magnitude; scaled by the compartment's `input_scaling` on
    /// deposit. Finite and ≥ 0.
    pub magnitude: f64,
    /// Event time; must be ≥ the model clock when applied.
    pub timestamp: f64,
}

impl ExposureEvent {
    pub fn new(compartment: impl Into<String>, magnitude: f64, timestamp: f64) -> Self {
        ExposureEvent { compartment: compartment.into(), magnitude, timestamp }
    }
}

/// One directed edge of the transfer matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    /// Source compartment name.
    pub from: String,
    /// Destination compartment name.
    pub to: String,
    /// Fraction of the source's post-decay burden moved per `advance_time`
    /// call; in [0, 1], with all outgoing fractions per source summing to
    /// at most 1.
    pub rate: f64,
}

impl Transfer {
    pub fn new(from: impl Into<String>, to: impl Into<String>, rate: f64) -> Self {
        Transfer { from: from.into(), to: to.into(), rate }
    }
}

/// `CumulativeEffectModel` — stateful multi-compartment burden simulation.
///
/// Purpose
/// -------
/// Own the compartments, the transfer matrix, and the model clock; apply
/// exposure events in order; and answer burden and threshold queries.
///
/// Parameters
/// ----------
/// Constructed via [`CumulativeEffectModel::new`] with:
/// - `specs`: one validated [`CompartmentSpec`] per compartment; at least
///   one, names unique.
/// - `transfers`: directed transfer edges; endpoints must be declared
///   compartments, no self-edges, rates in [0, 1] with per-source sums ≤ 1.
/// - `start_time`: initial model clock; finite.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeEffectModel {
    compartments: BTreeMap<String, Compartment>,
    transfers: Vec<Transfer>,
    last_update_time: f64,
}

impl CumulativeEffectModel {
    /// Construct a model, validating compartments and the transfer matrix.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::NoCompartments` on an empty spec list.
    /// - `BurdenError::DuplicateCompartment` on a repeated name.
    /// - `BurdenError::UnknownCompartment` / `SelfTransfer` /
    ///   `InvalidTransferRate` / `TransferMassExceeded` on a bad transfer
    ///   edge.
    /// - `BurdenError::NonFiniteTime` on a non-finite start time.
    pub fn new(
        specs: Vec<CompartmentSpec>, transfers: Vec<Transfer>, start_time: f64,
    ) -> BurdenResult<Self> {
        if specs.is_empty() {
            return Err(BurdenError::NoCompartments);
        }
        if !start_time.is_finite() {
            return Err(BurdenError::NonFiniteTime { value: start_time });
        }

        let mut compartments = BTreeMap::new();
        for spec in specs {
            let name = spec.name().to_owned();
            if compartments.insert(name.clone(), Compartment::from_spec(spec)).is_some() {
                return Err(BurdenError::DuplicateCompartment { name });
            }
        }

        let mut outgoing: BTreeMap<&str, f64> = BTreeMap::new();
        for transfer in &transfers {
            for endpoint in [&transfer.from, &transfer.to] {
                if !compartments.contains_key(endpoint) {
                    return Err(BurdenError::UnknownCompartment { name: endpoint.clone() });
                }
            }
            if transfer.from == transfer.to {
                return Err(BurdenError::SelfTransfer { name: transfer.from.clone() });
            }
            if !transfer.rate.is_finite() || !(0.0..=1.0).contains(&transfer.rate) {
                return Err(BurdenError::InvalidTransferRate {
                    from: transfer.from.clone(),
                    to: transfer.to.clone(),
                    value: transfer.rate,
                });
            }
            *outgoing.entry(transfer.from.as_str()).or_insert(0.0) += transfer.rate;
        }
        for (from, total) in outgoing {
            if total > 1.0 {
                return Err(BurdenError::TransferMassExceeded {
                    from: from.to_owned(),
                    total,
                });
            }
        }

        Ok(CumulativeEffectModel { compartments, transfers, last_update_time: start_time })
    }

    /// Current model clock.
    pub fn last_update_time(&self) -> f64 {
        self.last_update_time
    }

    /// Declared compartment names, sorted.
    pub fn compartment_names(&self) -> Vec<&str> {
        self.compartments.keys().map(String::as_str).collect()
    }

    /// Current burden of one compartment.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::UnknownCompartment` for an undeclared name.
    pub fn burden(&self, name: &str) -> BurdenResult<f64> {
        Ok(self.compartment(name)?.current_burden())
    }

    /// Current phase of one compartment.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::UnknownCompartment` for an undeclared name.
    pub fn phase(&self, name: &str) -> BurdenResult<CompartmentPhase> {
        Ok(self.compartment(name)?.phase())
    }

    /// Sum of all compartment burdens.
    pub fn total_burden(&self) -> f64 {
        self.compartments.values().map(Compartment::current_burden).sum()
    }

    /// Snapshot of every compartment's burden, keyed by name.
    pub fn burden_snapshot(&self) -> BTreeMap<String, f64> {
        self.compartments
            .iter()
            .map(|(name, compartment)| (name.clone(), compartment.current_burden()))
            .collect()
    }

    /// Move the model clock forward, decaying and transferring burden.
    ///
    /// Parameters
    /// ----------
    /// - `to_time`: new clock value; must be ≥ the current clock.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::NonFiniteTime` on a NaN/infinite target.
    /// - `BurdenError::TemporalOrder` on a clock regression.
    pub fn advance_time(&mut self, to_time: f64) -> BurdenResult<()> {
        if !to_time.is_finite() {
            return Err(BurdenError::NonFiniteTime { value: to_time });
        }
        if to_time < self.last_update_time {
            return Err(BurdenError::TemporalOrder {
                event_time: to_time,
                last_update: self.last_update_time,
            });
        }
        let dt = to_time - self.last_update_time;
        if dt == 0.0 {
            return Ok(());
        }

        for compartment in self.compartments.values_mut() {
            compartment.decay(dt);
        }

        // Transfers read the post-decay snapshot, so edge order is
        // irrelevant and per-source outgoing mass is bounded by the
        // validated rate sum.
        let snapshot = self.burden_snapshot();
        let mut deltas: BTreeMap<&str, f64> = BTreeMap::new();
        for transfer in &self.transfers {
            let moved = snapshot[&transfer.from] * transfer.rate;
            *deltas.entry(transfer.from.as_str()).or_insert(0.0) -= moved;
            *deltas.entry(transfer.to.as_str()).or_insert(0.0) += moved;
        }
        for (name, delta) in deltas {
            if let Some(compartment) = self.compartments.get_mut(name) {
                compartment.current_burden += delta;
            }
        }

        for compartment in self.compartments.values_mut() {
            compartment.settle_phase();
        }
        self.last_update_time = to_time;
        Ok(())
    }

    /// Apply one exposure event: advance the clock to the event time, then
    /// deposit the scaled magnitude.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::UnknownCompartment` for an undeclared target.
    /// - `BurdenError::InvalidMagnitude` on a NaN/infinite/negative
    ///   magnitude.
    /// - `BurdenError::NonFiniteTime` / `TemporalOrder` from the implied
    ///   `advance_time`.
    pub fn apply_exposure_event(&mut self, event: &ExposureEvent) -> BurdenResult<()> {
        if !self.compartments.contains_key(&event.compartment) {
            return Err(BurdenError::UnknownCompartment { name: event.compartment.clone() });
        }
        if !event.magnitude.is_finite() || event.magnitude < 0.0 {
            return Err(BurdenError::InvalidMagnitude { value: event.magnitude });
        }
        self.advance_time(event.timestamp)?;

        let compartment = self
            .compartments
            .get_mut(&event.compartment)
            .ok_or_else(|| BurdenError::UnknownCompartment { name: event.compartment.clone() })?;
        compartment.deposit(event.magnitude * compartment.spec.input_scaling);
        Ok(())
    }

    /// Closed-form time at which a compartment would decay down to its
    /// threshold, assuming no further exposure or transfer inflow.
    ///
    /// Parameters
    /// ----------
    /// - `name`: the compartment to project.
    /// - `max_horizon`: how far past the current clock to look; finite, > 0.
    ///
    /// Returns
    /// -------
    /// `BurdenResult<Option<f64>>`
    ///   `Some(t)` (absolute time) when the downward crossing happens within
    ///   the horizon; `None` when the compartment has no threshold, is
    ///   already at or below it, never decays (rate 0), or crosses beyond
    ///   the horizon.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::UnknownCompartment` / `InvalidHorizon`.
    ///
    /// Notes
    /// -----
    /// - Transfer inflow from other compartments is deliberately excluded:
    ///   the question answered is "when does THIS pool, left alone, come
    ///   back under its threshold".
    pub fn predict_threshold_crossing(
        &self, name: &str, max_horizon: f64,
    ) -> BurdenResult<Option<f64>> {
        if !max_horizon.is_finite() || max_horizon <= 0.0 {
            return Err(BurdenError::InvalidHorizon { value: max_horizon });
        }
        let compartment = self.compartment(name)?;

        let threshold = match compartment.spec.threshold {
            Some(threshold) => threshold,
            None => return Ok(None),
        };
        let burden = compartment.current_burden();
        if burden <= threshold || compartment.spec.decay_rate <= 0.0 {
            return Ok(None);
        }

        // burden · exp(−rate · dt) = threshold  ⇒  dt = ln(burden/threshold)/rate
        let dt = (burden / threshold).ln() / compartment.spec.decay_rate;
        if dt > max_horizon {
            return Ok(None);
        }
        Ok(Some(self.last_update_time + dt))
    }

    /// Replay a hypothetical future event list on a private clone.
    ///
    /// Parameters
    /// ----------
    /// - `scenario`: future events, in non-decreasing timestamp order;
    ///   events past the horizon are ignored.
    /// - `max_horizon`: how far past the current clock to project; finite,
    ///   > 0.
    ///
    /// Returns
    /// -------
    /// `BurdenResult<Vec<(f64, BTreeMap<String, f64>)>>`
    ///   One `(time, per-compartment burden)` snapshot after each applied
    ///   event, plus a terminal snapshot at the horizon. The live model is
    ///   never mutated.
    ///
    /// Errors
    /// ------
    /// - `BurdenError::InvalidHorizon`, plus any event-application error
    ///   (unknown compartment, bad magnitude, out-of-order timestamps).
    pub fn project_future_exposure(
        &self, scenario: &[ExposureEvent], max_horizon: f64,
    ) -> BurdenResult<Vec<(f64, BTreeMap<String, f64>)>> {
        if !max_horizon.is_finite() || max_horizon <= 0.0 {
            return Err(BurdenError::InvalidHorizon { value: max_horizon });
        }
        let horizon_end = self.last_update_time + max_horizon;

        let mut projected = self.clone();
        let mut trajectory = Vec::with_capacity(scenario.len() + 1);
        for event in scenario {
            if event.timestamp > horizon_end {
                break;
            }
            projected.apply_exposure_event(event)?;
            trajectory.push((projected.last_update_time, projected.burden_snapshot()));
        }
        projected.advance_time(horizon_end)?;
        trajectory.push((horizon_end, projected.burden_snapshot()));
        Ok(trajectory)
    }

    fn compartment(&self, name: &str) -> BurdenResult<&Compartment> {
        self.compartments
            .get(name)
            .ok_or_else(|| BurdenError::UnknownCompartment { name: name.to_owned() })
    }
}
