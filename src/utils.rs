#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    alignment::{
        AlignerBackend, DynamicTimeWarping, NoiseResistantAligner, SampleRateSynchronizer,
    },
    burden::{CompartmentSpec, CumulativeEffectModel, Transfer},
    series::TimeSeries,
};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1};

/// Coerce a Python array-like into a read-only contiguous float64 array.
///
/// Purpose
/// -------
/// Accept the shapes Python callers actually hand over for timestamp and
/// value axes: a numpy array directly, a pandas `Series` via `to_numpy`,
/// or any plain float sequence (copied onto a fresh array).
///
/// Errors
/// ------
/// - `PyTypeError` when the object is none of the accepted shapes.
///
/// Notes
/// -----
/// - Non-contiguous numpy views fall through to the sequence path, so the
///   returned array can always be read as a slice.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    // Pandas path: to_numpy(copy=False) borrows the backing array when the
    // dtype already matches.
    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Build a validated [`TimeSeries`] from Python timestamp/value array-likes.
#[cfg(feature = "python-bindings")]
pub fn extract_series<'py>(
    py: Python<'py>, timestamps: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>,
) -> PyResult<TimeSeries> {
    let ts_arr = extract_f64_array(py, timestamps)?;
    let ts_slice = ts_arr.as_slice().map_err(|_| {
        PyValueError::new_err("timestamps must be a 1-D contiguous float64 array or sequence")
    })?;
    let val_arr = extract_f64_array(py, values)?;
    let val_slice = val_arr.as_slice().map_err(|_| {
        PyValueError::new_err("values must be a 1-D contiguous float64 array or sequence")
    })?;

    let series =
        TimeSeries::new(Array1::from(ts_slice.to_vec()), Array1::from(val_slice.to_vec()))?;
    Ok(series)
}

/// Aligner selection shared by the Python-facing `Aligner` class.
#[cfg(feature = "python-bindings")]
pub enum AlignerChoice {
    RateSync(SampleRateSynchronizer),
    Warp(DynamicTimeWarping),
    NoiseResistant(NoiseResistantAligner),
}

/// Build an aligner from the Python-facing method string and options.
#[cfg(feature = "python-bindings")]
pub fn build_aligner(
    method: &str, target_rate: Option<f64>, band_width: Option<usize>,
    outlier_threshold: Option<f64>, backend: Option<&str>,
) -> PyResult<AlignerChoice> {
    let choice = match method {
        "rate_sync" => AlignerChoice::RateSync(SampleRateSynchronizer::new(target_rate)?),
        "dtw" => AlignerChoice::Warp(DynamicTimeWarping::new(band_width)?),
        "noise_resistant" => {
            let backend = match backend.unwrap_or("dtw") {
                "dtw" => AlignerBackend::Warp(DynamicTimeWarping::new(band_width)?),
                "rate_sync" => {
                    AlignerBackend::RateSync(SampleRateSynchronizer::new(target_rate)?)
                }
                other => {
                    return Err(PyValueError::new_err(format!(
                        "invalid backend {:?} (expected 'dtw' or 'rate_sync')",
                        other
                    )));
                }
            };
            let threshold = outlier_threshold.unwrap_or(3.0);
            AlignerChoice::NoiseResistant(NoiseResistantAligner::new(threshold, backend)?)
        }
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid method {:?} (expected 'rate_sync', 'dtw', or 'noise_resistant')",
                other
            )));
        }
    };
    Ok(choice)
}

/// Build a [`CumulativeEffectModel`] from Python-friendly compartment and
/// transfer tuples.
#[cfg(feature = "python-bindings")]
pub fn build_burden_model(
    compartments: Vec<(String, f64, f64, Option<f64>)>, transfers: Vec<(String, String, f64)>,
    start_time: f64,
) -> PyResult<CumulativeEffectModel> {
    let mut specs = Vec::with_capacity(compartments.len());
    for (name, decay_rate, input_scaling, threshold) in compartments {
        specs.push(CompartmentSpec::new(name, decay_rate, input_scaling, threshold)?);
    }
    let transfers = transfers
        .into_iter()
        .map(|(from, to, rate)| Transfer::new(from, to, rate))
        .collect();

    let model = CumulativeEffectModel::new(specs, transfers, start_time)?;
    Ok(model)
}
