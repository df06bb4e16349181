pub mod ode;
pub mod spectral;

use ndarray::{ArrayView2, s};
use thiserror::Error;

pub use ode::ode_forecast;
pub use spectral::{pde_forecast, pde_forecast_2d};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("shape mismatch: truth is {truth:?}, prediction is {prediction:?}")]
    ShapeMismatch {
        truth: (usize, usize),
        prediction: (usize, usize),
    },
    #[error("trajectory matrix is empty")]
    Empty,
    #[error("{rows} state rows cannot be reshaped into a {nf}x{nf} grid")]
    GridMismatch { rows: usize, nf: usize },
    #[error("a {nf}x{nf} grid has no spectral column at index {column}")]
    GridTooSmall { nf: usize, column: usize },
    #[error("window of {window} snapshots exceeds the {available} available")]
    WindowTooLong { window: usize, available: usize },
    #[error("cannot crop {modes} modes around bin {center} of a {len}-bin spectrum")]
    SpectrumTooShort {
        modes: usize,
        center: usize,
        len: usize,
    },
    #[error("need at least {needed} state rows, found {found}")]
    TooFewStates { needed: usize, found: usize },
}

pub fn check_same_shape(
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
) -> Result<(usize, usize), MetricError> {
    if truth.dim() != prediction.dim() {
        return Err(MetricError::ShapeMismatch {
            truth: truth.dim(),
            prediction: prediction.dim(),
        });
    }
    let (m, n) = truth.dim();
    if m == 0 || n == 0 {
        return Err(MetricError::Empty);
    }
    Ok((m, n))
}

pub fn l2_norm<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values.into_iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// `||truth - prediction|| / ||truth||` over the flattened values.
/// A zero reference norm yields a non-finite result.
pub fn relative_l2<'a>(
    truth: impl IntoIterator<Item = &'a f64>,
    prediction: impl IntoIterator<Item = &'a f64>,
) -> f64 {
    let mut diff = 0f64;
    let mut reference = 0f64;
    for (t, p) in truth.into_iter().zip(prediction) {
        diff += (t - p) * (t - p);
        reference += t * t;
    }
    diff.sqrt() / reference.sqrt()
}

/// Turns a relative error into a 0..100 style fidelity score.
pub fn fidelity(error: f64) -> f64 {
    100.0 * (1.0 - error)
}

/// Short-time forecast score over the first `k` snapshots.
pub fn short_time_score(
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
    k: usize,
) -> Result<f64, MetricError> {
    let (_, n) = check_same_shape(truth, prediction)?;
    let window = k.min(n);
    let t = truth.slice(s![.., ..window]);
    let p = prediction.slice(s![.., ..window]);
    Ok(fidelity(relative_l2(t.iter(), p.iter())))
}

/// Reconstruction score over the whole matrix.
pub fn reconstruction(
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    check_same_shape(truth, prediction)?;
    Ok(fidelity(relative_l2(truth.iter(), prediction.iter())))
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/mod.rs"]
mod tests;
