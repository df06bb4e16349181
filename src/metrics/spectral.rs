use std::sync::Arc;

use ndarray::{Array2, ArrayView1, ArrayView2, s};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::metrics::{
    MetricError, check_same_shape, fidelity, relative_l2, short_time_score,
};

/// Moves the zero-frequency bin of an FFT output to index `len / 2`.
pub fn fftshift<T: Clone>(values: &[T]) -> Vec<T> {
    let split = values.len() - values.len() / 2;
    let mut out = Vec::with_capacity(values.len());
    out.extend_from_slice(&values[split..]);
    out.extend_from_slice(&values[..split]);
    out
}

fn squared_magnitude(value: &Complex64) -> f64 {
    let mag = value.norm();
    mag * mag
}

pub fn power_spectrum(signal: ArrayView1<'_, f64>, fft: &dyn Fft<f64>) -> Vec<f64> {
    let mut buf = signal
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect::<Vec<_>>();
    fft.process(&mut buf);
    buf.iter().map(squared_magnitude).collect()
}

/// Power along column `column` of the 2-D spectrum of `field`, where `field`
/// holds an `nf x nf` grid flattened column-major.
pub fn power_spectrum_2d_column(
    field: ArrayView1<'_, f64>,
    nf: usize,
    column: usize,
    fft: &dyn Fft<f64>,
) -> Vec<f64> {
    let mut spectrum = Array2::<Complex64>::zeros((nf, nf));
    for q in 0..nf {
        // Column-major storage keeps each grid column contiguous.
        let mut buf = field
            .slice(s![q * nf..(q + 1) * nf])
            .iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect::<Vec<_>>();
        fft.process(&mut buf);
        for (r, v) in buf.into_iter().enumerate() {
            spectrum[[r, q]] = v;
        }
    }

    let mut out = Vec::with_capacity(nf);
    for r in 0..nf {
        let mut row = spectrum.row(r).to_vec();
        fft.process(&mut row);
        out.push(squared_magnitude(&row[column]));
    }
    out
}

/// Natural log of the `2 * modes + 1` bins centred on `center`.
pub fn crop_log(shifted: &[f64], center: usize, modes: usize) -> Result<Vec<f64>, MetricError> {
    if modes > center || center + modes >= shifted.len() {
        return Err(MetricError::SpectrumTooShort {
            modes,
            center,
            len: shifted.len(),
        });
    }
    Ok(shifted[center - modes..=center + modes]
        .iter()
        .map(|p| p.ln())
        .collect())
}

fn check_window(k: usize, n: usize) -> Result<(), MetricError> {
    if k > n {
        return Err(MetricError::WindowTooLong {
            window: k,
            available: n,
        });
    }
    Ok(())
}

/// Short-time and long-time scores for a 1-D field.
///
/// The long-time part compares log power spectra of the last `k` snapshots,
/// cropped to `2 * modes + 1` bins around the zero frequency.
pub fn pde_forecast(
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
    k: usize,
    modes: usize,
) -> Result<(f64, f64), MetricError> {
    let (m, n) = check_same_shape(truth, prediction)?;
    let e_short = short_time_score(truth, prediction, k)?;
    check_window(k, n)?;

    let fft: Arc<dyn Fft<f64>> = FftPlanner::new().plan_fft_forward(m);
    let center = m / 2;
    let mut stacked_truth = Vec::with_capacity(k * (2 * modes + 1));
    let mut stacked_pred = Vec::with_capacity(k * (2 * modes + 1));
    for j in 1..=k {
        let col = n - j;
        let pt = fftshift(&power_spectrum(truth.column(col), fft.as_ref()));
        let pp = fftshift(&power_spectrum(prediction.column(col), fft.as_ref()));
        stacked_truth.extend(crop_log(&pt, center, modes)?);
        stacked_pred.extend(crop_log(&pp, center, modes)?);
    }

    let e_long = relative_l2(&stacked_truth, &stacked_pred);
    Ok((e_short, fidelity(e_long)))
}

/// Short-time and long-time scores for a 2-D field stored as `nf * nf` rows.
///
/// Only the spectral column at index `nf / 2 + 1` enters the long-time part.
pub fn pde_forecast_2d(
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
    k: usize,
    modes: usize,
    nf: usize,
) -> Result<(f64, f64), MetricError> {
    let (m, n) = check_same_shape(truth, prediction)?;
    if nf.checked_mul(nf) != Some(m) {
        return Err(MetricError::GridMismatch { rows: m, nf });
    }
    let column = nf / 2 + 1;
    if column >= nf {
        return Err(MetricError::GridTooSmall { nf, column });
    }

    let e_short = short_time_score(truth, prediction, k)?;
    check_window(k, n)?;

    let fft: Arc<dyn Fft<f64>> = FftPlanner::new().plan_fft_forward(nf);
    let center = nf / 2;
    let mut stacked_truth = Vec::with_capacity(k * (2 * modes + 1));
    let mut stacked_pred = Vec::with_capacity(k * (2 * modes + 1));
    for j in 1..=k {
        let col = n - j;
        let pt = power_spectrum_2d_column(truth.column(col), nf, column, fft.as_ref());
        let pp = power_spectrum_2d_column(prediction.column(col), nf, column, fft.as_ref());
        stacked_truth.extend(crop_log(&fftshift(&pt), center, modes)?);
        stacked_pred.extend(crop_log(&fftshift(&pp), center, modes)?);
    }

    let e_long = relative_l2(&stacked_truth, &stacked_pred);
    Ok((e_short, fidelity(e_long)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/spectral.rs"]
mod tests;
