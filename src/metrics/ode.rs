use ndarray::{ArrayView2, s};

use crate::metrics::{MetricError, check_same_shape, fidelity, l2_norm, short_time_score};

/// Unit-width histogram bins starting at `lo`. The last bin is closed on the
/// right, every other bin is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitBins {
    pub lo: i64,
    pub count: usize,
}

const PLANAR_BINS: UnitBins = UnitBins { lo: -20, count: 40 };
const VERTICAL_BINS: UnitBins = UnitBins { lo: 0, count: 50 };

pub const TRACKED_STATE_BINS: [UnitBins; 3] = [PLANAR_BINS, PLANAR_BINS, VERTICAL_BINS];

impl UnitBins {
    pub fn hi(self) -> i64 {
        self.lo + self.count as i64
    }

    pub fn histogram<'a>(self, values: impl IntoIterator<Item = &'a f64>) -> Vec<f64> {
        let mut counts = vec![0f64; self.count];
        let lo = self.lo as f64;
        let hi = self.hi() as f64;
        for &v in values {
            if !(v >= lo && v <= hi) {
                continue;
            }
            let idx = (v.floor() as i64 - self.lo) as usize;
            counts[idx.min(self.count - 1)] += 1.0;
        }
        counts
    }
}

/// Relative distance between two histograms; 0 when the reference is empty.
pub fn histogram_error(truth: &[f64], prediction: &[f64]) -> f64 {
    let reference = l2_norm(truth);
    if reference > 0.0 {
        let diff = truth
            .iter()
            .zip(prediction)
            .map(|(t, p)| (t - p) * (t - p))
            .sum::<f64>()
            .sqrt();
        diff / reference
    } else {
        0.0
    }
}

/// Short-time and long-time scores for a low-dimensional chaotic system.
///
/// The long-time part compares the value distributions of the first three
/// state components over the last `modes` snapshots. Trajectories longer
/// than `modes` therefore only contribute their tail to the long-time part.
pub fn ode_forecast(
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
    k: usize,
    modes: usize,
) -> Result<(f64, f64), MetricError> {
    let (m, n) = check_same_shape(truth, prediction)?;
    let tracked = TRACKED_STATE_BINS.len();
    if m < tracked {
        return Err(MetricError::TooFewStates {
            needed: tracked,
            found: m,
        });
    }

    let e_short = short_time_score(truth, prediction, k)?;

    let start = n.saturating_sub(modes);
    let t_window = truth.slice(s![..tracked, start..]);
    let p_window = prediction.slice(s![..tracked, start..]);

    let mut total = 0f64;
    for (row, bins) in TRACKED_STATE_BINS.iter().enumerate() {
        let h_truth = bins.histogram(t_window.row(row));
        let h_pred = bins.histogram(p_window.row(row));
        total += histogram_error(&h_truth, &h_pred);
    }
    let e_long = total / tracked as f64;

    Ok((e_short, fidelity(e_long)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/ode.rs"]
mod tests;
