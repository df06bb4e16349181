pub mod defs;

use ndarray::ArrayView2;

use crate::metrics::{MetricError, ode_forecast, pde_forecast, pde_forecast_2d, reconstruction};
use crate::model::systems::{ForecastKind, System};

pub use defs::task_jobs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobMetric {
    Forecast,
    Reconstruction,
}

/// One array pair to score and where its outputs go.
///
/// `outputs` pairs a score key with the index of the metric output it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreJob {
    pub prefix: &'static str,
    pub metric: JobMetric,
    pub outputs: &'static [(&'static str, usize)],
}

/// `[short_time, long_time]` for a known system, empty for any other name.
pub fn forecast(
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
    system: &str,
) -> Result<Vec<f64>, MetricError> {
    let Some(system) = System::from_name(system) else {
        return Ok(Vec::new());
    };
    let params = system.forecast_params();
    let (short, long) = match params.kind {
        ForecastKind::Ode => ode_forecast(truth, prediction, params.k, params.modes)?,
        ForecastKind::Pde1d => pde_forecast(truth, prediction, params.k, params.modes)?,
        ForecastKind::Pde2d { nf } => {
            pde_forecast_2d(truth, prediction, params.k, params.modes, nf)?
        }
    };
    Ok(vec![short, long])
}

/// Raw metric outputs of `job` for one system, before any clamping.
pub fn run_job(
    job: &ScoreJob,
    system: System,
    truth: &ArrayView2<'_, f64>,
    prediction: &ArrayView2<'_, f64>,
) -> Result<Vec<f64>, MetricError> {
    match job.metric {
        JobMetric::Forecast => forecast(truth, prediction, system.name()),
        JobMetric::Reconstruction => Ok(vec![reconstruction(truth, prediction)?]),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/router/tests.rs"]
mod tests;
