use thiserror::Error;

use crate::input::InputError;
use crate::metrics::MetricError;

pub mod stage1_discover;
pub mod stage2_score;
pub mod stage3_submission;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error("{system}: score '{key}' wants metric output {index}, but only {available} were produced")]
    MissingOutput {
        system: String,
        key: String,
        index: usize,
        available: usize,
    },
}
