use std::path::Path;

use crate::input::untar;
use crate::model::scores::{ScoreMap, ScoreRecord};
use crate::pipeline::ScoreError;
use crate::pipeline::stage2_score::calculate_all_scores;

pub const PREDICTION_SUFFIX: &str = ".npy";

/// Extracts the submitted predictions and scores them.
///
/// Never fails: any extraction or scoring error turns into an INVALID record
/// carrying the error text, and no partial scores are kept.
pub fn score_submission(
    groundtruth_dir: &Path,
    predictions_archive: &Path,
    predictions_dir: &Path,
    evaluation_id: &str,
) -> ScoreRecord {
    match extract_and_score(groundtruth_dir, predictions_archive, predictions_dir, evaluation_id) {
        Ok(scores) => ScoreRecord::from_scores(scores),
        Err(err) => {
            tracing::error!(error = %err, "scoring failed");
            ScoreRecord::invalid(format!("Error {err} occurred while scoring"))
        }
    }
}

fn extract_and_score(
    groundtruth_dir: &Path,
    predictions_archive: &Path,
    predictions_dir: &Path,
    evaluation_id: &str,
) -> Result<ScoreMap, ScoreError> {
    let extracted = untar(predictions_dir, predictions_archive, Some(PREDICTION_SUFFIX))?;
    tracing::info!(count = extracted.len(), "extracted prediction files");
    calculate_all_scores(groundtruth_dir, predictions_dir, evaluation_id)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_submission.rs"]
mod tests;
