use std::path::Path;

use crate::input::{prediction_path, read_matrix, truth_path};
use crate::model::scores::{ScoreMap, clamp_score};
use crate::pipeline::ScoreError;
use crate::pipeline::stage1_discover::discover_systems;
use crate::router::{run_job, task_jobs};

/// Scores every (system, job) pair of `evaluation_id` whose truth and
/// prediction files both exist. Pairs with a missing file are skipped.
pub fn calculate_all_scores(
    groundtruth_dir: &Path,
    predictions_dir: &Path,
    evaluation_id: &str,
) -> Result<ScoreMap, ScoreError> {
    let jobs = task_jobs(evaluation_id);
    if jobs.is_empty() {
        tracing::warn!(evaluation_id, "no scoring jobs defined for evaluation id");
    }

    let systems = discover_systems(predictions_dir)?;
    let mut result = ScoreMap::new();

    for system in systems {
        for job in jobs {
            let truth_file = truth_path(groundtruth_dir, system.name(), job.prefix);
            let pred_file = prediction_path(predictions_dir, system.name(), job.prefix);
            if !(pred_file.exists() && truth_file.exists()) {
                tracing::debug!(
                    system = %system,
                    prefix = job.prefix,
                    "skipping job with missing truth or prediction file"
                );
                continue;
            }

            let truth = read_matrix(&truth_file)?;
            let prediction = read_matrix(&pred_file)?;
            let scores = run_job(job, system, &truth.view(), &prediction.view())?;

            for &(key, index) in job.outputs {
                let raw = scores.get(index).copied().ok_or_else(|| ScoreError::MissingOutput {
                    system: system.name().to_string(),
                    key: key.to_string(),
                    index,
                    available: scores.len(),
                })?;
                let value = clamp_score(raw);
                tracing::info!(system = %system, key, raw, value, "scored");
                result.insert(format!("{}_{}", system.name(), key), value);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
