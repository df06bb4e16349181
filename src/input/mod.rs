use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod archive;
pub mod npy;

pub use archive::{pack, untar};
pub use npy::read_matrix;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid archive {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },
    #[error("invalid npy data: {0}")]
    Npy(String),
}

impl InputError {
    pub fn archive(path: &Path, reason: impl std::fmt::Display) -> Self {
        InputError::Archive {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Ground-truth file for one system and file prefix.
pub fn truth_path(groundtruth_dir: &Path, system: &str, prefix: &str) -> PathBuf {
    groundtruth_dir
        .join(format!("Test_{system}"))
        .join(format!("{prefix}test.npy"))
}

/// Submitted prediction file for one system and file prefix.
pub fn prediction_path(predictions_dir: &Path, system: &str, prefix: &str) -> PathBuf {
    predictions_dir.join(format!("{system}_{prefix}prediction.npy"))
}

/// System name candidate of a prediction file: everything before the first `_`.
pub fn system_candidate(file_name: &str) -> &str {
    match file_name.split_once('_') {
        Some((head, _)) => head,
        None => file_name,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
