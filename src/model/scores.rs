use std::collections::BTreeMap;

use serde::Serialize;

pub type ScoreMap = BTreeMap<String, f64>;

pub const MISSING_FILES_MESSAGE: &str =
    "Score calculation failed; necessary files for the submitted task may be missing.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoreStatus {
    Scored,
    Invalid,
}

impl ScoreStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScoreStatus::Scored => "SCORED",
            ScoreStatus::Invalid => "INVALID",
        }
    }
}

impl std::fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one scoring run as it is merged into the results file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub score_status: ScoreStatus,
    pub score_errors: String,
    #[serde(flatten)]
    pub scores: ScoreMap,
}

impl ScoreRecord {
    /// SCORED when at least one score was produced, otherwise INVALID with
    /// the generic missing-files message.
    pub fn from_scores(scores: ScoreMap) -> Self {
        if scores.is_empty() {
            return Self::invalid(MISSING_FILES_MESSAGE);
        }
        Self {
            score_status: ScoreStatus::Scored,
            score_errors: String::new(),
            scores,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            score_status: ScoreStatus::Invalid,
            score_errors: message.into(),
            scores: ScoreMap::new(),
        }
    }
}

/// Negative scores become zero. NaN passes through untouched.
pub fn clamp_score(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}
