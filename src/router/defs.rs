use crate::router::{JobMetric, ScoreJob};

const TASK_1: &[ScoreJob] = &[ScoreJob {
    prefix: "X1",
    metric: JobMetric::Forecast,
    outputs: &[("stf_E1", 0), ("ltf_E2", 1)],
}];

const TASK_2: &[ScoreJob] = &[
    ScoreJob {
        prefix: "X2",
        metric: JobMetric::Reconstruction,
        outputs: &[("recon_E3", 0)],
    },
    ScoreJob {
        prefix: "X3",
        metric: JobMetric::Forecast,
        outputs: &[("ltf_E4", 1)],
    },
    ScoreJob {
        prefix: "X4",
        metric: JobMetric::Reconstruction,
        outputs: &[("recon_E5", 0)],
    },
    ScoreJob {
        prefix: "X5",
        metric: JobMetric::Forecast,
        outputs: &[("ltf_E6", 1)],
    },
];

const TASK_3: &[ScoreJob] = &[ScoreJob {
    prefix: "X6",
    metric: JobMetric::Forecast,
    outputs: &[("stf_E7", 0), ("ltf_E8", 1)],
}];

const TASK_4: &[ScoreJob] = &[
    ScoreJob {
        prefix: "X7",
        metric: JobMetric::Forecast,
        outputs: &[("stf_E9", 0), ("ltf_E10", 1)],
    },
    ScoreJob {
        prefix: "X8",
        metric: JobMetric::Reconstruction,
        outputs: &[("recon_E11", 0)],
    },
    ScoreJob {
        prefix: "X9",
        metric: JobMetric::Reconstruction,
        outputs: &[("recon_E12", 0)],
    },
];

#[cfg(test)]
pub const TASK_IDS: [&str; 4] = ["9615379", "9615532", "9615534", "9615535"];

/// Jobs scored for an evaluation id. Unknown ids have no jobs.
pub fn task_jobs(evaluation_id: &str) -> &'static [ScoreJob] {
    match evaluation_id {
        "9615379" => TASK_1,
        "9615532" => TASK_2,
        "9615534" => TASK_3,
        "9615535" => TASK_4,
        _ => &[],
    }
}
