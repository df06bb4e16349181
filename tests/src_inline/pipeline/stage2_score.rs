use std::path::Path;

use ndarray::Array2;

use super::*;
use crate::input::{prediction_path, truth_path};
use crate::test_support::{noise_matrix, ode_trajectory, temp_dir, write_npy};

fn put_pair(root: &Path, system: &str, prefix: &str, truth: &Array2<f64>, pred: &Array2<f64>) {
    write_npy(&truth_path(&root.join("gt"), system, prefix), truth);
    write_npy(&prediction_path(&root.join("preds"), system, prefix), pred);
}

fn ensure_dirs(root: &Path) {
    std::fs::create_dir_all(root.join("gt")).unwrap();
    std::fs::create_dir_all(root.join("preds")).unwrap();
}

#[test]
fn test_identical_ode_pair_scores_100() {
    let dir = temp_dir();
    let root = dir.path();
    let truth = ode_trajectory(50);
    put_pair(root, "Lorenz", "X1", &truth, &truth);

    let scores = calculate_all_scores(&root.join("gt"), &root.join("preds"), "9615379").unwrap();
    let expected = [
        ("Lorenz_ltf_E2".to_string(), 100.0),
        ("Lorenz_stf_E1".to_string(), 100.0),
    ]
    .into_iter()
    .collect::<ScoreMap>();
    assert_eq!(scores, expected);
}

#[test]
fn test_unsupported_system_is_ignored() {
    let dir = temp_dir();
    let root = dir.path();
    let truth = ode_trajectory(50);
    put_pair(root, "Pendulum", "X1", &truth, &truth);

    let scores = calculate_all_scores(&root.join("gt"), &root.join("preds"), "9615379").unwrap();
    assert!(scores.is_empty());
}

#[test]
fn test_missing_files_are_skipped() {
    let dir = temp_dir();
    let root = dir.path();
    ensure_dirs(root);
    let truth = ode_trajectory(50);
    // Prediction exists but the matching truth file does not.
    write_npy(&prediction_path(&root.join("preds"), "Rossler", "X1"), &truth);

    let scores = calculate_all_scores(&root.join("gt"), &root.join("preds"), "9615379").unwrap();
    assert!(scores.is_empty());
}

#[test]
fn test_unknown_task_scores_nothing() {
    let dir = temp_dir();
    let root = dir.path();
    let truth = ode_trajectory(50);
    put_pair(root, "Lorenz", "X1", &truth, &truth);

    let scores = calculate_all_scores(&root.join("gt"), &root.join("preds"), "123").unwrap();
    assert!(scores.is_empty());
}

#[test]
fn test_mixed_task_selects_indexed_outputs() {
    let dir = temp_dir();
    let root = dir.path();
    let truth = ode_trajectory(60);
    put_pair(root, "Lorenz", "X2", &truth, &truth);
    put_pair(root, "Lorenz", "X3", &truth, &truth);

    let scores = calculate_all_scores(&root.join("gt"), &root.join("preds"), "9615532").unwrap();
    let keys = scores.keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, vec!["Lorenz_ltf_E4", "Lorenz_recon_E3"]);
    assert_eq!(scores["Lorenz_recon_E3"], 100.0);
    assert_eq!(scores["Lorenz_ltf_E4"], 100.0);
}

#[test]
fn test_negative_scores_are_clamped() {
    let dir = temp_dir();
    let root = dir.path();
    let truth = noise_matrix(4, 10, 1);
    let pred = truth.mapv(|v| v * -9.0);
    put_pair(root, "KS", "X8", &truth, &pred);

    let scores = calculate_all_scores(&root.join("gt"), &root.join("preds"), "9615535").unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores["KS_recon_E11"], 0.0);
}

#[test]
fn test_shape_mismatch_propagates() {
    let dir = temp_dir();
    let root = dir.path();
    let truth = ode_trajectory(50);
    let pred = ode_trajectory(40);
    put_pair(root, "Lorenz", "X1", &truth, &pred);

    let err =
        calculate_all_scores(&root.join("gt"), &root.join("preds"), "9615379").unwrap_err();
    assert!(matches!(
        err,
        ScoreError::Metric(crate::metrics::MetricError::ShapeMismatch { .. })
    ));
}
