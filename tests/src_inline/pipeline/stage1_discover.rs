use std::fs;

use super::*;
use crate::test_support::temp_dir;

#[test]
fn test_discovers_known_systems_in_table_order() {
    let dir = temp_dir();
    for name in [
        "KS_X1prediction.npy",
        "Lorenz_X1prediction.npy",
        "Lorenz_X2prediction.npy",
        "Foo_X1prediction.npy",
        "README",
    ] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    let systems = discover_systems(dir.path()).unwrap();
    assert_eq!(systems, vec![System::Lorenz, System::KuramotoSivashinsky]);
}

#[test]
fn test_prefix_match_is_exact() {
    let dir = temp_dir();
    fs::write(dir.path().join("Lorenz96_X1prediction.npy"), b"").unwrap();
    fs::write(dir.path().join("lorenz_X1prediction.npy"), b"").unwrap();
    let systems = discover_systems(dir.path()).unwrap();
    assert_eq!(systems, vec![System::Lorenz96]);
}

#[test]
fn test_missing_predictions_dir_is_an_error() {
    let dir = temp_dir();
    assert!(discover_systems(&dir.path().join("absent")).is_err());
}
