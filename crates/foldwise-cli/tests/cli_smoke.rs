//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `foldwise` binary to verify that
//! argument parsing, help text, error handling and a full evaluation run
//! work end-to-end.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("foldwise").unwrap()
}

/// Twelve iris rows with the classes interleaved so every contiguous fold
/// sees all three.
fn write_iris(dir: &Path) {
    let rows = [
        "5.1,3.5,1.4,0.2,Iris-setosa",
        "7.0,3.2,4.7,1.4,Iris-versicolor",
        "6.3,3.3,6.0,2.5,Iris-virginica",
        "4.9,3.0,1.4,0.2,Iris-setosa",
        "6.4,3.2,4.5,1.5,Iris-versicolor",
        "5.8,2.7,5.1,1.9,Iris-virginica",
        "4.7,3.2,1.3,0.2,Iris-setosa",
        "6.9,3.1,4.9,1.5,Iris-versicolor",
        "7.1,3.0,5.9,2.1,Iris-virginica",
        "4.6,3.1,1.5,0.2,Iris-setosa",
        "5.5,2.3,4.0,1.3,Iris-versicolor",
        "6.5,3.0,5.8,2.2,Iris-virginica",
    ];
    let text = rows.join("\n") + "\n";
    std::fs::write(dir.join("iris.data"), text).unwrap();
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--folds"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("foldwise"));
}

// ---------------------------------------------------------------------------
// Argument errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_model_errors() {
    cmd().args(["--model", "svm"]).assert().failure();
}

#[test]
fn unknown_dataset_errors() {
    cmd()
        .args(["--model", "knn", "--dataset", "titanic"])
        .assert()
        .failure();
}

#[test]
fn non_numeric_folds_errors() {
    cmd()
        .args(["--model", "knn", "--folds", "three"])
        .assert()
        .failure();
}

#[test]
fn nonexistent_config_errors() {
    cmd()
        .args(["--config", "/nonexistent/run.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

// ---------------------------------------------------------------------------
// Data errors
// ---------------------------------------------------------------------------

#[test]
fn missing_dataset_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--model", "knn", "--dataset", "adult", "--data-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("adult.data"));
}

#[test]
fn too_many_folds_errors() {
    let dir = tempfile::tempdir().unwrap();
    write_iris(dir.path());
    cmd()
        .args(["--model", "knn", "--dataset", "iris"])
        .args(["--folds", "20", "--data-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid fold count"));
}

// ---------------------------------------------------------------------------
// Full runs
// ---------------------------------------------------------------------------

#[test]
fn knn_run_prints_report() {
    let dir = tempfile::tempdir().unwrap();
    write_iris(dir.path());
    cmd()
        .args(["--model", "knn", "--dataset", "iris"])
        .args(["--folds", "4", "--k", "1", "--data-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fold accuracies"))
        .stdout(predicate::str::contains("Avg accuracy"))
        .stdout(predicate::str::contains("Iterations/fit").not());
}

#[test]
fn logistic_run_reports_iterations() {
    let dir = tempfile::tempdir().unwrap();
    write_iris(dir.path());
    cmd()
        .args(["--model", "logistic", "--dataset", "iris"])
        .args(["--folds", "3", "--iters", "200"])
        .args(["--lr", "0.05", "--data-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Iterations/fit"));
}

#[test]
fn json_report() {
    let dir = tempfile::tempdir().unwrap();
    write_iris(dir.path());
    cmd()
        .args(["--model", "knn", "--dataset", "iris"])
        .args(["--folds", "3", "--json", "--data-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mean_accuracy\""))
        .stdout(predicate::str::contains("\"folds\""));
}

#[test]
fn config_file_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_iris(dir.path());
    let config = serde_json::json!({
        "model": {
            "model_type": { "knn": { "k": 3, "metric": "manhattan" } },
            "cross_validation": { "n_folds": 3, "shuffle_seed": 11 }
        },
        "dataset": "iris",
        "data_dir": dir.path()
    });
    let config_path = dir.path().join("run.json");
    std::fs::write(&config_path, config.to_string()).unwrap();

    cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\": \"knn\""));
}
