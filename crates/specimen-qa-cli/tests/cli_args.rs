//! CLI argument handling tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use assert_cmd::Command;
use predicates::prelude::*;
use specimen_qa_test_support::SyntheticFrameBuilder;

fn cmd() -> Command {
    Command::cargo_bin("specimen-qa").unwrap()
}

#[test]
fn test_help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("monitor"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("specimen-qa"));
}

#[test]
fn test_no_paths_is_an_error() {
    cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No paths specified"));
}

#[test]
fn test_threshold_flag_requires_four_values() {
    let temp_dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(temp_dir.path())
        .arg("--lighting-thresholds")
        .arg("60,90,120")
        .arg("whatever.png")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4 thresholds"));
}

#[test]
fn test_threshold_flag_rejects_decreasing_values() {
    let temp_dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(temp_dir.path())
        .arg("--sharpness-thresholds")
        .arg("150,110,80,40")
        .arg("whatever.png")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strictly increasing"));
}

#[test]
fn test_threshold_flag_rejects_garbage() {
    let temp_dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(temp_dir.path())
        .arg("--contrast-thresholds")
        .arg("a,b,c,d")
        .arg("whatever.png")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid number"));
}

#[test]
fn test_nonexistent_path_yields_empty_success() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = cmd()
        .current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .arg("--quiet")
        .arg("missing-dir")
        .output()
        .unwrap();

    // Nothing to analyze: no records, no warnings.
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unsupported_file_is_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("notes.txt"), "not an image").unwrap();
    let frame = SyntheticFrameBuilder::good_capture(96, 96);
    SyntheticFrameBuilder::to_image(&frame)
        .save(temp_dir.path().join("shot.png"))
        .unwrap();

    let output = cmd()
        .current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .arg("--quiet")
        .arg(temp_dir.path())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().filter(|l| !l.trim().is_empty()).count(), 1);
}

#[test]
fn test_corrupt_image_is_skipped_not_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("broken.png"), b"not actually a png").unwrap();
    let frame = SyntheticFrameBuilder::good_capture(96, 96);
    SyntheticFrameBuilder::to_image(&frame)
        .save(temp_dir.path().join("shot.png"))
        .unwrap();

    let output = cmd()
        .current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .arg(temp_dir.path())
        .output()
        .unwrap();

    // The good capture is still analyzed and the run succeeds.
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().filter(|l| !l.trim().is_empty()).count(), 1);
}
