//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: built-in defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use veriface_test_support::SyntheticFaceBuilder;

/// Command running in `dir` with XDG config rooted at `dir/xdg`.
fn veriface(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("veriface").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir);
    cmd
}

/// Lays out a clip with low classifier scores; returns the analyze arguments.
fn low_score_clip(dir: &Path) -> Vec<String> {
    let video = dir.join("clip.mp4");
    fs::write(&video, b"clip").unwrap();
    let faces = dir.join("faces");
    fs::create_dir(&faces).unwrap();
    for i in 0..2 {
        SyntheticFaceBuilder::textured_skin(64, 64, 3 + i)
            .save(faces.join(format!("face_{i}.png")))
            .unwrap();
    }
    let scores = dir.join("scores.json");
    fs::write(
        &scores,
        r#"{"models": [{"name": "m0", "scores": [0.02, 0.02]}, {"name": "m1", "scores": [0.02, 0.02]}]}"#,
    )
    .unwrap();

    vec![
        "analyze".into(),
        "--video".into(),
        video.display().to_string(),
        "--faces".into(),
        faces.display().to_string(),
        "--scores".into(),
        scores.display().to_string(),
    ]
}

/// Disables the heuristic override so the verdict follows the threshold.
const NO_OVERRIDE: &str = "
[fusion]
override_min_suspicion = 1.0
";

#[test]
fn test_cli_threshold_validation_rejects_invalid() {
    Command::cargo_bin("veriface")
        .unwrap()
        .args(["analyze", "--video", "clip.mp4", "--decision-threshold", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 is not in 0.0..=1.0"));
}

#[test]
fn test_project_config_threshold_applies() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    fs::write(
        temp.path().join(".veriface.toml"),
        format!("{NO_OVERRIDE}decision_threshold = 0.99\n"),
    )
    .unwrap();

    veriface(temp.path())
        .args(&args)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""is_deepfake":false"#));
}

#[test]
fn test_cli_threshold_overrides_project_config() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    fs::write(
        temp.path().join(".veriface.toml"),
        format!("{NO_OVERRIDE}decision_threshold = 0.99\n"),
    )
    .unwrap();

    // Every score beats a zero threshold.
    veriface(temp.path())
        .args(&args)
        .args(["--decision-threshold", "0.0"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""is_deepfake":true"#));
}

#[test]
fn test_xdg_config_applies() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    let xdg = temp.path().join("xdg").join("veriface");
    fs::create_dir_all(&xdg).unwrap();
    fs::write(
        xdg.join("config.toml"),
        format!("{NO_OVERRIDE}decision_threshold = 0.99\n"),
    )
    .unwrap();

    veriface(temp.path()).args(&args).assert().code(0);
}

#[test]
fn test_project_config_overrides_xdg() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    let xdg = temp.path().join("xdg").join("veriface");
    fs::create_dir_all(&xdg).unwrap();
    fs::write(
        xdg.join("config.toml"),
        format!("{NO_OVERRIDE}decision_threshold = 0.99\n"),
    )
    .unwrap();
    fs::write(
        temp.path().join(".veriface.toml"),
        "[fusion]\ndecision_threshold = 0.0\n",
    )
    .unwrap();

    veriface(temp.path()).args(&args).assert().code(1);
}

#[test]
fn test_project_config_found_in_parent() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    fs::write(
        temp.path().join(".veriface.toml"),
        "[output]\npretty = true\n",
    )
    .unwrap();
    let nested = temp.path().join("work").join("case");
    fs::create_dir_all(&nested).unwrap();

    let output = veriface(&nested).args(&args).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().count() > 1, "pretty output spans lines");
}

#[test]
fn test_invalid_config_value_warns() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    fs::write(
        temp.path().join(".veriface.toml"),
        "[fusion]\nvote_threshold = 1.7\n",
    )
    .unwrap();

    veriface(temp.path())
        .args(&args)
        .assert()
        .stderr(predicate::str::contains(
            "fusion.vote_threshold must be 0.0-1.0, got 1.7; using the built-in default",
        ));
}

#[test]
fn test_out_of_range_cap_falls_back_to_default() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    fs::write(
        temp.path().join(".veriface.toml"),
        format!("{NO_OVERRIDE}decision_threshold = 0.99\nconfidence_cap = 1.0\n"),
    )
    .unwrap();
    let record = temp.path().join("record.json");

    veriface(temp.path())
        .args(&args)
        .arg("--output")
        .arg(&record)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("fusion.confidence_cap must be 0.1-0.99"));

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&record).unwrap()).unwrap();
    let confidence = record["confidence_score"].as_f64().unwrap();
    assert!((0.1..=0.99).contains(&confidence), "confidence {confidence}");
}

#[test]
fn test_malformed_config_is_ignored() {
    let temp = tempfile::tempdir().unwrap();
    let args = low_score_clip(temp.path());
    fs::write(temp.path().join(".veriface.toml"), "[fusion\nbroken").unwrap();

    veriface(temp.path())
        .args(&args)
        .assert()
        .code(predicate::in_iter([0, 1]));
}
