//! Tests for the command-line contract: exactly one JSON document on
//! stdout, usage errors on wrong argument shape, non-zero exit on failure.

use image::{Rgb, RgbImage};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skin-classifier"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    assert_eq!(
        stdout.trim().lines().count(),
        1,
        "expected exactly one line on stdout, got: {stdout:?}"
    );
    serde_json::from_str(stdout.trim()).unwrap()
}

#[test]
fn wrong_argument_count_prints_usage_error_and_exits_one() {
    let output = run(&["only.png", "two-args.json"]);

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Usage: skin-classifier"), "got: {error}");
    assert!(error.contains("<image_path>"));
    assert!(error.contains("<mapping_path>"));
}

#[test]
fn no_arguments_also_prints_usage_error() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(json["error"].as_str().unwrap().starts_with("Usage: "));
}

#[test]
fn missing_artifacts_exit_nonzero_with_error_document() {
    let output = run(&[
        "whatever.png",
        "nope/model.json",
        "nope/scaler.json",
        "nope/mapping.json",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Model files not found. Checked: "));
    assert!(error.contains("nope/model.json"));
}

#[test]
fn end_to_end_classification_prints_success_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = |name: &str| -> PathBuf { dir.path().join(name) };

    let mut coefficients = vec![0.0f32; 33];
    coefficients[0] = 6.0;
    coefficients[2] = -6.0;
    fs::write(
        path("model.json"),
        serde_json::json!({
            "kind": "logistic_regression",
            "coefficients": [coefficients],
            "intercepts": [0.0]
        })
        .to_string(),
    )
    .unwrap();
    fs::write(
        path("scaler.json"),
        serde_json::json!({
            "mean": vec![0.0f32; 33],
            "scale": vec![255.0f32; 33]
        })
        .to_string(),
    )
    .unwrap();
    fs::write(path("mapping.json"), r#"{"classes": ["blue", "red"]}"#).unwrap();

    let image = path("red.png");
    RgbImage::from_pixel(64, 64, Rgb([255, 0, 0]))
        .save(&image)
        .unwrap();

    let output = run(&[
        image.to_str().unwrap(),
        path("model.json").to_str().unwrap(),
        path("scaler.json").to_str().unwrap(),
        path("mapping.json").to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["prediction"], "red");
    assert_eq!(json["success"], true);
    assert!(json["confidence_scores"]["red"].as_f64().unwrap() > 0.9);
    assert!(json["confidence_scores"]["blue"].as_f64().unwrap() < 0.1);
}
