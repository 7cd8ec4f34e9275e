//! End-to-end tests for the prediction pipeline.
//!
//! Artifacts are written as JSON fixtures into a temp directory: a binary
//! logistic regression over the 33-dimension feature space whose only active
//! weights look at the red and blue channel means, so solid-color images
//! classify with near-certain confidence.

use image::{Rgb, RgbImage};
use skin_classifier::features::{FEATURE_LEN, FeatureExtractor};
use skin_classifier::predictor::{PredictionReport, SkinConditionClassifier, predict_condition};
use std::fs;
use std::path::{Path, PathBuf};

struct Fixture {
    dir: tempfile::TempDir,
    model: PathBuf,
    scaler: PathBuf,
    mapping: PathBuf,
}

impl Fixture {
    fn classifier(&self) -> SkinConditionClassifier {
        SkinConditionClassifier::builder()
            .model_path(&self.model)
            .scaler_path(&self.scaler)
            .mapping_path(&self.mapping)
            .build()
            .unwrap()
    }

    fn image(&self, name: &str, color: [u8; 3]) -> PathBuf {
        let path = self.dir.path().join(name);
        RgbImage::from_pixel(64, 64, Rgb(color)).save(&path).unwrap();
        path
    }
}

/// Writes a red-vs-blue artifact set: weight +6 on the scaled red mean,
/// -6 on the scaled blue mean, so a solid-red image scores sigmoid(6) for
/// the positive class ("red").
fn red_blue_fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();

    let mut coefficients = vec![0.0f32; FEATURE_LEN];
    coefficients[0] = 6.0;
    coefficients[2] = -6.0;
    let model = serde_json::json!({
        "kind": "logistic_regression",
        "coefficients": [coefficients],
        "intercepts": [0.0]
    });
    let scaler = serde_json::json!({
        "mean": vec![0.0f32; FEATURE_LEN],
        "scale": vec![255.0f32; FEATURE_LEN]
    });
    let mapping = serde_json::json!({ "classes": ["blue", "red"] });

    let write = |name: &str, value: &serde_json::Value| {
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    };

    Fixture {
        model: write("model.json", &model),
        scaler: write("scaler.json", &scaler),
        mapping: write("mapping.json", &mapping),
        dir,
    }
}

#[test]
fn solid_red_image_classifies_as_red_with_high_confidence() {
    let fixture = red_blue_fixture();
    let image = fixture.image("red.png", [255, 0, 0]);

    let report = fixture.classifier().predict(&image);
    match report {
        PredictionReport::Success {
            prediction,
            confidence_scores,
            success,
        } => {
            assert!(success);
            assert_eq!(prediction, "red");
            assert!(confidence_scores["red"] > 0.9);
            assert!(confidence_scores["blue"] < 0.1);
        }
        PredictionReport::Failure { error } => panic!("unexpected failure: {error}"),
    }
}

#[test]
fn solid_blue_image_classifies_as_blue() {
    let fixture = red_blue_fixture();
    let image = fixture.image("blue.png", [0, 0, 255]);

    let report = fixture.classifier().predict(&image);
    match report {
        PredictionReport::Success { prediction, .. } => assert_eq!(prediction, "blue"),
        PredictionReport::Failure { error } => panic!("unexpected failure: {error}"),
    }
}

#[test]
fn confidence_keys_are_exactly_the_mapping_classes() {
    let fixture = red_blue_fixture();
    let image = fixture.image("red.png", [255, 0, 0]);

    match fixture.classifier().predict(&image) {
        PredictionReport::Success {
            prediction,
            confidence_scores,
            ..
        } => {
            let keys: Vec<&str> = confidence_scores.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["blue", "red"]);
            assert!(confidence_scores.contains_key(prediction.as_str()));
        }
        PredictionReport::Failure { error } => panic!("unexpected failure: {error}"),
    }
}

#[test]
fn identical_inputs_produce_identical_reports() {
    let fixture = red_blue_fixture();
    let image = fixture.image("red.png", [255, 0, 0]);
    let classifier = fixture.classifier();

    let first = classifier.predict(&image).to_json_line();
    let second = classifier.predict(&image).to_json_line();
    assert_eq!(first, second);
}

#[test]
fn missing_artifacts_fail_with_checked_paths_even_for_a_valid_image() {
    let fixture = red_blue_fixture();
    let image = fixture.image("red.png", [255, 0, 0]);

    let report = predict_condition(
        &image,
        Path::new("nowhere/model.json"),
        Path::new("nowhere/scaler.json"),
        Path::new("nowhere/mapping.json"),
    );
    match report {
        PredictionReport::Failure { error } => {
            assert!(error.starts_with("Model files not found. Checked: "));
            assert!(error.contains("nowhere/model.json"));
            assert!(error.contains("nowhere/scaler.json"));
            assert!(error.contains("nowhere/mapping.json"));
        }
        PredictionReport::Success { .. } => panic!("expected failure report"),
    }
}

#[test]
fn undecodable_image_reports_extraction_failure() {
    let fixture = red_blue_fixture();
    let bogus = fixture.dir.path().join("not-an-image.png");
    fs::write(&bogus, b"these bytes are not a PNG").unwrap();

    let report = fixture.classifier().predict(&bogus);
    match report {
        PredictionReport::Failure { error } => {
            assert_eq!(error, "Could not extract features from image");
        }
        PredictionReport::Success { .. } => panic!("expected failure report"),
    }
}

#[test]
fn oversized_mapping_is_rejected_loudly() {
    let fixture = red_blue_fixture();
    let image = fixture.image("red.png", [255, 0, 0]);
    fs::write(
        &fixture.mapping,
        r#"{"classes": ["blue", "red", "green"]}"#,
    )
    .unwrap();

    let report = fixture.classifier().predict(&image);
    match report {
        PredictionReport::Failure { error } => {
            assert!(error.contains("configuration"), "got: {error}");
        }
        PredictionReport::Success { .. } => panic!("expected failure report"),
    }
}

#[test]
fn changed_artifacts_on_disk_are_picked_up() {
    let fixture = red_blue_fixture();
    let image = fixture.image("red.png", [255, 0, 0]);
    let classifier = fixture.classifier();

    match classifier.predict(&image) {
        PredictionReport::Success { prediction, .. } => assert_eq!(prediction, "red"),
        PredictionReport::Failure { error } => panic!("unexpected failure: {error}"),
    }

    // Swap the label order on disk; the next call must see the new mapping.
    fs::write(&fixture.mapping, r#"{"classes": ["red", "blue"]}"#).unwrap();
    match classifier.predict(&image) {
        PredictionReport::Success { prediction, .. } => assert_eq!(prediction, "blue"),
        PredictionReport::Failure { error } => panic!("unexpected failure: {error}"),
    }
}

#[test]
fn extractor_yields_fixed_length_finite_vectors_for_saved_images() {
    let fixture = red_blue_fixture();
    let image = fixture.image("red.png", [255, 0, 0]);

    let features = FeatureExtractor::default().extract(&image).unwrap();
    assert_eq!(features.len(), FEATURE_LEN);
    assert!(features.iter().all(|value| value.is_finite()));
}

#[test]
fn extractor_returns_none_for_missing_file() {
    assert!(
        FeatureExtractor::default()
            .extract(Path::new("missing/image.png"))
            .is_none()
    );
}
