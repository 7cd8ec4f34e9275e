//! Loading and cross-validation of the pretrained artifact set.

use crate::artifacts::{ClassMapping, PretrainedClassifier, StandardScaler};
use crate::core::{ClassifyError, ClassifyResult, Classifier, Scaler};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Locations of the three pretrained artifact files.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// Path of the serialized classifier.
    pub model: PathBuf,
    /// Path of the serialized feature scaler.
    pub scaler: PathBuf,
    /// Path of the class-mapping document.
    pub mapping: PathBuf,
}

impl ArtifactPaths {
    /// Creates an artifact path set.
    pub fn new(
        model: impl Into<PathBuf>,
        scaler: impl Into<PathBuf>,
        mapping: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model: model.into(),
            scaler: scaler.into(),
            mapping: mapping.into(),
        }
    }

    /// Checks that every artifact file exists on disk.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::ArtifactsMissing` naming exactly the checked
    /// paths if any of them is absent.
    pub fn check_exist(&self) -> ClassifyResult<()> {
        if self.model.exists() && self.scaler.exists() && self.mapping.exists() {
            Ok(())
        } else {
            Err(ClassifyError::artifacts_missing(&[
                &self.model,
                &self.scaler,
                &self.mapping,
            ]))
        }
    }
}

/// A loaded, mutually consistent set of pretrained artifacts.
///
/// Every prediction call loads a fresh set; a changed file on disk is always
/// picked up.
#[derive(Debug)]
pub struct ArtifactSet {
    /// The pretrained classifier.
    pub classifier: PretrainedClassifier,
    /// The fitted feature scaler.
    pub scaler: StandardScaler,
    /// The class-name mapping.
    pub mapping: ClassMapping,
}

impl ArtifactSet {
    /// Loads and validates the artifact set from disk.
    ///
    /// All three files must exist; each must deserialize into its expected
    /// document shape; and the set must be mutually consistent: the mapping
    /// length must equal the classifier's class count, and the scaler's
    /// width must equal the classifier's feature count. Any violation is a
    /// fatal configuration error, not a recoverable one.
    pub fn load(paths: &ArtifactPaths) -> ClassifyResult<Self> {
        paths.check_exist()?;

        let classifier: PretrainedClassifier = read_json(&paths.model)?;
        classifier.validate()?;

        let scaler: StandardScaler = read_json(&paths.scaler)?;
        scaler.validate()?;

        let mapping: ClassMapping = read_json(&paths.mapping)?;

        if mapping.len() != classifier.n_classes() {
            return Err(ClassifyError::config_error(format!(
                "class mapping has {} classes but the classifier outputs {}",
                mapping.len(),
                classifier.n_classes()
            )));
        }
        if scaler.n_features() != classifier.n_features() {
            return Err(ClassifyError::config_error(format!(
                "scaler is fitted on {} dimensions but the classifier expects {}",
                scaler.n_features(),
                classifier.n_features()
            )));
        }

        Ok(Self {
            classifier,
            scaler,
            mapping,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ClassifyResult<T> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|error| ClassifyError::artifact_parse(path, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn valid_artifacts(dir: &Path) -> ArtifactPaths {
        let model = write(
            dir,
            "model.json",
            r#"{
                "kind": "logistic_regression",
                "coefficients": [[1.0, -1.0]],
                "intercepts": [0.0]
            }"#,
        );
        let scaler = write(dir, "scaler.json", r#"{"mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#);
        let mapping = write(dir, "mapping.json", r#"{"classes": ["blue", "red"]}"#);
        ArtifactPaths::new(model, scaler, mapping)
    }

    #[test]
    fn test_load_valid_set() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ArtifactSet::load(&valid_artifacts(dir.path())).unwrap();
        assert_eq!(artifacts.mapping.len(), 2);
        assert_eq!(artifacts.classifier.n_features(), 2);
    }

    #[test]
    fn test_missing_file_names_checked_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = valid_artifacts(dir.path());
        fs::remove_file(&paths.scaler).unwrap();
        paths.scaler = dir.path().join("gone.json");

        let error = ArtifactSet::load(&paths).unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with("Model files not found. Checked: "));
        assert!(message.contains("model.json"));
        assert!(message.contains("gone.json"));
        assert!(message.contains("mapping.json"));
    }

    #[test]
    fn test_mapping_class_count_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = valid_artifacts(dir.path());
        paths.mapping = write(
            dir.path(),
            "mapping3.json",
            r#"{"classes": ["blue", "red", "green"]}"#,
        );

        let error = ArtifactSet::load(&paths).unwrap_err();
        assert!(matches!(error, ClassifyError::ConfigError { .. }));
    }

    #[test]
    fn test_scaler_width_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = valid_artifacts(dir.path());
        paths.scaler = write(dir.path(), "scaler1.json", r#"{"mean": [0.0], "scale": [1.0]}"#);

        let error = ArtifactSet::load(&paths).unwrap_err();
        assert!(matches!(error, ClassifyError::ConfigError { .. }));
    }

    #[test]
    fn test_malformed_artifact_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = valid_artifacts(dir.path());
        paths.model = write(dir.path(), "broken.json", "not json at all");

        let error = ArtifactSet::load(&paths).unwrap_err();
        assert!(error.to_string().contains("broken.json"));
    }
}
