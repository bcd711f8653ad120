//! Loading of regression model parameters from the bundled asset or a file.

use std::{fs, io, path::Path};

use thiserror::Error;

use crate::domain::RegressionModelParameters;
use crate::util::assets::{load_asset, MODEL_PARAMS};

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("bundled model parameters are missing")]
    MissingAsset,
    #[error("failed to read model file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed model parameters: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parameters shipped inside the binary.
pub fn bundled_model() -> Result<RegressionModelParameters, ModelLoadError> {
    let bytes = load_asset(MODEL_PARAMS).ok_or(ModelLoadError::MissingAsset)?;
    let params: RegressionModelParameters = serde_json::from_slice(&bytes)?;
    tracing::debug!(
        features = params.feature_count(),
        stages = params.stage_column_labels().len(),
        "loaded bundled model parameters"
    );
    Ok(params)
}

/// Parameters read from a JSON file on disk.
pub fn model_from_file(path: &Path) -> Result<RegressionModelParameters, ModelLoadError> {
    let data = fs::read_to_string(path)?;
    let params: RegressionModelParameters = serde_json::from_str(&data)?;
    tracing::debug!(
        path = %path.display(),
        features = params.feature_count(),
        "loaded model parameters from file"
    );
    Ok(params)
}

/// The override file when one is configured, otherwise the bundled parameters.
pub fn load_model(
    override_path: Option<&Path>,
) -> Result<RegressionModelParameters, ModelLoadError> {
    match override_path {
        Some(path) => model_from_file(path),
        None => bundled_model(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn bundled_model_is_consistent() {
        let model = bundled_model().unwrap();
        assert_eq!(model.feature_count(), 11);
        assert_eq!(model.weights().len(), 12);
        assert_eq!(model.stage_column_labels()[3], "stage_3.0");
    }

    #[test]
    fn file_with_wrong_shape_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"weights":[1.0],"feature_means":[0.0,0.0,0.0,0.0],"feature_stds":[1.0,1.0,1.0,1.0],"stage_column_labels":[]}}"#
        )
        .unwrap();
        let err = model_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Decode(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, ModelLoadError::Io(_)));
    }
}
