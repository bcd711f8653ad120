//! Standardized linear-regression price model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValuationError};

/// Added to every standard deviation so a constant feature never divides by zero.
pub const STD_EPSILON: f64 = 1e-8;

/// Number of numeric features that precede the stage one-hot block.
pub const NUMERIC_FEATURES: usize = 4;

/// Trained model coefficients. Validated on construction and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModelParameters", into = "RawModelParameters")]
pub struct RegressionModelParameters {
    weights: Vec<f64>,
    feature_means: Vec<f64>,
    feature_stds: Vec<f64>,
    stage_column_labels: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModelParameters {
    weights: Vec<f64>,
    feature_means: Vec<f64>,
    feature_stds: Vec<f64>,
    stage_column_labels: Vec<String>,
}

impl TryFrom<RawModelParameters> for RegressionModelParameters {
    type Error = ValuationError;

    fn try_from(raw: RawModelParameters) -> Result<Self> {
        Self::new(
            raw.weights,
            raw.feature_means,
            raw.feature_stds,
            raw.stage_column_labels,
        )
    }
}

impl From<RegressionModelParameters> for RawModelParameters {
    fn from(params: RegressionModelParameters) -> Self {
        Self {
            weights: params.weights,
            feature_means: params.feature_means,
            feature_stds: params.feature_stds,
            stage_column_labels: params.stage_column_labels,
        }
    }
}

impl RegressionModelParameters {
    pub fn new(
        weights: Vec<f64>,
        feature_means: Vec<f64>,
        feature_stds: Vec<f64>,
        stage_column_labels: Vec<String>,
    ) -> Result<Self> {
        let features = feature_means.len();
        if features != NUMERIC_FEATURES + stage_column_labels.len() {
            return Err(ValuationError::InvalidModel(format!(
                "{features} feature means for {NUMERIC_FEATURES} numeric features and {} stage columns",
                stage_column_labels.len()
            )));
        }
        if feature_stds.len() != features {
            return Err(ValuationError::InvalidModel(format!(
                "{} feature stds for {features} features",
                feature_stds.len()
            )));
        }
        if weights.len() != features + 1 {
            return Err(ValuationError::InvalidModel(format!(
                "{} weights for {features} features plus bias",
                weights.len()
            )));
        }
        if weights
            .iter()
            .chain(&feature_means)
            .chain(&feature_stds)
            .any(|value| !value.is_finite())
        {
            return Err(ValuationError::InvalidModel(
                "parameters must be finite".to_string(),
            ));
        }
        if feature_stds.iter().any(|std| *std < 0.0) {
            return Err(ValuationError::InvalidModel(
                "feature stds must be non-negative".to_string(),
            ));
        }

        Ok(Self {
            weights,
            feature_means,
            feature_stds,
            stage_column_labels,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn feature_means(&self) -> &[f64] {
        &self.feature_means
    }

    pub fn feature_stds(&self) -> &[f64] {
        &self.feature_stds
    }

    pub fn stage_column_labels(&self) -> &[String] {
        &self.stage_column_labels
    }

    pub fn feature_count(&self) -> usize {
        self.feature_means.len()
    }

    /// One-hot vector for `stage_index` and whether any column carried its label.
    pub fn stage_one_hot(&self, stage_index: f64) -> (Vec<f64>, bool) {
        let label = stage_label(stage_index);
        let mut one_hot = vec![0.0; self.stage_column_labels.len()];
        let matched = match self.stage_column_labels.iter().position(|col| *col == label) {
            Some(pos) => {
                one_hot[pos] = 1.0;
                true
            }
            None => false,
        };
        (one_hot, matched)
    }

    /// Standardizes a raw feature vector, padding with zeros or truncating to
    /// the model's feature count.
    pub fn standardize(&self, raw: &[f64]) -> Vec<f64> {
        self.feature_means
            .iter()
            .zip(&self.feature_stds)
            .enumerate()
            .map(|(i, (mean, std))| {
                let value = raw.get(i).copied().unwrap_or(0.0);
                (value - mean) / (std + STD_EPSILON)
            })
            .collect()
    }

    /// Bias plus dot product of the standardized vector with the weights.
    pub fn predict_from_raw(&self, raw: &[f64]) -> f64 {
        let standardized = self.standardize(raw);
        // weights always holds the bias followed by one coefficient per feature
        let bias = self.weights[0];
        bias + self.weights[1..]
            .iter()
            .zip(&standardized)
            .map(|(w, x)| w * x)
            .sum::<f64>()
    }

    /// Like [`predict_from_raw`](Self::predict_from_raw) but rejects a length mismatch.
    pub fn try_predict_from_raw(&self, raw: &[f64]) -> Result<f64> {
        if raw.len() != self.feature_count() {
            return Err(ValuationError::FeatureMismatch {
                expected: self.feature_count(),
                actual: raw.len(),
            });
        }
        Ok(self.predict_from_raw(raw))
    }
}

/// Column label for a stage index, e.g. `stage_3.0`.
pub fn stage_label(stage_index: f64) -> String {
    // adding 0.0 folds -0.0 into 0.0
    format!("stage_{:.1}", stage_index + 0.0)
}

/// Inputs to the price model before encoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceFeatures {
    pub public_price: f64,
    pub nearby_market_price: f64,
    pub stage_index: f64,
    pub accessibility_distance: f64,
    pub year: f64,
}

/// How the model reacts to stages or vectors it cannot encode exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeaturePolicy {
    /// Unmatched stages encode as all-zero and vectors are padded or truncated.
    #[default]
    Lenient,
    /// Unmatched stages and length mismatches are errors.
    Strict,
}

impl PriceFeatures {
    fn raw_vector(&self, one_hot: Vec<f64>) -> Vec<f64> {
        let mut raw = vec![
            self.public_price,
            self.nearby_market_price,
            self.accessibility_distance,
            self.year,
        ];
        raw.extend(one_hot);
        raw
    }
}

/// Predicted price for the given features. Never fails; an unmatched stage
/// contributes no stage effect.
pub fn predict_price(features: &PriceFeatures, params: &RegressionModelParameters) -> f64 {
    let (one_hot, matched) = params.stage_one_hot(features.stage_index);
    if !matched {
        tracing::warn!(
            stage = %stage_label(features.stage_index),
            "no stage column matched; encoding stage as all-zero"
        );
    }
    params.predict_from_raw(&features.raw_vector(one_hot))
}

/// Strict counterpart of [`predict_price`].
pub fn try_predict_price(
    features: &PriceFeatures,
    params: &RegressionModelParameters,
) -> Result<f64> {
    let (one_hot, matched) = params.stage_one_hot(features.stage_index);
    if !matched {
        return Err(ValuationError::UnknownStage(stage_label(features.stage_index)));
    }
    params.try_predict_from_raw(&features.raw_vector(one_hot))
}

/// Dispatches to [`predict_price`] or [`try_predict_price`] by policy.
pub fn predict_with_policy(
    features: &PriceFeatures,
    params: &RegressionModelParameters,
    policy: FeaturePolicy,
) -> Result<f64> {
    match policy {
        FeaturePolicy::Lenient => Ok(predict_price(features, params)),
        FeaturePolicy::Strict => try_predict_price(features, params),
    }
}
