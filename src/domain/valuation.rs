use super::entities::FuturePrediction;
use super::regression::{
    predict_with_policy, FeaturePolicy, PriceFeatures, RegressionModelParameters,
};
use super::stage::ProjectStage;
use crate::error::{Result, ValuationError};

/// Assessed public price as a share of market value.
pub const PUBLIC_PRICE_RATIO: f64 = 0.65;

/// Stand-in distance to the nearest transit access, in meters.
pub const DEFAULT_ACCESSIBILITY_DISTANCE_M: f64 = 500.0;

/// Projects a property's value once the project reaches `target_stage_name`.
pub fn predict_redevelopment_future_value(
    params: &RegressionModelParameters,
    policy: FeaturePolicy,
    current_value: f64,
    target_stage_name: &str,
    simulated_year: i32,
) -> Result<FuturePrediction> {
    if !current_value.is_finite() || current_value <= 0.0 {
        return Err(ValuationError::InvalidInput(format!(
            "current value must be positive, got {current_value}"
        )));
    }

    let stage: ProjectStage = target_stage_name.parse()?;

    let features = PriceFeatures {
        public_price: (current_value * PUBLIC_PRICE_RATIO).round(),
        nearby_market_price: current_value,
        stage_index: stage.index() as f64,
        accessibility_distance: DEFAULT_ACCESSIBILITY_DISTANCE_M,
        year: f64::from(simulated_year),
    };

    let predicted_value = predict_with_policy(&features, params, policy)?;
    if !predicted_value.is_finite() {
        return Err(ValuationError::Computation(format!(
            "prediction for stage {stage} in {simulated_year} is {predicted_value}"
        )));
    }

    tracing::debug!(%stage, simulated_year, predicted_value, "projected redevelopment value");
    Ok(FuturePrediction { predicted_value })
}
