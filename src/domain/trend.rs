//! Trend-line investment projection and trend fitting.

use serde::Serialize;

use super::entities::{InvestmentSimulationInput, InvestmentSimulationResult, TrendParameters};
use crate::error::{Result, ValuationError};

/// Projects an investment forward along the market trend line.
///
/// The ratio between the trend line at `future_year` and at `year_now` is
/// applied multiplicatively to both the present trade value and the invested
/// capital.
pub fn simulate_investment_trend(
    trend: &TrendParameters,
    input: &InvestmentSimulationInput,
) -> Result<InvestmentSimulationResult> {
    if input.future_year <= input.year_now {
        return Err(ValuationError::InvalidRange(format!(
            "future year {} must be greater than current year {}",
            input.future_year, input.year_now
        )));
    }

    let line_value_now = trend.value_at(input.year_now);
    let line_value_future = trend.value_at(input.future_year);

    if line_value_now <= 0.0 {
        return Err(ValuationError::DegenerateModel(format!(
            "trend line at {} is non-positive ({line_value_now:.0}); growth ratio undefined",
            input.year_now
        )));
    }

    let growth_ratio = line_value_future / line_value_now;
    let predicted_future_asset_value = input.current_trade_value * growth_ratio;
    let final_amount = input.invested_capital * growth_ratio;
    let profit_amount = final_amount - input.invested_capital;
    let profit_rate_percent =
        (input.invested_capital != 0.0).then(|| profit_amount / input.invested_capital * 100.0);

    Ok(InvestmentSimulationResult {
        year_now: input.year_now,
        future_year: input.future_year,
        line_value_now,
        line_value_future,
        growth_ratio,
        current_trade_value: input.current_trade_value,
        predicted_future_asset_value,
        invested_capital: input.invested_capital,
        final_amount,
        profit_amount,
        profit_rate_percent,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrendFit {
    pub params: TrendParameters,
    pub r2: f64,
}

/// Ordinary least-squares fit of price over year.
pub fn fit_trend(points: &[(i32, f64)]) -> Result<TrendFit> {
    if let Some((year, price)) = points.iter().find(|(_, price)| !price.is_finite()) {
        return Err(ValuationError::InvalidInput(format!(
            "price for {year} is not finite ({price})"
        )));
    }

    let n = points.len() as f64;
    let (x_sum, x2_sum, y_sum, y2_sum, xy_sum) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0, 0.0),
        |(x_sum, x2_sum, y_sum, y2_sum, xy_sum), &(year, price)| {
            let x = f64::from(year);
            (
                x_sum + x,
                x2_sum + x * x,
                y_sum + price,
                y2_sum + price * price,
                xy_sum + x * price,
            )
        },
    );

    let denom = n * x2_sum - x_sum * x_sum;
    if points.len() < 2 || denom.abs() < f64::EPSILON {
        return Err(ValuationError::DegenerateModel(
            "at least two distinct years are required to fit a trend".to_string(),
        ));
    }

    let covariance = n * xy_sum - x_sum * y_sum;
    let slope_b = covariance / denom;
    let intercept_a = (x2_sum * y_sum - xy_sum * x_sum) / denom;

    let y_spread = n * y2_sum - y_sum * y_sum;
    let r2 = if y_spread.abs() < f64::EPSILON {
        1.0
    } else {
        covariance * covariance / denom / y_spread
    };

    Ok(TrendFit {
        params: TrendParameters {
            intercept_a,
            slope_b,
        },
        r2,
    })
}
