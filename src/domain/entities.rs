use serde::{Deserialize, Serialize};
use time::Date;

/// Linear fit of average market price over calendar year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendParameters {
    pub intercept_a: f64,
    pub slope_b: f64,
}

impl TrendParameters {
    pub const INTERCEPT_A: f64 = -8921466824.79265;
    pub const SLOPE_B: f64 = 4428069.015434044;

    /// Evaluates the trend line at `year`.
    pub fn value_at(&self, year: i32) -> f64 {
        self.intercept_a + self.slope_b * f64::from(year)
    }
}

impl Default for TrendParameters {
    fn default() -> Self {
        Self {
            intercept_a: Self::INTERCEPT_A,
            slope_b: Self::SLOPE_B,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSimulationInput {
    pub year_now: i32,
    /// Present trade value of the asset (KRW).
    pub current_trade_value: f64,
    /// Capital put into the investment (KRW).
    pub invested_capital: f64,
    pub future_year: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSimulationResult {
    pub year_now: i32,
    pub future_year: i32,
    pub line_value_now: f64,
    pub line_value_future: f64,
    pub growth_ratio: f64,
    pub current_trade_value: f64,
    pub predicted_future_asset_value: f64,
    pub invested_capital: f64,
    pub final_amount: f64,
    pub profit_amount: f64,
    /// `None` when no capital was invested.
    pub profit_rate_percent: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl Default for LoanInput {
    fn default() -> Self {
        Self {
            principal: 100_000_000.0,
            annual_rate_percent: 4.5,
            term_years: 30,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuturePrediction {
    pub predicted_value: f64,
}

/// One base-rate row of the project finance simulation table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FinanceScenario {
    pub rate_percent: f64,
    /// Expected member contribution in units of 억 (100 million KRW).
    pub contribution_eok: f64,
    pub profit_rate_percent: f64,
}

impl FinanceScenario {
    pub fn contribution_krw(&self) -> f64 {
        self.contribution_eok * 100_000_000.0
    }
}

/// A single recorded sale.
#[derive(Clone, Debug, PartialEq)]
pub struct DealRecord {
    pub complex_name: String,
    pub deal_date: Date,
    pub deal_price: f64,
    pub area_m2: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyDealStats {
    pub year: i32,
    pub month: u8,
    pub avg_price: i64,
    pub median_price: i64,
    pub avg_price_per_m2: i64,
    pub deal_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: u8,
    pub avg_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComplexSummary {
    pub name: String,
    pub average_price: i64,
    pub monthly: Vec<MonthlyAverage>,
}
