//! Valuation and projection logic lives here.

pub mod deal_stats;
pub mod entities;
pub mod loan;
pub mod regression;
pub mod scenario;
pub mod stage;
pub mod trend;
pub mod valuation;

pub use deal_stats::{complex_summaries, monthly_stats, trend_points};
pub use entities::{
    ComplexSummary, DealRecord, FinanceScenario, FuturePrediction, InvestmentSimulationInput,
    InvestmentSimulationResult, LoanInput, LoanResult, MonthlyAverage, MonthlyDealStats,
    TrendParameters,
};
pub use loan::compute_amortization;
pub use regression::{
    predict_price, predict_with_policy, stage_label, try_predict_price, FeaturePolicy,
    PriceFeatures, RegressionModelParameters,
};
pub use scenario::{scenario_for_rate, FINANCE_SCENARIOS};
pub use stage::{progress_for, ProjectStage};
pub use trend::{fit_trend, simulate_investment_trend, TrendFit};
pub use valuation::predict_redevelopment_future_value;
