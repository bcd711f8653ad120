//! Command-line front end: parses requests, runs the valuation core and
//! renders plain-text (or JSON) reports.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::{
    domain::{
        complex_summaries, compute_amortization, fit_trend, monthly_stats,
        predict_redevelopment_future_value, predict_with_policy, scenario_for_rate,
        simulate_investment_trend, trend_points, FeaturePolicy, InvestmentSimulationInput,
        LoanInput, PriceFeatures, ProjectStage, RegressionModelParameters,
    },
    error::ValuationError,
    infra::{load_deals, load_model, DealLoadError, ModelLoadError},
    util::{
        format::{eok, krw, percent},
        persistence::{save_settings, settings_file, PersistSaveError, Settings},
        version::{version_label, APP_NAME},
    },
};

#[derive(Debug, Parser)]
#[command(name = "seereal", about = "Redevelopment investment valuation tools")]
pub struct Cli {
    /// Model parameter file to use instead of the configured or bundled one.
    #[arg(long, global = true, env = "SEEREAL_MODEL")]
    pub model: Option<PathBuf>,
    /// Reject stages and feature vectors the model cannot encode exactly.
    #[arg(long, global = true)]
    pub strict: bool,
    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project an investment along the market trend line.
    Simulate {
        #[arg(long)]
        year_now: i32,
        #[arg(long)]
        future_year: i32,
        /// Present trade value of the asset (KRW).
        #[arg(long)]
        trade_value: f64,
        /// Capital invested (KRW).
        #[arg(long)]
        capital: f64,
    },
    /// Predict a price directly from model features.
    Predict {
        #[arg(long)]
        public_price: f64,
        #[arg(long)]
        nearby_price: f64,
        #[arg(long)]
        stage_index: f64,
        /// Distance to transit access in meters.
        #[arg(long, default_value_t = 500.0)]
        distance: f64,
        #[arg(long)]
        year: i32,
    },
    /// Project a property's value at a future project stage.
    Stage {
        #[arg(long)]
        value: f64,
        #[arg(long)]
        stage: String,
        #[arg(long)]
        year: i32,
    },
    /// List the redevelopment stages with progress and descriptions.
    Stages,
    /// Monthly payment and total interest of a fixed-rate loan.
    Loan {
        #[arg(long)]
        principal: Option<f64>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        years: Option<u32>,
    },
    /// Expected contribution and profit rate for a base rate.
    Scenario {
        #[arg(long)]
        rate: f64,
    },
    /// Monthly sale statistics from a deal export.
    Stats {
        file: PathBuf,
        /// Summarise per complex instead of per month.
        #[arg(long)]
        complexes: bool,
    },
    /// Fit trend constants from a deal export.
    FitTrend { file: PathBuf },
    /// Show or change persisted settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    Show,
    SetPolicy { policy: PolicyArg },
    SetModel { path: Option<PathBuf> },
    Reset,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PolicyArg {
    Lenient,
    Strict,
}

impl From<PolicyArg> for FeaturePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Lenient => FeaturePolicy::Lenient,
            PolicyArg::Strict => FeaturePolicy::Strict,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Valuation(#[from] ValuationError),
    #[error(transparent)]
    Model(#[from] ModelLoadError),
    #[error(transparent)]
    Deals(#[from] DealLoadError),
    #[error("failed to save settings: {0}")]
    Settings(#[from] PersistSaveError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything a command needs, passed explicitly rather than held globally.
pub struct Context {
    pub settings: Settings,
    pub model_override: Option<PathBuf>,
    pub policy: FeaturePolicy,
    pub json: bool,
}

impl Context {
    pub fn new(settings: Settings, cli: &Cli) -> Self {
        let policy = if cli.strict {
            FeaturePolicy::Strict
        } else {
            settings.feature_policy
        };
        Self {
            model_override: cli.model.clone().or_else(|| settings.model_path.clone()),
            policy,
            json: cli.json,
            settings,
        }
    }

    fn model(&self) -> Result<RegressionModelParameters, ModelLoadError> {
        load_model(self.model_override.as_deref())
    }

    fn render<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<String, AppError> {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(text())
        }
    }
}

/// Runs one command and returns the report to print.
pub fn run(ctx: &mut Context, command: Command) -> Result<String, AppError> {
    match command {
        Command::Simulate {
            year_now,
            future_year,
            trade_value,
            capital,
        } => {
            let input = InvestmentSimulationInput {
                year_now,
                current_trade_value: trade_value,
                invested_capital: capital,
                future_year,
            };
            let result = simulate_investment_trend(&ctx.settings.trend(), &input)?;
            ctx.render(&result, || {
                let rows = [
                    ("growth ratio", format!("{:.4}", result.growth_ratio)),
                    ("asset value", krw(result.predicted_future_asset_value)),
                    ("final amount", krw(result.final_amount)),
                    ("profit", krw(result.profit_amount)),
                    ("profit rate", percent(result.profit_rate_percent)),
                ];
                let lines: Vec<String> = rows
                    .iter()
                    .map(|(label, value)| format!("  {label:<16}  {value}"))
                    .collect();
                format!("{year_now} → {future_year}\n{}", lines.join("\n"))
            })
        }
        Command::Predict {
            public_price,
            nearby_price,
            stage_index,
            distance,
            year,
        } => {
            let model = ctx.model()?;
            let features = PriceFeatures {
                public_price,
                nearby_market_price: nearby_price,
                stage_index,
                accessibility_distance: distance,
                year: f64::from(year),
            };
            let price = predict_with_policy(&features, &model, ctx.policy)?;
            ctx.render(&price, || format!("predicted price {}", krw(price)))
        }
        Command::Stage { value, stage, year } => {
            let model = ctx.model()?;
            let prediction =
                predict_redevelopment_future_value(&model, ctx.policy, value, &stage, year)?;
            ctx.render(&prediction, || {
                format!(
                    "{stage} ({year}): {} ({})",
                    krw(prediction.predicted_value),
                    eok(prediction.predicted_value)
                )
            })
        }
        Command::Stages => {
            #[derive(Serialize)]
            struct StageRow {
                index: usize,
                name: &'static str,
                progress_percent: u8,
                description: &'static str,
            }
            let rows: Vec<StageRow> = ProjectStage::ALL
                .iter()
                .map(|stage| StageRow {
                    index: stage.index(),
                    name: stage.name(),
                    progress_percent: stage.progress_percent(),
                    description: stage.description(),
                })
                .collect();
            ctx.render(&rows, || {
                rows.iter()
                    .map(|row| {
                        format!(
                            "{}. {} ({}%) - {}",
                            row.index + 1,
                            row.name,
                            row.progress_percent,
                            row.description
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Loan {
            principal,
            rate,
            years,
        } => {
            let defaults = ctx.settings.loan_defaults;
            let input = LoanInput {
                principal: principal.unwrap_or(defaults.principal),
                annual_rate_percent: rate.unwrap_or(defaults.annual_rate_percent),
                term_years: years.unwrap_or(defaults.term_years),
            };
            let result = compute_amortization(&input);
            ctx.render(&result, || {
                format!(
                    "monthly payment {}\ntotal interest  {}",
                    krw(result.monthly_payment),
                    krw(result.total_interest)
                )
            })
        }
        Command::Scenario { rate } => {
            let scenario = scenario_for_rate(rate)?;
            ctx.render(&scenario, || {
                format!(
                    "base rate {:.1}%: contribution ~{}, profit rate ~{:.1}%",
                    scenario.rate_percent,
                    eok(scenario.contribution_krw()),
                    scenario.profit_rate_percent
                )
            })
        }
        Command::Stats { file, complexes } => {
            let deals = load_deals(&file)?;
            if complexes {
                let summaries = complex_summaries(&deals);
                ctx.render(&summaries, || {
                    summaries
                        .iter()
                        .map(|c| {
                            format!(
                                "{}: avg {} over {} months",
                                c.name,
                                krw(c.average_price as f64),
                                c.monthly.len()
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            } else {
                let stats = monthly_stats(&deals);
                ctx.render(&stats, || {
                    stats
                        .iter()
                        .map(|m| {
                            format!(
                                "{}-{:02}  n={:<3} avg {}  median {}  per m² {}",
                                m.year,
                                m.month,
                                m.deal_count,
                                krw(m.avg_price as f64),
                                krw(m.median_price as f64),
                                krw(m.avg_price_per_m2 as f64)
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            }
        }
        Command::FitTrend { file } => {
            let deals = load_deals(&file)?;
            let fit = fit_trend(&trend_points(&deals))?;
            ctx.render(&fit, || {
                format!(
                    "intercept a = {}\nslope b     = {}\nr²          = {:.4}",
                    fit.params.intercept_a, fit.params.slope_b, fit.r2
                )
            })
        }
        Command::Config { action } => run_config(ctx, action),
    }
}

fn run_config(ctx: &mut Context, action: ConfigAction) -> Result<String, AppError> {
    match action {
        ConfigAction::Show => {
            let location = settings_file()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(no config directory)".to_string());
            let body = serde_json::to_string_pretty(&ctx.settings)?;
            Ok(format!("{APP_NAME} {}\n# {location}\n{body}", version_label()))
        }
        ConfigAction::SetPolicy { policy } => {
            ctx.settings.feature_policy = policy.into();
            let path = save_settings(&ctx.settings)?;
            Ok(format!("feature policy saved to {}", path.display()))
        }
        ConfigAction::SetModel { path } => {
            if let Some(model_path) = path.as_deref() {
                // validate before persisting
                load_model(Some(model_path))?;
            }
            ctx.settings.model_path = path;
            let saved = save_settings(&ctx.settings)?;
            Ok(format!("model path saved to {}", saved.display()))
        }
        ConfigAction::Reset => {
            ctx.settings = Settings::default();
            let path = save_settings(&ctx.settings)?;
            Ok(format!("settings reset at {}", path.display()))
        }
    }
}
