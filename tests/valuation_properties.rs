use proptest::prelude::*;
use rstest::rstest;
use seereal_valuation::domain::{
    compute_amortization, predict_price, predict_redevelopment_future_value, progress_for,
    simulate_investment_trend, stage_label, FeaturePolicy, InvestmentSimulationInput, LoanInput,
    PriceFeatures, ProjectStage, RegressionModelParameters, TrendParameters,
};
use seereal_valuation::infra::bundled_model;
use seereal_valuation::ValuationError;

fn model() -> RegressionModelParameters {
    bundled_model().expect("bundled model loads")
}

#[test]
fn trend_example_matches_closed_form() {
    let a = -8921466824.79265;
    let b = 4428069.015434044;
    let trend = TrendParameters {
        intercept_a: a,
        slope_b: b,
    };
    let input = InvestmentSimulationInput {
        year_now: 2024,
        current_trade_value: 1_000_000_000.0,
        invested_capital: 100_000_000.0,
        future_year: 2030,
    };
    let result = simulate_investment_trend(&trend, &input).unwrap();

    let line_now = a + b * 2024.0;
    let line_future = a + b * 2030.0;
    let ratio = line_future / line_now;
    assert!((result.line_value_now - line_now).abs() < 1e-6);
    assert!((result.line_value_future - line_future).abs() < 1e-6);
    assert!((result.final_amount - 100_000_000.0 * ratio).abs() < 1e-6);
    assert!((result.profit_amount - (result.final_amount - 100_000_000.0)).abs() < 1e-6);
    let rate = result.profit_rate_percent.unwrap();
    assert!((rate - (ratio - 1.0) * 100.0).abs() < 1e-6);
}

#[rstest]
#[case(2024, 2024)]
#[case(2030, 2024)]
fn future_year_must_follow_current_year(#[case] year_now: i32, #[case] future_year: i32) {
    let input = InvestmentSimulationInput {
        year_now,
        current_trade_value: 1.0,
        invested_capital: 1.0,
        future_year,
    };
    assert!(matches!(
        simulate_investment_trend(&TrendParameters::default(), &input),
        Err(ValuationError::InvalidRange(_))
    ));
}

#[rstest]
#[case(100_000_000.0, 4.5, 30, 506_685.0)]
#[case(120_000_000.0, 0.000_000_1, 30, 333_333.0)]
fn amortization_known_cases(
    #[case] principal: f64,
    #[case] annual_rate_percent: f64,
    #[case] term_years: u32,
    #[case] expected_payment: f64,
) {
    let result = compute_amortization(&LoanInput {
        principal,
        annual_rate_percent,
        term_years,
    });
    assert!((result.monthly_payment - expected_payment).abs() <= 1.0);
    let payments = f64::from(term_years) * 12.0;
    assert!((result.total_interest - (result.monthly_payment * payments - principal)).abs() < 1e-6);
}

#[test]
fn unknown_stage_is_rejected() {
    let err = predict_redevelopment_future_value(
        &model(),
        FeaturePolicy::Lenient,
        500_000_000.0,
        "존재하지않는단계",
        2025,
    )
    .unwrap_err();
    assert!(matches!(err, ValuationError::UnknownStage(_)));
}

#[test]
fn bundled_model_ranks_later_stages_higher() {
    let model = model();
    let values: Vec<f64> = ProjectStage::ALL
        .iter()
        .map(|stage| {
            predict_redevelopment_future_value(
                &model,
                FeaturePolicy::Strict,
                900_000_000.0,
                stage.name(),
                2027,
            )
            .unwrap()
            .predicted_value
        })
        .collect();
    for pair in values.windows(2) {
        assert!(pair[1] >= pair[0], "{values:?}");
    }
}

#[test]
fn progress_matches_pipeline_position() {
    assert_eq!(progress_for("관리처분인가"), 71);
    assert_eq!(progress_for("준공"), 100);
}

proptest! {
    #[test]
    fn prediction_is_pure_and_direct_equals_padded_path(
        public_price in 1.0e7f64..5.0e9,
        nearby in 1.0e7f64..8.0e9,
        stage in 0u8..7,
        distance in 0.0f64..3000.0,
        year in 2000i32..2040,
    ) {
        let model = model();
        let features = PriceFeatures {
            public_price,
            nearby_market_price: nearby,
            stage_index: f64::from(stage),
            accessibility_distance: distance,
            year: f64::from(year),
        };
        let first = predict_price(&features, &model);
        let second = predict_price(&features, &model);
        prop_assert_eq!(first.to_bits(), second.to_bits());

        let mut raw = vec![public_price, nearby, distance, f64::from(year)];
        raw.extend(model.stage_column_labels().iter().map(|label| {
            if *label == stage_label(f64::from(stage)) { 1.0 } else { 0.0 }
        }));
        prop_assert_eq!(raw.len(), model.feature_count());
        prop_assert_eq!(model.predict_from_raw(&raw).to_bits(), first.to_bits());
        prop_assert_eq!(model.try_predict_from_raw(&raw).unwrap().to_bits(), first.to_bits());
    }

    #[test]
    fn simulation_is_deterministic_and_consistent(
        year_now in 2015i32..2040,
        span in 1i32..30,
        trade in 0.0f64..1.0e10,
        capital in 1.0f64..1.0e10,
    ) {
        let input = InvestmentSimulationInput {
            year_now,
            current_trade_value: trade,
            invested_capital: capital,
            future_year: year_now + span,
        };
        let trend = TrendParameters::default();
        let first = simulate_investment_trend(&trend, &input).unwrap();
        let second = simulate_investment_trend(&trend, &input).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.growth_ratio > 1.0);
        let tolerance = 1e-9 * first.final_amount.abs().max(1.0);
        prop_assert!((first.profit_amount - (first.final_amount - capital)).abs() <= tolerance);
    }

    #[test]
    fn amortization_never_undercharges(
        principal in 1.0e6f64..2.0e9,
        rate in 0.5f64..15.0,
        years in 1u32..40,
    ) {
        let result = compute_amortization(&LoanInput {
            principal,
            annual_rate_percent: rate,
            term_years: years,
        });
        let payments = f64::from(years) * 12.0;
        prop_assert!(result.monthly_payment * payments >= principal - payments);
        prop_assert!(result.total_interest > -payments);
    }
}
