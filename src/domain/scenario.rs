use super::entities::FinanceScenario;
use crate::error::{Result, ValuationError};

/// Base-rate sensitivity table for the project finance simulation.
pub const FINANCE_SCENARIOS: [FinanceScenario; 5] = [
    FinanceScenario {
        rate_percent: 3.0,
        contribution_eok: 180.0,
        profit_rate_percent: 5.2,
    },
    FinanceScenario {
        rate_percent: 3.5,
        contribution_eok: 170.0,
        profit_rate_percent: 4.8,
    },
    FinanceScenario {
        rate_percent: 4.0,
        contribution_eok: 160.0,
        profit_rate_percent: 4.5,
    },
    FinanceScenario {
        rate_percent: 4.5,
        contribution_eok: 150.0,
        profit_rate_percent: 4.2,
    },
    FinanceScenario {
        rate_percent: 5.0,
        contribution_eok: 140.0,
        profit_rate_percent: 4.0,
    },
];

/// Row for `rate_percent`, or the closest rate when there is no exact row.
/// Ties keep the lower rate.
pub fn scenario_for_rate(rate_percent: f64) -> Result<FinanceScenario> {
    if !rate_percent.is_finite() {
        return Err(ValuationError::InvalidInput(format!(
            "base rate must be finite, got {rate_percent}"
        )));
    }

    if let Some(exact) = FINANCE_SCENARIOS
        .iter()
        .find(|row| row.rate_percent == rate_percent)
    {
        return Ok(*exact);
    }

    let nearest = FINANCE_SCENARIOS
        .iter()
        .skip(1)
        .fold(FINANCE_SCENARIOS[0], |best, row| {
            if (row.rate_percent - rate_percent).abs() < (best.rate_percent - rate_percent).abs() {
                *row
            } else {
                best
            }
        });
    Ok(nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_rate_matches_row() {
        let row = scenario_for_rate(4.0).unwrap();
        assert_eq!(row.contribution_eok, 160.0);
        assert_eq!(row.contribution_krw(), 16_000_000_000.0);
        assert_eq!(row.profit_rate_percent, 4.5);
    }

    #[test]
    fn off_grid_rate_uses_nearest_row() {
        assert_eq!(scenario_for_rate(4.4).unwrap().rate_percent, 4.5);
        assert_eq!(scenario_for_rate(9.0).unwrap().rate_percent, 5.0);
        assert_eq!(scenario_for_rate(-1.0).unwrap().rate_percent, 3.0);
        // equidistant between 3.0 and 3.5
        assert_eq!(scenario_for_rate(3.25).unwrap().rate_percent, 3.0);
    }

    #[test]
    fn rejects_nan() {
        assert!(matches!(
            scenario_for_rate(f64::NAN),
            Err(ValuationError::InvalidInput(_))
        ));
    }
}
