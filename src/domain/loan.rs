use super::entities::{LoanInput, LoanResult};

/// Fixed-rate amortization. Non-positive inputs yield a zeroed result.
pub fn compute_amortization(input: &LoanInput) -> LoanResult {
    let LoanInput {
        principal,
        annual_rate_percent,
        term_years,
    } = *input;

    if principal <= 0.0 || annual_rate_percent <= 0.0 || term_years == 0 {
        return LoanResult::default();
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let payments = f64::from(term_years) * 12.0;

    let monthly_payment = if monthly_rate == 0.0 {
        principal / payments
    } else {
        let discount = (1.0 + monthly_rate).powf(-payments);
        (principal * monthly_rate / (1.0 - discount)).round()
    };

    LoanResult {
        monthly_payment,
        total_interest: monthly_payment * payments - principal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_thirty_year_mortgage() {
        let result = compute_amortization(&LoanInput {
            principal: 100_000_000.0,
            annual_rate_percent: 4.5,
            term_years: 30,
        });
        assert_eq!(result.monthly_payment, 506_685.0);
        assert_eq!(result.total_interest, 506_685.0 * 360.0 - 100_000_000.0);
    }

    #[test]
    fn non_positive_inputs_are_zeroed() {
        let zeroed = LoanResult::default();
        for input in [
            (0.0, 4.0, 30),
            (1.0e8, 0.0, 30),
            (1.0e8, -1.0, 30),
            (1.0e8, 4.0, 0),
        ] {
            let (principal, annual_rate_percent, term_years) = input;
            let input = LoanInput {
                principal,
                annual_rate_percent,
                term_years,
            };
            assert_eq!(compute_amortization(&input), zeroed);
        }
    }

    #[test]
    fn tiny_rate_approaches_straight_division() {
        let result = compute_amortization(&LoanInput {
            principal: 120_000_000.0,
            annual_rate_percent: 0.000_000_1,
            term_years: 30,
        });
        assert!((result.monthly_payment - 120_000_000.0 / 360.0).abs() <= 1.0);
    }

    #[test]
    fn very_long_term_does_not_overflow_month_count() {
        let result = compute_amortization(&LoanInput {
            principal: 100_000_000.0,
            annual_rate_percent: 4.5,
            term_years: 400_000_000,
        });
        // an effectively endless term pays interest only
        assert_eq!(result.monthly_payment, 375_000.0);
        assert!(result.total_interest.is_finite());
        assert!(result.total_interest > 0.0);
    }
}
