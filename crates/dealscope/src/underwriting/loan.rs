//! Fixed-rate, fixed-term amortization. Pure functions, no state.

/// Monthly payment for a fully amortizing loan using the standard
/// fixed-payment formula. A zero rate degrades to linear amortization.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let months = f64::from(term_years * 12);
    if annual_rate_percent == 0.0 {
        return principal / months;
    }

    let rate = annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + rate).powf(months);
    principal * rate * growth / (growth - 1.0)
}

/// Principal balance remaining after `months_elapsed` scheduled payments.
/// Months past maturity clamp to the term; the result never goes negative.
pub fn remaining_balance(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    months_elapsed: u32,
) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let total_months = term_years * 12;
    let elapsed = f64::from(months_elapsed.min(total_months));

    if annual_rate_percent == 0.0 {
        let payment = monthly_payment(principal, annual_rate_percent, term_years);
        return (principal - payment * elapsed).max(0.0);
    }

    let rate = annual_rate_percent / 100.0 / 12.0;
    let payment = monthly_payment(principal, annual_rate_percent, term_years);
    let growth = (1.0 + rate).powf(elapsed);
    (principal * growth - payment * (growth - 1.0) / rate).max(0.0)
}

/// Twelve scheduled payments.
pub fn annual_debt_service(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    12.0 * monthly_payment(principal, annual_rate_percent, term_years)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_thirty_year_payment_matches_published_figure() {
        // $200,000 at 7% over 30 years amortizes at $1,330.60/mo.
        let payment = monthly_payment(200_000.0, 7.0, 30);
        assert!((payment - 1_330.60).abs() < 0.01, "payment {payment}");
    }

    #[test]
    fn balance_reaches_zero_at_maturity() {
        let balance = remaining_balance(200_000.0, 7.0, 30, 360);
        assert!(balance.abs() < 1.0, "terminal balance {balance}");
    }

    #[test]
    fn balance_is_non_increasing() {
        let mut previous = remaining_balance(250_000.0, 6.25, 30, 0);
        for year in 1..=30 {
            let current = remaining_balance(250_000.0, 6.25, 30, year * 12);
            assert!(
                current <= previous + 1e-9,
                "balance rose in year {year}: {previous} -> {current}"
            );
            previous = current;
        }
    }

    #[test]
    fn zero_rate_amortizes_linearly() {
        let payment = monthly_payment(120_000.0, 0.0, 10);
        assert!((payment - 1_000.0).abs() < 1e-9);
        let halfway = remaining_balance(120_000.0, 0.0, 10, 60);
        assert!((halfway - 60_000.0).abs() < 1e-9);
    }

    #[test]
    fn months_past_maturity_clamp_to_zero_balance() {
        let balance = remaining_balance(180_000.0, 5.5, 15, 15 * 12 + 48);
        assert!(balance.abs() < 1.0);
    }

    #[test]
    fn zero_principal_costs_nothing() {
        assert_eq!(monthly_payment(0.0, 7.0, 30), 0.0);
        assert_eq!(remaining_balance(0.0, 7.0, 30, 120), 0.0);
        assert_eq!(annual_debt_service(0.0, 7.0, 30), 0.0);
    }
}
