mod income;

use super::assumptions::GlobalAssumptions;
use super::domain::{AcquisitionInputs, RehabExit, Strategy, ValidationError};
use super::loan;
use crate::rehab::estimator;
use serde::{Deserialize, Serialize};

/// Horizon of the yearly series.
pub const PROJECTION_YEARS: u32 = 30;

/// First-year operating summary with the lender-facing ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOneSummary {
    pub gross_income: f64,
    pub vacancy_loss: f64,
    pub operating_expenses: f64,
    pub noi: f64,
    pub debt_service: f64,
    pub cash_flow: f64,
    /// `None` when the ratio is undefined; serialized as JSON null.
    pub cap_rate: Option<f64>,
    /// `None` for all-cash purchases (no debt service to cover).
    pub dscr: Option<f64>,
    /// `None` when no cash was left in the deal.
    pub cash_on_cash: Option<f64>,
}

/// One modeled year of the hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,
    pub gross_income: f64,
    pub noi: f64,
    pub debt_service: f64,
    pub cash_flow: f64,
    pub appreciation: f64,
    pub property_value: f64,
    pub equity: f64,
    pub loan_balance: f64,
    pub annual_return: f64,
    pub cumulative_cash_flow: f64,
    pub cumulative_return: f64,
}

/// Full underwriting result for one strategy. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResults {
    pub strategy: Strategy,
    pub cash_invested: f64,
    pub year_one: YearOneSummary,
    pub projections: Vec<YearProjection>,
}

/// Permanent financing and cash position after resolving the rehab path.
struct Financing {
    principal: f64,
    rate_percent: f64,
    term_years: u32,
    /// Year-zero property value: purchase price, or ARV once rehab completes.
    value_basis: f64,
    cash_invested: f64,
}

impl Financing {
    fn resolve(inputs: &AcquisitionInputs) -> Self {
        let purchase_principal = inputs.purchase_principal();
        let down_payment = inputs.purchase_price - purchase_principal;
        let acquisition_costs =
            inputs.purchase_price * inputs.acquisition_cost_percent / 100.0;

        let mut principal = purchase_principal;
        let mut rate_percent = inputs.loan.rate_percent;
        let term_years = inputs.loan.term_years;
        let mut value_basis = inputs.purchase_price;
        let mut rehab_capital = 0.0;
        let mut refinance_cash_out = 0.0;

        if let Some(rehab) = &inputs.rehab {
            rehab_capital = estimator::capital_needed(
                rehab.budget,
                rehab.entry_points_percent,
                rehab.financing_rate_percent,
                rehab.duration_months,
                rehab.exit_points_percent,
            )
            .total;
            value_basis = rehab.after_repair_value;

            if let RehabExit::RefinanceAndHold {
                ltv_percent,
                rate_percent: refinance_rate,
            } = rehab.exit
            {
                let refinance_principal = rehab.after_repair_value * ltv_percent / 100.0;
                refinance_cash_out = (refinance_principal - purchase_principal).max(0.0);
                principal = refinance_principal;
                rate_percent = refinance_rate;
            }
        }

        let cash_invested = (down_payment + acquisition_costs + rehab_capital
            + inputs.setup_cost
            - refinance_cash_out)
            .max(0.0);

        Self {
            principal,
            rate_percent,
            term_years,
            value_basis,
            cash_invested,
        }
    }
}

/// Guarded ratio: `None` instead of dividing by (near) zero.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs() < 1e-9 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Underwrites one strategy: validates inputs, resolves the income model
/// and financing, then produces the year-one summary and the 30-year
/// series. Pure and deterministic; safe to call concurrently.
pub fn project_strategy(
    strategy: Strategy,
    inputs: &AcquisitionInputs,
    assumptions: &GlobalAssumptions,
) -> Result<StrategyResults, ValidationError> {
    inputs.validate()?;

    let model = income::resolve(strategy, inputs, assumptions);
    let financing = Financing::resolve(inputs);

    let gross_income = model.gross_monthly * 12.0;
    let vacancy_fraction = model.vacancy_months / 12.0;
    let property_tax = financing.value_basis * assumptions.property_tax_percent / 100.0;
    let insurance = assumptions.insurance_annual_per_unit * f64::from(inputs.unit_count);
    let fixed_costs = property_tax + insurance + model.operating_annual;
    let maintenance_rate = assumptions.maintenance_percent / 100.0;

    let debt_service = if financing.principal > 0.0 {
        loan::annual_debt_service(
            financing.principal,
            financing.rate_percent,
            financing.term_years,
        )
    } else {
        0.0
    };

    let vacancy_loss = gross_income * vacancy_fraction;
    let operating_expenses = fixed_costs + gross_income * maintenance_rate;
    let noi = gross_income - vacancy_loss - operating_expenses;
    let cash_flow = noi - debt_service;

    let year_one = YearOneSummary {
        gross_income,
        vacancy_loss,
        operating_expenses,
        noi,
        debt_service,
        cash_flow,
        cap_rate: ratio(noi, inputs.purchase_price),
        dscr: ratio(noi, debt_service),
        cash_on_cash: ratio(cash_flow, financing.cash_invested),
    };

    let rent_growth = 1.0 + assumptions.rent_growth_percent / 100.0;
    let expense_growth = 1.0 + assumptions.expense_growth_percent / 100.0;
    let appreciation_growth = 1.0 + assumptions.appreciation_percent / 100.0;

    let mut projections = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut previous_value = financing.value_basis;
    let mut cumulative_cash_flow = 0.0;
    let mut cumulative_return = 0.0;

    for year in 1..=PROJECTION_YEARS {
        let compounding = f64::from(year - 1);
        let gross_year = gross_income * rent_growth.powf(compounding);
        let vacancy_year = gross_year * vacancy_fraction;
        let expenses_year =
            fixed_costs * expense_growth.powf(compounding) + gross_year * maintenance_rate;
        let noi_year = gross_year - vacancy_year - expenses_year;
        let cash_flow_year = noi_year - debt_service;

        let property_value = financing.value_basis * appreciation_growth.powf(f64::from(year));
        let appreciation = property_value - previous_value;
        let loan_balance = loan::remaining_balance(
            financing.principal,
            financing.rate_percent,
            financing.term_years,
            year * 12,
        );
        let equity = property_value - loan_balance;
        let annual_return = cash_flow_year + appreciation;

        cumulative_cash_flow += cash_flow_year;
        cumulative_return += annual_return;

        projections.push(YearProjection {
            year,
            gross_income: gross_year,
            noi: noi_year,
            debt_service,
            cash_flow: cash_flow_year,
            appreciation,
            property_value,
            equity,
            loan_balance,
            annual_return,
            cumulative_cash_flow,
            cumulative_return,
        });

        previous_value = property_value;
    }

    Ok(StrategyResults {
        strategy,
        cash_invested: financing.cash_invested,
        year_one,
        projections,
    })
}
