use crate::underwriting::assumptions::GlobalAssumptions;
use crate::underwriting::domain::{AcquisitionInputs, Strategy};
use tracing::debug;

/// Strategy-resolved income figures feeding the year-one summary and the
/// yearly series.
pub(crate) struct IncomeModel {
    /// Gross monthly income across all units.
    pub(crate) gross_monthly: f64,
    /// Vacant months per year charged against gross income. Zero for
    /// short-term, whose revenue figures already net vacancy out.
    pub(crate) vacancy_months: f64,
    /// Year-one strategy-specific operating costs (annual).
    pub(crate) operating_annual: f64,
}

pub(crate) fn resolve(
    strategy: Strategy,
    inputs: &AcquisitionInputs,
    assumptions: &GlobalAssumptions,
) -> IncomeModel {
    match strategy {
        Strategy::LongTermRental => IncomeModel {
            gross_monthly: inputs.units.iter().map(|unit| unit.market_rent).sum(),
            vacancy_months: assumptions.vacancy_months_long_term,
            operating_annual: 0.0,
        },
        Strategy::VoucherRental => IncomeModel {
            gross_monthly: inputs
                .units
                .iter()
                .map(|unit| voucher_rent(inputs, assumptions, unit))
                .sum(),
            vacancy_months: assumptions.vacancy_months_voucher,
            operating_annual: 0.0,
        },
        Strategy::ShortTermRental => {
            let gross_annual: f64 = inputs
                .units
                .iter()
                .map(|unit| {
                    unit.str_annual_revenue.unwrap_or_else(|| {
                        debug!(
                            zip = %inputs.zip,
                            "unit missing short-term revenue figure, assuming market rent"
                        );
                        unit.market_rent * 12.0
                    })
                })
                .sum();
            let operating_annual = inputs
                .units
                .iter()
                .map(|unit| unit.str_annual_expenses.unwrap_or(0.0))
                .sum();

            IncomeModel {
                gross_monthly: gross_annual / 12.0,
                vacancy_months: 0.0,
                operating_annual,
            }
        }
    }
}

/// Monthly voucher rent for one unit: explicit override, else the payment
/// standard for the ZIP and bedroom count, else a multiplier over market
/// rent when the ZIP has no table entry.
fn voucher_rent(
    inputs: &AcquisitionInputs,
    assumptions: &GlobalAssumptions,
    unit: &crate::underwriting::domain::UnitDetail,
) -> f64 {
    if let Some(rent) = unit.voucher_rent {
        return rent;
    }

    match assumptions.voucher_rents.ceiling(&inputs.zip, unit.beds) {
        Some(ceiling) => ceiling,
        None => {
            debug!(
                zip = %inputs.zip,
                beds = unit.beds,
                multiplier = assumptions.voucher_market_multiplier,
                "no payment standard for ZIP, falling back to market multiplier"
            );
            unit.market_rent * assumptions.voucher_market_multiplier
        }
    }
}
