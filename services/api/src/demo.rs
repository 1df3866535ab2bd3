use crate::infra::{currency, load_acquisition_inputs, load_voucher_table, parse_strategy,
    parse_tier, percent};
use clap::Args;
use dealscope::error::AppError;
use dealscope::rehab::{
    capital_needed, estimate_cost, score_condition, BathroomAssessment, ComponentCondition,
    DefectFlags, ElectricalAssessment, ExteriorAssessment, FinishCondition, InteriorAssessment,
    KitchenAssessment, OverallCondition, PipeMaterial, PlumbingAssessment,
    PropertyConditionAssessment, RehabEstimateResult, RehabTier, SystemsAssessment,
};
use dealscope::underwriting::{
    max_offer_for_dscr, project_strategy, AcquisitionInputs, AssumptionsUpdate,
    GlobalAssumptions, LoanTerms, Strategy, StrategyResults, UnitDetail,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Path to a JSON file describing the acquisition inputs
    #[arg(long)]
    pub(crate) inputs: PathBuf,
    /// Underwrite a single strategy (ltr, voucher, short_term); default all
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<Strategy>,
    /// Optional CSV of voucher payment standards
    #[arg(long)]
    pub(crate) voucher_table: Option<PathBuf>,
    /// Print the full 30-year series instead of milestone years
    #[arg(long)]
    pub(crate) series: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MaxOfferArgs {
    /// Path to a JSON file describing the acquisition inputs
    #[arg(long)]
    pub(crate) inputs: PathBuf,
    /// Strategy to solve under (ltr, voucher, short_term)
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Strategy,
    /// Target debt service coverage ratio, e.g. 1.25
    #[arg(long)]
    pub(crate) target_dscr: f64,
    /// Optional CSV of voucher payment standards
    #[arg(long)]
    pub(crate) voucher_table: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file with the structured condition assessment
    #[arg(long)]
    pub(crate) assessment: PathBuf,
    /// Total building square footage
    #[arg(long)]
    pub(crate) sqft: u32,
    /// Number of units in the building
    #[arg(long)]
    pub(crate) units: u32,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Total building square footage
    #[arg(long)]
    pub(crate) sqft: u32,
    /// Number of units in the building
    #[arg(long)]
    pub(crate) units: u32,
    /// Rehab tier (light, lite_plus, medium, heavy, full_gut)
    #[arg(long, value_parser = parse_tier)]
    pub(crate) tier: RehabTier,
}

#[derive(Args, Debug)]
pub(crate) struct CapitalArgs {
    /// Hard rehab cost financed by the bridge loan
    #[arg(long)]
    pub(crate) hard_cost: f64,
    /// Origination points on the hard-cost loan, percent
    #[arg(long, default_value_t = 2.0)]
    pub(crate) entry_points: f64,
    /// Annual bridge rate, percent
    #[arg(long, default_value_t = 12.0)]
    pub(crate) rate: f64,
    /// Rehab duration in months
    #[arg(long, default_value_t = 6)]
    pub(crate) months: u32,
    /// Exit points on the hard-cost loan, percent
    #[arg(long, default_value_t = 1.0)]
    pub(crate) exit_points: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full 30-year series for each strategy
    #[arg(long)]
    pub(crate) series: bool,
}

fn assumptions_with_table(voucher_table: Option<PathBuf>) -> Result<GlobalAssumptions, AppError> {
    let mut assumptions = GlobalAssumptions::standard();
    if let Some(path) = voucher_table {
        let table = load_voucher_table(&path)?;
        assumptions.apply(AssumptionsUpdate {
            voucher_rents: Some(table),
            ..AssumptionsUpdate::default()
        });
    }
    Ok(assumptions)
}

pub(crate) fn run_project(args: ProjectArgs) -> Result<(), AppError> {
    let ProjectArgs {
        inputs,
        strategy,
        voucher_table,
        series,
    } = args;

    let inputs = load_acquisition_inputs(&inputs)?;
    let assumptions = assumptions_with_table(voucher_table)?;

    let strategies = match strategy {
        Some(strategy) => vec![strategy],
        None => Strategy::ordered().to_vec(),
    };

    println!("Underwriting {}", inputs.address);
    println!(
        "Purchase {} | {} unit(s) | {} sqft",
        currency(inputs.purchase_price),
        inputs.unit_count,
        inputs.total_sqft
    );

    for strategy in strategies {
        let results = project_strategy(strategy, &inputs, &assumptions)?;
        render_strategy(&results, series);
    }

    Ok(())
}

pub(crate) fn run_max_offer(args: MaxOfferArgs) -> Result<(), AppError> {
    let MaxOfferArgs {
        inputs,
        strategy,
        target_dscr,
        voucher_table,
    } = args;

    let inputs = load_acquisition_inputs(&inputs)?;
    let assumptions = assumptions_with_table(voucher_table)?;

    match max_offer_for_dscr(strategy, &inputs, &assumptions, target_dscr)? {
        Some(offer) => println!(
            "Maximum offer under {} at DSCR {:.2}: {}",
            strategy.label(),
            target_dscr,
            currency(offer)
        ),
        None => println!(
            "No financed offer meets DSCR {:.2} under {} (all-cash terms have no DSCR)",
            target_dscr,
            strategy.label()
        ),
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        assessment,
        sqft,
        units,
    } = args;

    let file = std::fs::File::open(&assessment)?;
    let assessment: PropertyConditionAssessment = serde_json::from_reader(file).map_err(|err| {
        AppError::InvalidRequest(format!("failed to parse condition assessment: {err}"))
    })?;

    let result = score_condition(&assessment, sqft, units);
    render_rehab_estimate(&result);
    Ok(())
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs { sqft, units, tier } = args;
    let cost = estimate_cost(sqft, units, tier);
    println!(
        "{} rehab on {} sqft ({} unit(s)): {}",
        tier.label(),
        sqft,
        units,
        currency(cost)
    );
    Ok(())
}

pub(crate) fn run_capital(args: CapitalArgs) -> Result<(), AppError> {
    let CapitalArgs {
        hard_cost,
        entry_points,
        rate,
        months,
        exit_points,
    } = args;

    let stack = capital_needed(hard_cost, entry_points, rate, months, exit_points);
    println!("Capital stack for {} of rehab", currency(stack.hard_costs));
    println!("- Entry points: {}", currency(stack.entry_points));
    println!(
        "- Carry interest ({months} months at {rate}%): {}",
        currency(stack.interest)
    );
    println!("- Exit points: {}", currency(stack.exit_points));
    println!("Total capital required: {}", currency(stack.total));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let inputs = demo_duplex();
    let assumptions = GlobalAssumptions::standard();

    println!("Deal underwriting demo");
    println!(
        "Subject: {} ({} units, {} sqft, asking {})",
        inputs.address,
        inputs.unit_count,
        inputs.total_sqft,
        currency(inputs.purchase_price)
    );

    for strategy in Strategy::ordered() {
        let results = project_strategy(strategy, &inputs, &assumptions)?;
        render_strategy(&results, args.series);
    }

    let assessment = demo_assessment();
    let estimate = score_condition(&assessment, inputs.total_sqft, inputs.unit_count);
    println!("\nWalkthrough scoring");
    render_rehab_estimate(&estimate);

    let stack = capital_needed(estimate.estimated_cost, 2.0, 12.0, 6, 1.0);
    println!(
        "\nBridge capital to execute the {} budget: {}",
        estimate.suggested_tier.label(),
        currency(stack.total)
    );

    Ok(())
}

fn render_strategy(results: &StrategyResults, series: bool) {
    let year_one = &results.year_one;

    println!("\n{}", results.strategy.label());
    println!(
        "- Gross income {} | vacancy {} | expenses {}",
        currency(year_one.gross_income),
        currency(year_one.vacancy_loss),
        currency(year_one.operating_expenses)
    );
    println!(
        "- NOI {} | debt service {} | cash flow {}",
        currency(year_one.noi),
        currency(year_one.debt_service),
        currency(year_one.cash_flow)
    );
    println!(
        "- Cap rate {} | DSCR {} | cash-on-cash {} | cash invested {}",
        year_one
            .cap_rate
            .map(percent)
            .unwrap_or_else(|| "n/a".to_string()),
        year_one
            .dscr
            .map(|dscr| format!("{dscr:.2}"))
            .unwrap_or_else(|| "n/a (all cash)".to_string()),
        year_one
            .cash_on_cash
            .map(percent)
            .unwrap_or_else(|| "n/a".to_string()),
        currency(results.cash_invested)
    );

    let milestone_years = [1, 5, 10, 20, 30];
    println!("  Year | Cash Flow | Equity | Value | Cum. Return");
    for year in &results.projections {
        if !series && !milestone_years.contains(&year.year) {
            continue;
        }
        println!(
            "  {:>4} | {:>9} | {:>6} | {:>5} | {:>11}",
            year.year,
            currency(year.cash_flow),
            currency(year.equity),
            currency(year.property_value),
            currency(year.cumulative_return)
        );
    }
}

fn render_rehab_estimate(result: &RehabEstimateResult) {
    println!(
        "Condition score {}/100 -> {} budget, estimated {}",
        result.condition_score,
        result.suggested_tier.label(),
        currency(result.estimated_cost)
    );

    if result.major_issues.is_empty() {
        println!("Major issues: none");
    } else {
        println!("Major issues");
        for issue in &result.major_issues {
            println!("- {issue}");
        }
    }

    if let Some(shares) = result.breakdown.normalized() {
        println!(
            "Work mix: structural {}, systems {}, interior {}, exterior {}",
            percent(shares.structural),
            percent(shares.systems),
            percent(shares.interior),
            percent(shares.exterior)
        );
    }
}

fn demo_duplex() -> AcquisitionInputs {
    AcquisitionInputs {
        address: "812 E 14th St, Des Moines, IA".to_string(),
        zip: "50309".to_string(),
        unit_count: 2,
        units: vec![
            UnitDetail {
                beds: 2,
                baths: 1.0,
                sqft: 840,
                market_rent: 1_050.0,
                voucher_rent: None,
                str_annual_revenue: Some(27_500.0),
                str_annual_expenses: Some(5_600.0),
            },
            UnitDetail {
                beds: 3,
                baths: 1.0,
                sqft: 840,
                market_rent: 1_250.0,
                voucher_rent: None,
                str_annual_revenue: Some(31_000.0),
                str_annual_expenses: Some(6_100.0),
            },
        ],
        total_sqft: 1_680,
        year_built: Some(1948),
        purchase_price: 210_000.0,
        acquisition_cost_percent: 3.0,
        setup_cost: 6_000.0,
        loan: LoanTerms {
            rate_percent: 7.0,
            term_years: 30,
            down_payment_percent: 20.0,
        },
        rehab: None,
    }
}

fn demo_assessment() -> PropertyConditionAssessment {
    PropertyConditionAssessment {
        overall: OverallCondition::Dated,
        systems: SystemsAssessment {
            roof: ComponentCondition::Fair,
            foundation: ComponentCondition::Good,
            hvac: ComponentCondition::Fair,
            plumbing: PlumbingAssessment {
                condition: ComponentCondition::Fair,
                pipe_material: PipeMaterial::Galvanized,
                active_leaks: false,
            },
            electrical: ElectricalAssessment {
                condition: ComponentCondition::Good,
                unsafe_wiring: false,
            },
        },
        exterior: ExteriorAssessment {
            siding: ComponentCondition::Fair,
            windows: ComponentCondition::Fair,
            doors: ComponentCondition::Good,
            gutters: ComponentCondition::Poor,
            landscaping: ComponentCondition::Good,
            driveway: ComponentCondition::Fair,
            fencing: ComponentCondition::Good,
        },
        interior: InteriorAssessment {
            kitchen: KitchenAssessment {
                condition: FinishCondition::Dated,
                cabinets: Some(FinishCondition::Dated),
                countertops: Some(FinishCondition::Fair),
                appliances: Some(FinishCondition::Good),
            },
            bathrooms: vec![
                BathroomAssessment {
                    condition: FinishCondition::Dated,
                    fixtures: Some(FinishCondition::Dated),
                    tile: None,
                },
                BathroomAssessment {
                    condition: FinishCondition::Fair,
                    fixtures: None,
                    tile: Some(FinishCondition::Fair),
                },
            ],
            bedrooms: vec![
                FinishCondition::Fair,
                FinishCondition::Good,
                FinishCondition::Dated,
                FinishCondition::Fair,
            ],
            general: FinishCondition::Dated,
        },
        defects: DefectFlags::default(),
        pool: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_duplex_projects_under_every_strategy() {
        let inputs = demo_duplex();
        let assumptions = GlobalAssumptions::standard();
        for strategy in Strategy::ordered() {
            let results = project_strategy(strategy, &inputs, &assumptions)
                .expect("demo inputs underwrite cleanly");
            assert_eq!(results.projections.len(), 30);
        }
    }

    #[test]
    fn demo_assessment_lands_in_a_renovation_tier() {
        let result = score_condition(&demo_assessment(), 1_680, 2);
        assert!(result.condition_score > 15);
        assert!(!result.major_issues.is_empty());
    }
}
