pub mod assessment;
pub mod estimator;
mod scorer;

pub use assessment::{
    BathroomAssessment, ComponentCondition, DefectFlags, ElectricalAssessment,
    ExteriorAssessment, FinishCondition, InteriorAssessment, KitchenAssessment, OverallCondition,
    PipeMaterial, PlumbingAssessment, PoolAssessment, PropertyConditionAssessment,
    SystemsAssessment,
};
pub use estimator::{
    capital_needed, estimate_cost, CapitalBreakdown, RehabTier, UnitBucket, BASE_RATE_PER_SQFT,
};
pub use scorer::CostBreakdown;

use serde::{Deserialize, Serialize};

/// Condition-to-cost result: severity score, suggested tier, the cost the
/// tier implies for the building, and the flags that drove it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabEstimateResult {
    pub estimated_cost: f64,
    pub suggested_tier: RehabTier,
    pub condition_score: u8,
    /// Human-readable flags, in the order the scorer encountered them.
    pub major_issues: Vec<String>,
    pub breakdown: CostBreakdown,
}

/// Scores a structured condition assessment and prices the suggested
/// tier for the given building. Pure and deterministic.
pub fn score_condition(
    assessment: &PropertyConditionAssessment,
    sqft: u32,
    unit_count: u32,
) -> RehabEstimateResult {
    let scored = scorer::score(assessment, unit_count);
    let suggested_tier = RehabTier::from_score(scored.score);

    RehabEstimateResult {
        estimated_cost: estimate_cost(sqft, unit_count, suggested_tier),
        suggested_tier,
        condition_score: scored.score,
        major_issues: scored.major_issues,
        breakdown: scored.breakdown,
    }
}
