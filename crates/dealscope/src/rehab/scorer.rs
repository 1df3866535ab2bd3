use super::assessment::{
    BathroomAssessment, ComponentCondition, DefectFlags, ExteriorAssessment, FinishCondition,
    InteriorAssessment, KitchenAssessment, OverallCondition, PipeMaterial, PoolAssessment,
    PropertyConditionAssessment, SystemsAssessment,
};
use serde::{Deserialize, Serialize};

const SYSTEMS_CAP: f64 = 35.0;
const EXTERIOR_CAP: f64 = 15.0;
const INTERIOR_CAP: f64 = 15.0;
const BEDROOM_CAP: f64 = 2.0;
const POOL_CAP: f64 = 5.0;
const DEFECT_POINTS: f64 = 10.0;

// Fixed dollar weights per point, used only for the relative breakdown.
const STRUCTURAL_WEIGHT: f64 = 850.0;
const SYSTEMS_WEIGHT: f64 = 600.0;
const INTERIOR_WEIGHT: f64 = 450.0;
const EXTERIOR_WEIGHT: f64 = 350.0;

/// Relative dollar weights per work category. These are severity weights
/// for proportion display; they do not sum to the cost estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub structural: f64,
    pub systems: f64,
    pub interior: f64,
    pub exterior: f64,
}

impl CostBreakdown {
    pub fn total_weight(&self) -> f64 {
        self.structural + self.systems + self.interior + self.exterior
    }

    /// Scales the weights to sum to 1.0 for display. `None` when no
    /// category accumulated any weight.
    pub fn normalized(&self) -> Option<CostBreakdown> {
        let total = self.total_weight();
        if total <= 0.0 {
            return None;
        }
        Some(CostBreakdown {
            structural: self.structural / total,
            systems: self.systems / total,
            interior: self.interior / total,
            exterior: self.exterior / total,
        })
    }
}

/// Severity output of the scoring pass, before any cost estimation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConditionScore {
    pub(crate) score: u8,
    pub(crate) major_issues: Vec<String>,
    pub(crate) breakdown: CostBreakdown,
}

/// Additive point system over weighted categories. Conditions already
/// acceptable contribute zero; the total clamps to [0, 100].
pub(crate) fn score(assessment: &PropertyConditionAssessment, unit_count: u32) -> ConditionScore {
    let mut issues = Vec::new();
    let mut breakdown = CostBreakdown::default();

    let overall = overall_points(assessment.overall);
    if matches!(
        assessment.overall,
        OverallCondition::NeedsWork | OverallCondition::Distressed
    ) {
        issues.push(format!(
            "Overall condition rated {}",
            assessment.overall.label()
        ));
    }

    let systems = score_systems(&assessment.systems, unit_count, &mut issues, &mut breakdown);
    let exterior = score_exterior(&assessment.exterior, &mut issues, &mut breakdown);
    let interior = score_interior(&assessment.interior, &mut issues, &mut breakdown);
    let defects = score_defects(&assessment.defects, &mut issues, &mut breakdown);
    let pool = assessment
        .pool
        .as_ref()
        .map(|pool| score_pool(pool, &mut issues, &mut breakdown))
        .unwrap_or(0.0);

    let total = overall + systems + exterior + interior + defects + pool;
    let score = total.clamp(0.0, 100.0).round() as u8;

    ConditionScore {
        score,
        major_issues: issues,
        breakdown,
    }
}

const fn overall_points(condition: OverallCondition) -> f64 {
    match condition {
        OverallCondition::MoveInReady => 0.0,
        OverallCondition::LightlyWorn => 6.0,
        OverallCondition::Dated => 12.0,
        OverallCondition::NeedsWork => 18.0,
        OverallCondition::Distressed => 25.0,
    }
}

const fn roof_points(condition: ComponentCondition) -> f64 {
    match condition {
        ComponentCondition::New | ComponentCondition::Good => 0.0,
        ComponentCondition::Fair => 3.0,
        ComponentCondition::Poor => 7.0,
        ComponentCondition::NeedsReplacement => 10.0,
    }
}

const fn foundation_points(condition: ComponentCondition) -> f64 {
    match condition {
        ComponentCondition::New | ComponentCondition::Good => 0.0,
        ComponentCondition::Fair => 4.0,
        ComponentCondition::Poor => 8.0,
        ComponentCondition::NeedsReplacement => 12.0,
    }
}

const fn system_points(condition: ComponentCondition) -> f64 {
    match condition {
        ComponentCondition::New | ComponentCondition::Good => 0.0,
        ComponentCondition::Fair => 3.0,
        ComponentCondition::Poor => 6.0,
        ComponentCondition::NeedsReplacement => 8.0,
    }
}

const fn exterior_points(condition: ComponentCondition) -> f64 {
    match condition {
        ComponentCondition::New | ComponentCondition::Good => 0.0,
        ComponentCondition::Fair => 1.0,
        ComponentCondition::Poor => 2.0,
        ComponentCondition::NeedsReplacement => 3.0,
    }
}

const fn pipe_material_points(material: PipeMaterial) -> f64 {
    match material {
        PipeMaterial::Copper | PipeMaterial::Pex | PipeMaterial::Unknown => 0.0,
        PipeMaterial::CastIron => 1.0,
        PipeMaterial::Galvanized | PipeMaterial::PolyButylene => 2.0,
    }
}

const fn kitchen_points(condition: FinishCondition) -> f64 {
    match condition {
        FinishCondition::Excellent | FinishCondition::Good => 0.0,
        FinishCondition::Fair => 2.0,
        FinishCondition::Dated => 3.0,
        FinishCondition::Damaged => 5.0,
    }
}

const fn bathroom_points(condition: FinishCondition) -> f64 {
    match condition {
        FinishCondition::Excellent | FinishCondition::Good => 0.0,
        FinishCondition::Fair => 1.0,
        FinishCondition::Dated => 2.0,
        FinishCondition::Damaged => 4.0,
    }
}

const fn detail_points(condition: FinishCondition) -> f64 {
    match condition {
        FinishCondition::Excellent | FinishCondition::Good => 0.0,
        FinishCondition::Fair | FinishCondition::Dated => 1.0,
        FinishCondition::Damaged => 2.0,
    }
}

const fn bedroom_points(condition: FinishCondition) -> f64 {
    match condition {
        FinishCondition::Excellent | FinishCondition::Good => 0.0,
        FinishCondition::Fair => 1.0,
        FinishCondition::Dated => 2.0,
        FinishCondition::Damaged => 3.0,
    }
}

const fn general_points(condition: FinishCondition) -> f64 {
    match condition {
        FinishCondition::Excellent | FinishCondition::Good => 0.0,
        FinishCondition::Fair => 1.0,
        FinishCondition::Dated => 2.0,
        FinishCondition::Damaged => 4.0,
    }
}

const fn pool_condition_points(condition: ComponentCondition) -> f64 {
    match condition {
        ComponentCondition::New | ComponentCondition::Good => 0.0,
        ComponentCondition::Fair => 2.0,
        ComponentCondition::Poor => 3.0,
        ComponentCondition::NeedsReplacement => 4.0,
    }
}

const fn pool_equipment_points(condition: ComponentCondition) -> f64 {
    match condition {
        ComponentCondition::New | ComponentCondition::Good => 0.0,
        ComponentCondition::Fair => 1.0,
        ComponentCondition::Poor | ComponentCondition::NeedsReplacement => 2.0,
    }
}

fn component_issue(name: &str, condition: ComponentCondition) -> Option<String> {
    match condition {
        ComponentCondition::Poor => Some(format!("{name} in poor condition")),
        ComponentCondition::NeedsReplacement => Some(format!("{name} needs replacement")),
        _ => None,
    }
}

fn score_systems(
    systems: &SystemsAssessment,
    unit_count: u32,
    issues: &mut Vec<String>,
    breakdown: &mut CostBreakdown,
) -> f64 {
    let roof = roof_points(systems.roof);
    if let Some(issue) = component_issue("Roof", systems.roof) {
        issues.push(issue);
    }

    let foundation = foundation_points(systems.foundation);
    if let Some(issue) = component_issue("Foundation", systems.foundation) {
        issues.push(issue);
    }

    // Multi-unit buildings carry one system per unit, so HVAC findings
    // scale up to the quad bucket.
    let hvac_factor = 1.0 + 0.25 * f64::from(unit_count.clamp(1, 4) - 1);
    let hvac = system_points(systems.hvac) * hvac_factor;
    if let Some(issue) = component_issue("HVAC", systems.hvac) {
        issues.push(issue);
    }

    let mut plumbing = system_points(systems.plumbing.condition);
    if let Some(issue) = component_issue("Plumbing", systems.plumbing.condition) {
        issues.push(issue);
    }
    if systems.plumbing.active_leaks {
        plumbing += 2.0;
        issues.push("Active plumbing leaks".to_string());
    }
    let pipe_penalty = pipe_material_points(systems.plumbing.pipe_material);
    if pipe_penalty > 0.0 {
        plumbing += pipe_penalty;
        issues.push(format!(
            "{} supply piping",
            systems.plumbing.pipe_material.label()
        ));
    }

    let mut electrical = system_points(systems.electrical.condition);
    if let Some(issue) = component_issue("Electrical", systems.electrical.condition) {
        issues.push(issue);
    }
    if systems.electrical.unsafe_wiring {
        electrical += 3.0;
        issues.push("Unsafe wiring observed".to_string());
    }

    breakdown.structural += foundation * STRUCTURAL_WEIGHT;
    breakdown.systems += (roof + hvac + plumbing + electrical) * SYSTEMS_WEIGHT;

    (roof + foundation + hvac + plumbing + electrical).min(SYSTEMS_CAP)
}

fn score_exterior(
    exterior: &ExteriorAssessment,
    issues: &mut Vec<String>,
    breakdown: &mut CostBreakdown,
) -> f64 {
    let items = [
        ("Siding", exterior.siding),
        ("Windows", exterior.windows),
        ("Doors", exterior.doors),
        ("Gutters", exterior.gutters),
        ("Landscaping", exterior.landscaping),
        ("Driveway", exterior.driveway),
        ("Fencing", exterior.fencing),
    ];

    let mut points = 0.0;
    for (name, condition) in items {
        points += exterior_points(condition);
        if let Some(issue) = component_issue(name, condition) {
            issues.push(issue);
        }
    }

    breakdown.exterior += points * EXTERIOR_WEIGHT;
    points.min(EXTERIOR_CAP)
}

fn score_kitchen(kitchen: &KitchenAssessment, issues: &mut Vec<String>) -> f64 {
    let mut points = kitchen_points(kitchen.condition);
    if kitchen.condition == FinishCondition::Damaged {
        issues.push("Kitchen damaged".to_string());
    }

    // Detail sub-fields only count once the kitchen itself needs work;
    // cosmetic detail on an acceptable kitchen is not charged.
    if kitchen.condition.needs_work() {
        for detail in [kitchen.cabinets, kitchen.countertops, kitchen.appliances]
            .into_iter()
            .flatten()
        {
            points += detail_points(detail);
        }
    }

    points
}

fn score_bathroom(bathroom: &BathroomAssessment) -> f64 {
    let mut points = bathroom_points(bathroom.condition);
    if bathroom.condition.needs_work() {
        for detail in [bathroom.fixtures, bathroom.tile].into_iter().flatten() {
            points += detail_points(detail);
        }
    }
    points
}

fn score_interior(
    interior: &InteriorAssessment,
    issues: &mut Vec<String>,
    breakdown: &mut CostBreakdown,
) -> f64 {
    let kitchen = score_kitchen(&interior.kitchen, issues);

    let bathrooms = if interior.bathrooms.is_empty() {
        0.0
    } else {
        let damaged = interior
            .bathrooms
            .iter()
            .filter(|bath| bath.condition == FinishCondition::Damaged)
            .count();
        if damaged > 0 {
            issues.push(format!("{damaged} bathroom(s) damaged"));
        }
        interior.bathrooms.iter().map(score_bathroom).sum::<f64>()
            / interior.bathrooms.len() as f64
    };

    let bedrooms = if interior.bedrooms.is_empty() {
        0.0
    } else {
        let average = interior
            .bedrooms
            .iter()
            .map(|bedroom| bedroom_points(*bedroom))
            .sum::<f64>()
            / interior.bedrooms.len() as f64;
        average.min(BEDROOM_CAP)
    };

    let general = general_points(interior.general);
    if interior.general == FinishCondition::Damaged {
        issues.push("Interior finishes damaged".to_string());
    }

    let points = kitchen + bathrooms + bedrooms + general;
    breakdown.interior += points * INTERIOR_WEIGHT;
    points.min(INTERIOR_CAP)
}

fn score_defects(
    defects: &DefectFlags,
    issues: &mut Vec<String>,
    breakdown: &mut CostBreakdown,
) -> f64 {
    let mut points = 0.0;

    let flags = [
        (defects.mold, "Mold reported"),
        (defects.termites, "Termite damage reported"),
        (defects.water_damage, "Water damage reported"),
        (defects.fire_damage, "Fire damage reported"),
        (defects.structural_issues, "Structural issues reported"),
        (defects.code_violations, "Code violations on record"),
    ];
    for (flagged, message) in flags {
        if flagged {
            points += DEFECT_POINTS;
            issues.push(message.to_string());
        }
    }

    if let Some(note) = &defects.other {
        points += DEFECT_POINTS;
        issues.push(format!("Flagged note: {note}"));
    }

    breakdown.structural += (u8::from(defects.termites)
        + u8::from(defects.water_damage)
        + u8::from(defects.fire_damage)
        + u8::from(defects.structural_issues)) as f64
        * DEFECT_POINTS
        * STRUCTURAL_WEIGHT;
    breakdown.systems +=
        f64::from(u8::from(defects.code_violations)) * DEFECT_POINTS * SYSTEMS_WEIGHT;
    breakdown.interior += (u8::from(defects.mold) + u8::from(defects.other.is_some())) as f64
        * DEFECT_POINTS
        * INTERIOR_WEIGHT;

    points
}

fn score_pool(
    pool: &PoolAssessment,
    issues: &mut Vec<String>,
    breakdown: &mut CostBreakdown,
) -> f64 {
    let points =
        (pool_condition_points(pool.condition) + pool_equipment_points(pool.equipment)).min(POOL_CAP);
    if let Some(issue) = component_issue("Pool", pool.condition) {
        issues.push(issue);
    }

    breakdown.exterior += points * EXTERIOR_WEIGHT;
    points
}
