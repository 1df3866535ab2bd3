use serde::{Deserialize, Serialize};

/// Calibration constant for the square-footage cost model.
pub const BASE_RATE_PER_SQFT: f64 = 35.0;

const ESTIMATE_STEP: f64 = 500.0;

/// Ordered rehab severity tiers driving the cost-per-square-foot factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RehabTier {
    Light,
    LitePlus,
    Medium,
    Heavy,
    FullGut,
}

impl RehabTier {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Light,
            Self::LitePlus,
            Self::Medium,
            Self::Heavy,
            Self::FullGut,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::LitePlus => "Lite+",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
            Self::FullGut => "Full Gut",
        }
    }

    pub const fn cost_factor(self) -> f64 {
        match self {
            Self::Light => 0.50,
            Self::LitePlus => 0.75,
            Self::Medium => 1.00,
            Self::Heavy => 1.35,
            Self::FullGut => 1.80,
        }
    }

    /// Tier suggested for a 0-100 condition score.
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=15 => Self::Light,
            16..=30 => Self::LitePlus,
            31..=50 => Self::Medium,
            51..=70 => Self::Heavy,
            _ => Self::FullGut,
        }
    }
}

/// Unit-count buckets; each additional unit up to quad adds ~5% for the
/// duplicated kitchens, baths, and systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitBucket {
    Single,
    Duplex,
    Triplex,
    Quad,
}

impl UnitBucket {
    pub fn from_unit_count(unit_count: u32) -> Self {
        match unit_count {
            0 | 1 => Self::Single,
            2 => Self::Duplex,
            3 => Self::Triplex,
            _ => Self::Quad,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Family",
            Self::Duplex => "Duplex",
            Self::Triplex => "Triplex",
            Self::Quad => "Quad+",
        }
    }

    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Single => 1.00,
            Self::Duplex => 1.05,
            Self::Triplex => 1.10,
            Self::Quad => 1.15,
        }
    }
}

/// Square-footage cost model, rounded to the nearest $500.
pub fn estimate_cost(sqft: u32, unit_count: u32, tier: RehabTier) -> f64 {
    let bucket = UnitBucket::from_unit_count(unit_count);
    let raw = f64::from(sqft) * BASE_RATE_PER_SQFT * tier.cost_factor() * bucket.multiplier();
    (raw / ESTIMATE_STEP).round() * ESTIMATE_STEP
}

/// Bridge-financing capital stack. Every figure is rounded to whole
/// dollars and `total` is the sum of the rounded figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalBreakdown {
    pub hard_costs: f64,
    pub entry_points: f64,
    pub interest: f64,
    pub exit_points: f64,
    pub total: f64,
}

/// Total capital a bridge-financed rehab consumes: hard costs, origination
/// and exit points on the hard-cost loan, and simple (non-compounding)
/// carry interest over the stated duration.
pub fn capital_needed(
    hard_cost: f64,
    entry_points_percent: f64,
    annual_rate_percent: f64,
    months: u32,
    exit_points_percent: f64,
) -> CapitalBreakdown {
    let hard_costs = hard_cost.round();
    let entry_points = (hard_cost * entry_points_percent / 100.0).round();
    let interest = (hard_cost * annual_rate_percent / 100.0 / 12.0 * f64::from(months)).round();
    let exit_points = (hard_cost * exit_points_percent / 100.0).round();

    CapitalBreakdown {
        hard_costs,
        entry_points,
        interest,
        exit_points,
        total: hard_costs + entry_points + interest + exit_points,
    }
}
