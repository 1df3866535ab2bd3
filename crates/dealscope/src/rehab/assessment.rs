use serde::{Deserialize, Serialize};

/// Whole-property first impression recorded by the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallCondition {
    MoveInReady,
    LightlyWorn,
    Dated,
    NeedsWork,
    Distressed,
}

impl OverallCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MoveInReady => "Move-In Ready",
            Self::LightlyWorn => "Lightly Worn",
            Self::Dated => "Dated",
            Self::NeedsWork => "Needs Work",
            Self::Distressed => "Distressed",
        }
    }
}

/// Condition vocabulary for building components and major systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCondition {
    New,
    Good,
    Fair,
    Poor,
    NeedsReplacement,
}

impl ComponentCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::NeedsReplacement => "Needs Replacement",
        }
    }
}

/// Condition vocabulary for interior finishes and rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishCondition {
    Excellent,
    Good,
    Fair,
    Dated,
    Damaged,
}

impl FinishCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Dated => "Dated",
            Self::Damaged => "Damaged",
        }
    }

    /// Needs-work threshold gating detail sub-field scoring.
    pub const fn needs_work(self) -> bool {
        matches!(self, Self::Fair | Self::Dated | Self::Damaged)
    }
}

/// Supply pipe material observed (or `Unknown`, which contributes zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeMaterial {
    Copper,
    Pex,
    Galvanized,
    PolyButylene,
    CastIron,
    Unknown,
}

impl PipeMaterial {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Copper => "Copper",
            Self::Pex => "PEX",
            Self::Galvanized => "Galvanized",
            Self::PolyButylene => "Polybutylene",
            Self::CastIron => "Cast Iron",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlumbingAssessment {
    pub condition: ComponentCondition,
    #[serde(default = "PlumbingAssessment::unknown_material")]
    pub pipe_material: PipeMaterial,
    #[serde(default)]
    pub active_leaks: bool,
}

impl PlumbingAssessment {
    fn unknown_material() -> PipeMaterial {
        PipeMaterial::Unknown
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalAssessment {
    pub condition: ComponentCondition,
    #[serde(default)]
    pub unsafe_wiring: bool,
}

/// Structural and major-system records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemsAssessment {
    pub roof: ComponentCondition,
    pub foundation: ComponentCondition,
    pub hvac: ComponentCondition,
    pub plumbing: PlumbingAssessment,
    pub electrical: ElectricalAssessment,
}

/// Site and envelope records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExteriorAssessment {
    pub siding: ComponentCondition,
    pub windows: ComponentCondition,
    pub doors: ComponentCondition,
    pub gutters: ComponentCondition,
    pub landscaping: ComponentCondition,
    pub driveway: ComponentCondition,
    pub fencing: ComponentCondition,
}

/// Kitchen record; detail sub-fields are only scored when the kitchen
/// itself is at or below the needs-work threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenAssessment {
    pub condition: FinishCondition,
    #[serde(default)]
    pub cabinets: Option<FinishCondition>,
    #[serde(default)]
    pub countertops: Option<FinishCondition>,
    #[serde(default)]
    pub appliances: Option<FinishCondition>,
}

/// Bathroom record; detail sub-fields gate the same way as the kitchen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BathroomAssessment {
    pub condition: FinishCondition,
    #[serde(default)]
    pub fixtures: Option<FinishCondition>,
    #[serde(default)]
    pub tile: Option<FinishCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorAssessment {
    pub kitchen: KitchenAssessment,
    pub bathrooms: Vec<BathroomAssessment>,
    pub bedrooms: Vec<FinishCondition>,
    pub general: FinishCondition,
}

/// Major-defect flags. Each true flag stacks a fixed penalty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefectFlags {
    #[serde(default)]
    pub mold: bool,
    #[serde(default)]
    pub termites: bool,
    #[serde(default)]
    pub water_damage: bool,
    #[serde(default)]
    pub fire_damage: bool,
    #[serde(default)]
    pub structural_issues: bool,
    #[serde(default)]
    pub code_violations: bool,
    /// Free-text note the assessor flagged as a major concern.
    #[serde(default)]
    pub other: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolAssessment {
    pub condition: ComponentCondition,
    pub equipment: ComponentCondition,
}

/// Structured walkthrough record the scorer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyConditionAssessment {
    pub overall: OverallCondition,
    pub systems: SystemsAssessment,
    pub exterior: ExteriorAssessment,
    pub interior: InteriorAssessment,
    #[serde(default)]
    pub defects: DefectFlags,
    #[serde(default)]
    pub pool: Option<PoolAssessment>,
}
