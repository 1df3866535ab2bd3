use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Payment-standard zone assigned to a ZIP by the housing authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherZone {
    Basic,
    Traditional,
    HighOpportunity,
}

impl VoucherZone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Traditional => "Traditional",
            Self::HighOpportunity => "High Opportunity",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "traditional" => Some(Self::Traditional),
            "high_opportunity" | "high-opportunity" | "opportunity" => Some(Self::HighOpportunity),
            _ => None,
        }
    }
}

/// Monthly voucher ceilings for one ZIP, indexed by bedroom count.
/// Bedroom counts above five clamp to the five-bedroom standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipPaymentStandard {
    pub zone: VoucherZone,
    pub by_bedrooms: [f64; 6],
}

/// Read-only lookup table from 5-digit ZIP to voucher payment standards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoucherRentTable {
    entries: HashMap<String, ZipPaymentStandard>,
}

impl VoucherRentTable {
    pub fn new(entries: HashMap<String, ZipPaymentStandard>) -> Self {
        Self { entries }
    }

    /// Ceiling rent for a ZIP and bedroom count. A miss is a business
    /// outcome (caller falls back to a market multiplier), not an error.
    pub fn ceiling(&self, zip: &str, bedrooms: u8) -> Option<f64> {
        self.entries
            .get(zip.trim())
            .map(|standard| standard.by_bedrooms[usize::from(bedrooms.min(5))])
    }

    pub fn zone(&self, zip: &str) -> Option<VoucherZone> {
        self.entries.get(zip.trim()).map(|standard| standard.zone)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a table from CSV with the columns
    /// `zip,zone,studio,one_br,two_br,three_br,four_br,five_br`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, VoucherTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for record in csv_reader.deserialize::<VoucherRow>() {
            let row = record?;
            let zip = row.zip.trim().to_string();
            if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VoucherTableError::InvalidZip(zip));
            }
            let zone = VoucherZone::parse(&row.zone)
                .ok_or_else(|| VoucherTableError::UnknownZone(row.zone.clone()))?;
            entries.insert(
                zip,
                ZipPaymentStandard {
                    zone,
                    by_bedrooms: [
                        row.studio,
                        row.one_br,
                        row.two_br,
                        row.three_br,
                        row.four_br,
                        row.five_br,
                    ],
                },
            );
        }

        Ok(Self { entries })
    }
}

#[derive(Debug, Deserialize)]
struct VoucherRow {
    zip: String,
    zone: String,
    studio: f64,
    one_br: f64,
    two_br: f64,
    three_br: f64,
    four_br: f64,
    five_br: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum VoucherTableError {
    #[error("failed to parse voucher table csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("'{0}' is not a 5-digit ZIP")]
    InvalidZip(String),
    #[error("unknown payment-standard zone '{0}'")]
    UnknownZone(String),
}

/// Growth and expense assumptions shared by every projection. Passed
/// explicitly to each call; mutated only through `apply` and `reset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAssumptions {
    /// Expected vacant months per year for conventional leases.
    pub vacancy_months_long_term: f64,
    /// Expected vacant months per year between voucher tenancies.
    pub vacancy_months_voucher: f64,
    /// Maintenance reserve as a percent of gross income.
    pub maintenance_percent: f64,
    pub rent_growth_percent: f64,
    pub appreciation_percent: f64,
    /// Annual escalation applied to taxes, insurance, and fixed costs.
    pub expense_growth_percent: f64,
    /// Annual property tax as a percent of the value basis.
    pub property_tax_percent: f64,
    pub insurance_annual_per_unit: f64,
    /// Fallback multiplier over market rent when a ZIP has no table entry.
    pub voucher_market_multiplier: f64,
    pub voucher_rents: VoucherRentTable,
    pub updated_at: DateTime<Utc>,
}

impl GlobalAssumptions {
    pub fn standard() -> Self {
        Self {
            vacancy_months_long_term: 0.5,
            vacancy_months_voucher: 1.0,
            maintenance_percent: 8.0,
            rent_growth_percent: 3.0,
            appreciation_percent: 3.0,
            expense_growth_percent: 2.5,
            property_tax_percent: 1.6,
            insurance_annual_per_unit: 1_200.0,
            voucher_market_multiplier: 1.1,
            voucher_rents: standard_payment_standards(),
            updated_at: Utc::now(),
        }
    }

    /// Applies a partial update and stamps `updated_at`.
    pub fn apply(&mut self, update: AssumptionsUpdate) {
        let AssumptionsUpdate {
            vacancy_months_long_term,
            vacancy_months_voucher,
            maintenance_percent,
            rent_growth_percent,
            appreciation_percent,
            expense_growth_percent,
            property_tax_percent,
            insurance_annual_per_unit,
            voucher_market_multiplier,
            voucher_rents,
        } = update;

        if let Some(value) = vacancy_months_long_term {
            self.vacancy_months_long_term = value;
        }
        if let Some(value) = vacancy_months_voucher {
            self.vacancy_months_voucher = value;
        }
        if let Some(value) = maintenance_percent {
            self.maintenance_percent = value;
        }
        if let Some(value) = rent_growth_percent {
            self.rent_growth_percent = value;
        }
        if let Some(value) = appreciation_percent {
            self.appreciation_percent = value;
        }
        if let Some(value) = expense_growth_percent {
            self.expense_growth_percent = value;
        }
        if let Some(value) = property_tax_percent {
            self.property_tax_percent = value;
        }
        if let Some(value) = insurance_annual_per_unit {
            self.insurance_annual_per_unit = value;
        }
        if let Some(value) = voucher_market_multiplier {
            self.voucher_market_multiplier = value;
        }
        if let Some(table) = voucher_rents {
            self.voucher_rents = table;
        }

        self.updated_at = Utc::now();
    }

    /// Restores the standard assumption set and stamps `updated_at`.
    pub fn reset(&mut self) {
        *self = Self::standard();
    }
}

/// Partial update for the assumption set. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssumptionsUpdate {
    #[serde(default)]
    pub vacancy_months_long_term: Option<f64>,
    #[serde(default)]
    pub vacancy_months_voucher: Option<f64>,
    #[serde(default)]
    pub maintenance_percent: Option<f64>,
    #[serde(default)]
    pub rent_growth_percent: Option<f64>,
    #[serde(default)]
    pub appreciation_percent: Option<f64>,
    #[serde(default)]
    pub expense_growth_percent: Option<f64>,
    #[serde(default)]
    pub property_tax_percent: Option<f64>,
    #[serde(default)]
    pub insurance_annual_per_unit: Option<f64>,
    #[serde(default)]
    pub voucher_market_multiplier: Option<f64>,
    #[serde(default)]
    pub voucher_rents: Option<VoucherRentTable>,
}

/// Des Moines metro payment standards bundled as the starting table.
fn standard_payment_standards() -> VoucherRentTable {
    let rows: [(&str, VoucherZone, [f64; 6]); 7] = [
        (
            "50309",
            VoucherZone::Traditional,
            [790.0, 880.0, 1_120.0, 1_460.0, 1_640.0, 1_886.0],
        ),
        (
            "50310",
            VoucherZone::Traditional,
            [760.0, 850.0, 1_080.0, 1_410.0, 1_580.0, 1_817.0],
        ),
        (
            "50311",
            VoucherZone::Traditional,
            [775.0, 865.0, 1_100.0, 1_430.0, 1_610.0, 1_852.0],
        ),
        (
            "50314",
            VoucherZone::Basic,
            [700.0, 780.0, 990.0, 1_290.0, 1_450.0, 1_668.0],
        ),
        (
            "50317",
            VoucherZone::Basic,
            [690.0, 770.0, 980.0, 1_280.0, 1_430.0, 1_645.0],
        ),
        (
            "50265",
            VoucherZone::HighOpportunity,
            [870.0, 970.0, 1_230.0, 1_600.0, 1_800.0, 2_070.0],
        ),
        (
            "50266",
            VoucherZone::HighOpportunity,
            [890.0, 990.0, 1_260.0, 1_640.0, 1_840.0, 2_116.0],
        ),
    ];

    let entries = rows
        .into_iter()
        .map(|(zip, zone, by_bedrooms)| {
            (zip.to_string(), ZipPaymentStandard { zone, by_bedrooms })
        })
        .collect();

    VoucherRentTable::new(entries)
}
