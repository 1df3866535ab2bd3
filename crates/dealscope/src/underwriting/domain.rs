use serde::{Deserialize, Serialize};

/// Income strategy the deal is underwritten against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    LongTermRental,
    VoucherRental,
    ShortTermRental,
}

impl Strategy {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::LongTermRental,
            Self::VoucherRental,
            Self::ShortTermRental,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LongTermRental => "Long-Term Rental",
            Self::VoucherRental => "Voucher Rental",
            Self::ShortTermRental => "Short-Term Rental",
        }
    }
}

/// Per-unit facts used by the income models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDetail {
    pub beds: u8,
    pub baths: f32,
    pub sqft: u32,
    /// Monthly market rent for the unit.
    pub market_rent: f64,
    /// Explicit monthly voucher ceiling; overrides any table lookup.
    #[serde(default)]
    pub voucher_rent: Option<f64>,
    /// Projected annual short-term revenue, already vacancy-adjusted.
    #[serde(default)]
    pub str_annual_revenue: Option<f64>,
    /// Annual short-term operating costs (cleaning, platform fees, utilities).
    #[serde(default)]
    pub str_annual_expenses: Option<f64>,
}

/// Permanent financing terms for the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub rate_percent: f64,
    pub term_years: u32,
    /// 100 means an all-cash purchase.
    pub down_payment_percent: f64,
}

/// Disposition once rehab completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RehabExit {
    Sell,
    RefinanceAndHold { ltv_percent: f64, rate_percent: f64 },
}

/// Bridge-financed rehab parameters for the BRRRR path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabPlan {
    pub budget: f64,
    pub duration_months: u32,
    pub financing_rate_percent: f64,
    pub entry_points_percent: f64,
    pub exit_points_percent: f64,
    pub after_repair_value: f64,
    pub exit: RehabExit,
}

/// Everything the projector needs to know about the acquisition itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionInputs {
    pub address: String,
    /// 5-digit ZIP, keys the voucher payment-standard lookup.
    pub zip: String,
    pub unit_count: u32,
    pub units: Vec<UnitDetail>,
    pub total_sqft: u32,
    #[serde(default)]
    pub year_built: Option<u16>,
    pub purchase_price: f64,
    /// Closing/acquisition costs as a percent of purchase price.
    pub acquisition_cost_percent: f64,
    /// One-time furnish/setup cash, mainly for short-term conversions.
    #[serde(default)]
    pub setup_cost: f64,
    pub loan: LoanTerms,
    #[serde(default)]
    pub rehab: Option<RehabPlan>,
}

impl AcquisitionInputs {
    /// Rejects malformed inputs before any projection math runs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.purchase_price <= 0.0 {
            return Err(ValidationError::NonPositivePurchasePrice(
                self.purchase_price,
            ));
        }
        if self.loan.term_years == 0 {
            return Err(ValidationError::ZeroLoanTerm);
        }
        if !(0.0..=100.0).contains(&self.loan.down_payment_percent) {
            return Err(ValidationError::DownPaymentOutOfRange(
                self.loan.down_payment_percent,
            ));
        }
        if self.loan.rate_percent < 0.0 {
            return Err(ValidationError::NegativeRate(self.loan.rate_percent));
        }
        if self.units.is_empty() || self.unit_count == 0 {
            return Err(ValidationError::NoUnits);
        }
        if self.unit_count as usize != self.units.len() {
            return Err(ValidationError::UnitCountMismatch {
                declared: self.unit_count,
                detailed: self.units.len(),
            });
        }
        if self.total_sqft == 0 {
            return Err(ValidationError::ZeroSquareFootage);
        }
        for (index, unit) in self.units.iter().enumerate() {
            if unit.market_rent < 0.0 {
                return Err(ValidationError::NegativeRent {
                    index,
                    rent: unit.market_rent,
                });
            }
        }
        if let Some(rehab) = &self.rehab {
            if rehab.budget < 0.0 {
                return Err(ValidationError::NegativeRehabBudget(rehab.budget));
            }
            if rehab.after_repair_value <= 0.0 {
                return Err(ValidationError::NonPositiveAfterRepairValue(
                    rehab.after_repair_value,
                ));
            }
            if let RehabExit::RefinanceAndHold { ltv_percent, .. } = rehab.exit {
                if !(0.0..=100.0).contains(&ltv_percent) {
                    return Err(ValidationError::RefinanceLtvOutOfRange(ltv_percent));
                }
            }
        }
        Ok(())
    }

    /// Principal of the purchase loan implied by the down payment.
    pub fn purchase_principal(&self) -> f64 {
        self.purchase_price * (1.0 - self.loan.down_payment_percent / 100.0)
    }
}

/// Structured rejection reasons raised before projection begins.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("purchase price must be positive (got {0})")]
    NonPositivePurchasePrice(f64),
    #[error("loan term must be at least one year")]
    ZeroLoanTerm,
    #[error("down payment percent must fall within 0-100 (got {0})")]
    DownPaymentOutOfRange(f64),
    #[error("loan rate percent must be non-negative (got {0})")]
    NegativeRate(f64),
    #[error("at least one unit with details is required")]
    NoUnits,
    #[error("unit count {declared} does not match {detailed} unit detail record(s)")]
    UnitCountMismatch { declared: u32, detailed: usize },
    #[error("total square footage must be positive")]
    ZeroSquareFootage,
    #[error("unit {index}: market rent must be non-negative (got {rent})")]
    NegativeRent { index: usize, rent: f64 },
    #[error("rehab budget must be non-negative (got {0})")]
    NegativeRehabBudget(f64),
    #[error("after-repair value must be positive when a rehab plan is present (got {0})")]
    NonPositiveAfterRepairValue(f64),
    #[error("refinance loan-to-value percent must fall within 0-100 (got {0})")]
    RefinanceLtvOutOfRange(f64),
}
