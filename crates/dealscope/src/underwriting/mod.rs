pub mod assumptions;
pub mod domain;
pub mod loan;
pub mod offer;
pub mod projection;

pub use assumptions::{
    AssumptionsUpdate, GlobalAssumptions, VoucherRentTable, VoucherTableError, VoucherZone,
};
pub use domain::{
    AcquisitionInputs, LoanTerms, RehabExit, RehabPlan, Strategy, UnitDetail, ValidationError,
};
pub use offer::max_offer_for_dscr;
pub use projection::{
    project_strategy, StrategyResults, YearOneSummary, YearProjection, PROJECTION_YEARS,
};
