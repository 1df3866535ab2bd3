use dealscope::error::AppError;
use dealscope::rehab::RehabTier;
use dealscope::underwriting::{AcquisitionInputs, GlobalAssumptions, Strategy, VoucherRentTable};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) assumptions: Arc<RwLock<GlobalAssumptions>>,
}

pub(crate) fn parse_strategy(raw: &str) -> Result<Strategy, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "ltr" | "long_term" | "long-term" | "long_term_rental" => Ok(Strategy::LongTermRental),
        "voucher" | "voucher_rental" | "section8" => Ok(Strategy::VoucherRental),
        "str" | "short_term" | "short-term" | "short_term_rental" => Ok(Strategy::ShortTermRental),
        other => Err(format!(
            "unknown strategy '{other}' (expected ltr, voucher, or short_term)"
        )),
    }
}

pub(crate) fn parse_tier(raw: &str) -> Result<RehabTier, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "light" => Ok(RehabTier::Light),
        "lite+" | "lite_plus" | "lite-plus" => Ok(RehabTier::LitePlus),
        "medium" => Ok(RehabTier::Medium),
        "heavy" => Ok(RehabTier::Heavy),
        "fullgut" | "full_gut" | "full-gut" => Ok(RehabTier::FullGut),
        other => Err(format!(
            "unknown rehab tier '{other}' (expected light, lite_plus, medium, heavy, or full_gut)"
        )),
    }
}

/// Reads `AcquisitionInputs` from a JSON file supplied on the CLI.
pub(crate) fn load_acquisition_inputs(path: &Path) -> Result<AcquisitionInputs, AppError> {
    let file = File::open(path)?;
    serde_json::from_reader(file)
        .map_err(|err| AppError::InvalidRequest(format!("failed to parse {}: {err}", path.display())))
}

pub(crate) fn load_voucher_table(path: &Path) -> Result<VoucherRentTable, AppError> {
    let file = File::open(path)?;
    Ok(VoucherRentTable::from_csv_reader(file)?)
}

/// Display-only currency formatting for CLI reports.
pub(crate) fn currency(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let mut remainder = rounded.abs() as i64;

    let mut groups = Vec::new();
    loop {
        let group = remainder % 1_000;
        remainder /= 1_000;
        if remainder == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();

    let joined = groups.join(",");
    if negative {
        format!("-${joined}")
    } else {
        format!("${joined}")
    }
}

/// Display-only ratio-to-percent formatting for CLI reports.
pub(crate) fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
