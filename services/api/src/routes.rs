use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use dealscope::error::AppError;
use dealscope::rehab::{
    capital_needed, estimate_cost, score_condition, CapitalBreakdown,
    PropertyConditionAssessment, RehabEstimateResult, RehabTier,
};
use dealscope::underwriting::{
    max_offer_for_dscr, project_strategy, AcquisitionInputs, AssumptionsUpdate,
    GlobalAssumptions, Strategy, StrategyResults,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRequest {
    /// Omitted strategy means underwrite all three.
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    pub(crate) inputs: AcquisitionInputs,
    /// Per-request overlay on the shared assumption set.
    #[serde(default)]
    pub(crate) assumptions_override: Option<AssumptionsUpdate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProjectResponse {
    pub(crate) assumptions_updated_at: DateTime<Utc>,
    pub(crate) results: Vec<StrategyResults>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MaxOfferRequest {
    pub(crate) strategy: Strategy,
    pub(crate) inputs: AcquisitionInputs,
    pub(crate) target_dscr: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct MaxOfferResponse {
    pub(crate) strategy: Strategy,
    pub(crate) target_dscr: f64,
    /// `null` when the terms are all-cash or the target is unreachable.
    pub(crate) max_offer: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) assessment: PropertyConditionAssessment,
    pub(crate) sqft: u32,
    pub(crate) unit_count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EstimateRequest {
    pub(crate) sqft: u32,
    pub(crate) unit_count: u32,
    pub(crate) tier: RehabTier,
}

#[derive(Debug, Serialize)]
pub(crate) struct EstimateResponse {
    pub(crate) sqft: u32,
    pub(crate) unit_count: u32,
    pub(crate) tier: RehabTier,
    pub(crate) estimated_cost: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CapitalRequest {
    pub(crate) hard_cost: f64,
    pub(crate) entry_points_percent: f64,
    pub(crate) annual_rate_percent: f64,
    pub(crate) months: u32,
    pub(crate) exit_points_percent: f64,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/underwriting/project", post(project_endpoint))
        .route("/api/v1/underwriting/max-offer", post(max_offer_endpoint))
        .route(
            "/api/v1/assumptions",
            get(assumptions_endpoint).put(update_assumptions_endpoint),
        )
        .route("/api/v1/assumptions/reset", post(reset_assumptions_endpoint))
        .route("/api/v1/rehab/score", post(score_endpoint))
        .route("/api/v1/rehab/estimate", post(estimate_endpoint))
        .route("/api/v1/rehab/capital", post(capital_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn project_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let ProjectRequest {
        strategy,
        inputs,
        assumptions_override,
    } = payload;

    let mut assumptions = state
        .assumptions
        .read()
        .expect("assumptions lock poisoned")
        .clone();
    if let Some(update) = assumptions_override {
        assumptions.apply(update);
    }

    let strategies: Vec<Strategy> = match strategy {
        Some(strategy) => vec![strategy],
        None => Strategy::ordered().to_vec(),
    };

    let mut results = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        results.push(project_strategy(strategy, &inputs, &assumptions)?);
    }

    Ok(Json(ProjectResponse {
        assumptions_updated_at: assumptions.updated_at,
        results,
    }))
}

pub(crate) async fn max_offer_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<MaxOfferRequest>,
) -> Result<Json<MaxOfferResponse>, AppError> {
    let MaxOfferRequest {
        strategy,
        inputs,
        target_dscr,
    } = payload;

    let assumptions = state
        .assumptions
        .read()
        .expect("assumptions lock poisoned")
        .clone();
    let max_offer = max_offer_for_dscr(strategy, &inputs, &assumptions, target_dscr)?;

    Ok(Json(MaxOfferResponse {
        strategy,
        target_dscr,
        max_offer,
    }))
}

pub(crate) async fn assumptions_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<GlobalAssumptions> {
    let assumptions = state
        .assumptions
        .read()
        .expect("assumptions lock poisoned")
        .clone();
    Json(assumptions)
}

pub(crate) async fn update_assumptions_endpoint(
    Extension(state): Extension<AppState>,
    Json(update): Json<AssumptionsUpdate>,
) -> Json<GlobalAssumptions> {
    let mut guard = state.assumptions.write().expect("assumptions lock poisoned");
    guard.apply(update);
    Json(guard.clone())
}

pub(crate) async fn reset_assumptions_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<GlobalAssumptions> {
    let mut guard = state.assumptions.write().expect("assumptions lock poisoned");
    guard.reset();
    Json(guard.clone())
}

pub(crate) async fn score_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Json<RehabEstimateResult> {
    let ScoreRequest {
        assessment,
        sqft,
        unit_count,
    } = payload;
    Json(score_condition(&assessment, sqft, unit_count))
}

pub(crate) async fn estimate_endpoint(Json(payload): Json<EstimateRequest>) -> Json<EstimateResponse> {
    let EstimateRequest {
        sqft,
        unit_count,
        tier,
    } = payload;

    Json(EstimateResponse {
        sqft,
        unit_count,
        tier,
        estimated_cost: estimate_cost(sqft, unit_count, tier),
    })
}

pub(crate) async fn capital_endpoint(Json(payload): Json<CapitalRequest>) -> Json<CapitalBreakdown> {
    let CapitalRequest {
        hard_cost,
        entry_points_percent,
        annual_rate_percent,
        months,
        exit_points_percent,
    } = payload;

    Json(capital_needed(
        hard_cost,
        entry_points_percent,
        annual_rate_percent,
        months,
        exit_points_percent,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealscope::underwriting::{LoanTerms, UnitDetail};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, RwLock};

    fn test_state() -> AppState {
        let handle = PrometheusBuilder::new()
            .build_recorder()
            .handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(handle),
            assumptions: Arc::new(RwLock::new(GlobalAssumptions::standard())),
        }
    }

    fn sample_inputs() -> AcquisitionInputs {
        AcquisitionInputs {
            address: "812 E 14th St".to_string(),
            zip: "50309".to_string(),
            unit_count: 1,
            units: vec![UnitDetail {
                beds: 3,
                baths: 1.0,
                sqft: 1_150,
                market_rent: 1_450.0,
                voucher_rent: None,
                str_annual_revenue: None,
                str_annual_expenses: None,
            }],
            total_sqft: 1_150,
            year_built: Some(1955),
            purchase_price: 175_000.0,
            acquisition_cost_percent: 3.0,
            setup_cost: 0.0,
            loan: LoanTerms {
                rate_percent: 7.0,
                term_years: 30,
                down_payment_percent: 20.0,
            },
            rehab: None,
        }
    }

    #[tokio::test]
    async fn project_endpoint_defaults_to_all_strategies() {
        let request = ProjectRequest {
            strategy: None,
            inputs: sample_inputs(),
            assumptions_override: None,
        };

        let Json(body) = project_endpoint(Extension(test_state()), Json(request))
            .await
            .expect("projection builds");

        assert_eq!(body.results.len(), 3);
        assert_eq!(body.results[0].strategy, Strategy::LongTermRental);
        assert_eq!(body.results[0].projections.len(), 30);
    }

    #[tokio::test]
    async fn project_endpoint_applies_override_without_mutating_state() {
        let state = test_state();
        let request = ProjectRequest {
            strategy: Some(Strategy::LongTermRental),
            inputs: sample_inputs(),
            assumptions_override: Some(AssumptionsUpdate {
                rent_growth_percent: Some(0.0),
                ..AssumptionsUpdate::default()
            }),
        };

        let Json(body) = project_endpoint(Extension(state.clone()), Json(request))
            .await
            .expect("projection builds");

        // Flat rent growth: year 30 gross equals year 1 gross.
        let series = &body.results[0].projections;
        assert!((series[0].gross_income - series[29].gross_income).abs() < 1e-9);

        let shared = state.assumptions.read().expect("assumptions lock poisoned");
        assert_eq!(shared.rent_growth_percent, 3.0);
    }

    #[tokio::test]
    async fn project_endpoint_rejects_malformed_inputs() {
        let mut inputs = sample_inputs();
        inputs.purchase_price = -5.0;
        let request = ProjectRequest {
            strategy: Some(Strategy::LongTermRental),
            inputs,
            assumptions_override: None,
        };

        let result = project_endpoint(Extension(test_state()), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn assumptions_lifecycle_updates_and_resets() {
        let state = test_state();

        let Json(updated) = update_assumptions_endpoint(
            Extension(state.clone()),
            Json(AssumptionsUpdate {
                appreciation_percent: Some(5.0),
                ..AssumptionsUpdate::default()
            }),
        )
        .await;
        assert_eq!(updated.appreciation_percent, 5.0);

        let Json(reset) = reset_assumptions_endpoint(Extension(state.clone())).await;
        assert_eq!(reset.appreciation_percent, 3.0);
        assert!(reset.updated_at >= updated.updated_at);
    }

    #[tokio::test]
    async fn estimate_endpoint_prices_reference_duplex() {
        let Json(body) = estimate_endpoint(Json(EstimateRequest {
            sqft: 1_680,
            unit_count: 2,
            tier: RehabTier::Medium,
        }))
        .await;

        assert_eq!(body.estimated_cost, 61_500.0);
    }

    #[tokio::test]
    async fn capital_endpoint_sums_rounded_figures() {
        let Json(body) = capital_endpoint(Json(CapitalRequest {
            hard_cost: 61_500.0,
            entry_points_percent: 2.0,
            annual_rate_percent: 12.0,
            months: 6,
            exit_points_percent: 1.0,
        }))
        .await;

        assert_eq!(body.total, 67_035.0);
    }

    #[tokio::test]
    async fn router_exposes_health_readiness_and_metrics() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::util::ServiceExt;

        let app = router().layer(Extension(test_state()));

        for uri in ["/health", "/ready", "/metrics"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(uri)
                        .body(Body::empty())
                        .expect("request builds"),
                )
                .await
                .expect("router responds");
            assert_eq!(response.status(), StatusCode::OK, "unexpected status for {uri}");
        }
    }

    #[tokio::test]
    async fn max_offer_endpoint_returns_null_for_all_cash() {
        let mut inputs = sample_inputs();
        inputs.loan.down_payment_percent = 100.0;
        let request = MaxOfferRequest {
            strategy: Strategy::LongTermRental,
            inputs,
            target_dscr: 1.25,
        };

        let Json(body) = max_offer_endpoint(Extension(test_state()), Json(request))
            .await
            .expect("solver runs");
        assert_eq!(body.max_offer, None);
    }
}
