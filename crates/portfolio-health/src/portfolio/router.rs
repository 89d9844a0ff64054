use std::borrow::Cow;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::benchmarks::{Benchmark, BenchmarkTable};
use super::domain::{AssetId, KpiName, KpiStatus};
use super::health::{HealthAssessment, HealthEngine, HealthPolicy, PortfolioHealth};
use super::snapshot::PortfolioSnapshot;
use super::summary::PortfolioSummary;
use crate::error::AppError;
use crate::plans::{AssetUsage, PlanTier};

/// Snapshot plus optional per-request overrides of the engine defaults.
#[derive(Debug, Deserialize)]
pub struct PortfolioHealthRequest {
    #[serde(flatten)]
    pub snapshot: PortfolioSnapshot,
    #[serde(default)]
    pub benchmarks: Option<BenchmarkTable>,
    #[serde(default)]
    pub policy: Option<HealthPolicy>,
    #[serde(default)]
    pub plan: Option<PlanTier>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioHealthResponse {
    pub assets: PortfolioHealth,
    pub summary: PortfolioSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_usage: Option<AssetUsage>,
}

#[derive(Debug, Deserialize)]
pub struct KpiClassifyRequest {
    pub kpi_name: KpiName,
    pub value: f64,
    #[serde(default)]
    pub benchmarks: Option<BenchmarkTable>,
}

#[derive(Debug, Serialize)]
pub struct KpiClassifyResponse {
    pub kpi_name: KpiName,
    pub value: f64,
    pub status: KpiStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<Benchmark>,
}

/// Router exposing the health engine over HTTP.
pub fn portfolio_router(engine: Arc<HealthEngine>) -> Router {
    Router::new()
        .route("/api/v1/portfolio/health", post(portfolio_health_handler))
        .route(
            "/api/v1/portfolio/health/:asset_id",
            post(asset_health_handler),
        )
        .route("/api/v1/kpis/classify", post(classify_handler))
        .with_state(engine)
}

pub(crate) async fn portfolio_health_handler(
    State(engine): State<Arc<HealthEngine>>,
    Json(request): Json<PortfolioHealthRequest>,
) -> Result<Json<PortfolioHealthResponse>, AppError> {
    let PortfolioHealthRequest {
        snapshot,
        benchmarks,
        policy,
        plan,
    } = request;

    if let Some(plan) = plan {
        plan.ensure_capacity(snapshot.assets.len())?;
    }

    let engine = request_engine(&engine, benchmarks, policy);
    let assets = engine.portfolio(&snapshot);
    let summary = PortfolioSummary::from_health(&assets);

    debug!(
        assets = snapshot.assets.len(),
        kpi_entries = snapshot.kpi_entries.len(),
        jobs = snapshot.jobs.len(),
        average_score = summary.average_score,
        "scored portfolio health"
    );

    Ok(Json(PortfolioHealthResponse {
        assets,
        summary,
        asset_usage: plan.map(|plan| plan.asset_usage(snapshot.assets.len())),
    }))
}

pub(crate) async fn asset_health_handler(
    State(engine): State<Arc<HealthEngine>>,
    Path(asset_id): Path<String>,
    Json(request): Json<PortfolioHealthRequest>,
) -> Result<Json<HealthAssessment>, AppError> {
    let asset_id = AssetId(asset_id);
    let PortfolioHealthRequest {
        snapshot,
        benchmarks,
        policy,
        ..
    } = request;

    if snapshot.asset(&asset_id).is_none() {
        return Err(AppError::AssetNotFound(asset_id));
    }

    let engine = request_engine(&engine, benchmarks, policy);
    Ok(Json(engine.assess(
        &asset_id,
        &snapshot.kpi_entries,
        &snapshot.jobs,
    )))
}

pub(crate) async fn classify_handler(
    State(engine): State<Arc<HealthEngine>>,
    Json(request): Json<KpiClassifyRequest>,
) -> Json<KpiClassifyResponse> {
    let KpiClassifyRequest {
        kpi_name,
        value,
        benchmarks,
    } = request;

    let table = benchmarks.as_ref().unwrap_or_else(|| engine.benchmarks());
    let status = table.classify(&kpi_name, value);
    let benchmark = table.get(&kpi_name).cloned();

    Json(KpiClassifyResponse {
        kpi_name,
        value,
        status,
        benchmark,
    })
}

fn request_engine(
    engine: &HealthEngine,
    benchmarks: Option<BenchmarkTable>,
    policy: Option<HealthPolicy>,
) -> Cow<'_, HealthEngine> {
    if benchmarks.is_none() && policy.is_none() {
        return Cow::Borrowed(engine);
    }

    Cow::Owned(HealthEngine::new(
        benchmarks.unwrap_or_else(|| engine.benchmarks().clone()),
        policy.unwrap_or_else(|| engine.policy().clone()),
    ))
}
