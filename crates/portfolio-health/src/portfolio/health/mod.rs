mod policy;
mod scoring;
mod trend;

pub use policy::HealthPolicy;
pub use scoring::ScoreSummary;

use super::benchmarks::BenchmarkTable;
use super::domain::{Asset, AssetId, Direction, Job, KpiEntry, KpiName, KpiStatus};
use super::snapshot::{entries_by_asset, open_jobs_by_asset, PortfolioSnapshot};
use chrono::NaiveDate;
use scoring::AssetHistory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health of one asset as of its latest KPI logging date and today's backlog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHealth {
    pub asset_id: AssetId,
    pub health_score: f64,
    pub red_count: u32,
    pub yellow_count: u32,
    pub status_band: KpiStatus,
    pub direction: Direction,
}

/// Asset health plus the intermediate summaries it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAssessment {
    pub health: AssetHealth,
    pub current: ScoreSummary,
    pub baseline: ScoreSummary,
    pub latest_date: Option<NaiveDate>,
    pub baseline_date: Option<NaiveDate>,
    pub open_jobs: usize,
}

pub type PortfolioHealth = BTreeMap<AssetId, AssetHealth>;

/// Stateless scorer combining a benchmark table with a health policy.
#[derive(Debug, Clone)]
pub struct HealthEngine {
    benchmarks: BenchmarkTable,
    policy: HealthPolicy,
}

impl HealthEngine {
    pub fn new(benchmarks: BenchmarkTable, policy: HealthPolicy) -> Self {
        Self { benchmarks, policy }
    }

    pub fn standard() -> Self {
        Self::new(BenchmarkTable::standard(), HealthPolicy::default())
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    pub fn policy(&self) -> &HealthPolicy {
        &self.policy
    }

    pub fn classify(&self, name: &KpiName, value: f64) -> KpiStatus {
        self.benchmarks.classify(name, value)
    }

    /// Assess a single asset. `kpi_entries` and `jobs` may contain records
    /// for other assets; they are filtered here.
    pub fn assess(
        &self,
        asset_id: &AssetId,
        kpi_entries: &[KpiEntry],
        jobs: &[Job],
    ) -> HealthAssessment {
        let entries = kpi_entries
            .iter()
            .filter(|entry| &entry.asset_id == asset_id)
            .collect();
        let open_jobs = jobs
            .iter()
            .filter(|job| &job.property_id == asset_id && job.status.is_open())
            .count();

        self.assess_history(asset_id, &AssetHistory::new(entries, open_jobs))
    }

    /// Health for every asset, keyed by asset id.
    pub fn portfolio(&self, snapshot: &PortfolioSnapshot) -> PortfolioHealth {
        self.portfolio_of(&snapshot.assets, &snapshot.kpi_entries, &snapshot.jobs)
    }

    pub fn portfolio_of(
        &self,
        assets: &[Asset],
        kpi_entries: &[KpiEntry],
        jobs: &[Job],
    ) -> PortfolioHealth {
        let entries = entries_by_asset(kpi_entries);
        let open_jobs = open_jobs_by_asset(jobs);

        assets
            .iter()
            .map(|asset| {
                let history = AssetHistory::new(
                    entries.get(&asset.id).cloned().unwrap_or_default(),
                    open_jobs.get(&asset.id).copied().unwrap_or(0),
                );
                let assessment = self.assess_history(&asset.id, &history);
                (asset.id.clone(), assessment.health)
            })
            .collect()
    }

    fn assess_history(&self, asset_id: &AssetId, history: &AssetHistory<'_>) -> HealthAssessment {
        let current = history.summarize(None, &self.benchmarks, &self.policy);
        let baseline_date = history.previous_date();
        let baseline = match baseline_date {
            Some(date) => history.summarize(Some(date), &self.benchmarks, &self.policy),
            None => current,
        };

        let health = AssetHealth {
            asset_id: asset_id.clone(),
            health_score: current.score,
            red_count: current.red_count,
            yellow_count: current.yellow_count,
            status_band: trend::status_band(current.score, &self.policy),
            direction: trend::direction(current.score, baseline.score, &self.policy),
        };

        HealthAssessment {
            health,
            current,
            baseline,
            latest_date: history.latest_date(),
            baseline_date,
            open_jobs: history.open_jobs(),
        }
    }
}

/// Portfolio health under the default policy.
pub fn portfolio_health(
    assets: &[Asset],
    kpi_entries: &[KpiEntry],
    jobs: &[Job],
    benchmarks: &BenchmarkTable,
) -> PortfolioHealth {
    HealthEngine::new(benchmarks.clone(), HealthPolicy::default()).portfolio_of(
        assets,
        kpi_entries,
        jobs,
    )
}
