pub mod benchmarks;
pub mod domain;
pub mod health;
pub mod import;
pub mod router;
mod snapshot;
pub mod summary;

pub use benchmarks::{Benchmark, BenchmarkTable, BenchmarkUnit};
pub use domain::{Asset, AssetId, Direction, Job, JobStatus, KpiEntry, KpiName, KpiStatus};
pub use health::{
    portfolio_health, AssetHealth, HealthAssessment, HealthEngine, HealthPolicy, PortfolioHealth,
    ScoreSummary,
};
pub use import::{ImportError, SnapshotImporter};
pub use router::portfolio_router;
pub use snapshot::PortfolioSnapshot;
pub use summary::PortfolioSummary;
