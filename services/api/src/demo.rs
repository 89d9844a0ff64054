use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use portfolio_health::config::HealthConfig;
use portfolio_health::error::AppError;
use portfolio_health::plans::{AssetUsage, PlanTier};
use portfolio_health::portfolio::{
    Asset, HealthEngine, Job, JobStatus, KpiEntry, KpiName, PortfolioHealth, PortfolioSnapshot,
    PortfolioSummary, SnapshotImporter,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct HealthReportArgs {
    /// Asset export (CSV with id,name[,address,units,manager])
    #[arg(long)]
    pub(crate) assets: PathBuf,
    /// KPI entry export (CSV with asset_id,kpi_name,value,date)
    #[arg(long)]
    pub(crate) kpis: PathBuf,
    /// Optional job export (CSV with id,property_id,status)
    #[arg(long)]
    pub(crate) jobs: Option<PathBuf>,
    /// Check the portfolio against a subscription plan (FREE, GROWTH, PRO, PRO_MAX)
    #[arg(long, value_parser = crate::infra::parse_plan)]
    pub(crate) plan: Option<PlanTier>,
    /// JSON benchmark table replacing the standard thresholds
    #[arg(long)]
    pub(crate) benchmarks: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Latest logging date for the sample portfolio (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct HealthReport<'a> {
    assets: &'a PortfolioHealth,
    summary: &'a PortfolioSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset_usage: Option<AssetUsage>,
}

pub(crate) fn run_health_report(args: HealthReportArgs) -> Result<(), AppError> {
    let HealthReportArgs {
        assets,
        kpis,
        jobs,
        plan,
        benchmarks,
        json,
    } = args;

    let snapshot = SnapshotImporter::from_paths(&assets, &kpis, jobs.as_deref())?;
    if let Some(plan) = plan {
        plan.ensure_capacity(snapshot.assets.len())?;
    }

    let engine = HealthConfig {
        benchmarks_path: benchmarks,
    }
    .engine()?;
    info!(
        assets = snapshot.assets.len(),
        kpi_entries = snapshot.kpi_entries.len(),
        jobs = snapshot.jobs.len(),
        "scoring imported portfolio"
    );

    let usage = plan.map(|plan| plan.asset_usage(snapshot.assets.len()));
    render_health_report(&engine, &snapshot, usage, "CSV export", json);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, json } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let snapshot = sample_portfolio(as_of);
    let engine = HealthEngine::standard();
    if !json {
        println!("Portfolio health demo (latest logging date {})", as_of);
    }
    render_health_report(&engine, &snapshot, None, "Seeded sample portfolio", json);
    Ok(())
}

pub(crate) fn render_health_report(
    engine: &HealthEngine,
    snapshot: &PortfolioSnapshot,
    usage: Option<AssetUsage>,
    source: &str,
    json: bool,
) {
    let health = engine.portfolio(snapshot);
    let summary = PortfolioSummary::from_health(&health);

    if json {
        let report = HealthReport {
            assets: &health,
            summary: &summary,
            asset_usage: usage,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Health report unavailable: {}", err),
        }
        return;
    }

    println!("Data source: {}", source);
    println!("\nAsset health");
    for asset in &snapshot.assets {
        let Some(entry) = health.get(&asset.id) else {
            continue;
        };
        println!(
            "- {} ({}): {:.0} [{}] {} | {} red, {} yellow",
            asset.name,
            asset.id,
            entry.health_score,
            entry.status_band.label(),
            entry.direction.label(),
            entry.red_count,
            entry.yellow_count
        );
    }

    println!(
        "\nPortfolio: {} assets | average score {:.1} | {} red metrics, {} yellow metrics",
        summary.asset_count, summary.average_score, summary.red_metrics, summary.yellow_metrics
    );
    for band in &summary.bands {
        println!("- {}: {} assets", band.band_label, band.assets);
    }
    for direction in &summary.directions {
        println!("- {}: {} assets", direction.direction_label, direction.assets);
    }

    if summary.watch_list.is_empty() {
        println!("\nWatch list: none");
    } else {
        println!("\nWatch list");
        for entry in &summary.watch_list {
            println!(
                "- {}: {:.0} [{}] {}",
                entry.asset_id,
                entry.health_score,
                entry.status_band.label(),
                entry.direction.label()
            );
        }
    }

    match usage {
        Some(AssetUsage::Unlimited) => println!("\nPlan usage: unlimited assets"),
        Some(AssetUsage::Metered {
            used,
            limit,
            near_limit,
            can_add,
        }) => {
            let flag = if !can_add {
                " (at limit)"
            } else if near_limit {
                " (near limit)"
            } else {
                ""
            };
            println!("\nPlan usage: {}/{} assets{}", used, limit, flag);
        }
        None => {}
    }
}

/// Three assets logged on `as_of` and thirty days earlier.
pub(crate) fn sample_portfolio(as_of: NaiveDate) -> PortfolioSnapshot {
    let previous = as_of - Duration::days(30);

    let assets = vec![
        Asset::new("demo-maple", "Maple Court"),
        Asset::new("demo-birch", "Birch Flats"),
        Asset::new("demo-cedar", "Cedar Row"),
    ];

    let mut kpi_entries = Vec::new();
    let mut log = |asset: &str, name: KpiName, value: f64, date: NaiveDate| {
        kpi_entries.push(KpiEntry::new(asset, name, value, date));
    };

    log("demo-maple", KpiName::RentCollected, 99.0, as_of);
    log("demo-maple", KpiName::TurnDays, 8.0, as_of);
    log("demo-maple", KpiName::RentCollected, 99.0, previous);
    log("demo-maple", KpiName::TurnDays, 15.0, previous);

    log("demo-birch", KpiName::TurnDays, 25.0, as_of);
    log("demo-birch", KpiName::RentCollected, 96.0, as_of);
    log("demo-birch", KpiName::TurnDays, 9.0, previous);
    log("demo-birch", KpiName::RentCollected, 98.5, previous);

    log("demo-cedar", KpiName::OccupancyLevel, 85.0, as_of);
    log("demo-cedar", KpiName::TurnCost, 3500.0, as_of);
    log("demo-cedar", KpiName::ExpenseTrend, 4.0, as_of);
    log("demo-cedar", KpiName::OccupancyLevel, 88.0, previous);

    let mut jobs = vec![
        Job::new("job-1", "demo-birch", JobStatus::InProgress),
        Job::new("job-2", "demo-birch", JobStatus::Reported),
        Job::new("job-3", "demo-birch", JobStatus::Completed),
    ];
    jobs.extend((0..7).map(|n| {
        Job::new(
            format!("job-cedar-{n}"),
            "demo-cedar",
            JobStatus::ContractorAssigned,
        )
    }));

    PortfolioSnapshot::new(assets, kpi_entries, jobs)
}
