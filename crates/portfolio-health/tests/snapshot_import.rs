use portfolio_health::portfolio::{
    AssetId, Direction, HealthEngine, KpiStatus, PortfolioSummary, SnapshotImporter,
};
use std::fs;
use std::path::PathBuf;

struct ExportDir {
    root: PathBuf,
}

impl ExportDir {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "portfolio-health-{name}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("create export dir");
        Self { root }
    }

    fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.root.join(file);
        fs::write(&path, contents).expect("write export file");
        path
    }
}

impl Drop for ExportDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.root).ok();
    }
}

#[test]
fn imported_exports_score_like_the_dashboard() {
    let dir = ExportDir::new("dashboard");
    let assets = dir.write(
        "assets.csv",
        "id,name,address,units,manager\n\
         a-1,Maple Court,12 Maple St,24,Jordan\n\
         a-2,Birch Flats,40 Birch Ave,8,Sam\n",
    );
    let kpis = dir.write(
        "kpi_entries.csv",
        "id,asset_id,kpi_name,value,date,commentary\n\
         k-1,a-1,Occupancy Level,96,2025-05-01,\n\
         k-2,a-1,Turn Days,25,2025-05-01,slow vendor\n\
         k-3,a-1,Occupancy Level,96,2025-04-01,\n\
         k-4,a-1,Turn Days,8,2025-04-01,\n\
         k-5,a-2,Rent Collected %,n/a,2025-05-01,\n\
         k-6,a-2,Rent Collected %,99,2025-05-01T09:15:00Z,\n",
    );
    let jobs = dir.write(
        "jobs.csv",
        "id,property_id,status\n\
         j-1,a-2,IN_PROGRESS\n\
         j-2,a-2,COMPLETED\n\
         j-3,a-2,REPORTED\n",
    );

    let snapshot = SnapshotImporter::from_paths(&assets, &kpis, Some(jobs.as_path()))
        .expect("exports import");

    assert_eq!(snapshot.assets.len(), 2);
    assert_eq!(snapshot.kpi_entries.len(), 5);
    assert_eq!(snapshot.jobs.len(), 3);

    let health = HealthEngine::standard().portfolio(&snapshot);

    let maple = &health[&AssetId::from("a-1")];
    assert_eq!(maple.health_score, 85.0);
    assert_eq!(maple.status_band, KpiStatus::Green);
    assert_eq!(maple.direction, Direction::Watch);

    let birch = &health[&AssetId::from("a-2")];
    assert_eq!(birch.health_score, 100.0);
    assert_eq!(birch.direction, Direction::Stable);

    let summary = PortfolioSummary::from_health(&health);
    assert_eq!(summary.average_score, 92.5);
    assert_eq!(summary.watch_list.len(), 1);
    assert_eq!(summary.watch_list[0].asset_id, AssetId::from("a-1"));
}

#[test]
fn jobs_export_is_optional() {
    let dir = ExportDir::new("no-jobs");
    let assets = dir.write("assets.csv", "id,name\na-1,Maple Court\n");
    let kpis = dir.write("kpi_entries.csv", "asset_id,kpi_name,value,date\n");

    let snapshot = SnapshotImporter::from_paths(&assets, &kpis, None).expect("exports import");
    let health = HealthEngine::standard().portfolio(&snapshot);

    assert!(snapshot.jobs.is_empty());
    assert_eq!(health[&AssetId::from("a-1")].health_score, 100.0);
}
