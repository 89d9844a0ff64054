use super::domain::{Asset, AssetId, Job, KpiEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable view of a portfolio that a health computation runs over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub kpi_entries: Vec<KpiEntry>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl PortfolioSnapshot {
    pub fn new(assets: Vec<Asset>, kpi_entries: Vec<KpiEntry>, jobs: Vec<Job>) -> Self {
        Self {
            assets,
            kpi_entries,
            jobs,
        }
    }

    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|asset| &asset.id == id)
    }
}

pub(crate) fn entries_by_asset(entries: &[KpiEntry]) -> HashMap<&AssetId, Vec<&KpiEntry>> {
    let mut index: HashMap<&AssetId, Vec<&KpiEntry>> = HashMap::new();
    for entry in entries {
        index.entry(&entry.asset_id).or_default().push(entry);
    }
    index
}

pub(crate) fn open_jobs_by_asset(jobs: &[Job]) -> HashMap<&AssetId, usize> {
    let mut index: HashMap<&AssetId, usize> = HashMap::new();
    for job in jobs.iter().filter(|job| job.status.is_open()) {
        *index.entry(&job.property_id).or_default() += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::domain::{JobStatus, KpiName};
    use chrono::NaiveDate;

    #[test]
    fn open_job_index_ignores_closed_work() {
        let jobs = vec![
            Job::new("j-1", "a", JobStatus::Reported),
            Job::new("j-2", "a", JobStatus::Completed),
            Job::new("j-3", "a", JobStatus::Cancelled),
            Job::new("j-4", "a", JobStatus::PendingApproval),
            Job::new("j-5", "b", JobStatus::Completed),
        ];

        let index = open_jobs_by_asset(&jobs);

        assert_eq!(index.get(&AssetId::from("a")), Some(&2));
        assert_eq!(index.get(&AssetId::from("b")), None);
    }

    #[test]
    fn entries_are_grouped_per_asset() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date");
        let snapshot = PortfolioSnapshot::new(
            vec![Asset::new("a", "Maple Court")],
            vec![
                KpiEntry::new("a", KpiName::TurnDays, 4.0, date),
                KpiEntry::new("b", KpiName::TurnDays, 9.0, date),
                KpiEntry::new("a", KpiName::TurnCost, 900.0, date),
            ],
            Vec::new(),
        );

        let index = entries_by_asset(&snapshot.kpi_entries);

        assert_eq!(index[&AssetId::from("a")].len(), 2);
        assert_eq!(index[&AssetId::from("b")].len(), 1);
        assert!(snapshot.asset(&AssetId::from("b")).is_none());
    }
}
