use super::policy::HealthPolicy;
use crate::portfolio::benchmarks::BenchmarkTable;
use crate::portfolio::domain::{KpiEntry, KpiName, KpiStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Score and metric counts for one asset as of one logging date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub score: f64,
    pub red_count: u32,
    pub yellow_count: u32,
}

/// One asset's KPI entries plus its live open-job count.
pub(crate) struct AssetHistory<'a> {
    entries: Vec<&'a KpiEntry>,
    dates: Vec<NaiveDate>,
    open_jobs: usize,
}

impl<'a> AssetHistory<'a> {
    pub(crate) fn new(entries: Vec<&'a KpiEntry>, open_jobs: usize) -> Self {
        let dates: BTreeSet<NaiveDate> = entries.iter().map(|entry| entry.date).collect();
        let dates = dates.into_iter().rev().collect();

        Self {
            entries,
            dates,
            open_jobs,
        }
    }

    pub(crate) fn latest_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub(crate) fn previous_date(&self) -> Option<NaiveDate> {
        self.dates.get(1).copied()
    }

    pub(crate) fn open_jobs(&self) -> usize {
        self.open_jobs
    }

    /// Scores the entries logged on `target` (latest date when `None`).
    ///
    /// Logged backlog entries are dropped in favour of one synthetic backlog
    /// metric built from the live open-job count. Same-day duplicates of a
    /// metric are each counted. Non-finite values are skipped.
    pub(crate) fn summarize(
        &self,
        target: Option<NaiveDate>,
        benchmarks: &BenchmarkTable,
        policy: &HealthPolicy,
    ) -> ScoreSummary {
        let target = target.or_else(|| self.latest_date());

        let logged = self.entries.iter().filter(|entry| {
            Some(entry.date) == target
                && entry.kpi_name != KpiName::MaintenanceBacklog
                && entry.value.is_finite()
        });

        let backlog = self.open_jobs as f64;
        let statuses = logged
            .map(|entry| benchmarks.classify(&entry.kpi_name, entry.value))
            .chain(std::iter::once(
                benchmarks.classify(&KpiName::MaintenanceBacklog, backlog),
            ));

        let (mut red_count, mut yellow_count) = (0u32, 0u32);
        for status in statuses {
            match status {
                KpiStatus::Red => red_count += 1,
                KpiStatus::Yellow => yellow_count += 1,
                KpiStatus::Green => {}
            }
        }

        ScoreSummary {
            score: policy.score(red_count, yellow_count),
            red_count,
            yellow_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::benchmarks::{Benchmark, BenchmarkUnit};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).expect("valid date")
    }

    fn benchmarks() -> BenchmarkTable {
        BenchmarkTable::new(vec![
            Benchmark::higher_is_better(
                KpiName::OccupancyLevel,
                90.0,
                70.0,
                BenchmarkUnit::Percentage,
            ),
            Benchmark::lower_is_better(KpiName::TurnDays, 10.0, 20.0, BenchmarkUnit::Days),
            Benchmark::lower_is_better(
                KpiName::MaintenanceBacklog,
                2.0,
                4.0,
                BenchmarkUnit::Count,
            ),
        ])
    }

    #[test]
    fn dates_are_distinct_and_newest_first() {
        let entries = vec![
            KpiEntry::new("a", KpiName::TurnDays, 5.0, day(1)),
            KpiEntry::new("a", KpiName::OccupancyLevel, 95.0, day(3)),
            KpiEntry::new("a", KpiName::TurnDays, 5.0, day(3)),
            KpiEntry::new("a", KpiName::TurnDays, 5.0, day(2)),
        ];
        let history = AssetHistory::new(entries.iter().collect(), 0);

        assert_eq!(history.latest_date(), Some(day(3)));
        assert_eq!(history.previous_date(), Some(day(2)));
    }

    #[test]
    fn logged_backlog_is_replaced_by_live_job_count() {
        let entries = vec![KpiEntry::new(
            "a",
            KpiName::MaintenanceBacklog,
            50.0,
            day(1),
        )];
        let history = AssetHistory::new(entries.iter().collect(), 3);

        let summary = history.summarize(None, &benchmarks(), &HealthPolicy::default());

        assert_eq!(summary.red_count, 0);
        assert_eq!(summary.yellow_count, 1);
        assert_eq!(summary.score, 95.0);
    }

    #[test]
    fn only_entries_on_the_target_date_count() {
        let entries = vec![
            KpiEntry::new("a", KpiName::TurnDays, 30.0, day(1)),
            KpiEntry::new("a", KpiName::TurnDays, 15.0, day(2)),
        ];
        let history = AssetHistory::new(entries.iter().collect(), 0);
        let policy = HealthPolicy::default();

        let latest = history.summarize(None, &benchmarks(), &policy);
        assert_eq!((latest.red_count, latest.yellow_count), (0, 1));

        let earlier = history.summarize(Some(day(1)), &benchmarks(), &policy);
        assert_eq!((earlier.red_count, earlier.yellow_count), (1, 0));
        assert_eq!(earlier.score, 85.0);
    }

    #[test]
    fn same_day_duplicates_are_double_counted() {
        let entries = vec![
            KpiEntry::new("a", KpiName::TurnDays, 30.0, day(1)),
            KpiEntry::new("a", KpiName::TurnDays, 30.0, day(1)),
        ];
        let history = AssetHistory::new(entries.iter().collect(), 0);

        let summary = history.summarize(None, &benchmarks(), &HealthPolicy::default());

        assert_eq!(summary.red_count, 2);
        assert_eq!(summary.score, 70.0);
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let entries = vec![
            KpiEntry::new("a", KpiName::TurnDays, f64::NAN, day(1)),
            KpiEntry::new("a", KpiName::OccupancyLevel, f64::NEG_INFINITY, day(1)),
            KpiEntry::new("a", KpiName::TurnDays, 15.0, day(1)),
        ];
        let history = AssetHistory::new(entries.iter().collect(), 0);

        let summary = history.summarize(None, &benchmarks(), &HealthPolicy::default());

        assert_eq!((summary.red_count, summary.yellow_count), (0, 1));
    }

    #[test]
    fn empty_history_scores_only_the_backlog() {
        let history = AssetHistory::new(Vec::new(), 5);

        let summary = history.summarize(None, &benchmarks(), &HealthPolicy::default());

        assert_eq!(history.latest_date(), None);
        assert_eq!((summary.red_count, summary.yellow_count), (1, 0));
        assert_eq!(summary.score, 85.0);
    }
}
