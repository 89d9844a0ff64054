use super::domain::{KpiName, KpiStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkUnit {
    Percentage,
    Days,
    Currency,
    #[default]
    Count,
}

/// Green/yellow cutoffs and directionality for one KPI name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub name: KpiName,
    pub green_threshold: f64,
    pub yellow_threshold: f64,
    pub higher_is_better: bool,
    #[serde(default)]
    pub unit: BenchmarkUnit,
}

impl Benchmark {
    pub fn higher_is_better(
        name: KpiName,
        green_threshold: f64,
        yellow_threshold: f64,
        unit: BenchmarkUnit,
    ) -> Self {
        Self {
            name,
            green_threshold,
            yellow_threshold,
            higher_is_better: true,
            unit,
        }
    }

    pub fn lower_is_better(
        name: KpiName,
        green_threshold: f64,
        yellow_threshold: f64,
        unit: BenchmarkUnit,
    ) -> Self {
        Self {
            name,
            green_threshold,
            yellow_threshold,
            higher_is_better: false,
            unit,
        }
    }

    /// Thresholds are inclusive on the good side.
    pub fn classify(&self, value: f64) -> KpiStatus {
        if self.higher_is_better {
            if value >= self.green_threshold {
                KpiStatus::Green
            } else if value >= self.yellow_threshold {
                KpiStatus::Yellow
            } else {
                KpiStatus::Red
            }
        } else if value <= self.green_threshold {
            KpiStatus::Green
        } else if value <= self.yellow_threshold {
            KpiStatus::Yellow
        } else {
            KpiStatus::Red
        }
    }
}

/// Reference thresholds keyed by KPI name.
///
/// Lookups that find no row classify as [`KpiStatus::Green`]: a metric nobody
/// has benchmarked never drags an asset's score down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    rows: Vec<Benchmark>,
}

impl BenchmarkTable {
    pub fn new(rows: Vec<Benchmark>) -> Self {
        Self { rows }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Benchmark::higher_is_better(
                KpiName::RentCollected,
                98.0,
                95.0,
                BenchmarkUnit::Percentage,
            ),
            Benchmark::lower_is_better(KpiName::TurnDays, 10.0, 20.0, BenchmarkUnit::Days),
            Benchmark::lower_is_better(KpiName::TurnCost, 1500.0, 3000.0, BenchmarkUnit::Currency),
            Benchmark::lower_is_better(
                KpiName::MaintenanceBacklog,
                3.0,
                6.0,
                BenchmarkUnit::Count,
            ),
            Benchmark::lower_is_better(
                KpiName::ExpenseTrend,
                2.0,
                5.0,
                BenchmarkUnit::Percentage,
            ),
            Benchmark::higher_is_better(
                KpiName::OccupancyLevel,
                95.0,
                90.0,
                BenchmarkUnit::Percentage,
            ),
        ])
    }

    pub fn rows(&self) -> &[Benchmark] {
        &self.rows
    }

    /// First row with a matching name wins.
    pub fn get(&self, name: &KpiName) -> Option<&Benchmark> {
        self.rows.iter().find(|row| &row.name == name)
    }

    pub fn classify(&self, name: &KpiName, value: f64) -> KpiStatus {
        self.get(name)
            .map(|benchmark| benchmark.classify(value))
            .unwrap_or(KpiStatus::Green)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupancy_table() -> BenchmarkTable {
        BenchmarkTable::new(vec![
            Benchmark::higher_is_better(
                KpiName::OccupancyLevel,
                90.0,
                70.0,
                BenchmarkUnit::Percentage,
            ),
            Benchmark::lower_is_better(KpiName::TurnDays, 10.0, 20.0, BenchmarkUnit::Days),
        ])
    }

    #[test]
    fn higher_is_better_bands() {
        let table = occupancy_table();
        assert_eq!(table.classify(&KpiName::OccupancyLevel, 95.0), KpiStatus::Green);
        assert_eq!(table.classify(&KpiName::OccupancyLevel, 80.0), KpiStatus::Yellow);
        assert_eq!(table.classify(&KpiName::OccupancyLevel, 50.0), KpiStatus::Red);
    }

    #[test]
    fn lower_is_better_bands() {
        let table = occupancy_table();
        assert_eq!(table.classify(&KpiName::TurnDays, 5.0), KpiStatus::Green);
        assert_eq!(table.classify(&KpiName::TurnDays, 15.0), KpiStatus::Yellow);
        assert_eq!(table.classify(&KpiName::TurnDays, 30.0), KpiStatus::Red);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let table = occupancy_table();
        assert_eq!(table.classify(&KpiName::OccupancyLevel, 90.0), KpiStatus::Green);
        assert_eq!(table.classify(&KpiName::OccupancyLevel, 70.0), KpiStatus::Yellow);
        assert_eq!(table.classify(&KpiName::TurnDays, 10.0), KpiStatus::Green);
        assert_eq!(table.classify(&KpiName::TurnDays, 20.0), KpiStatus::Yellow);
    }

    #[test]
    fn missing_benchmark_fails_open() {
        let table = occupancy_table();
        assert_eq!(table.classify(&KpiName::TurnCost, 1_000_000.0), KpiStatus::Green);
        assert_eq!(
            table.classify(&KpiName::Custom("Pool Uptime".to_string()), -5.0),
            KpiStatus::Green
        );
        assert_eq!(
            BenchmarkTable::default().classify(&KpiName::TurnDays, 99.0),
            KpiStatus::Green
        );
    }

    #[test]
    fn standard_table_covers_every_known_kpi() {
        let table = BenchmarkTable::standard();
        for name in KpiName::known() {
            assert!(table.get(&name).is_some(), "missing benchmark for {name}");
        }
        assert_eq!(table.classify(&KpiName::MaintenanceBacklog, 0.0), KpiStatus::Green);
    }

    #[test]
    fn table_deserializes_from_json_rows() {
        let table: BenchmarkTable = serde_json::from_value(serde_json::json!([
            {
                "name": "Turn Days",
                "green_threshold": 7.0,
                "yellow_threshold": 14.0,
                "higher_is_better": false,
                "unit": "days"
            }
        ]))
        .expect("table parses");

        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.classify(&KpiName::TurnDays, 10.0), KpiStatus::Yellow);
    }
}
