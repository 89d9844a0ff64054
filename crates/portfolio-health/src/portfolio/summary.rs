use super::domain::{AssetId, Direction, KpiStatus};
use super::health::{AssetHealth, PortfolioHealth};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct BandCountEntry {
    pub band: KpiStatus,
    pub band_label: &'static str,
    pub assets: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectionCountEntry {
    pub direction: Direction,
    pub direction_label: &'static str,
    pub assets: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchListEntry {
    pub asset_id: AssetId,
    pub health_score: f64,
    pub status_band: KpiStatus,
    pub direction: Direction,
}

/// Dashboard roll-up of a portfolio health map.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub asset_count: usize,
    pub average_score: f64,
    pub bands: Vec<BandCountEntry>,
    pub directions: Vec<DirectionCountEntry>,
    pub red_metrics: u32,
    pub yellow_metrics: u32,
    /// Assets off GREEN or trending to watch, weakest first.
    pub watch_list: Vec<WatchListEntry>,
}

impl PortfolioSummary {
    pub fn from_health(health: &PortfolioHealth) -> Self {
        let asset_count = health.len();
        let average_score = if asset_count == 0 {
            0.0
        } else {
            health.values().map(|entry| entry.health_score).sum::<f64>() / asset_count as f64
        };

        let bands = KpiStatus::ordered()
            .into_iter()
            .map(|band| BandCountEntry {
                band,
                band_label: band.label(),
                assets: health
                    .values()
                    .filter(|entry| entry.status_band == band)
                    .count(),
            })
            .collect();

        let directions = Direction::ordered()
            .into_iter()
            .map(|direction| DirectionCountEntry {
                direction,
                direction_label: direction.label(),
                assets: health
                    .values()
                    .filter(|entry| entry.direction == direction)
                    .count(),
            })
            .collect();

        let mut watch_list: Vec<WatchListEntry> = health
            .values()
            .filter(|entry| needs_attention(entry))
            .map(|entry| WatchListEntry {
                asset_id: entry.asset_id.clone(),
                health_score: entry.health_score,
                status_band: entry.status_band,
                direction: entry.direction,
            })
            .collect();
        watch_list.sort_by(|a, b| {
            a.health_score
                .partial_cmp(&b.health_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.asset_id.cmp(&b.asset_id))
        });

        Self {
            asset_count,
            average_score,
            bands,
            directions,
            red_metrics: health.values().map(|entry| entry.red_count).sum(),
            yellow_metrics: health.values().map(|entry| entry.yellow_count).sum(),
            watch_list,
        }
    }

    pub fn band_count(&self, band: KpiStatus) -> usize {
        self.bands
            .iter()
            .find(|entry| entry.band == band)
            .map(|entry| entry.assets)
            .unwrap_or(0)
    }

    pub fn direction_count(&self, direction: Direction) -> usize {
        self.directions
            .iter()
            .find(|entry| entry.direction == direction)
            .map(|entry| entry.assets)
            .unwrap_or(0)
    }
}

fn needs_attention(entry: &AssetHealth) -> bool {
    entry.status_band != KpiStatus::Green || entry.direction == Direction::Watch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(id: &str, score: f64, band: KpiStatus, direction: Direction) -> AssetHealth {
        AssetHealth {
            asset_id: AssetId::from(id),
            health_score: score,
            red_count: if band == KpiStatus::Red { 3 } else { 0 },
            yellow_count: 1,
            status_band: band,
            direction,
        }
    }

    #[test]
    fn empty_portfolio_has_zero_average() {
        let summary = PortfolioSummary::from_health(&PortfolioHealth::new());
        assert_eq!(summary.asset_count, 0);
        assert_eq!(summary.average_score, 0.0);
        assert!(summary.watch_list.is_empty());
        assert_eq!(summary.bands.len(), 3);
    }

    #[test]
    fn rolls_up_bands_directions_and_watch_list() {
        let mut map = PortfolioHealth::new();
        for entry in [
            health("a", 100.0, KpiStatus::Green, Direction::Stable),
            health("b", 85.0, KpiStatus::Green, Direction::Watch),
            health("c", 40.0, KpiStatus::Red, Direction::Watch),
            health("d", 75.0, KpiStatus::Yellow, Direction::Improving),
        ] {
            map.insert(entry.asset_id.clone(), entry);
        }

        let summary = PortfolioSummary::from_health(&map);

        assert_eq!(summary.asset_count, 4);
        assert_eq!(summary.average_score, 75.0);
        assert_eq!(summary.band_count(KpiStatus::Green), 2);
        assert_eq!(summary.band_count(KpiStatus::Red), 1);
        assert_eq!(summary.direction_count(Direction::Watch), 2);
        assert_eq!(summary.red_metrics, 3);
        assert_eq!(summary.yellow_metrics, 4);

        let order: Vec<&str> = summary
            .watch_list
            .iter()
            .map(|entry| entry.asset_id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "d", "b"]);
    }
}
