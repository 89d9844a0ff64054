use super::policy::HealthPolicy;
use crate::portfolio::domain::{Direction, KpiStatus};

/// Improvement is checked first; a regression or a score under the watch
/// floor both mean `Watch`.
pub(crate) fn direction(current: f64, baseline: f64, policy: &HealthPolicy) -> Direction {
    if current > baseline + policy.trend_epsilon {
        Direction::Improving
    } else if current < policy.watch_floor || current < baseline - policy.trend_epsilon {
        Direction::Watch
    } else {
        Direction::Stable
    }
}

pub(crate) fn status_band(score: f64, policy: &HealthPolicy) -> KpiStatus {
    if score < policy.red_band_below {
        KpiStatus::Red
    } else if score < policy.yellow_band_below {
        KpiStatus::Yellow
    } else {
        KpiStatus::Green
    }
}
