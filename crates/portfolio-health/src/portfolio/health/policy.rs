use serde::{Deserialize, Serialize};

/// Scoring weights and cutoffs applied by the health engine.
///
/// The band cutoffs and the watch floor are separate knobs even though both
/// default to 80.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthPolicy {
    pub red_penalty: f64,
    pub yellow_penalty: f64,
    /// Scores below this band RED.
    pub red_band_below: f64,
    /// Scores below this (and not RED) band YELLOW.
    pub yellow_band_below: f64,
    /// Scores below this are always on the watch list.
    pub watch_floor: f64,
    /// Tolerance applied when comparing current and baseline scores.
    pub trend_epsilon: f64,
}

impl HealthPolicy {
    pub const PERFECT_SCORE: f64 = 100.0;

    pub fn score(&self, red_count: u32, yellow_count: u32) -> f64 {
        let penalty =
            f64::from(red_count) * self.red_penalty + f64::from(yellow_count) * self.yellow_penalty;
        (Self::PERFECT_SCORE - penalty).max(0.0)
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            red_penalty: 15.0,
            yellow_penalty: 5.0,
            red_band_below: 60.0,
            yellow_band_below: 80.0,
            watch_floor: 80.0,
            trend_epsilon: 0.1,
        }
    }
}
