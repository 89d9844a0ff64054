use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use portfolio_health::plans::PlanTier;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Strict at the command line; the lenient fallback is for stored profiles.
pub(crate) fn parse_plan(raw: &str) -> Result<PlanTier, String> {
    let tier = PlanTier::parse(raw);
    if tier.token().eq_ignore_ascii_case(raw.trim().replace([' ', '-'], "_").as_str()) {
        Ok(tier)
    } else {
        Err(format!(
            "unknown plan '{raw}' (expected one of FREE, GROWTH, PRO, PRO_MAX)"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plan_rejects_unknown_tiers() {
        assert_eq!(parse_plan("pro_max"), Ok(PlanTier::ProMax));
        assert_eq!(parse_plan("Growth"), Ok(PlanTier::Growth));
        assert!(parse_plan("enterprise").is_err());
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date("2025-05-01").is_ok());
        let err = parse_date("05/01/2025").expect_err("bad format");
        assert!(err.contains("05/01/2025"));
    }
}
