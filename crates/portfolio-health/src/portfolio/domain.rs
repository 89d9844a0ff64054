use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier shared by assets, their KPI entries (`asset_id`) and jobs (`property_id`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Named metric tracked per asset. Unknown names are preserved as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KpiName {
    RentCollected,
    TurnDays,
    TurnCost,
    MaintenanceBacklog,
    ExpenseTrend,
    OccupancyLevel,
    Custom(String),
}

impl KpiName {
    pub fn known() -> [Self; 6] {
        [
            Self::RentCollected,
            Self::TurnDays,
            Self::TurnCost,
            Self::MaintenanceBacklog,
            Self::ExpenseTrend,
            Self::OccupancyLevel,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::RentCollected => "Rent Collected %",
            Self::TurnDays => "Turn Days",
            Self::TurnCost => "Turn Cost",
            Self::MaintenanceBacklog => "Maintenance Backlog",
            Self::ExpenseTrend => "Expense Trend",
            Self::OccupancyLevel => "Occupancy Level",
            Self::Custom(name) => name,
        }
    }

    /// Labels match exactly; anything else is kept verbatim as `Custom`.
    pub fn parse(raw: &str) -> Self {
        Self::known()
            .into_iter()
            .find(|known| known.label() == raw)
            .unwrap_or_else(|| Self::Custom(raw.to_string()))
    }
}

impl fmt::Display for KpiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for KpiName {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for KpiName {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<KpiName> for String {
    fn from(value: KpiName) -> Self {
        match value {
            KpiName::Custom(name) => name,
            known => known.label().to_string(),
        }
    }
}

/// Band assigned to a single metric or to an asset's overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KpiStatus {
    Green,
    Yellow,
    Red,
}

impl KpiStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Green, Self::Yellow, Self::Red]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }
}

/// Trend of an asset's health score against its previous logging date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Improving,
    Stable,
    Watch,
}

impl Direction {
    pub const fn ordered() -> [Self; 3] {
        [Self::Improving, Self::Stable, Self::Watch]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::Stable => "Stable",
            Self::Watch => "Watch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Reported,
    AiClassified,
    ContractorAssigned,
    InProgress,
    PendingApproval,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Reported,
            Self::AiClassified,
            Self::ContractorAssigned,
            Self::InProgress,
            Self::PendingApproval,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Reported => "REPORTED",
            Self::AiClassified => "AI_CLASSIFIED",
            Self::ContractorAssigned => "CONTRACTOR_ASSIGNED",
            Self::InProgress => "IN_PROGRESS",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Open jobs count toward an asset's maintenance backlog.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().replace([' ', '-'], "_").to_ascii_uppercase();
        Self::ordered()
            .into_iter()
            .find(|status| status.token() == normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub units: u32,
    #[serde(default)]
    pub manager: String,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AssetId::new(id),
            name: name.into(),
            address: String::new(),
            units: 1,
            manager: String::new(),
        }
    }
}

/// One measurement of one metric for one asset on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub asset_id: AssetId,
    pub kpi_name: KpiName,
    pub value: f64,
    #[serde(deserialize_with = "deserialize_kpi_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

impl KpiEntry {
    pub fn new(
        asset_id: impl Into<String>,
        kpi_name: impl Into<KpiName>,
        value: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            asset_id: AssetId::new(asset_id),
            kpi_name: kpi_name.into(),
            value,
            date,
            commentary: None,
        }
    }
}

/// Work order; only the property link and status feed the health engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub property_id: AssetId,
    pub status: JobStatus,
}

impl Job {
    pub fn new(id: impl Into<String>, property_id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            property_id: AssetId::new(property_id),
            status,
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full timestamp, keeping the calendar date.
pub fn parse_kpi_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn deserialize_kpi_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_kpi_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("failed to parse '{raw}' as a KPI date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_name_round_trips_labels_and_keeps_unknown_names() {
        assert_eq!(KpiName::parse("Turn Days"), KpiName::TurnDays);
        assert_eq!(KpiName::parse("Rent Collected %"), KpiName::RentCollected);
        assert_eq!(
            KpiName::parse("Pool Uptime"),
            KpiName::Custom("Pool Uptime".to_string())
        );
        assert_eq!(String::from(KpiName::MaintenanceBacklog), "Maintenance Backlog");
    }

    #[test]
    fn kpi_name_labels_are_case_sensitive() {
        assert_eq!(
            KpiName::parse("turn days"),
            KpiName::Custom("turn days".to_string())
        );
        assert_eq!(
            KpiName::parse("maintenance backlog"),
            KpiName::Custom("maintenance backlog".to_string())
        );
        assert_eq!(
            KpiName::parse(" Turn Days"),
            KpiName::Custom(" Turn Days".to_string())
        );
    }

    #[test]
    fn only_completed_and_cancelled_jobs_are_closed() {
        let open: Vec<JobStatus> = JobStatus::ordered()
            .into_iter()
            .filter(|status| status.is_open())
            .collect();
        assert_eq!(open.len(), 5);
        assert!(!JobStatus::Completed.is_open());
        assert!(!JobStatus::Cancelled.is_open());
    }

    #[test]
    fn job_status_parses_store_tokens() {
        assert_eq!(JobStatus::parse("IN_PROGRESS"), Some(JobStatus::InProgress));
        assert_eq!(
            JobStatus::parse("pending approval"),
            Some(JobStatus::PendingApproval)
        );
        assert_eq!(JobStatus::parse("ARCHIVED"), None);
    }

    #[test]
    fn kpi_dates_accept_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        assert_eq!(parse_kpi_date("2025-03-01"), Some(expected));
        assert_eq!(parse_kpi_date("2025-03-01T14:30:00.000Z"), Some(expected));
        assert_eq!(parse_kpi_date("2025-03-01T14:30:00"), Some(expected));
        assert_eq!(parse_kpi_date("March 1st"), None);
    }

    #[test]
    fn kpi_entry_deserializes_from_store_json() {
        let entry: KpiEntry = serde_json::from_value(serde_json::json!({
            "asset_id": "a-1",
            "kpi_name": "Occupancy Level",
            "value": 94.5,
            "date": "2025-03-01"
        }))
        .expect("entry parses");

        assert_eq!(entry.kpi_name, KpiName::OccupancyLevel);
        assert_eq!(entry.asset_id, AssetId::from("a-1"));
        assert!(entry.commentary.is_none());
    }
}
