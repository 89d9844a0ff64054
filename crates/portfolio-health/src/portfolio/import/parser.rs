use crate::portfolio::domain::{parse_kpi_date, Asset, AssetId, Job, JobStatus, KpiEntry, KpiName};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

// Header line is row 1.
const FIRST_DATA_ROW: usize = 2;

fn reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub(crate) fn parse_assets<R: Read>(input: R) -> Result<Vec<Asset>, csv::Error> {
    let mut assets = Vec::new();

    for (index, record) in reader(input).deserialize::<AssetRow>().enumerate() {
        let row = record?;
        if row.id.is_empty() {
            warn!(row = index + FIRST_DATA_ROW, "skipping asset row without an id");
            continue;
        }

        let units = match row.units.as_deref().map(str::parse::<u32>) {
            Some(Ok(units)) => units,
            Some(Err(_)) => {
                warn!(row = index + FIRST_DATA_ROW, asset = %row.id, "unit count unreadable, assuming 1");
                1
            }
            None => 1,
        };

        assets.push(Asset {
            id: AssetId(row.id),
            name: row.name.unwrap_or_else(|| "Unknown Asset".to_string()),
            address: row.address.unwrap_or_default(),
            units,
            manager: row.manager.unwrap_or_default(),
        });
    }

    Ok(assets)
}

pub(crate) fn parse_kpi_entries<R: Read>(input: R) -> Result<Vec<KpiEntry>, csv::Error> {
    let mut entries = Vec::new();

    for (index, record) in reader(input).deserialize::<KpiRow>().enumerate() {
        let row = record?;
        let line = index + FIRST_DATA_ROW;

        if row.asset_id.is_empty() {
            warn!(row = line, "skipping KPI row without an asset id");
            continue;
        }

        let value = match row.value.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                warn!(row = line, value = %row.value, "skipping KPI row with a non-numeric value");
                continue;
            }
        };

        let Some(date) = parse_kpi_date(&row.date) else {
            warn!(row = line, date = %row.date, "skipping KPI row with an unreadable date");
            continue;
        };

        entries.push(KpiEntry {
            id: row.id,
            asset_id: AssetId(row.asset_id),
            kpi_name: KpiName::parse(&row.kpi_name),
            value,
            date,
            commentary: row.commentary,
        });
    }

    Ok(entries)
}

pub(crate) fn parse_jobs<R: Read>(input: R) -> Result<Vec<Job>, csv::Error> {
    let mut jobs = Vec::new();

    for (index, record) in reader(input).deserialize::<JobRow>().enumerate() {
        let row = record?;

        let Some(status) = JobStatus::parse(&row.status) else {
            warn!(
                row = index + FIRST_DATA_ROW,
                job = %row.id,
                status = %row.status,
                "skipping job with an unknown status"
            );
            continue;
        };

        jobs.push(Job {
            id: row.id,
            property_id: AssetId(row.property_id),
            status,
        });
    }

    Ok(jobs)
}

#[derive(Debug, Deserialize)]
struct AssetRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    units: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    manager: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KpiRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    asset_id: String,
    kpi_name: String,
    value: String,
    date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    commentary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobRow {
    id: String,
    property_id: String,
    status: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
