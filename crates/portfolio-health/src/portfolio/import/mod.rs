mod parser;

use super::domain::{Asset, Job, KpiEntry};
use super::snapshot::PortfolioSnapshot;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Failure reading a portfolio export. Row-level problems are skipped with a
/// warning instead.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads a [`PortfolioSnapshot`] from data store CSV exports.
pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn from_paths(
        assets: &Path,
        kpi_entries: &Path,
        jobs: Option<&Path>,
    ) -> Result<PortfolioSnapshot, ImportError> {
        let assets = Self::assets(open(assets)?)?;
        let kpi_entries = Self::kpi_entries(open(kpi_entries)?)?;
        let jobs = match jobs {
            Some(path) => Self::jobs(open(path)?)?,
            None => Vec::new(),
        };

        Ok(PortfolioSnapshot::new(assets, kpi_entries, jobs))
    }

    pub fn assets<R: Read>(reader: R) -> Result<Vec<Asset>, ImportError> {
        Ok(parser::parse_assets(reader)?)
    }

    pub fn kpi_entries<R: Read>(reader: R) -> Result<Vec<KpiEntry>, ImportError> {
        Ok(parser::parse_kpi_entries(reader)?)
    }

    pub fn jobs<R: Read>(reader: R) -> Result<Vec<Job>, ImportError> {
        Ok(parser::parse_jobs(reader)?)
    }
}

fn open(path: &Path) -> Result<std::fs::File, ImportError> {
    std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
