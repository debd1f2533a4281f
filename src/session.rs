//! Dashboard Session
//! Owns one normalized dataset and answers every selection query against it.

use crate::config::{ColumnSchema, DashboardConfig};
use crate::data::{
    write_csv, DataLoader, DataSource, Dataset, NumericField, Normalizer, RawTable, Record,
};
use crate::error::DashboardError;
use crate::views::{self, RatioPoint, SexSplitRow, Totals};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Build a loader from config: resolved encoding plus candidate paths.
pub fn loader_from_config(config: &DashboardConfig) -> Result<DataLoader, DashboardError> {
    let encoding = config.resolve_encoding()?;
    Ok(DataLoader::new(encoding, config.candidate_paths()))
}

/// One user's dataset for the lifetime of a dashboard session.
///
/// Uploading a new file builds a new session; the old one is dropped wholesale.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    schema: ColumnSchema,
    source: DataSource,
}

impl Session {
    /// Normalize a raw table into a session.
    pub fn from_raw(raw: RawTable, schema: ColumnSchema) -> Result<Self, DashboardError> {
        let dataset = Normalizer::new(&schema).normalize(&raw.frame)?;
        info!(source = %raw.source, rows = dataset.len(), "session ready");
        Ok(Self {
            dataset,
            schema,
            source: raw.source,
        })
    }

    /// Load the configured file from the first existing candidate path.
    pub fn open_default(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let raw = loader_from_config(config)?.load_default()?;
        Self::from_raw(raw, config.schema())
    }

    /// Load a specific file with the configured encoding.
    pub fn open_path(config: &DashboardConfig, path: &Path) -> Result<Self, DashboardError> {
        let raw = loader_from_config(config)?.load_path(path)?;
        Self::from_raw(raw, config.schema())
    }

    /// Load from an upload stream. `None` means nothing was uploaded.
    pub fn open_upload<R: Read>(
        config: &DashboardConfig,
        upload: Option<(&str, R)>,
    ) -> Result<Self, DashboardError> {
        let raw = loader_from_config(config)?.load_upload(upload)?;
        Self::from_raw(raw, config.schema())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn regions(&self) -> Vec<&str> {
        self.dataset.regions()
    }

    pub fn select_region(&self, region: &str) -> Vec<&Record> {
        views::select_region(&self.dataset, region)
    }

    pub fn top_n(&self, field: NumericField, n: usize, ascending: bool) -> Vec<&Record> {
        views::top_n(&self.dataset, field, n, ascending)
    }

    pub fn sorted_by(&self, field: NumericField, ascending: bool) -> Vec<&Record> {
        views::sorted_by(&self.dataset, field, ascending)
    }

    pub fn totals(&self) -> Totals {
        views::totals(&self.dataset)
    }

    pub fn sex_split(&self, region: &str) -> Vec<SexSplitRow> {
        views::sex_split(&self.select_region(region))
    }

    pub fn ratio_distribution(&self) -> Vec<RatioPoint> {
        views::ratio_distribution(&self.dataset)
    }

    /// Write `rows` as UTF-8 CSV with this session's header.
    pub fn export_csv<W: Write>(&self, rows: &[&Record], writer: W) -> Result<(), DashboardError> {
        write_csv(rows.iter().copied(), &self.schema, writer)?;
        Ok(())
    }

    /// Write `rows` to a file as UTF-8 CSV.
    pub fn export_csv_file(&self, rows: &[&Record], path: &Path) -> Result<(), DashboardError> {
        let file = File::create(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.export_csv(rows, BufWriter::new(file))?;
        info!(path = %path.display(), rows = rows.len(), "exported table");
        Ok(())
    }
}
