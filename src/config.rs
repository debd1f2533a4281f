//! Dashboard Configuration
//! File name, search locations, encoding and column naming for the registry extract.

use crate::data::NumericField;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "REGISTRY_DASHBOARD_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown text encoding label: {0}")]
    UnknownEncoding(String),
}

/// User-adjustable settings. Missing JSON keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Column prefix, e.g. "2025년09월".
    pub period: String,
    pub region_column: String,
    pub file_name: String,
    /// Directories searched in order for `file_name`.
    pub search_dirs: Vec<PathBuf>,
    /// WHATWG encoding label of the source file.
    pub encoding: String,
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            period: "2025년09월".to_string(),
            region_column: "행정구역".to_string(),
            file_name: "202509_202509_jumindeungrogingumicsedaehyeonhwang_weolgan.csv".to_string(),
            search_dirs: vec![
                PathBuf::from("."),
                PathBuf::from("data"),
                PathBuf::from("pages"),
            ],
            encoding: "euc-kr".to_string(),
            top_n: 10,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Config from `REGISTRY_DASHBOARD_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Candidate paths for the dataset, in priority order.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(&self.file_name))
            .collect()
    }

    pub fn resolve_encoding(&self) -> Result<&'static Encoding, ConfigError> {
        Encoding::for_label(self.encoding.as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(self.encoding.clone()))
    }

    pub fn schema(&self) -> ColumnSchema {
        ColumnSchema::new(&self.region_column, &self.period)
    }
}

/// Exact header names agreed between loader, normalizer and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub region: String,
    numeric: [String; 6],
}

impl ColumnSchema {
    pub fn new(region_column: &str, period: &str) -> Self {
        let numeric = NumericField::ALL.map(|f| {
            if period.is_empty() {
                f.column_suffix().to_string()
            } else {
                format!("{}_{}", period, f.column_suffix())
            }
        });
        Self {
            region: region_column.to_string(),
            numeric,
        }
    }

    /// Header text for a numeric field.
    pub fn column(&self, field: NumericField) -> &str {
        &self.numeric[field.index()]
    }

    /// Region column followed by the six numeric columns.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.region.as_str())
            .chain(self.numeric.iter().map(String::as_str))
            .collect()
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        DashboardConfig::default().schema()
    }
}
