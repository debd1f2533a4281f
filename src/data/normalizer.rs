//! Data Normalizer Module
//! Drops incomplete rows and coerces thousands-grouped numerals into typed records.

use crate::config::ColumnSchema;
use crate::data::record::{Dataset, NumericField, Record};
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Thousands separator used by the registry extract.
pub const THOUSANDS_SEPARATOR: char = ',';

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing expected columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
    #[error("Malformed numeric value {value:?} in column '{field}' at row {row} ({region})")]
    MalformedNumericField {
        field: String,
        row: usize,
        region: String,
        value: String,
    },
    #[error("Duplicate region key '{region}' at row {row}")]
    DuplicateRegion { region: String, row: usize },
}

/// Strip thousands separators and parse. Rejects negative and non-finite values.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Turns a raw string table into a typed [`Dataset`].
pub struct Normalizer<'a> {
    schema: &'a ColumnSchema,
}

impl<'a> Normalizer<'a> {
    pub fn new(schema: &'a ColumnSchema) -> Self {
        Self { schema }
    }

    /// Header names the schema expects but the frame lacks.
    pub fn missing_columns(&self, df: &DataFrame) -> Vec<String> {
        let present: HashSet<&str> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        self.schema
            .header()
            .into_iter()
            .filter(|name| !present.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Remove every row holding a missing value in any column.
    ///
    /// Nulls and empty strings (including a quoted `""`) both count as missing.
    /// Returns the remaining frame together with the original index of each kept row.
    pub fn drop_incomplete_rows(df: &DataFrame) -> Result<(DataFrame, Vec<usize>), NormalizeError> {
        let mut mask = BooleanChunked::full("complete".into(), true, df.height());
        for column in df.get_columns() {
            let present = match column.str() {
                Ok(text) => text
                    .into_iter()
                    .map(|v| v.is_some_and(|s| !s.is_empty()))
                    .collect::<BooleanChunked>(),
                Err(_) => column.is_not_null(),
            };
            mask = &mask & &present;
        }

        let kept: Vec<usize> = (&mask)
            .into_iter()
            .enumerate()
            .filter_map(|(i, keep)| (keep == Some(true)).then_some(i))
            .collect();
        let cleaned = df.filter(&mask)?;

        let dropped = df.height() - cleaned.height();
        if dropped > 0 {
            warn!(dropped, "dropped rows with missing values");
        }
        Ok((cleaned, kept))
    }

    /// Schema check, row drop, then numeric coercion. Fails on the first bad value.
    pub fn normalize(&self, df: &DataFrame) -> Result<Dataset, NormalizeError> {
        let missing = self.missing_columns(df);
        if !missing.is_empty() {
            return Err(NormalizeError::Schema { missing });
        }

        let (cleaned, kept) = Self::drop_incomplete_rows(df)?;

        let region_col = cleaned
            .column(&self.schema.region)?
            .cast(&DataType::String)?;
        let regions: Vec<String> = region_col
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();

        let mut values = vec![[0.0f64; 6]; cleaned.height()];
        for (slot, field) in NumericField::ALL.into_iter().enumerate() {
            let column_name = self.schema.column(field);
            let text_col = cleaned.column(column_name)?.cast(&DataType::String)?;
            for (row, text) in text_col.str()?.into_iter().enumerate() {
                let text = text.unwrap_or_default();
                values[row][slot] = parse_number(text).ok_or_else(|| {
                    NormalizeError::MalformedNumericField {
                        field: column_name.to_string(),
                        row: kept[row] + 1,
                        region: regions[row].clone(),
                        value: text.to_string(),
                    }
                })?;
            }
        }

        let mut seen = HashSet::with_capacity(regions.len());
        let mut records = Vec::with_capacity(regions.len());
        for (row, (region, vals)) in regions.into_iter().zip(values).enumerate() {
            if !seen.insert(region.clone()) {
                return Err(NormalizeError::DuplicateRegion {
                    region,
                    row: kept[row] + 1,
                });
            }
            records.push(Record::from_values(region, vals));
        }

        debug!(rows = records.len(), "normalized registry table");
        Ok(Dataset::from_records(records))
    }
}
